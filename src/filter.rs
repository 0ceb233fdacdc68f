//! The hidden-entry rule shared by every listing surface.
//!
//! An entry is hidden when its name starts with a dot. The nested tree
//! re-checks the rule at every level; the flat list additionally excludes a
//! file when any segment between the root and the file is hidden.

use crate::Path;

/// Returns true if `name` is a hidden entry.
pub(crate) fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Returns true if any segment of `path` is hidden.
///
/// Used to reject client-supplied relative paths that point inside a hidden
/// directory, which the walks themselves never enter.
pub(crate) fn has_hidden_component(path: &Path) -> bool {
    path.components().any(is_hidden)
}
