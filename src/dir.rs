#[cfg(feature = "poem")]
use poem_openapi::Object;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::Entry;
use crate::FileStat;
use crate::Path;

/// Represents a file or directory entry of one listed level, including its
/// name and associated metadata.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(Object))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct DirectoryEntry {
    /// Name of the file or directory.
    pub name: String,
    /// Metadata of the file or directory.
    pub stats: FileStat,
}

impl From<&Entry> for DirectoryEntry {
    fn from(entry: &Entry) -> Self {
        DirectoryEntry {
            name: entry.name.clone(),
            stats: FileStat::from(entry),
        }
    }
}

/// Represents the visible contents of a single directory level, ordered by
/// the vault's resolved sort policy with subdirectories listed before
/// files.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(Object))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct Directory {
    /// The listed directory, relative to the vault root.
    pub current_path: Path,
    /// The ordered files and directories in the current path.
    pub items: Vec<DirectoryEntry>,
}

impl Directory {
    /// An empty listing for `current_path`.
    pub fn empty(current_path: Path) -> Self {
        Directory {
            current_path,
            items: Vec::new(),
        }
    }
}
