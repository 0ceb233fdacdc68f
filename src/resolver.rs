//! Sort-policy resolution over the vault's configuration documents.

use std::path::Path as StdPath;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::fs_access::FsAccess;
use crate::manual::ManualOrder;

/// Vault-relative location of the primary configuration document.
const APP_CONFIG: &str = ".obsidian/app.json";

/// Vault-relative location of the workspace-state document.
const WORKSPACE: &str = ".obsidian/workspace.json";

/// Section of the primary config holding explorer settings.
const EXPLORER_SECTION: &str = "fileExplorer";

/// Sort-order field name, shared by both documents.
const SORT_FIELD: &str = "sortOrder";

/// Workspace field listing the UI panes.
const PANES_FIELD: &str = "panes";

/// Pane type discriminator of the file explorer.
const EXPLORER_PANE_TYPE: &str = "file-explorer";

/// The ordering policy governing one whole tree build.
///
/// Resolved once per top-level call and immutable afterwards. Serialized
/// forms are the verbatim strings the vault documents use.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Hash, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortPolicy {
    /// Filesystem iteration order, unmodified.
    #[default]
    Natural,
    /// Case-insensitive lexicographic ascending by name.
    Alphabetical,
    /// Descending by modification time.
    ByModifiedTime,
    /// Descending by creation time.
    ByCreatedTime,
    /// Descending by byte size; directories count as zero bytes.
    ByFileSize,
    /// The plugin-persisted per-directory order.
    Manual,
}

impl SortPolicy {
    /// Maps a declared sort-order string to a policy. Only the verbatim
    /// document values are recognized; anything else falls back to natural.
    pub fn parse(declared: &str) -> SortPolicy {
        match declared {
            "natural" => SortPolicy::Natural,
            "alphabetical" => SortPolicy::Alphabetical,
            "byModifiedTime" => SortPolicy::ByModifiedTime,
            "byCreatedTime" => SortPolicy::ByCreatedTime,
            "byFileSize" => SortPolicy::ByFileSize,
            "manual" => SortPolicy::Manual,
            other => {
                log::debug!("unrecognized sort order {other:?}, falling back to natural");
                SortPolicy::Natural
            }
        }
    }

    /// True for the policies that compare timestamps or sizes and therefore
    /// need entry metadata before sorting.
    pub(crate) fn needs_meta(&self) -> bool {
        matches!(
            self,
            SortPolicy::ByModifiedTime | SortPolicy::ByCreatedTime | SortPolicy::ByFileSize
        )
    }
}

/// Outcome of one policy resolution: the policy plus the manual-order map
/// (empty unless the policy is manual).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOrder {
    /// The policy every directory level of this build sorts by.
    pub policy: SortPolicy,
    /// Manual per-directory orders; consulted only under `Manual`.
    pub manual: ManualOrder,
}

/// Determines the effective sort policy for a vault.
///
/// Priority chain, first success wins: non-empty manual-order data, then an
/// explicit sort field in the primary config (flat, then under the explorer
/// section), then the file-explorer pane of the workspace document, then
/// natural. Unreadable or malformed documents are logged and skipped, never
/// raised.
pub async fn resolve<F: FsAccess>(fs: &F, vault_root: &StdPath) -> ResolvedOrder {
    let manual = ManualOrder::load(fs, vault_root).await;
    if !manual.is_empty() {
        log::debug!("sort order resolved from manual order data");
        return ResolvedOrder {
            policy: SortPolicy::Manual,
            manual,
        };
    }

    if let Some(declared) = app_config_sort(fs, vault_root).await {
        log::debug!("sort order {declared:?} resolved from {APP_CONFIG}");
        return ResolvedOrder {
            policy: SortPolicy::parse(&declared),
            manual: ManualOrder::new(),
        };
    }

    if let Some(declared) = workspace_sort(fs, vault_root).await {
        log::debug!("sort order {declared:?} resolved from {WORKSPACE}");
        return ResolvedOrder {
            policy: SortPolicy::parse(&declared),
            manual: ManualOrder::new(),
        };
    }

    ResolvedOrder::default()
}

/// Reads and parses one JSON document, degrading to `None` on any failure.
async fn read_json<F: FsAccess>(fs: &F, path: PathBuf) -> Option<Value> {
    let text = match fs.read_text(&path).await {
        Ok(text) => text,
        Err(e) => {
            log::debug!("skipping {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!("malformed document {}: {e}", path.display());
            None
        }
    }
}

/// The declared sort order of the primary config document, if any. The flat
/// field wins over the nested explorer-section field.
async fn app_config_sort<F: FsAccess>(fs: &F, vault_root: &StdPath) -> Option<String> {
    let doc = read_json(fs, vault_root.join(APP_CONFIG)).await?;
    let flat = doc.get(SORT_FIELD).and_then(Value::as_str);
    let nested = doc
        .get(EXPLORER_SECTION)
        .and_then(|section| section.get(SORT_FIELD))
        .and_then(Value::as_str);
    flat.or(nested).map(str::to_owned)
}

/// The sort order carried by the first file-explorer pane of the workspace
/// document that has one, if any.
async fn workspace_sort<F: FsAccess>(fs: &F, vault_root: &StdPath) -> Option<String> {
    let doc = read_json(fs, vault_root.join(WORKSPACE)).await?;
    let panes = doc.get(PANES_FIELD).and_then(Value::as_array)?;
    panes
        .iter()
        .filter(|pane| pane.get("type").and_then(Value::as_str) == Some(EXPLORER_PANE_TYPE))
        .find_map(|pane| {
            pane.get("state")
                .and_then(|state| state.get(SORT_FIELD))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
}
