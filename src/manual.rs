use std::collections::HashMap;
use std::path::Path as StdPath;

use serde_json::Value;

use crate::fs_access::FsAccess;

/// Vault-relative location of the manual-order plugin's persisted data.
const BARTENDER_DATA: &str = ".obsidian/plugins/obsidian-bartender/data.json";

/// Top-level field holding the per-directory order lists.
const ORDER_FIELD: &str = "fileExplorerOrder";

/// Per-directory manual ordering, keyed by order key (`"/"` for the vault
/// root, the slash-joined relative path otherwise).
///
/// Loaded once per top-level listing call and read-only afterwards. Absence
/// of the plugin, an unreadable file and a malformed document all collapse
/// to the empty map; the resolver cannot tell those cases apart, by
/// contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualOrder {
    orders: HashMap<String, Vec<String>>,
}

impl ManualOrder {
    /// Creates an empty manual order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the manual order from the plugin data file under `vault_root`.
    ///
    /// Never fails: every I/O or parse problem is logged and yields an
    /// empty map. The document is re-read on every call; there is no cache.
    pub async fn load<F: FsAccess>(fs: &F, vault_root: &StdPath) -> ManualOrder {
        let path = vault_root.join(BARTENDER_DATA);
        let text = match fs.read_text(&path).await {
            Ok(text) => text,
            Err(e) => {
                log::debug!("no manual order data: {e}");
                return ManualOrder::new();
            }
        };
        let doc: Value = match serde_json::from_str(&text) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("malformed manual order document {}: {e}", path.display());
                return ManualOrder::new();
            }
        };
        Self::from_document(&doc)
    }

    /// Extracts the order lists from a parsed plugin document. Entries of
    /// unexpected shape are skipped.
    pub(crate) fn from_document(doc: &Value) -> ManualOrder {
        let mut orders = HashMap::new();
        if let Some(map) = doc.get(ORDER_FIELD).and_then(Value::as_object) {
            for (key, value) in map {
                let Some(list) = value.as_array() else {
                    log::warn!("manual order for {key} is not a list, skipping");
                    continue;
                };
                let names: Vec<String> = list
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect();
                orders.insert(key.clone(), names);
            }
        }
        ManualOrder { orders }
    }

    /// True when no directory has a manual order.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The ordered item names for `key`, if the plugin recorded any.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.orders.get(key).map(|names| names.as_slice())
    }
}
