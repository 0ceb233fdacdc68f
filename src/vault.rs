use std::path::Path as StdPath;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::dir::Directory;
use crate::dir::DirectoryEntry;
use crate::filter;
use crate::flat;
use crate::fs_access::FsAccess;
use crate::fs_access::NativeFs;
use crate::path::Path;
use crate::resolver;
use crate::sorter;
use crate::tree::TreeBuilder;
use crate::tree::TreeNode;

/// Represents a vault rooted at a base directory.
///
/// Every listing call is self-contained: the sort policy and manual-order
/// data are re-resolved from the vault's documents each time, and nothing
/// is cached between calls. All calls degrade to empty results instead of
/// failing; see the crate docs for the contract.
#[derive(Clone)]
pub struct Vault<F: FsAccess = NativeFs> {
    base_dir: PathBuf,
    fs: F,
}

impl Vault<NativeFs> {
    /// Opens a vault on the real filesystem.
    pub fn open(base_dir: PathBuf) -> Self {
        Vault {
            base_dir,
            fs: NativeFs,
        }
    }
}

impl<F: FsAccess> Vault<F> {
    /// Opens a vault over a caller-supplied filesystem seam.
    pub fn with_fs(base_dir: PathBuf, fs: F) -> Self {
        Vault { base_dir, fs }
    }

    /// Converts a vault-relative `Path` to an absolute `PathBuf` under the
    /// base directory.
    pub fn as_abs_path(&self, relative: &Path) -> PathBuf {
        relative.append_to(&self.base_dir)
    }

    /// Builds the nested tree of the whole vault, ordered by the resolved
    /// sort policy. A missing root yields an empty node.
    pub async fn tree(&self) -> TreeNode {
        self.tree_with_cancel(&CancellationToken::new()).await
    }

    /// Like [`Vault::tree`], aborting early when `cancel` fires. The
    /// partial tree built so far is returned; it is structurally valid.
    pub async fn tree_with_cancel(&self, cancel: &CancellationToken) -> TreeNode {
        let order = resolver::resolve(&self.fs, &self.base_dir).await;
        TreeBuilder::new(&self.fs, &order, cancel)
            .build(&self.base_dir)
            .await
    }

    /// Lists every visible file of the vault as root-relative `/`-separated
    /// path strings, sorted lexicographically ascending. Sort policy is not
    /// consulted. A missing root yields an empty list.
    pub async fn flat_list(&self) -> Vec<String> {
        self.flat_list_with_cancel(&CancellationToken::new()).await
    }

    /// Like [`Vault::flat_list`], aborting early when `cancel` fires.
    pub async fn flat_list_with_cancel(&self, cancel: &CancellationToken) -> Vec<String> {
        flat::list_flat(&self.fs, &self.base_dir, cancel).await
    }

    /// Lists one directory level with serializable stats, subdirectories
    /// before files, both ordered by the resolved sort policy.
    ///
    /// A missing directory, a path into a hidden directory and an
    /// unreadable level all yield an empty listing.
    pub async fn read_dir(&self, relative: &Path) -> Directory {
        if filter::has_hidden_component(relative) {
            log::debug!("refusing to list hidden path {relative}");
            return Directory::empty(relative.clone());
        }
        let dir = self.as_abs_path(relative);
        if !self.fs.is_dir(&dir).await {
            log::debug!("{} is not a listable directory", dir.display());
            return Directory::empty(relative.clone());
        }
        let entries = match self.fs.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("skipping unreadable directory {}: {e}", dir.display());
                return Directory::empty(relative.clone());
            }
        };

        let order = resolver::resolve(&self.fs, &self.base_dir).await;
        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for mut entry in entries {
            if filter::is_hidden(&entry.name) {
                continue;
            }
            // The listing surface always reports stats.
            entry.meta = match self.fs.stat(&dir.join(&entry.name)).await {
                Ok(meta) => Some(meta),
                Err(e) => {
                    log::debug!("no metadata for {}/{}: {e}", dir.display(), entry.name);
                    None
                }
            };
            if entry.is_dir() {
                subdirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        let key = relative.order_key();
        let mut items: Vec<DirectoryEntry> = sorter::order(&subdirs, order.policy, &order.manual, &key)
            .iter()
            .map(DirectoryEntry::from)
            .collect();
        items.extend(
            sorter::order(&files, order.policy, &order.manual, &key)
                .iter()
                .map(DirectoryEntry::from),
        );
        Directory {
            current_path: relative.clone(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::test_utils::TestRoot;
    use crate::tree::FILES_KEY;

    fn vault(root: &TestRoot) -> Vault {
        Vault::open(root.path().to_path_buf())
    }

    /// Collects every file path and directory path of a tree, root-relative.
    fn collect(node: &TreeNode, prefix: &str, dirs: &mut Vec<String>, files: &mut Vec<String>) {
        for (name, child) in &node.directories {
            let dir_path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            dirs.push(dir_path.clone());
            collect(child, &dir_path, dirs, files);
        }
        for name in &node.files {
            files.push(if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            });
        }
    }

    #[tokio::test]
    async fn missing_root_yields_empty_results() {
        let vault = Vault::open("/definitely/not/a/vault".into());
        assert!(vault.tree().await.is_empty());
        assert!(vault.flat_list().await.is_empty());
        assert!(vault.read_dir(&Path::empty()).await.items.is_empty());
    }

    #[tokio::test]
    async fn hidden_entries_never_appear() {
        let root = TestRoot::populated().unwrap();
        let vault = vault(&root);

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        collect(&vault.tree().await, "", &mut dirs, &mut files);
        for path in dirs.iter().chain(files.iter()) {
            assert!(
                path.split('/').all(|segment| !segment.starts_with('.')),
                "hidden entry leaked into tree: {path}"
            );
        }
        assert!(!files.contains(&".hidden.md".to_string()));
        assert!(!dirs.contains(&".obsidian".to_string()));

        for path in vault.flat_list().await {
            assert!(
                path.split('/').all(|segment| !segment.starts_with('.')),
                "hidden entry leaked into flat list: {path}"
            );
        }
    }

    #[tokio::test]
    async fn tree_contains_every_visible_item_exactly_once_for_every_policy() {
        let root = TestRoot::populated().unwrap();
        let mut expected_files = vec![
            "readme.md",
            "todo.md",
            "attachments/img.png",
            "notes/a.md",
            "notes/b.md",
            "notes/work/plan.md",
        ];
        let mut expected_dirs = vec!["attachments", "notes", "notes/work"];
        expected_files.sort();
        expected_dirs.sort();

        for declared in [
            "natural",
            "alphabetical",
            "byModifiedTime",
            "byCreatedTime",
            "byFileSize",
        ] {
            root.write_app_config(&json!({"sortOrder": declared})).unwrap();
            let mut dirs = Vec::new();
            let mut files = Vec::new();
            collect(&vault(&root).tree().await, "", &mut dirs, &mut files);
            dirs.sort();
            files.sort();
            assert_eq!(dirs, expected_dirs, "policy {declared}");
            assert_eq!(files, expected_files, "policy {declared}");
        }

        // Manual policy via plugin data.
        root.write_manual_order(&json!({
            "fileExplorerOrder": {"/": ["todo.md", "notes"]}
        }))
        .unwrap();
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        collect(&vault(&root).tree().await, "", &mut dirs, &mut files);
        dirs.sort();
        files.sort();
        assert_eq!(dirs, expected_dirs);
        assert_eq!(files, expected_files);
    }

    #[tokio::test]
    async fn alphabetical_orders_each_level() {
        let root = TestRoot::populated().unwrap();
        root.create_file("Zebra.md", "").unwrap();
        root.create_file("apple.md", "").unwrap();
        root.write_app_config(&json!({"sortOrder": "alphabetical"}))
            .unwrap();

        let tree = vault(&root).tree().await;
        assert_eq!(
            tree.files,
            ["apple.md", "readme.md", "todo.md", "Zebra.md"]
        );
        let level_dirs: Vec<&str> = tree.directories.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(level_dirs, ["attachments", "notes"]);
    }

    #[tokio::test]
    async fn manual_order_applies_per_directory() {
        let root = TestRoot::populated().unwrap();
        root.write_manual_order(&json!({
            "fileExplorerOrder": {
                "/": ["todo.md", "notes", "readme.md"],
                "notes": ["notes/b.md", "notes/a.md"],
            }
        }))
        .unwrap();

        let tree = vault(&root).tree().await;
        assert_eq!(tree.files, ["todo.md", "readme.md"]);
        // "notes" was listed, "attachments" keeps its natural position after.
        assert_eq!(tree.directories[0].0, "notes");
        let notes = tree.directory("notes").unwrap();
        assert_eq!(notes.files, ["b.md", "a.md"]);
        // No order recorded below "notes"; that level stays natural, which
        // for a single child is deterministic.
        assert_eq!(notes.directories[0].0, "work");
    }

    #[tokio::test]
    async fn manual_wins_over_declared_config() {
        let root = TestRoot::populated().unwrap();
        root.write_app_config(&json!({"sortOrder": "alphabetical"}))
            .unwrap();
        root.write_manual_order(&json!({
            "fileExplorerOrder": {"/": ["todo.md", "readme.md"]}
        }))
        .unwrap();

        let tree = vault(&root).tree().await;
        assert_eq!(tree.files, ["todo.md", "readme.md"]);
    }

    #[tokio::test]
    async fn flat_list_is_sorted_and_canonical() {
        let root = TestRoot::populated().unwrap();
        let files = vault(&root).flat_list().await;
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
        assert_eq!(
            files,
            [
                "attachments/img.png",
                "notes/a.md",
                "notes/b.md",
                "notes/work/plan.md",
                "readme.md",
                "todo.md",
            ]
        );
    }

    #[tokio::test]
    async fn cancelled_build_returns_partial_result() {
        let root = TestRoot::populated().unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let vault = vault(&root);
        assert!(vault.tree_with_cancel(&cancel).await.is_empty());
        assert!(vault.flat_list_with_cancel(&cancel).await.is_empty());
    }

    #[tokio::test]
    async fn tree_serializes_with_sentinel_files_key() {
        let root = TestRoot::populated().unwrap();
        root.create_dir("empty").unwrap();
        root.write_app_config(&json!({"sortOrder": "alphabetical"}))
            .unwrap();
        let encoded = serde_json::to_value(&vault(&root).tree().await).unwrap();
        assert_eq!(encoded["notes"][FILES_KEY], json!(["a.md", "b.md"]));
        assert_eq!(encoded["attachments"][FILES_KEY], json!(["img.png"]));
        // A level without files omits the sentinel entirely.
        assert_eq!(encoded["empty"], json!({}));
    }

    #[tokio::test]
    async fn read_dir_lists_directories_before_files() {
        let root = TestRoot::populated().unwrap();
        root.write_app_config(&json!({"sortOrder": "alphabetical"}))
            .unwrap();
        let listing = vault(&root).read_dir(&Path::empty()).await;
        let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            ["attachments", "notes", "readme.md", "todo.md"]
        );
        assert!(listing.items[0].stats.is_directory);
        assert!(!listing.items[2].stats.is_directory);
    }

    #[tokio::test]
    async fn read_dir_of_nested_level_uses_its_order_key() {
        let root = TestRoot::populated().unwrap();
        root.write_manual_order(&json!({
            "fileExplorerOrder": {"notes": ["b.md", "a.md"]}
        }))
        .unwrap();
        let relative = Path::try_from(["notes"].as_slice()).unwrap();
        let listing = vault(&root).read_dir(&relative).await;
        let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["work", "b.md", "a.md"]);
    }

    #[tokio::test]
    async fn read_dir_rejects_hidden_paths() {
        let root = TestRoot::populated().unwrap();
        let hidden = Path::try_from([".obsidian"].as_slice()).unwrap();
        assert!(vault(&root).read_dir(&hidden).await.items.is_empty());
    }

    #[tokio::test]
    async fn read_dir_of_missing_directory_is_empty() {
        let root = TestRoot::populated().unwrap();
        let missing = Path::try_from(["nope"].as_slice()).unwrap();
        let listing = vault(&root).read_dir(&missing).await;
        assert!(listing.items.is_empty());
        assert_eq!(listing.current_path, missing);
    }

    #[tokio::test]
    async fn malformed_manual_order_degrades_to_declared_config() {
        let root = TestRoot::populated().unwrap();
        root.create_file(
            ".obsidian/plugins/obsidian-bartender/data.json",
            "{broken json",
        )
        .unwrap();
        root.write_app_config(&json!({"sortOrder": "alphabetical"}))
            .unwrap();
        let tree = vault(&root).tree().await;
        assert_eq!(
            tree.files,
            ["readme.md", "todo.md"]
        );
    }
}
