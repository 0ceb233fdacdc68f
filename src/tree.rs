use std::path::Path as StdPath;
use std::path::PathBuf;

use async_recursion::async_recursion;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use tokio_util::sync::CancellationToken;

use crate::filter;
use crate::fs_access::FsAccess;
use crate::path::Path;
use crate::resolver::ResolvedOrder;
use crate::sorter;

/// Reserved key under which a level's ordered file names are serialized.
///
/// A `/` can never occur in an entry name, so the sentinel cannot collide
/// with a subdirectory key.
pub const FILES_KEY: &str = "/files";

/// One level of the nested tree result: ordered subdirectories, each with
/// its own subtree, and the ordered file names of the level.
///
/// Serializes to a JSON object keyed by subdirectory name, with
/// [`FILES_KEY`] holding the file list; the key is omitted entirely when
/// the level has no files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// Ordered subdirectories of this level, name plus subtree.
    pub directories: Vec<(String, TreeNode)>,
    /// Ordered file names of this level.
    pub files: Vec<String>,
}

impl TreeNode {
    /// True when the level has neither subdirectories nor files.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    /// Looks up a direct subdirectory by name.
    pub fn directory(&self, name: &str) -> Option<&TreeNode> {
        self.directories
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, node)| node)
    }
}

impl Serialize for TreeNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let files_entry = usize::from(!self.files.is_empty());
        let mut map = serializer.serialize_map(Some(self.directories.len() + files_entry))?;
        for (name, node) in &self.directories {
            map.serialize_entry(name, node)?;
        }
        if !self.files.is_empty() {
            map.serialize_entry(FILES_KEY, &self.files)?;
        }
        map.end()
    }
}

/// Recursive tree construction over one resolved sort order.
///
/// Every directory level filters hidden entries, partitions into
/// subdirectories and files, orders both partitions independently and
/// recurses. Unreadable levels degrade to empty nodes; nothing propagates
/// to the caller.
pub(crate) struct TreeBuilder<'a, F: FsAccess> {
    fs: &'a F,
    order: &'a ResolvedOrder,
    cancel: &'a CancellationToken,
}

impl<'a, F: FsAccess> TreeBuilder<'a, F> {
    pub(crate) fn new(fs: &'a F, order: &'a ResolvedOrder, cancel: &'a CancellationToken) -> Self {
        Self { fs, order, cancel }
    }

    /// Builds the nested tree rooted at `root`. A missing root yields an
    /// empty node, not an error.
    pub(crate) async fn build(&self, root: &StdPath) -> TreeNode {
        if !self.fs.exists(root).await {
            log::debug!("vault root {} does not exist", root.display());
            return TreeNode::default();
        }
        self.build_level(root.to_path_buf(), Path::empty()).await
    }

    #[async_recursion(?Send)]
    async fn build_level(&self, dir: PathBuf, relative: Path) -> TreeNode {
        if self.cancel.is_cancelled() {
            return TreeNode::default();
        }

        let entries = match self.fs.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("skipping unreadable directory {}: {e}", dir.display());
                return TreeNode::default();
            }
        };

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for mut entry in entries {
            if filter::is_hidden(&entry.name) {
                continue;
            }
            if self.order.policy.needs_meta() {
                entry.meta = match self.fs.stat(&dir.join(&entry.name)).await {
                    Ok(meta) => Some(meta),
                    Err(e) => {
                        log::debug!("no metadata for {}/{}: {e}", dir.display(), entry.name);
                        None
                    }
                };
            }
            if entry.is_dir() {
                subdirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        let key = relative.order_key();
        let subdirs = sorter::order(&subdirs, self.order.policy, &self.order.manual, &key);
        let files = sorter::order(&files, self.order.policy, &self.order.manual, &key);

        let mut node = TreeNode::default();
        for subdir in subdirs {
            if self.cancel.is_cancelled() {
                break;
            }
            let child = self
                .build_level(dir.join(&subdir.name), relative.child(&subdir.name))
                .await;
            node.directories.push((subdir.name, child));
        }
        node.files = files.into_iter().map(|entry| entry.name).collect();
        node
    }
}
