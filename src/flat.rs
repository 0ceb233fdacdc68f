use std::path::Path as StdPath;
use std::path::PathBuf;

use async_recursion::async_recursion;
use tokio_util::sync::CancellationToken;

use crate::filter;
use crate::fs_access::FsAccess;
use crate::path::Path;

/// Lists every visible file under `root` as a root-relative path string
/// with `/` separators, sorted lexicographically ascending.
///
/// A file is excluded when any segment between the root and the file is
/// hidden. Sort policy is never consulted here. A missing root and
/// unreadable subdirectories degrade to the empty and partial list
/// respectively.
pub(crate) async fn list_flat<F: FsAccess>(
    fs: &F,
    root: &StdPath,
    cancel: &CancellationToken,
) -> Vec<String> {
    if !fs.exists(root).await {
        log::debug!("vault root {} does not exist", root.display());
        return Vec::new();
    }
    let mut paths = Vec::new();
    walk(fs, root.to_path_buf(), Path::empty(), cancel, &mut paths).await;
    paths.sort();
    paths
}

#[async_recursion(?Send)]
async fn walk<F: FsAccess>(
    fs: &F,
    dir: PathBuf,
    relative: Path,
    cancel: &CancellationToken,
    paths: &mut Vec<String>,
) {
    let entries = match fs.read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("skipping unreadable directory {}: {e}", dir.display());
            return;
        }
    };
    for entry in entries {
        if cancel.is_cancelled() {
            return;
        }
        if filter::is_hidden(&entry.name) {
            continue;
        }
        let child = relative.child(&entry.name);
        if entry.is_dir() {
            walk(fs, dir.join(&entry.name), child, cancel, paths).await;
        } else {
            paths.push(child.to_string());
        }
    }
}
