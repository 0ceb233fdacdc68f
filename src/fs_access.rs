use std::path::Path as StdPath;

use futures_lite::StreamExt;

use crate::Entry;
use crate::EntryKind;
use crate::Error;
use crate::Meta;

/// Minimal filesystem seam consumed by the listing engines.
///
/// The walks never touch the filesystem directly; everything goes through
/// this trait so a transport layer can substitute its own backing store.
#[allow(async_fn_in_trait)]
pub trait FsAccess {
    /// Returns true if `path` exists.
    async fn exists(&self, path: &StdPath) -> bool;

    /// Returns true if `path` exists and is a directory.
    async fn is_dir(&self, path: &StdPath) -> bool;

    /// Returns true if `path` exists and is a regular file.
    async fn is_file(&self, path: &StdPath) -> bool;

    /// Lists the direct children of `path` in filesystem iteration order,
    /// metadata unfetched.
    async fn read_dir(&self, path: &StdPath) -> Result<Vec<Entry>, Error>;

    /// Fetches size and timestamps for `path`.
    async fn stat(&self, path: &StdPath) -> Result<Meta, Error>;

    /// Reads `path` as UTF-8 text. Used for the vault's configuration
    /// documents.
    async fn read_text(&self, path: &StdPath) -> Result<String, Error>;
}

/// `FsAccess` over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl FsAccess for NativeFs {
    async fn exists(&self, path: &StdPath) -> bool {
        async_fs::metadata(path).await.is_ok()
    }

    async fn is_dir(&self, path: &StdPath) -> bool {
        async_fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    async fn is_file(&self, path: &StdPath) -> bool {
        async_fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn read_dir(&self, path: &StdPath) -> Result<Vec<Entry>, Error> {
        let mut entries = async_fs::read_dir(path).await.map_err(|e| Error::Read {
            what: path.to_string_lossy().to_string(),
            how: e.to_string(),
        })?;
        let mut items = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = entry.map_err(|e| Error::Read {
                what: path.to_string_lossy().to_string(),
                how: e.to_string(),
            })?;
            let file_type = entry.file_type().await.map_err(|e| Error::Read {
                what: entry.path().to_string_lossy().to_string(),
                how: e.to_string(),
            })?;
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            items.push(Entry {
                name: entry.file_name().to_string_lossy().to_string(),
                kind,
                meta: None,
            });
        }
        Ok(items)
    }

    async fn stat(&self, path: &StdPath) -> Result<Meta, Error> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| Error::Read {
            what: "metadata".into(),
            how: e.to_string(),
        })?;
        Ok(Meta::from_metadata(&metadata))
    }

    async fn read_text(&self, path: &StdPath) -> Result<String, Error> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Read {
                what: path.to_string_lossy().to_string(),
                how: e.to_string(),
            })
    }
}
