use std::fs::Metadata;
use std::time::SystemTime;

#[cfg(feature = "poem")]
use poem_openapi::Object;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::utils::format_system_time;

/// Kind of a filesystem child.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// Metadata of one entry. Fetched lazily: only when the active sort policy
/// needs timestamps or sizes, or for the single-level listing surface.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
pub struct Meta {
    /// The size of the file in bytes. Zero for directories.
    pub size: u64,
    /// The last modification time.
    pub mtime: SystemTime,
    /// The creation time. Falls back to the Unix epoch on filesystems that
    /// do not record it.
    pub ctime: SystemTime,
}

impl Meta {
    /// Extracts size and timestamps from platform metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Meta {
            size: metadata.len(),
            mtime: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            ctime: metadata.created().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }
}

/// A filesystem child as seen during one traversal frame. Owned transiently
/// by the walk; never persisted.
#[derive(Debug, Clone, PartialEq, Hash, Eq)]
pub struct Entry {
    /// Name of the file or directory.
    pub name: String,
    /// Whether this entry is a file or a directory.
    pub kind: EntryKind,
    /// Lazily fetched metadata, `None` until a stat is taken.
    pub meta: Option<Meta>,
}

impl Entry {
    /// Returns true for directory entries.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Modification time sort key; entries without metadata sort as epoch.
    pub(crate) fn mtime_key(&self) -> SystemTime {
        self.meta
            .map(|m| m.mtime)
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }

    /// Creation time sort key; entries without metadata sort as epoch.
    pub(crate) fn ctime_key(&self) -> SystemTime {
        self.meta
            .map(|m| m.ctime)
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }

    /// Byte size sort key. Directories count as zero bytes.
    pub(crate) fn size_key(&self) -> u64 {
        if self.is_dir() {
            0
        } else {
            self.meta.map(|m| m.size).unwrap_or(0)
        }
    }
}

/// Serializable metadata of a file or directory for the listing surface.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(Object))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct FileStat {
    /// The size of the file in bytes. Zero for directories.
    pub size: u64,
    /// The last modification time of the file or directory in RFC 3339 - Z
    /// format. For example "2018-01-26T18:30:09.453Z"
    pub mtime: String,
    /// The creation time in the same format. The Unix epoch when the
    /// filesystem does not record creation times.
    pub ctime: String,
    /// Whether this entry is a directory.
    pub is_directory: bool,
}

impl From<&Entry> for FileStat {
    /// Formats an entry's metadata for the wire. Entries whose metadata was
    /// never fetched report epoch timestamps and zero size.
    fn from(entry: &Entry) -> Self {
        let meta = entry.meta.unwrap_or(Meta {
            size: 0,
            mtime: SystemTime::UNIX_EPOCH,
            ctime: SystemTime::UNIX_EPOCH,
        });
        FileStat {
            size: if entry.is_dir() { 0 } else { meta.size },
            mtime: format_system_time(meta.mtime),
            ctime: format_system_time(meta.ctime),
            is_directory: entry.is_dir(),
        }
    }
}
