use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Represents all possible errors in the vtree crate.
///
/// Every variant is recovered inside the crate: the listing surfaces
/// (`Vault::tree`, `Vault::flat_list`, `Vault::read_dir`) degrade to empty
/// results instead of returning these. The type is public for the
/// `FsAccess` seam and the test fixtures.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub enum Error {
    /// Error indicating a failure to read data.
    #[error("Failed to read {what}: {how}")]
    Read {
        /// The item that failed to be read.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating a failure to parse data.
    #[error("Failed to parse {what}: {how}")]
    Parse {
        /// The item that failed to be parsed.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating an invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error indicating an invalid path.
    #[error("Invalid path: {what}")]
    InvalidPath {
        /// The invalid path description.
        what: String,
    },

    /// Error indicating a failure to create a file or directory.
    #[error("Failed to create {what}: {how}")]
    Create {
        /// The item that failed to be created.
        what: String,
        /// The reason for the failure.
        how: String,
    },
}
