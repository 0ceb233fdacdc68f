//! A serializable, sort-aware view of a vault's file tree
//!
//! A typical use for this crate is a server sending an explorer-style
//! listing of a note vault to a client. The nested tree mirrors what the
//! vault's own file explorer would show: hidden entries are excluded and
//! each directory level is ordered by the vault's effective sort policy,
//! resolved from the manual-order plugin data, the primary config and the
//! workspace state, in that priority.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use vtree::Vault;
//! let vault = Vault::open("./src".into());
//! let tree = vault.tree().await;
//! assert!(tree.files.iter().any(|name| name == "lib.rs"));
//! let files = vault.flat_list().await;
//! assert!(files.contains(&"lib.rs".to_string()));
//! println!("{}", serde_json::to_string_pretty(&tree).unwrap());
//! # })
//! ```
//!
//! The output might look like
//! ```json
//! {
//!   "notes": {
//!     "work": {
//!       "/files": ["plan.md"]
//!     },
//!     "/files": ["b.md", "a.md"]
//!   },
//!   "attachments": {
//!     "/files": ["img.png"]
//!   },
//!   "/files": ["todo.md", "readme.md"]
//! }
//! ```
//!
//! Listing calls never fail: a missing root, unreadable directories and
//! malformed configuration documents all degrade to empty or partial
//! results, logged through the `log` facade.

mod dir;
mod entry;
mod errors;
mod filter;
mod flat;
mod fs_access;
mod manual;
mod path;
pub mod resolver;
pub mod sorter;
mod tree;
pub mod utils;
mod vault;

pub use dir::Directory;
pub use dir::DirectoryEntry;
pub use entry::Entry;
pub use entry::EntryKind;
pub use entry::FileStat;
pub use entry::Meta;
pub use errors::Error;
pub use fs_access::FsAccess;
pub use fs_access::NativeFs;
pub use manual::ManualOrder;
pub use path::Path;
pub use resolver::ResolvedOrder;
pub use resolver::SortPolicy;
pub use tree::FILES_KEY;
pub use tree::TreeNode;
pub use vault::Vault;

#[cfg(feature = "test_utils")]
pub(crate) mod test_utils;
#[cfg(feature = "test_utils")]
pub use test_utils::TestRoot;
