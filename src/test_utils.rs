use std::fs;
use std::fs::create_dir_all;
use std::path::Path as StdPath;

use tempdir::TempDir;

use crate::Error;

/// File paths to create in a populated test vault; `true` marks
/// directories. Hidden entries are included on purpose.
pub(crate) static VAULT_FILES: &[(&str, bool)] = &[
    ("readme.md", false),
    ("todo.md", false),
    (".hidden.md", false),
    ("notes", true),
    ("notes/a.md", false),
    ("notes/b.md", false),
    ("notes/.draft.md", false),
    ("notes/work", true),
    ("notes/work/plan.md", false),
    ("attachments", true),
    ("attachments/img.png", false),
    (".obsidian", true),
];

/// Utility structure for managing a temporary test vault and its files.
#[derive(Debug)]
pub struct TestRoot {
    /// Root of the temporary test vault.
    pub root: TempDir,
}

impl TestRoot {
    /// Creates an empty temporary vault.
    pub fn new() -> Result<Self, Error> {
        let root = TempDir::new("vault").map_err(|e| Error::Create {
            what: "temporary directory".into(),
            how: e.to_string(),
        })?;
        Ok(Self { root })
    }

    /// Creates a temporary vault holding the standard fixture files.
    pub fn populated() -> Result<Self, Error> {
        let ret = Self::new()?;
        for (relative_path, is_dir) in VAULT_FILES {
            if *is_dir {
                ret.create_dir(relative_path)?;
            } else {
                ret.create_file(relative_path, "")?;
            }
        }
        Ok(ret)
    }

    /// The vault root on disk.
    pub fn path(&self) -> &StdPath {
        self.root.path()
    }

    /// Creates a file at `relative_path` with `contents`, creating parent
    /// directories as needed.
    pub fn create_file(&self, relative_path: &str, contents: &str) -> Result<(), Error> {
        let full_path = self.root.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            create_dir_all(parent).map_err(|e| Error::Create {
                what: format!("directory {}", parent.display()),
                how: e.to_string(),
            })?;
        }
        fs::write(&full_path, contents).map_err(|e| Error::Create {
            what: format!("file {relative_path}"),
            how: e.to_string(),
        })
    }

    /// Creates a directory at `relative_path`.
    pub fn create_dir(&self, relative_path: &str) -> Result<(), Error> {
        create_dir_all(self.root.path().join(relative_path)).map_err(|e| Error::Create {
            what: format!("directory {relative_path}"),
            how: e.to_string(),
        })
    }

    /// Writes the manual-order plugin document.
    pub fn write_manual_order(&self, doc: &serde_json::Value) -> Result<(), Error> {
        self.create_file(
            ".obsidian/plugins/obsidian-bartender/data.json",
            &doc.to_string(),
        )
    }

    /// Writes the primary configuration document.
    pub fn write_app_config(&self, doc: &serde_json::Value) -> Result<(), Error> {
        self.create_file(".obsidian/app.json", &doc.to_string())
    }

    /// Writes the workspace-state document.
    pub fn write_workspace(&self, doc: &serde_json::Value) -> Result<(), Error> {
        self.create_file(".obsidian/workspace.json", &doc.to_string())
    }
}
