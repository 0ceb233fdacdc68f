use std::fmt::Display;
use std::path::Path as StdPath;
use std::path::PathBuf;

#[cfg(feature = "poem")]
use poem_openapi::Object;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de;

use crate::errors::Error;

/// A custom deserializer function for a Vec<String> that checks for ".."
/// components.
fn deserialize_components<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let components = Vec::<String>::deserialize(deserializer)?;

    if components.iter().any(|c| c == ".." || c == ".") {
        // If an invalid component is found, return a custom error
        Err(de::Error::custom("Path component cannot contain '..'"))
    } else {
        // If all components are valid, return the result
        Ok(components)
    }
}

/// Represents a vault-relative path as a vector of its portable components.
///
/// The empty path is the vault root. A `Path` needs a base directory to
/// resolve against the real filesystem; on the wire and in manual-order
/// lookups its components are always joined by `/` regardless of platform.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(Object))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct Path {
    /// The components of the portable path as a vector of strings.
    #[serde(deserialize_with = "deserialize_components")]
    components: Vec<String>,
}

impl Display for Path {
    /// Formats the path with `/` between components, the canonical
    /// separator on every platform.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.components.len().saturating_sub(1) {
            write!(f, "{}/", self.components[i])?;
        }
        if !self.components.is_empty() {
            write!(f, "{}", self.components.last().unwrap())?;
        }
        Ok(())
    }
}

impl Path {
    /// Creates empty path, the vault root.
    pub fn empty() -> Self {
        Self { components: vec![] }
    }

    /// Returns true if this path is the vault root.
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the last component of the portable path, typically the file or
    /// directory name.
    pub fn basename(&self) -> Option<&str> {
        self.components.last().map(|s| s.as_str())
    }

    /// Convert the portable `Path` into a platform `PathBuf` under
    /// `base_dir`.
    pub fn append_to(&self, base_dir: &StdPath) -> PathBuf {
        let mut ret = base_dir.to_owned();
        for comp in &self.components {
            ret.push(comp);
        }
        ret
    }

    /// Returns the parent path of the current `Path`, or `None` if this is
    /// the root.
    pub fn parent(&self) -> Option<Path> {
        if self.components.is_empty() {
            None
        } else {
            let mut parent_components = self.components.clone();
            parent_components.pop();
            Some(Path {
                components: parent_components,
            })
        }
    }

    /// Appends a new component to the end of the portable path.
    ///
    /// # Arguments
    ///
    /// * `component` - The path component to add.
    pub fn push(&mut self, component: &str) {
        self.components.push(component.to_owned());
    }

    /// Returns a new path with `component` appended.
    pub fn child(&self, component: &str) -> Path {
        let mut ret = self.clone();
        ret.push(component);
        ret
    }

    /// Join two `Path`s together into a new `Path`.
    pub fn join(&self, other: &Path) -> Path {
        let mut ret = self.clone();
        for comp in &other.components {
            ret.push(comp);
        }
        ret
    }

    /// The manual-order lookup key for this path: `"/"` at the vault root,
    /// the slash-joined relative path otherwise.
    pub fn order_key(&self) -> String {
        if self.components.is_empty() {
            "/".to_owned()
        } else {
            self.to_string()
        }
    }

    /// Iterates over the path components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|s| s.as_str())
    }
}

impl<T> TryFrom<&[T]> for Path
where
    T: AsRef<str>,
{
    type Error = Error;

    /// Attempt to build a `Path` from a slice of components.
    ///
    /// Each component is validated to not contain directory separators and to
    /// not equal `.` or `..`. Returns `Error::InvalidArgument` on invalid
    /// components.
    fn try_from(components: &[T]) -> std::result::Result<Self, Self::Error> {
        let mut c = Vec::new();
        for comp in components {
            let s = comp.as_ref();
            if s.contains('/') || s.contains('\\') {
                return Err(Error::InvalidArgument(format!(
                    "Invalid path component: {s}"
                )));
            }
            if s == "." || s == ".." || s.is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "Invalid path component: {s}"
                )));
            }
            c.push(s.to_string());
        }
        Ok(Path { components: c })
    }
}

impl TryFrom<&PathBuf> for Path {
    type Error = Error;

    /// Convert a `PathBuf` into the portable `Path` representation.
    ///
    /// This will reject paths that are just `.` or `..` and will strip root
    /// components. Non-UTF8 components will be skipped.
    fn try_from(path: &PathBuf) -> Result<Self, Self::Error> {
        Self::try_from(path.as_path())
    }
}

impl TryFrom<&StdPath> for Path {
    type Error = Error;

    /// Convert a `std::path::Path` into the portable `Path` representation.
    ///
    /// This will reject paths that are just `.` or `..` and will strip root
    /// components. Non-UTF8 components will be skipped.
    fn try_from(path: &StdPath) -> Result<Self, Self::Error> {
        let str = path.to_string_lossy();
        if str == "." || str == ".." {
            return Err(Error::InvalidArgument(
                "Path cannot contain '.' or '..' components".to_string(),
            ));
        }
        let components = path
            .components()
            .filter_map(|comp| {
                let s = comp.as_os_str().to_str()?;
                if s == std::path::Component::RootDir.as_os_str().to_str().unwrap() {
                    None
                } else {
                    Some(s.to_string())
                }
            })
            .collect();
        Ok(Path { components })
    }
}
