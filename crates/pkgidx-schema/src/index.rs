//! Package index documents.
//!
//! The on-disk shape is:
//!
//! ```json
//! {
//!   "packages": [
//!     {
//!       "name": "...", "maintainer": "...", "websiteURL": "...", "help": { "online": "..." },
//!       "platforms": [ { "architecture": "esp32", "version": "2.0.1", ... } ],
//!       "tools": [ { "name": "xtensa-gcc", "version": "8.4.0", ... } ]
//!     }
//!   ]
//! }
//! ```
//!
//! Platform and tool entries are kept as raw JSON objects so that fields this
//! crate does not interpret survive a load/save cycle untouched, key order
//! included.

use crate::error::IndexError;
use crate::key::{EntryKey, Keyed, find_duplicates};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::str::FromStr;

/// Root of a package index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageIndex {
    /// Packages advertised by this index. Merged output always holds exactly one.
    pub packages: Vec<Package>,
}

/// A package: vendor metadata plus the platforms and tools it ships.
///
/// The four metadata attributes are carried as raw JSON values so they can be
/// copied verbatim whatever their shape (`help` is usually an object).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Package {
    /// Package name.
    #[serde(default)]
    pub name: Value,

    /// Maintainer display name.
    #[serde(default)]
    pub maintainer: Value,

    /// Vendor homepage.
    #[serde(rename = "websiteURL", default)]
    pub website_url: Value,

    /// Help links.
    #[serde(default)]
    pub help: Value,

    /// Installable platforms. Absent or `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub platforms: Vec<Platform>,

    /// Installable tools. Absent or `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tools: Vec<Tool>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a string attribute, treating absence as the empty string.
fn str_field<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// A platform entry, identified by `architecture` and `version`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(Map<String, Value>);

impl Platform {
    /// Wrap a raw JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Target architecture (e.g. `esp32`).
    pub fn architecture(&self) -> &str {
        str_field(&self.0, "architecture")
    }

    /// Release version (e.g. `2.0.1`).
    pub fn version(&self) -> &str {
        str_field(&self.0, "version")
    }

    /// Display name, if present.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// All fields, including the ones this crate does not interpret.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Keyed for Platform {
    fn key(&self) -> EntryKey {
        EntryKey::new(self.architecture(), self.version())
    }
}

impl From<Map<String, Value>> for Platform {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// A tool entry, identified by `name` and `version`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tool(Map<String, Value>);

impl Tool {
    /// Wrap a raw JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Tool name (e.g. `xtensa-esp32-elf-gcc`).
    pub fn name(&self) -> &str {
        str_field(&self.0, "name")
    }

    /// Release version.
    pub fn version(&self) -> &str {
        str_field(&self.0, "version")
    }

    /// All fields, including the ones this crate does not interpret.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Keyed for Tool {
    fn key(&self) -> EntryKey {
        EntryKey::new(self.name(), self.version())
    }
}

impl From<Map<String, Value>> for Tool {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Identity attributes checked on every entry before deserializing.
const PLATFORM_IDENTITY: [&str; 2] = ["architecture", "version"];
const TOOL_IDENTITY: [&str; 2] = ["name", "version"];

impl PackageIndex {
    /// Wrap a single package in the `packages` list shape.
    pub fn single(package: Package) -> Self {
        Self {
            packages: vec![package],
        }
    }

    /// Parse an index from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Json`] if the bytes are not JSON and
    /// [`IndexError::MalformedInput`] if the document lacks a non-empty
    /// `packages` list or an entry has a non-string identity attribute.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IndexError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Build an index from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same shape checks as [`PackageIndex::from_slice`].
    pub fn from_value(value: Value) -> Result<Self, IndexError> {
        let packages = value
            .get("packages")
            .ok_or_else(|| IndexError::malformed("missing `packages` list"))?
            .as_array()
            .ok_or_else(|| IndexError::malformed("`packages` is not a list"))?;

        if packages.is_empty() {
            return Err(IndexError::malformed("`packages` list is empty"));
        }

        for (i, package) in packages.iter().enumerate() {
            check_identity(package, i, "platforms", &PLATFORM_IDENTITY)?;
            check_identity(package, i, "tools", &TOOL_IDENTITY)?;
        }

        serde_json::from_value(value).map_err(IndexError::malformed)
    }

    /// Read and parse an index file.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the file cannot be read, otherwise the
    /// errors of [`PackageIndex::from_slice`].
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let bytes = std::fs::read(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    /// The first package, which carries everything the merge looks at.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MalformedInput`] if `packages` is empty.
    pub fn primary(&self) -> Result<&Package, IndexError> {
        self.packages
            .first()
            .ok_or_else(|| IndexError::malformed("`packages` list is empty"))
    }

    /// Serialize as two-space indented JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Json`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, IndexError> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Check the invariants of a merged aggregate: exactly one package, no
    /// two platforms sharing (architecture, version), no two tools sharing
    /// (name, version).
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidOutput`] describing the first violation.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.packages.len() != 1 {
            return Err(IndexError::invalid_output(format!(
                "expected exactly one package, found {}",
                self.packages.len()
            )));
        }

        let package = &self.packages[0];
        if let Some(key) = find_duplicates(&package.platforms).first() {
            return Err(IndexError::invalid_output(format!(
                "duplicate platform {key}"
            )));
        }
        if let Some(key) = find_duplicates(&package.tools).first() {
            return Err(IndexError::invalid_output(format!("duplicate tool {key}")));
        }

        Ok(())
    }
}

impl FromStr for PackageIndex {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

/// Reject entries whose identity attributes are present but not strings.
///
/// A missing or `null` attribute is fine (it keys as the empty string), but a
/// number or object would silently collapse distinct entries onto one key.
fn check_identity(
    package: &Value,
    index: usize,
    list: &str,
    attributes: &[&str],
) -> Result<(), IndexError> {
    let Some(entries) = package.get(list).and_then(Value::as_array) else {
        return Ok(());
    };

    for (pos, entry) in entries.iter().enumerate() {
        for attr in attributes {
            match entry.get(*attr) {
                None | Some(Value::Null | Value::String(_)) => {}
                Some(other) => {
                    return Err(IndexError::malformed(format!(
                        "packages[{index}].{list}[{pos}].{attr} must be a string, found {other}"
                    )));
                }
            }
        }
    }
    Ok(())
}
