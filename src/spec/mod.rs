//! Dependency specifications
//!
//! A [`DependencySpec`] names the dataset columns a model depends on, as an
//! ordered list, plus optional free-form metadata. Order is significant and
//! survives a save/load round trip exactly; duplicates are kept as supplied.
//! "No metadata" and "empty metadata" are distinct states and both round-trip
//! faithfully.
//!
//! # Example
//!
//! ```no_run
//! use guardar::DependencySpec;
//!
//! let spec = DependencySpec::new(["age", "income"])
//!     .with_meta_entry("source", serde_json::json!("csv"));
//! spec.save("features.spec.json").unwrap();
//!
//! let restored = DependencySpec::load("features.spec.json").unwrap();
//! assert_eq!(spec, restored);
//! ```

use crate::envelope::{self, FORMAT_VERSION, SPEC_FORMAT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Free-form metadata attached to a spec or container
pub type Meta = HashMap<String, Value>;

/// Validation policy for dependency lists.
///
/// Construction never validates; callers opt into strictness through
/// [`DependencySpec::validate`]. The default permits everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Permit the same column name to appear more than once
    pub allow_duplicates: bool,
    /// Permit a spec with no columns at all
    pub allow_empty: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allow_duplicates: true,
            allow_empty: true,
        }
    }
}

impl ValidationPolicy {
    /// Policy rejecting both duplicates and empty lists
    pub fn strict() -> Self {
        Self {
            allow_duplicates: false,
            allow_empty: false,
        }
    }
}

/// An ordered list of column identifiers plus optional metadata, with
/// save/load capability.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencySpec {
    dependencies: Vec<String>,
    meta: Option<Meta>,
}

/// On-disk form of a `DependencySpec` payload
#[derive(Serialize, Deserialize)]
struct SpecDocument {
    format: String,
    format_version: u32,
    dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

impl DependencySpec {
    /// Create a spec from column names, in the order given.
    pub fn new<I, S>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            meta: None,
        }
    }

    /// Attach a full metadata mapping (replaces any existing one)
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Add one metadata entry, creating the mapping if it was absent
    pub fn with_meta_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta
            .get_or_insert_with(Meta::new)
            .insert(key.into(), value);
        self
    }

    /// The column names, in insertion order
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// The metadata mapping, if any was supplied
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(String::as_str)
    }

    /// Column name at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&str> {
        self.dependencies.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == name)
    }

    /// Project a sub-spec containing only `names`, in the order given.
    ///
    /// Metadata is carried over unchanged. A name not present in this spec
    /// is an error.
    pub fn select(&self, names: &[&str]) -> Result<DependencySpec> {
        for name in names {
            if !self.contains(name) {
                return Err(Error::DependencyNotFound((*name).to_string()));
            }
        }
        Ok(Self {
            dependencies: names.iter().map(|name| (*name).to_string()).collect(),
            meta: self.meta.clone(),
        })
    }

    /// Union of two specs, preserving first-seen order: all of `self`'s
    /// columns, then `other`'s columns that `self` lacks. Keeps `self`'s
    /// metadata.
    pub fn merge(&self, other: &DependencySpec) -> DependencySpec {
        let mut merged = self.dependencies.clone();
        for dep in &other.dependencies {
            if !merged.iter().any(|existing| existing == dep) {
                merged.push(dep.clone());
            }
        }
        Self {
            dependencies: merged,
            meta: self.meta.clone(),
        }
    }

    /// Check this spec against a validation policy.
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<()> {
        if !policy.allow_empty && self.dependencies.is_empty() {
            return Err(Error::InvalidSpec("dependency list is empty".to_string()));
        }
        if !policy.allow_duplicates {
            let mut seen = HashSet::new();
            for dep in &self.dependencies {
                if !seen.insert(dep.as_str()) {
                    return Err(Error::InvalidSpec(format!("duplicate dependency {dep:?}")));
                }
            }
        }
        Ok(())
    }

    /// Encode as a persisted document value. Container payloads embed this
    /// same envelope for their nested specs, so every part carries its own
    /// header.
    pub(crate) fn to_value(&self) -> Result<Value> {
        let doc = SpecDocument {
            format: SPEC_FORMAT.to_string(),
            format_version: FORMAT_VERSION,
            dependencies: self.dependencies.clone(),
            meta: self.meta.clone(),
        };
        serde_json::to_value(&doc)
            .map_err(|e| Error::Serialization(format!("spec encoding failed: {e}")))
    }

    /// Decode from a persisted document value, validating its header first.
    pub(crate) fn from_value(doc: &Value) -> Result<Self> {
        envelope::check_header(doc, SPEC_FORMAT)?;
        let doc: SpecDocument = serde_json::from_value(doc.clone())
            .map_err(|e| Error::Corruption(format!("malformed dependency spec: {e}")))?;
        Ok(Self {
            dependencies: doc.dependencies,
            meta: doc.meta,
        })
    }

    /// Save this spec to `path` as a self-describing payload.
    ///
    /// The payload is written to a temp file and atomically renamed into
    /// place.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let value = self.to_value()?;
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| Error::Serialization(format!("spec encoding failed: {e}")))?;
        envelope::write_atomic(path.as_ref(), text.as_bytes())
    }

    /// Load a previously saved spec from `path`.
    ///
    /// Returns a new, independent instance with dependency order and
    /// metadata restored exactly.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let doc = envelope::read_document(path.as_ref())?;
        Self::from_value(&doc)
    }
}

impl<'a> IntoIterator for &'a DependencySpec {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.iter()
    }
}
