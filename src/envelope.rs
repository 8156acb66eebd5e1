//! Self-describing payload envelope
//!
//! Every persisted payload opens with a `format` marker and a
//! `format_version` tag so a loader can tell an incompatible or damaged
//! file apart from one it understands, instead of misinterpreting it.
//! Both `DependencySpec` and `ModelContainer` payloads share this layer.

use crate::{Error, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Marker for a persisted `DependencySpec` payload
pub const SPEC_FORMAT: &str = "guardar/dependency-spec";

/// Marker for a persisted `ModelContainer` payload
pub const CONTAINER_FORMAT: &str = "guardar/model-container";

/// Version written into every new payload. Loaders reject anything else;
/// forward compatibility is explicitly not attempted.
pub const FORMAT_VERSION: u32 = 1;

/// Header carried by every persisted payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub format: String,
    pub format_version: u32,
}

/// Read a persisted document from disk and parse it.
///
/// A file that cannot be read is an I/O error; bytes that do not parse as a
/// document (truncated, tampered, or wrong file entirely) are corruption.
pub fn read_document(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::Corruption(format!("not a valid document: {e}")))
}

/// Check a parsed document's header against the expected format marker.
///
/// Error precedence matches the taxonomy: a missing or unexpected marker is a
/// format error, a recognized marker with an unsupported version is a version
/// error, and anything structurally off is corruption.
pub fn check_header(doc: &Value, expected_format: &str) -> Result<Header> {
    let obj = doc
        .as_object()
        .ok_or_else(|| Error::Corruption("document root is not an object".to_string()))?;

    let format = obj
        .get("format")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Format("<missing>".to_string()))?;
    if format != expected_format {
        return Err(Error::Format(format.to_string()));
    }

    let version = obj
        .get("format_version")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::Corruption("missing or non-integer format_version".to_string()))?;
    if version != u64::from(FORMAT_VERSION) {
        return Err(Error::Version {
            found: version,
            supported: FORMAT_VERSION,
        });
    }

    Ok(Header {
        format: format.to_string(),
        format_version: FORMAT_VERSION,
    })
}

/// Write `bytes` to `path` through a temp file in the same directory,
/// then rename into place. A concurrent reader sees either the previous
/// file or the complete new one, never a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
