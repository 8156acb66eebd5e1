//! On-disk form of a container payload
//!
//! One document holds four independently decodable parts: the encoded model
//! (with the codec id that produced it), the two nested spec envelopes (each
//! carrying its own format header), and the container metadata.

use crate::spec::Meta;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

#[derive(Serialize, Deserialize)]
pub(crate) struct ContainerDocument {
    pub format: String,
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub model: ModelPayload,
    pub x_spec: Value,
    pub y_spec: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// The opaque model part: codec id, integrity fields, and the bytes
/// themselves (base64, since the enclosing document is text).
#[derive(Serialize, Deserialize)]
pub(crate) struct ModelPayload {
    pub codec: String,
    pub checksum: String,
    pub length: u64,
    pub data: String,
}

/// Digest of the encoded model bytes, in the `sha256-<hex>` form the
/// payload records.
pub(crate) fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256-{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_shape_and_determinism() {
        let sum = checksum(b"model bytes");
        assert!(sum.starts_with("sha256-"));
        assert_eq!(sum.len(), "sha256-".len() + 64);
        assert_eq!(sum, checksum(b"model bytes"));
        assert_ne!(sum, checksum(b"other bytes"));
    }
}
