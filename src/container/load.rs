//! Container loading and inspection

use super::document::{checksum, ContainerDocument, ModelPayload};
use super::ModelContainer;
use crate::codec::CodecRegistry;
use crate::envelope::{self, CONTAINER_FORMAT};
use crate::error::SpecRole;
use crate::spec::DependencySpec;
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::path::Path;

impl<M> ModelContainer<M> {
    /// Load a container from `path`, resolving the codec recorded at save
    /// time in `registry`.
    ///
    /// All-or-nothing: either a fully reconstructed container is returned or
    /// an error; no partially populated value is ever observable. A nested
    /// spec that fails to decode is reported with its role (`x_spec` or
    /// `y_spec`).
    pub fn load(path: impl AsRef<Path>, registry: &CodecRegistry<M>) -> Result<Self> {
        let value = envelope::read_document(path.as_ref())?;
        envelope::check_header(&value, CONTAINER_FORMAT)?;
        let doc: ContainerDocument = serde_json::from_value(value)
            .map_err(|e| Error::Corruption(format!("malformed container: {e}")))?;

        // Resolve the recorded codec before touching the model bytes; an
        // unknown family must never fall through to a different decoder.
        let codec = registry.get(&doc.model.codec)?;
        let model_bytes = decode_model_bytes(&doc.model)?;
        let model = codec.decode(&model_bytes)?;

        let x_spec = DependencySpec::from_value(&doc.x_spec).map_err(|e| Error::Spec {
            role: SpecRole::Input,
            source: Box::new(e),
        })?;
        let y_spec = DependencySpec::from_value(&doc.y_spec).map_err(|e| Error::Spec {
            role: SpecRole::Output,
            source: Box::new(e),
        })?;

        Ok(Self {
            model,
            x_spec,
            y_spec,
            meta: doc.meta,
        })
    }
}

/// Recover the encoded model bytes, verifying length and checksum against
/// what `save` recorded.
fn decode_model_bytes(payload: &ModelPayload) -> Result<Vec<u8>> {
    let bytes = STANDARD
        .decode(&payload.data)
        .map_err(|e| Error::Corruption(format!("model payload is not valid base64: {e}")))?;

    if bytes.len() as u64 != payload.length {
        return Err(Error::Corruption(format!(
            "model payload length mismatch: recorded {}, found {}",
            payload.length,
            bytes.len()
        )));
    }

    let digest = checksum(&bytes);
    if digest != payload.checksum {
        return Err(Error::Corruption(format!(
            "model payload checksum mismatch: recorded {}, computed {digest}",
            payload.checksum
        )));
    }

    Ok(bytes)
}

/// Summary of a saved container, read without decoding the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub format_version: u32,
    /// Id of the codec that encoded the model
    pub codec: String,
    /// `sha256-<hex>` digest of the encoded model bytes
    pub checksum: String,
    /// Encoded model size in bytes
    pub model_size: u64,
    pub saved_at: DateTime<Utc>,
}

/// Inspect a saved container's header and model payload description.
///
/// Needs no codec registry: the model bytes stay encoded. Useful for
/// answering "what is this file and can I load it" before committing to a
/// full load.
pub fn inspect(path: impl AsRef<Path>) -> Result<ContainerInfo> {
    let value = envelope::read_document(path.as_ref())?;
    let header = envelope::check_header(&value, CONTAINER_FORMAT)?;
    let doc: ContainerDocument = serde_json::from_value(value)
        .map_err(|e| Error::Corruption(format!("malformed container: {e}")))?;

    Ok(ContainerInfo {
        format_version: header.format_version,
        codec: doc.model.codec,
        checksum: doc.model.checksum,
        model_size: doc.model.length,
        saved_at: doc.saved_at,
    })
}
