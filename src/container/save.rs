//! Container saving

use super::document::{checksum, ContainerDocument, ModelPayload};
use super::ModelContainer;
use crate::codec::ModelCodec;
use crate::envelope::{self, CONTAINER_FORMAT, FORMAT_VERSION};
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use std::path::Path;

impl<M> ModelContainer<M> {
    /// Save the container to `path` as one self-contained payload.
    ///
    /// The model is encoded by `codec`, whose id is recorded in the payload
    /// so the matching decoder can be resolved on load; a checksum of the
    /// encoded bytes is recorded alongside. The payload is written to a temp
    /// file and atomically renamed into place, so a concurrent reader sees
    /// either the previous file or the complete new one.
    pub fn save<C>(&self, path: impl AsRef<Path>, codec: &C) -> Result<()>
    where
        C: ModelCodec<Model = M>,
    {
        let model_bytes = codec.encode(&self.model)?;
        let doc = ContainerDocument {
            format: CONTAINER_FORMAT.to_string(),
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            model: ModelPayload {
                codec: codec.id().to_string(),
                checksum: checksum(&model_bytes),
                length: model_bytes.len() as u64,
                data: STANDARD.encode(&model_bytes),
            },
            x_spec: self.x_spec.to_value()?,
            y_spec: self.y_spec.to_value()?,
            meta: self.meta.clone(),
        };

        let text = serde_json::to_string_pretty(&doc)
            .map_err(|e| Error::Serialization(format!("container encoding failed: {e}")))?;
        envelope::write_atomic(path.as_ref(), text.as_bytes())
    }
}
