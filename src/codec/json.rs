//! JSON model codec

use super::ModelCodec;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Codec for models with a serde representation, encoded as JSON.
///
/// Human-inspectable and framework-neutral; prefer [`BincodeCodec`] for
/// large parameter sets.
///
/// [`BincodeCodec`]: super::BincodeCodec
pub struct JsonCodec<M> {
    _model: PhantomData<fn() -> M>,
}

impl<M> JsonCodec<M> {
    pub fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<M> Default for JsonCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ModelCodec for JsonCodec<M>
where
    M: Serialize + DeserializeOwned,
{
    type Model = M;

    fn id(&self) -> &'static str {
        "json"
    }

    fn encode(&self, model: &M) -> Result<Vec<u8>> {
        serde_json::to_vec(model)
            .map_err(|e| Error::Serialization(format!("json codec encoding failed: {e}")))
    }

    fn decode(&self, bytes: &[u8]) -> Result<M> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Serialization(format!("json codec decoding failed: {e}")))
    }
}
