//! Bincode model codec

use super::ModelCodec;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Codec for models with a serde representation, encoded as compact bincode.
pub struct BincodeCodec<M> {
    _model: PhantomData<fn() -> M>,
}

impl<M> BincodeCodec<M> {
    pub fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<M> Default for BincodeCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ModelCodec for BincodeCodec<M>
where
    M: Serialize + DeserializeOwned,
{
    type Model = M;

    fn id(&self) -> &'static str {
        "bincode"
    }

    fn encode(&self, model: &M) -> Result<Vec<u8>> {
        bincode::serialize(model)
            .map_err(|e| Error::Serialization(format!("bincode codec encoding failed: {e}")))
    }

    fn decode(&self, bytes: &[u8]) -> Result<M> {
        bincode::deserialize(bytes)
            .map_err(|e| Error::Serialization(format!("bincode codec decoding failed: {e}")))
    }
}
