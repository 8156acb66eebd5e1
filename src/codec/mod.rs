//! Pluggable model codecs
//!
//! The container never interprets the wrapped model's internals; turning it
//! into bytes and back is delegated to a [`ModelCodec`]. Each codec carries a
//! stable id that `save` records in the payload, and `load` resolves through
//! a [`CodecRegistry`]. An id with no registered codec fails the load
//! outright; model bytes are never handed to a different codec.

mod binary;
mod json;

pub use binary::BincodeCodec;
pub use json::JsonCodec;

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// Encoder/decoder pair for one model family.
///
/// This is the boundary to external ML-framework objects: implement it for
/// whatever fitted-model type your framework produces.
pub trait ModelCodec {
    /// The model type this codec understands
    type Model;

    /// Stable identifier recorded in saved payloads
    fn id(&self) -> &'static str;

    /// Encode a model into bytes
    fn encode(&self, model: &Self::Model) -> Result<Vec<u8>>;

    /// Decode a model from bytes produced by [`encode`](Self::encode)
    fn decode(&self, bytes: &[u8]) -> Result<Self::Model>;
}

/// Registry of codecs for one model type, keyed by codec id.
pub struct CodecRegistry<M> {
    codecs: HashMap<&'static str, Box<dyn ModelCodec<Model = M>>>,
}

impl<M> CodecRegistry<M> {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Register a codec under its own id (builder style). A codec registered
    /// later under the same id replaces the earlier one.
    pub fn register<C>(mut self, codec: C) -> Self
    where
        C: ModelCodec<Model = M> + 'static,
    {
        self.codecs.insert(codec.id(), Box::new(codec));
        self
    }

    /// Resolve a codec by the id recorded in a payload.
    pub fn get(&self, id: &str) -> Result<&dyn ModelCodec<Model = M>> {
        self.codecs
            .get(id)
            .map(|codec| codec.as_ref())
            .ok_or_else(|| Error::ModelCodec(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.codecs.contains_key(id)
    }

    /// Registered codec ids, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.keys().copied()
    }
}

impl<M> Default for CodecRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> CodecRegistry<M>
where
    M: Serialize + DeserializeOwned + 'static,
{
    /// Registry with both built-in codecs registered
    pub fn with_defaults() -> Self {
        Self::new()
            .register(JsonCodec::new())
            .register(BincodeCodec::new())
    }
}
