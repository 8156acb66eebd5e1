//! Model containers
//!
//! A [`ModelContainer`] bundles a trained model with the
//! [`DependencySpec`]s of its input and output columns, plus optional
//! container-level metadata, and persists the four parts as one restorable
//! unit. The model itself stays opaque: encoding and decoding are delegated
//! to a [`ModelCodec`](crate::codec::ModelCodec), and the codec id recorded
//! at save time selects the decoder on load.
//!
//! # Example
//!
//! ```no_run
//! use guardar::{CodecRegistry, DependencySpec, JsonCodec, ModelContainer};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Fitted { weights: Vec<f64> }
//!
//! let container = ModelContainer::new(
//!     Fitted { weights: vec![0.3, 0.7] },
//!     DependencySpec::new(["f1", "f2"]),
//!     DependencySpec::new(["label"]),
//! );
//! container.save("model.guardar.json", &JsonCodec::new()).unwrap();
//!
//! let registry = CodecRegistry::<Fitted>::with_defaults();
//! let restored = ModelContainer::load("model.guardar.json", &registry).unwrap();
//! ```

mod document;
mod load;
mod save;


pub use load::{inspect, ContainerInfo};

use crate::spec::{DependencySpec, Meta};
use serde_json::Value;

/// A trained model together with the specs of its input and output columns.
///
/// `x_spec` describes the columns the model consumes, `y_spec` the columns it
/// predicts. Container metadata is independent of any metadata the nested
/// specs carry. All parts are exclusively owned by the container.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelContainer<M> {
    model: M,
    x_spec: DependencySpec,
    y_spec: DependencySpec,
    meta: Option<Meta>,
}

impl<M> ModelContainer<M> {
    /// Wrap an already-fitted model with its known input/output schemas.
    pub fn new(model: M, x_spec: DependencySpec, y_spec: DependencySpec) -> Self {
        Self {
            model,
            x_spec,
            y_spec,
            meta: None,
        }
    }

    /// Attach container-level metadata (replaces any existing mapping)
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

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the container, yielding the wrapped model
    pub fn into_model(self) -> M {
        self.model
    }

    /// Spec of the model's input feature columns
    pub fn x_spec(&self) -> &DependencySpec {
        &self.x_spec
    }

    /// Spec of the model's target/output columns
    pub fn y_spec(&self) -> &DependencySpec {
        &self.y_spec
    }

    /// Container-level metadata, if any was supplied
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }
}
