//! # Guardar: Model Artifact Persistence
//!
//! Guardar persists a trained model together with the schema of the data it
//! was trained on, as one restorable unit, so a training script and a
//! separate serving script can exchange state through the filesystem.
//!
//! ## Architecture
//!
//! - **spec**: `DependencySpec`, an ordered column list with optional metadata
//! - **container**: `ModelContainer`, bundling a model with its input/output specs
//! - **codec**: pluggable encoder/decoder pairs for opaque model objects
//! - **envelope**: the self-describing on-disk format shared by both entities
//!
//! Every persisted payload opens with a format marker and version tag;
//! loading is all-or-nothing and validates structure, version, and model
//! checksum before reconstructing anything.

pub mod codec;
pub mod container;
pub mod envelope;
pub mod error;
pub mod spec;

// Re-export commonly used types
pub use codec::{BincodeCodec, CodecRegistry, JsonCodec, ModelCodec};
pub use container::{inspect, ContainerInfo, ModelContainer};
pub use error::{Error, Result, SpecRole};
pub use spec::{DependencySpec, Meta, ValidationPolicy};
