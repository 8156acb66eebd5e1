//! Error types for Guardar

use thiserror::Error;

/// Which nested spec failed while decoding a container payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecRole {
    /// The input-column spec (`x_spec`)
    Input,
    /// The target/output-column spec (`y_spec`)
    Output,
}

impl std::fmt::Display for SpecRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecRole::Input => write!(f, "x_spec"),
            SpecRole::Output => write!(f, "y_spec"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unrecognized format marker: {0:?}")]
    Format(String),

    #[error("unsupported format version {found} (this build reads version {supported})")]
    Version { found: u64, supported: u32 },

    #[error("corrupt payload: {0}")]
    Corruption(String),

    #[error("no model codec registered for family {0:?}")]
    ModelCodec(String),

    #[error("{role} failed to decode: {source}")]
    Spec {
        role: SpecRole,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid dependency spec: {0}")]
    InvalidSpec(String),

    #[error("dependency {0:?} not found in spec")]
    DependencyNotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
