//! Error types for meshscope.

use thiserror::Error;

use crate::quantity::ElementKind;

/// The main error type for meshscope operations.
#[derive(Error, Debug)]
pub enum MeshscopeError {
    /// meshscope has not been initialized.
    #[error("meshscope not initialized - call meshscope::init() first")]
    NotInitialized,

    /// meshscope has already been initialized.
    #[error("meshscope already initialized")]
    AlreadyInitialized,

    /// A structure with the given name already exists.
    #[error("structure '{0}' already exists")]
    StructureExists(String),

    /// A structure with the given name was not found.
    #[error("structure '{0}' not found")]
    StructureNotFound(String),

    /// A quantity with the given name already exists.
    #[error("quantity '{0}' already exists on structure '{1}'")]
    QuantityExists(String, String),

    /// A quantity with the given name was not found.
    #[error("quantity '{0}' not found on structure '{1}'")]
    QuantityNotFound(String, String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A polygon references a vertex that does not exist, or has too few corners.
    #[error("invalid face {face}: {reason}")]
    InvalidFace { face: usize, reason: String },

    /// The operation is not supported for this kind of quantity.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Scalar values on this element kind cannot be expanded exactly for a face.
    #[error("{kind} quantities are not exact on face {face} with {degree} sides")]
    UnsupportedTopology {
        kind: ElementKind,
        face: usize,
        degree: usize,
    },

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for meshscope operations.
pub type Result<T> = std::result::Result<T, MeshscopeError>;
