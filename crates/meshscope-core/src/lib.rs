//! Core abstractions for meshscope.
//!
//! This crate provides the fundamental traits and types used throughout meshscope:
//! - [`Structure`] trait for geometric objects
//! - [`Quantity`] trait for per-element data attached to structures
//! - [`ParentSurface`] trait through which surface quantities reach their mesh
//! - Outlier-tolerant range estimation for scalar data
//! - Global state management, structure registry and configuration options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Quantile indices are computed in floating point
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod error;
pub mod options;
pub mod quantity;
pub mod range;
pub mod registry;
pub mod state;
pub mod structure;
pub mod surface;

pub use error::{MeshscopeError, Result};
pub use options::{Options, ScalarOptions};
pub use quantity::{DataType, ElementKind, Quantity, QuantityId};
pub use range::{robust_min_max, DEFAULT_TRIM_FRACTION};
pub use registry::Registry;
pub use state::{
    is_initialized, try_with_context, try_with_context_mut, with_context, with_context_mut, Context,
};
pub use structure::{HasQuantities, Structure};
pub use surface::{ParentSurface, TriangulationFace};

// Re-export glam types for convenience
pub use glam::Vec3;
