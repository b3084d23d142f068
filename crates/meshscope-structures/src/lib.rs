//! Structure implementations for meshscope.
//!
//! This crate provides the surface mesh structure and the scalar quantities
//! that can be attached to it:
//! - [`SurfaceMesh`], a polygonal mesh acting as parent surface
//! - [`ScalarQuantity`], state shared by every scalar quantity
//! - [`SurfaceScalarQuantity`], values bound to vertices, faces, edges or
//!   halfedges, expanded into per-corner color attributes

// Geometry code uses casts for indices and for narrowing values to f32
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod scalar_quantity;
pub mod surface_mesh;

pub use scalar_quantity::{ColorSetup, ScalarQuantity};
pub use surface_mesh::{ScalarQuantityMut, SurfaceMesh, SurfaceScalarQuantity, TopologyReport};
