//! meshscope: scalar quantities on polygon surface meshes.
//!
//! Register a surface mesh, attach per-element scalar data to it and drive
//! the colormapped view of that data: range estimation, colormap selection,
//! visualization range and a weighted histogram.
//!
//! # Quick Start
//!
//! ```no_run
//! use meshscope::*;
//!
//! fn main() -> Result<()> {
//!     init()?;
//!
//!     let vertices = vec![
//!         Vec3::new(0.0, 0.0, 0.0),
//!         Vec3::new(1.0, 0.0, 0.0),
//!         Vec3::new(1.0, 1.0, 0.0),
//!         Vec3::new(0.0, 1.0, 0.0),
//!     ];
//!     let mesh = register_surface_mesh("quad", vertices, vec![vec![0, 1, 2, 3]])?;
//!
//!     let height = mesh.add_vertex_scalar_quantity(
//!         "height",
//!         vec![0.0, 1.0, 2.0, 3.0],
//!         DataType::Standard,
//!     )?;
//!     height.enable()?;
//!     height.set_viz_range(0.5, 2.5)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - A **structure** is a geometric object in the scene. Here that is a
//!   [`SurfaceMesh`].
//! - A **quantity** is data attached to a structure. Scalar quantities bind
//!   one value per vertex, face, edge or halfedge ([`ElementKind`]).
//!
//! At most one scalar quantity per mesh is enabled at a time. Colormap
//! changes mark the mesh's color program stale; it is rebuilt once on the
//! next [`ScalarQuantityHandle::ensure_color_buffer_fresh`].

// Fallible handle methods share the error conditions documented on their types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod init;
mod surface_mesh;

pub use meshscope_core::{
    robust_min_max, DataType, ElementKind, HasQuantities, MeshscopeError, Options, Quantity,
    QuantityId, Result, ScalarOptions, Structure, Vec3,
};

pub use meshscope_render::{
    colorize, ColorAttribute, ColorMap, ColorMapRegistry, ColorProgram, CornerColors, Histogram,
    ScalarUniforms,
};

pub use meshscope_structures::{SurfaceMesh, SurfaceScalarQuantity, TopologyReport};

pub use init::{
    init, is_initialized, load_options, options, remove_all_structures, remove_structure,
    set_options, shutdown,
};
pub use surface_mesh::{
    get_surface_mesh, register_surface_mesh, with_surface_mesh, with_surface_mesh_ref,
    ScalarQuantityHandle, SurfaceMeshHandle,
};
