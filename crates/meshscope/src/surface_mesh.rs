use std::path::Path;

use meshscope_core::state::{try_with_context, try_with_context_mut};
use meshscope_core::{
    Context, DataType, ElementKind, HasQuantities, MeshscopeError, ParentSurface, Quantity,
    Result, Vec3,
};
use meshscope_render::{CornerColors, ScalarUniforms};
use meshscope_structures::{ScalarQuantityMut, SurfaceMesh, TopologyReport};

/// Registers a surface mesh with meshscope.
///
/// Faces are polygons of at least three vertex indices.
///
/// # Errors
///
/// Fails with [`MeshscopeError::InvalidFace`] on a malformed face and
/// [`MeshscopeError::StructureExists`] if the name is taken.
pub fn register_surface_mesh(
    name: impl Into<String>,
    vertices: Vec<Vec3>,
    faces: Vec<Vec<u32>>,
) -> Result<SurfaceMeshHandle> {
    let name = name.into();
    let mesh = SurfaceMesh::new(name.clone(), vertices, faces)?;

    try_with_context_mut(|ctx| ctx.registry.register(Box::new(mesh)))
        .ok_or(MeshscopeError::NotInitialized)??;

    log::debug!("registered surface mesh '{name}'");
    Ok(SurfaceMeshHandle { name })
}

/// Gets a registered surface mesh by name.
#[must_use]
pub fn get_surface_mesh(name: &str) -> Option<SurfaceMeshHandle> {
    try_with_context(|ctx| ctx.registry.get_as::<SurfaceMesh>(name).is_some())
        .unwrap_or(false)
        .then(|| SurfaceMeshHandle {
            name: name.to_string(),
        })
}

fn mesh_in_context<'a>(ctx: &'a mut Context, name: &str) -> Option<&'a mut SurfaceMesh> {
    ctx.registry.get_as_mut::<SurfaceMesh>(name)
}

fn try_with_mesh<F, R>(name: &str, f: F) -> Result<R>
where
    F: FnOnce(&mut SurfaceMesh) -> R,
{
    try_with_context_mut(|ctx| mesh_in_context(ctx, name).map(f))
        .ok_or(MeshscopeError::NotInitialized)?
        .ok_or_else(|| MeshscopeError::StructureNotFound(name.to_string()))
}

/// Executes a closure with mutable access to a registered surface mesh.
///
/// Returns `None` if the mesh does not exist or meshscope is not initialized.
pub fn with_surface_mesh<F, R>(name: &str, f: F) -> Option<R>
where
    F: FnOnce(&mut SurfaceMesh) -> R,
{
    try_with_mesh(name, f).ok()
}

/// Executes a closure with immutable access to a registered surface mesh.
///
/// Returns `None` if the mesh does not exist or meshscope is not initialized.
pub fn with_surface_mesh_ref<F, R>(name: &str, f: F) -> Option<R>
where
    F: FnOnce(&SurfaceMesh) -> R,
{
    try_with_context(|ctx| ctx.registry.get_as::<SurfaceMesh>(name).map(f)).flatten()
}

/// Handle for a registered surface mesh.
#[derive(Clone, Debug)]
pub struct SurfaceMeshHandle {
    name: String,
}

impl SurfaceMeshHandle {
    /// Returns the name of this mesh.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of elements of `kind` on this mesh.
    pub fn element_count(&self, kind: ElementKind) -> Result<usize> {
        try_with_mesh(&self.name, |mesh| mesh.element_count(kind))
    }

    // -- Quantities --

    /// Adds a scalar quantity using the scalar defaults of the current
    /// [`Options`](crate::Options).
    pub fn add_scalar_quantity(
        &self,
        name: impl Into<String>,
        kind: ElementKind,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<ScalarQuantityHandle> {
        let name = name.into();
        try_with_context_mut(|ctx| {
            let options = ctx.options.scalar.clone();
            let mesh = mesh_in_context(ctx, &self.name)
                .ok_or_else(|| MeshscopeError::StructureNotFound(self.name.clone()))?;
            mesh.add_scalar_quantity_with_options(name.clone(), kind, values, data_type, &options)
        })
        .ok_or(MeshscopeError::NotInitialized)??;

        Ok(ScalarQuantityHandle {
            mesh: self.name.clone(),
            kind,
            name,
        })
    }

    /// Adds a scalar quantity with one value per vertex.
    pub fn add_vertex_scalar_quantity(
        &self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<ScalarQuantityHandle> {
        self.add_scalar_quantity(name, ElementKind::Vertex, values, data_type)
    }

    /// Adds a scalar quantity with one value per face.
    pub fn add_face_scalar_quantity(
        &self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<ScalarQuantityHandle> {
        self.add_scalar_quantity(name, ElementKind::Face, values, data_type)
    }

    /// Adds a scalar quantity with one value per unique edge.
    pub fn add_edge_scalar_quantity(
        &self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<ScalarQuantityHandle> {
        self.add_scalar_quantity(name, ElementKind::Edge, values, data_type)
    }

    /// Adds a scalar quantity with one value per face corner.
    pub fn add_halfedge_scalar_quantity(
        &self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<ScalarQuantityHandle> {
        self.add_scalar_quantity(name, ElementKind::Halfedge, values, data_type)
    }

    /// Looks up an existing scalar quantity.
    #[must_use]
    pub fn get_scalar_quantity(&self, kind: ElementKind, name: &str) -> Option<ScalarQuantityHandle> {
        with_surface_mesh_ref(&self.name, |mesh| mesh.scalar_quantity(kind, name).is_some())
            .unwrap_or(false)
            .then(|| ScalarQuantityHandle {
                mesh: self.name.clone(),
                kind,
                name: name.to_string(),
            })
    }

    /// The currently enabled scalar quantity, if any.
    #[must_use]
    pub fn active_scalar_quantity(&self) -> Option<ScalarQuantityHandle> {
        with_surface_mesh_ref(&self.name, |mesh| {
            mesh.active_scalar_quantity().map(|q| ScalarQuantityHandle {
                mesh: self.name.clone(),
                kind: q.element(),
                name: q.name().to_string(),
            })
        })
        .flatten()
    }

    /// Number of quantities attached to this mesh.
    pub fn num_quantities(&self) -> Result<usize> {
        try_with_mesh(&self.name, |mesh| mesh.num_quantities())
    }

    /// Removes a scalar quantity and its cached color program.
    pub fn remove_scalar_quantity(&self, kind: ElementKind, name: &str) -> Result<()> {
        try_with_mesh(&self.name, |mesh| {
            let id = mesh.scalar_quantity(kind, name)?.id();
            mesh.remove_quantity(id)
        })?
        .map(|_| ())
        .ok_or_else(|| MeshscopeError::QuantityNotFound(name.to_string(), self.name.clone()))
    }
}

/// Handle for a scalar quantity on a registered surface mesh.
///
/// The handle names the quantity by mesh, element kind and quantity name;
/// every call resolves it again, so a removed quantity yields
/// [`MeshscopeError::QuantityNotFound`].
#[derive(Clone, Debug)]
pub struct ScalarQuantityHandle {
    mesh: String,
    kind: ElementKind,
    name: String,
}

impl ScalarQuantityHandle {
    /// Returns the quantity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the mesh the quantity lives on.
    #[must_use]
    pub fn mesh_name(&self) -> &str {
        &self.mesh
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    fn with_quantity<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut ScalarQuantityMut<'_>) -> R,
    {
        try_with_mesh(&self.mesh, |mesh| {
            mesh.scalar_quantity_mut(self.kind, &self.name)
                .map(|mut q| f(&mut q))
        })?
        .ok_or_else(|| MeshscopeError::QuantityNotFound(self.name.clone(), self.mesh.clone()))
    }

    pub fn is_enabled(&self) -> Result<bool> {
        self.with_quantity(|q| q.is_enabled())
    }

    /// Enables the quantity, disabling any other scalar quantity on the mesh.
    pub fn enable(&self) -> Result<&Self> {
        self.with_quantity(|q| q.enable())?;
        Ok(self)
    }

    pub fn disable(&self) -> Result<&Self> {
        self.with_quantity(|q| q.disable())?;
        Ok(self)
    }

    /// Selects a colormap by its index in the mesh's colormap registry.
    /// Unknown indices are ignored.
    pub fn set_color_map(&self, index: usize) -> Result<&Self> {
        self.with_quantity(|q| q.set_color_map(index))?;
        Ok(self)
    }

    /// Selects a colormap by name.
    pub fn set_color_map_by_name(&self, name: &str) -> Result<&Self> {
        self.with_quantity(|q| q.set_color_map_by_name(name))??;
        Ok(self)
    }

    /// Index of the selected colormap.
    pub fn color_map_index(&self) -> Result<usize> {
        self.with_quantity(|q| q.quantity().base().color_map_index())
    }

    /// Sets the visualization range, clamped to the data-type policy.
    pub fn set_viz_range(&self, low: f64, high: f64) -> Result<&Self> {
        self.with_quantity(|q| q.set_viz_range(low, high))?;
        Ok(self)
    }

    pub fn reset_viz_range(&self) -> Result<&Self> {
        self.with_quantity(|q| q.reset_viz_range())?;
        Ok(self)
    }

    pub fn viz_range(&self) -> Result<(f64, f64)> {
        self.with_quantity(|q| q.viz_range())
    }

    /// Robust data range estimated at construction.
    pub fn data_range(&self) -> Result<(f64, f64)> {
        self.with_quantity(|q| q.quantity().base().data_range())
    }

    pub fn color_uniforms(&self) -> Result<ScalarUniforms> {
        self.with_quantity(|q| q.color_uniforms())
    }

    /// Rebuilds the mesh's color program for this quantity if it is stale.
    ///
    /// Returns the faces the rebuild could not represent exactly, if a
    /// rebuild happened.
    pub fn ensure_color_buffer_fresh(&self) -> Result<Option<TopologyReport>> {
        self.with_quantity(|q| q.ensure_color_buffer_fresh())
    }

    /// Colors of the color program under the current visualization range
    /// and colormap, rebuilding the program first if it is stale.
    ///
    /// Vertex and face data give one color per triangle corner, edge and
    /// halfedge data three. The report of the rebuild, if one happened, is
    /// returned alongside.
    pub fn corner_colors(&self) -> Result<(CornerColors, Option<TopologyReport>)> {
        try_with_mesh(&self.mesh, |mesh| {
            let id = mesh.scalar_quantity(self.kind, &self.name)?.id();
            let report = mesh.ensure_color_program(id);
            let base = mesh.scalar_quantity_by_id(id)?.base();
            let (low, high) = base.viz_range();
            let color_map = mesh.color_maps().get_index(base.color_map_index()).ok()?;
            let colors = mesh.color_program(id)?.colors(low, high, color_map);
            Some((colors, report))
        })?
        .ok_or_else(|| MeshscopeError::QuantityNotFound(self.name.clone(), self.mesh.clone()))
    }

    /// Normalized histogram bar heights, one per bin.
    pub fn histogram_heights(&self) -> Result<Vec<f32>> {
        self.with_quantity(|q| q.histogram().normalized_heights())
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.with_quantity(|q| q.write_to_file(path))?
    }

    /// The scalar value of element `index`, if in range.
    pub fn build_element_info(&self, index: usize) -> Result<Option<f64>> {
        self.with_quantity(|q| q.build_element_info(index))
    }
}
