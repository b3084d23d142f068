//! Quantity management methods for surface meshes.
//!
//! This module contains methods for adding and accessing scalar quantities on
//! surface meshes, and the [`ScalarQuantityMut`] handle through which a
//! quantity is interacted with while its mesh keeps exclusivity and the
//! color program cache consistent.

use std::path::Path;

use meshscope_core::quantity::{DataType, ElementKind, QuantityId};
use meshscope_core::{MeshscopeError, ParentSurface, Quantity, Result, ScalarOptions};
use meshscope_render::{ColorProgram, Histogram, ScalarUniforms};

use super::{SurfaceMesh, SurfaceScalarQuantity, TopologyReport};
use crate::scalar_quantity::ColorSetup;

impl SurfaceMesh {
    // === Quantity add methods ===

    /// Adds a scalar quantity on `kind` elements with default options.
    pub fn add_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        kind: ElementKind,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<QuantityId> {
        self.add_scalar_quantity_with_options(name, kind, values, data_type, &ScalarOptions::default())
    }

    /// Adds a scalar quantity on `kind` elements.
    ///
    /// Names are unique per element kind. Fails with
    /// [`MeshscopeError::QuantityExists`] on a duplicate name and
    /// [`MeshscopeError::SizeMismatch`] if `values` does not have one entry
    /// per element.
    pub fn add_scalar_quantity_with_options(
        &mut self,
        name: impl Into<String>,
        kind: ElementKind,
        values: Vec<f64>,
        data_type: DataType,
        options: &ScalarOptions,
    ) -> Result<QuantityId> {
        let name = name.into();
        if self.scalar_quantity(kind, &name).is_some() {
            return Err(MeshscopeError::QuantityExists(name, self.name.clone()));
        }

        let id = QuantityId(self.next_quantity_id);
        let quantity = SurfaceScalarQuantity::new(
            name,
            id,
            kind,
            values,
            data_type,
            &*self,
            ColorSetup {
                color_maps: &self.color_maps,
                options,
            },
        )?;
        self.next_quantity_id += 1;

        log::debug!(
            "added {} on '{}' as {id}, data range {:?}",
            quantity.display_name(),
            self.name,
            quantity.base().data_range()
        );
        self.quantities.push(quantity);
        Ok(id)
    }

    /// Adds a vertex scalar quantity to this mesh.
    pub fn add_vertex_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<QuantityId> {
        self.add_scalar_quantity(name, ElementKind::Vertex, values, data_type)
    }

    /// Adds a face scalar quantity to this mesh.
    pub fn add_face_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<QuantityId> {
        self.add_scalar_quantity(name, ElementKind::Face, values, data_type)
    }

    /// Adds an edge scalar quantity to this mesh, indexed like [`edges`](Self::edges).
    pub fn add_edge_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<QuantityId> {
        self.add_scalar_quantity(name, ElementKind::Edge, values, data_type)
    }

    /// Adds a halfedge scalar quantity to this mesh, one value per face corner.
    pub fn add_halfedge_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
        data_type: DataType,
    ) -> Result<QuantityId> {
        self.add_scalar_quantity(name, ElementKind::Halfedge, values, data_type)
    }

    // === Quantity access ===

    /// Gets a scalar quantity by element kind and name.
    pub fn scalar_quantity(&self, kind: ElementKind, name: &str) -> Option<&SurfaceScalarQuantity> {
        self.quantities
            .iter()
            .find(|q| q.element() == kind && q.base().name() == name)
    }

    /// Gets a scalar quantity by id.
    pub fn scalar_quantity_by_id(&self, id: QuantityId) -> Option<&SurfaceScalarQuantity> {
        self.quantities.iter().find(|q| q.id() == id)
    }

    /// Returns an interaction handle for the named quantity.
    pub fn scalar_quantity_mut(
        &mut self,
        kind: ElementKind,
        name: &str,
    ) -> Option<ScalarQuantityMut<'_>> {
        let index = self
            .quantities
            .iter()
            .position(|q| q.element() == kind && q.base().name() == name)?;
        Some(ScalarQuantityMut { mesh: self, index })
    }

    /// Returns an interaction handle for quantity `id`.
    pub fn scalar_quantity_mut_by_id(&mut self, id: QuantityId) -> Option<ScalarQuantityMut<'_>> {
        let index = self.quantity_index(id)?;
        Some(ScalarQuantityMut { mesh: self, index })
    }

    /// Returns the currently active scalar quantity, if any.
    pub fn active_scalar_quantity(&self) -> Option<&SurfaceScalarQuantity> {
        self.scalar_quantity_by_id(self.active_quantity?)
    }

    /// Iterates over all scalar quantities, in insertion order.
    pub fn scalar_quantities(&self) -> impl Iterator<Item = &SurfaceScalarQuantity> {
        self.quantities.iter()
    }
}

/// Mutable access to one scalar quantity together with its mesh.
///
/// Every state change that affects the mesh (exclusivity, color program
/// staleness) goes through the mesh here.
pub struct ScalarQuantityMut<'a> {
    mesh: &'a mut SurfaceMesh,
    index: usize,
}

impl ScalarQuantityMut<'_> {
    /// Read access to the quantity.
    pub fn quantity(&self) -> &SurfaceScalarQuantity {
        &self.mesh.quantities[self.index]
    }

    fn quantity_mut(&mut self) -> &mut SurfaceScalarQuantity {
        &mut self.mesh.quantities[self.index]
    }

    pub fn id(&self) -> QuantityId {
        self.quantity().id()
    }

    pub fn is_enabled(&self) -> bool {
        self.quantity().is_enabled()
    }

    /// Enables this quantity, disabling whichever was active on the mesh.
    pub fn enable(&mut self) {
        let id = self.id();
        self.mesh.set_active_exclusive(id);
    }

    /// Disables this quantity, clearing the mesh's active slot if it held it.
    pub fn disable(&mut self) {
        let id = self.id();
        self.quantity_mut().base_mut().set_enabled(false);
        self.mesh.clear_active(id);
    }

    /// Toggles between [`enable`](Self::enable) and [`disable`](Self::disable).
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    /// Selects colormap `index` of the mesh's registry.
    ///
    /// A change marks this quantity's color program stale; the same index or
    /// an unknown one changes nothing.
    pub fn set_color_map(&mut self, index: usize) {
        let id = self.id();
        let changed = {
            let SurfaceMesh {
                quantities,
                color_maps,
                ..
            } = &mut *self.mesh;
            quantities[self.index]
                .base_mut()
                .set_color_map(index, color_maps)
        };
        if changed {
            self.mesh.notify_color_dependency_dirty(id);
        }
    }

    /// Selects a colormap by name.
    pub fn set_color_map_by_name(&mut self, name: &str) -> Result<()> {
        let index = self
            .mesh
            .color_maps
            .index_of(name)
            .map_err(|e| MeshscopeError::RenderError(e.to_string()))?;
        self.set_color_map(index);
        Ok(())
    }

    /// Sets the visualization range; see [`ScalarQuantity::set_viz_range`](crate::ScalarQuantity::set_viz_range).
    pub fn set_viz_range(&mut self, low: f64, high: f64) {
        self.quantity_mut().base_mut().set_viz_range(low, high);
    }

    pub fn reset_viz_range(&mut self) {
        self.quantity_mut().base_mut().reset_viz_range();
    }

    pub fn viz_range(&self) -> (f64, f64) {
        self.quantity().base().viz_range()
    }

    pub fn color_uniforms(&self) -> ScalarUniforms {
        self.quantity().base().color_uniforms()
    }

    pub fn histogram(&self) -> &Histogram {
        self.quantity().base().histogram()
    }

    /// Rebuilds the color program if stale; see
    /// [`SurfaceMesh::ensure_color_program`].
    pub fn ensure_color_buffer_fresh(&mut self) -> Option<TopologyReport> {
        let id = self.id();
        self.mesh.ensure_color_program(id)
    }

    /// The cached color program, possibly stale.
    pub fn color_program(&self) -> Option<&ColorProgram> {
        self.mesh.color_program(self.id())
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.quantity().write_to_file(path.as_ref())
    }

    pub fn build_element_info(&self, index: usize) -> Option<f64> {
        self.quantity().build_element_info(index)
    }
}
