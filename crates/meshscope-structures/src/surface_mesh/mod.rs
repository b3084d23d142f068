//! Surface mesh structure.

mod geometry;
mod quantity_methods;
mod scalar_quantity;

pub use quantity_methods::ScalarQuantityMut;
pub use scalar_quantity::{SurfaceScalarQuantity, TopologyReport};

use std::collections::HashMap;
use std::ops::Range;

use glam::Vec3;
use meshscope_core::quantity::{ElementKind, Quantity, QuantityId};
use meshscope_core::structure::{HasQuantities, Structure};
use meshscope_core::surface::{ParentSurface, TriangulationFace};
use meshscope_core::Result;
use meshscope_render::{ColorMap, ColorMapRegistry, ColorProgram};

/// Cached color program of one quantity.
#[derive(Debug, Default)]
struct ColorProgramSlot {
    program: Option<ColorProgram>,
    dirty: bool,
    rebuilds: usize,
}

/// A polygonal surface mesh carrying scalar quantities.
pub struct SurfaceMesh {
    // Core data
    name: String,
    vertices: Vec<Vec3>,
    faces: Vec<Vec<u32>>, // Variable-length polygons
    enabled: bool,

    // Quantities
    quantities: Vec<SurfaceScalarQuantity>,
    next_quantity_id: u64,
    active_quantity: Option<QuantityId>,
    color_maps: ColorMapRegistry,
    color_programs: HashMap<QuantityId, ColorProgramSlot>,

    // Computed data
    triangulation: Vec<TriangulationFace>,
    face_to_tri_range: Vec<Range<usize>>,
    edges: Vec<(u32, u32)>,
    halfedge_start: Vec<usize>,
    halfedge_face: Vec<u32>,
    halfedge_edge: Vec<u32>,
    vertex_areas: Vec<f64>,
    face_areas: Vec<f64>,
    edge_lengths: Vec<f64>,
}

impl SurfaceMesh {
    /// Creates a new surface mesh from vertices and polygon faces.
    ///
    /// Each face is a variable-length list of vertex indices forming a polygon.
    /// Faces with fewer than three corners or out-of-range indices are
    /// rejected with [`MeshscopeError::InvalidFace`](meshscope_core::MeshscopeError::InvalidFace).
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Result<Self> {
        geometry::validate_faces(vertices.len(), &faces)?;

        let mut mesh = Self {
            name: name.into(),
            vertices,
            faces,
            enabled: true,

            quantities: Vec::new(),
            next_quantity_id: 0,
            active_quantity: None,
            color_maps: ColorMapRegistry::new(),
            color_programs: HashMap::new(),

            // Computed data (will be filled by recompute)
            triangulation: Vec::new(),
            face_to_tri_range: Vec::new(),
            edges: Vec::new(),
            halfedge_start: Vec::new(),
            halfedge_face: Vec::new(),
            halfedge_edge: Vec::new(),
            vertex_areas: Vec::new(),
            face_areas: Vec::new(),
            edge_lengths: Vec::new(),
        };
        mesh.recompute();
        log::debug!(
            "surface mesh '{}': {} vertices, {} faces, {} edges",
            mesh.name,
            mesh.num_vertices(),
            mesh.num_faces(),
            mesh.num_edges()
        );
        Ok(mesh)
    }

    /// Creates a new surface mesh from triangles (convenience method).
    pub fn from_triangles(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self> {
        let faces: Vec<Vec<u32>> = triangles.into_iter().map(|t| t.to_vec()).collect();
        Self::new(name, vertices, faces)
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of halfedges (face corners).
    pub fn num_halfedges(&self) -> usize {
        self.halfedge_face.len()
    }

    /// Returns the number of triangles in the triangulation.
    pub fn num_triangles(&self) -> usize {
        self.triangulation.len()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the mapping from face index to triangle range.
    pub fn face_to_tri_range(&self) -> &[Range<usize>] {
        &self.face_to_tri_range
    }

    /// Returns the unique edges as sorted pairs, in index order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Area attributed to each vertex.
    pub fn vertex_areas(&self) -> &[f64] {
        &self.vertex_areas
    }

    pub fn face_areas(&self) -> &[f64] {
        &self.face_areas
    }

    pub fn edge_lengths(&self) -> &[f64] {
        &self.edge_lengths
    }

    /// Edge underlying each halfedge.
    pub fn halfedge_edges(&self) -> &[u32] {
        &self.halfedge_edge
    }

    /// Colormaps quantities on this mesh select from.
    pub fn color_maps(&self) -> &ColorMapRegistry {
        &self.color_maps
    }

    /// Registers a colormap for quantities on this mesh and returns its
    /// index.
    ///
    /// Replacing a map by name marks the color programs of every quantity
    /// using it stale and updates their histograms.
    pub fn register_color_map(&mut self, color_map: ColorMap) -> usize {
        let index = self.color_maps.register(color_map);
        let Ok(map) = self.color_maps.get_index(index) else {
            return index;
        };

        let mut affected = Vec::new();
        for q in &mut self.quantities {
            if q.base().color_map_index() == index {
                q.base_mut().refresh_color_map(map);
                affected.push(q.id());
            }
        }
        for id in affected {
            self.notify_color_dependency_dirty(id);
        }
        index
    }

    /// The quantity currently drawn on the surface, if any.
    pub fn active_quantity(&self) -> Option<QuantityId> {
        self.active_quantity
    }

    /// The cached color program of `id`, possibly stale.
    pub fn color_program(&self, id: QuantityId) -> Option<&ColorProgram> {
        self.color_programs.get(&id)?.program.as_ref()
    }

    /// Whether the color program of `id` must be rebuilt before drawing.
    pub fn is_color_program_stale(&self, id: QuantityId) -> bool {
        self.color_programs
            .get(&id)
            .map_or(true, |slot| slot.dirty || slot.program.is_none())
    }

    /// How many times the color program of `id` has been built.
    pub fn color_program_rebuilds(&self, id: QuantityId) -> usize {
        self.color_programs.get(&id).map_or(0, |slot| slot.rebuilds)
    }

    /// Rebuilds the color program of `id` if it is stale.
    ///
    /// Returns the expansion report when a rebuild happened, `None` when the
    /// cached program was still fresh or `id` is unknown.
    pub fn ensure_color_program(&mut self, id: QuantityId) -> Option<TopologyReport> {
        if !self.is_color_program_stale(id) {
            return None;
        }
        let index = self.quantity_index(id)?;
        let quantity = &self.quantities[index];

        let map = match self.color_maps.get_index(quantity.base().color_map_index()) {
            Ok(map) => map,
            Err(err) => {
                log::warn!("cannot build colors for '{}': {err}", quantity.base().name());
                return None;
            }
        };
        let (attribute, report) = quantity.fill_color_buffer(self);
        let program = ColorProgram::new(attribute, map, report.face_indices());
        log::debug!(
            "rebuilt color program for '{}' on '{}' ({} corners)",
            quantity.base().name(),
            self.name,
            program.attribute().corner_count()
        );

        let slot = self.color_programs.entry(id).or_default();
        slot.program = Some(program);
        slot.dirty = false;
        slot.rebuilds += 1;
        Some(report)
    }

    fn quantity_index(&self, id: QuantityId) -> Option<usize> {
        self.quantities.iter().position(|q| q.id() == id)
    }
}

impl ParentSurface for SurfaceMesh {
    fn element_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Vertex => self.num_vertices(),
            ElementKind::Face => self.num_faces(),
            ElementKind::Edge => self.num_edges(),
            ElementKind::Halfedge => self.num_halfedges(),
        }
    }

    fn element_weight(&self, kind: ElementKind, index: usize) -> f64 {
        match kind {
            ElementKind::Vertex => self.vertex_areas[index],
            ElementKind::Face => self.face_areas[index],
            ElementKind::Edge => self.edge_lengths[index],
            ElementKind::Halfedge => self.edge_lengths[self.halfedge_edge[index] as usize],
        }
    }

    fn triangulation(&self) -> &[TriangulationFace] {
        &self.triangulation
    }

    fn face_degree(&self, face: usize) -> usize {
        self.faces[face].len()
    }

    fn face_halfedges(&self, face: usize) -> Range<usize> {
        self.halfedge_start[face]..self.halfedge_start[face + 1]
    }

    fn next_halfedge(&self, halfedge: usize) -> usize {
        let range = self.face_halfedges(self.halfedge_face[halfedge] as usize);
        if halfedge + 1 == range.end {
            range.start
        } else {
            halfedge + 1
        }
    }

    fn notify_color_dependency_dirty(&mut self, quantity: QuantityId) {
        log::debug!("color program of {quantity} on '{}' marked stale", self.name);
        self.color_programs.entry(quantity).or_default().dirty = true;
    }

    fn set_active_exclusive(&mut self, quantity: QuantityId) {
        if self.quantity_index(quantity).is_none() {
            return;
        }
        for q in &mut self.quantities {
            let on = q.id() == quantity;
            q.base_mut().set_enabled(on);
        }
        self.active_quantity = Some(quantity);
    }

    fn clear_active(&mut self, quantity: QuantityId) {
        if self.active_quantity == Some(quantity) {
            self.active_quantity = None;
        }
    }
}

impl Structure for SurfaceMesh {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "SurfaceMesh"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn refresh(&mut self) {
        for slot in self.color_programs.values_mut() {
            slot.dirty = true;
        }
    }
}

impl HasQuantities for SurfaceMesh {
    fn get_quantity(&self, kind: ElementKind, name: &str) -> Option<&dyn Quantity> {
        self.quantities
            .iter()
            .find(|q| q.element() == kind && q.base().name() == name)
            .map(|q| q as &dyn Quantity)
    }

    fn get_quantity_by_id(&self, id: QuantityId) -> Option<&dyn Quantity> {
        self.quantities
            .iter()
            .find(|q| q.id() == id)
            .map(|q| q as &dyn Quantity)
    }

    fn remove_quantity(&mut self, id: QuantityId) -> Option<Box<dyn Quantity>> {
        let index = self.quantity_index(id)?;
        self.clear_active(id);
        self.color_programs.remove(&id);
        Some(Box::new(self.quantities.remove(index)))
    }

    fn quantity_ids(&self) -> Vec<QuantityId> {
        self.quantities.iter().map(|q| q.id()).collect()
    }
}
