//! The parent-surface interface consumed by surface quantities.
//!
//! A [`ParentSurface`] owns mesh topology, per-element weights, the slot
//! holding its active quantity and the render resources built on behalf of
//! its quantities. Quantities never hold a reference to their parent; they
//! are handed one when they need topology, and identify themselves to it by
//! [`QuantityId`].

use crate::quantity::{ElementKind, QuantityId};

/// One triangle of a surface's triangulation.
///
/// Edge and halfedge slots are indexed by triangle side: slot `i` is the side
/// from corner `i` to corner `(i + 1) % 3`. A side that is not an edge of the
/// original polygon (an internal diagonal of a triangulated polygon) is
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangulationFace {
    /// Vertex index of each corner.
    pub vertex_inds: [u32; 3],
    /// Edge index of each side, if the side is a real edge.
    pub edge_inds: [Option<u32>; 3],
    /// Halfedge index of each side, if the side is a real halfedge.
    pub halfedge_inds: [Option<u32>; 3],
    /// Index of the original polygon this triangle belongs to.
    pub face_ind: u32,
}

impl TriangulationFace {
    /// Returns the number of sides that map to a real edge.
    pub fn num_valid_edges(&self) -> usize {
        self.edge_inds.iter().filter(|e| e.is_some()).count()
    }
}

/// A surface that scalar quantities can be attached to.
pub trait ParentSurface {
    /// Number of elements of the given kind.
    fn element_count(&self, kind: ElementKind) -> usize;

    /// Geometric weight of one element: vertex area, face area or edge length.
    fn element_weight(&self, kind: ElementKind, index: usize) -> f64;

    /// The triangulated faces, in draw order.
    fn triangulation(&self) -> &[TriangulationFace];

    /// Number of sides of original polygon `face`.
    fn face_degree(&self, face: usize) -> usize;

    /// Halfedges of original polygon `face`, in cyclic order.
    fn face_halfedges(&self, face: usize) -> std::ops::Range<usize>;

    /// The halfedge following `halfedge` around its face.
    fn next_halfedge(&self, halfedge: usize) -> usize;

    /// Marks the color resources built for `quantity` stale.
    fn notify_color_dependency_dirty(&mut self, quantity: QuantityId);

    /// Makes `quantity` the single active quantity, disabling any other.
    fn set_active_exclusive(&mut self, quantity: QuantityId);

    /// Clears the active slot if it currently holds `quantity`.
    fn clear_active(&mut self, quantity: QuantityId);

    /// Collects every element weight of `kind`, in index order.
    fn element_weights(&self, kind: ElementKind) -> Vec<f64> {
        (0..self.element_count(kind))
            .map(|i| self.element_weight(kind, i))
            .collect()
    }
}
