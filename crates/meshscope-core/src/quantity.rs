//! Quantity trait and related types.
//!
//! A [`Quantity`] represents data associated with a structure. The scalar
//! subsystem adds the element a value array is defined on ([`ElementKind`]),
//! how its visualization range is chosen ([`DataType`]) and the stable
//! [`QuantityId`] a parent uses to refer to it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The mesh element a per-element value array is defined on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// One value per vertex.
    Vertex,
    /// One value per (polygon) face.
    Face,
    /// One value per undirected edge.
    Edge,
    /// One value per halfedge (face corner).
    Halfedge,
}

impl ElementKind {
    /// All element kinds, in declaration order.
    pub const ALL: [ElementKind; 4] = [Self::Vertex, Self::Face, Self::Edge, Self::Halfedge];

    /// Lowercase name used in labels, e.g. `"vertex"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Face => "face",
            Self::Edge => "edge",
            Self::Halfedge => "halfedge",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How scalar data should be scaled for display.
///
/// Fixed when a quantity is created. It picks the default colormap, the
/// initial visualization range and the bounds a user may drag the range to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Arbitrary values; range is the data range.
    #[default]
    Standard,
    /// Values centered on zero; range is symmetric about zero.
    Symmetric,
    /// Non-negative magnitudes; range starts at zero.
    Magnitude,
}

/// Stable handle of a quantity inside its parent structure.
///
/// Ids are never reused by a parent, so a stale id simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuantityId(pub u64);

impl fmt::Display for QuantityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Data associated with a structure that can be visualized.
///
/// Enabling goes through the owning structure, which enforces that only one
/// quantity drawing on its surface is active at a time.
pub trait Quantity: Send + Sync {
    /// Returns the name of this quantity.
    fn name(&self) -> &str;

    /// Returns the name of the parent structure.
    fn structure_name(&self) -> &str;

    /// Returns the stable id assigned by the parent structure.
    fn id(&self) -> QuantityId;

    /// Returns the mesh element the data is defined on.
    fn element_kind(&self) -> ElementKind;

    /// Returns whether this quantity is currently enabled/visible.
    fn is_enabled(&self) -> bool;

    /// Returns the number of data elements.
    fn data_size(&self) -> usize;
}
