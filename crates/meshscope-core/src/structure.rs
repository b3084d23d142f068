//! Structure trait and related types.
//!
//! A [`Structure`] represents a geometric object in the scene. In meshscope
//! that is a surface mesh carrying scalar quantities.

use std::any::Any;

use crate::quantity::{ElementKind, Quantity, QuantityId};

/// A geometric object that can be visualized.
///
/// Each structure has a name that is unique within its type and a visibility
/// state.
pub trait Structure: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the unique name of this structure.
    fn name(&self) -> &str;

    /// Returns the type name of this structure (e.g., "`SurfaceMesh`").
    fn type_name(&self) -> &'static str;

    /// Returns whether this structure is currently visible.
    fn is_enabled(&self) -> bool;

    /// Sets the visibility of this structure.
    fn set_enabled(&mut self, enabled: bool);

    /// Drops cached render resources so they are rebuilt before the next draw.
    fn refresh(&mut self);
}

/// A structure that can have quantities attached to it.
pub trait HasQuantities: Structure {
    /// Gets a quantity by element kind and name.
    fn get_quantity(&self, kind: ElementKind, name: &str) -> Option<&dyn Quantity>;

    /// Gets a quantity by id.
    fn get_quantity_by_id(&self, id: QuantityId) -> Option<&dyn Quantity>;

    /// Removes a quantity by id.
    fn remove_quantity(&mut self, id: QuantityId) -> Option<Box<dyn Quantity>>;

    /// Ids of all attached quantities, in insertion order.
    fn quantity_ids(&self) -> Vec<QuantityId>;

    /// Returns the number of quantities attached.
    fn num_quantities(&self) -> usize {
        self.quantity_ids().len()
    }
}
