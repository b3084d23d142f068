//! Name-keyed store of registered structures.

use std::collections::HashMap;

use crate::error::{MeshscopeError, Result};
use crate::structure::Structure;

/// Every registered structure, keyed by its unique name.
///
/// Names are unique across structure types. Typed lookups downcast and
/// treat a structure of another type as absent.
#[derive(Default)]
pub struct Registry {
    structures: HashMap<String, Box<dyn Structure>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a structure under its own name.
    ///
    /// Fails with [`MeshscopeError::StructureExists`] if the name is taken.
    pub fn register(&mut self, structure: Box<dyn Structure>) -> Result<()> {
        let name = structure.name().to_string();
        if self.structures.contains_key(&name) {
            return Err(MeshscopeError::StructureExists(name));
        }
        log::trace!("registry: adding {} '{name}'", structure.type_name());
        self.structures.insert(name, structure);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Structure> {
        self.structures.get(name).map(AsRef::as_ref)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Structure>> {
        self.structures.get_mut(name)
    }

    /// The structure called `name` if it is a `T`.
    pub fn get_as<T: Structure>(&self, name: &str) -> Option<&T> {
        self.get(name)?.as_any().downcast_ref()
    }

    /// Mutable access to the structure called `name` if it is a `T`.
    pub fn get_as_mut<T: Structure>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name)?.as_any_mut().downcast_mut()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.structures.contains_key(name)
    }

    /// Takes the structure called `name` out of the registry.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Structure>> {
        self.structures.remove(name)
    }

    pub fn clear(&mut self) {
        self.structures.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Structure> {
        self.structures.values().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
