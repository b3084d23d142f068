//! Initialization, configuration and structure lifecycle.

use std::path::Path;

use meshscope_core::state::{self, try_with_context, try_with_context_mut};
use meshscope_core::{MeshscopeError, Options, Result};

/// Initializes meshscope with default settings.
///
/// This must be called before any structure is registered. A logger is
/// installed through `env_logger` unless one is already set.
///
/// # Errors
///
/// Returns an error if meshscope has already been initialized.
///
/// # Example
///
/// ```no_run
/// use meshscope::*;
///
/// fn main() -> Result<()> {
///     init()?;
///     // Now you can register surface meshes
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    let _ = env_logger::try_init();
    state::init_context()?;
    log::info!("meshscope initialized");
    Ok(())
}

/// Returns whether meshscope has been initialized.
#[must_use]
pub fn is_initialized() -> bool {
    state::is_initialized()
}

/// Shuts down meshscope, dropping every registered structure and resetting
/// the options.
///
/// After calling this, [`init()`] may be called again.
pub fn shutdown() {
    state::shutdown_context();
    log::info!("meshscope shut down");
}

/// Returns a copy of the current options.
///
/// # Errors
///
/// Returns [`MeshscopeError::NotInitialized`] before [`init()`].
pub fn options() -> Result<Options> {
    try_with_context(|ctx| ctx.options.clone()).ok_or(MeshscopeError::NotInitialized)
}

/// Replaces the options. Only quantities created afterwards pick up the new
/// scalar defaults.
///
/// # Errors
///
/// Returns [`MeshscopeError::NotInitialized`] before [`init()`].
pub fn set_options(options: Options) -> Result<()> {
    try_with_context_mut(|ctx| ctx.options = options).ok_or(MeshscopeError::NotInitialized)
}

/// Loads options from a JSON file and makes them current.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, or before [`init()`]. The
/// current options are untouched on failure.
pub fn load_options(path: impl AsRef<Path>) -> Result<()> {
    if !is_initialized() {
        return Err(MeshscopeError::NotInitialized);
    }
    let options = Options::load(path)?;
    set_options(options)
}

/// Removes a structure by name.
///
/// # Errors
///
/// Returns [`MeshscopeError::StructureNotFound`] if no mesh has that name.
pub fn remove_structure(name: &str) -> Result<()> {
    try_with_context_mut(|ctx| ctx.registry.remove(name))
        .ok_or(MeshscopeError::NotInitialized)?
        .map(|_| log::debug!("removed structure '{name}'"))
        .ok_or_else(|| MeshscopeError::StructureNotFound(name.to_string()))
}

/// Removes all structures.
pub fn remove_all_structures() {
    try_with_context_mut(|ctx| ctx.registry.clear());
}
