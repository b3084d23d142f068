//! Process-wide meshscope state.
//!
//! One [`Context`] lives behind a `OnceLock<RwLock<_>>`. It is created on the
//! first [`init_context`] and survives [`shutdown_context`], which only
//! empties it, so init and shutdown may alternate.

use std::sync::{OnceLock, PoisonError, RwLock};

use crate::error::{MeshscopeError, Result};
use crate::options::Options;
use crate::registry::Registry;

static CONTEXT: OnceLock<RwLock<Context>> = OnceLock::new();

/// Everything meshscope keeps between calls.
#[derive(Default)]
pub struct Context {
    /// Set between [`init_context`] and [`shutdown_context`].
    pub initialized: bool,

    /// Registered structures.
    pub registry: Registry,

    /// Options applied to quantities created from now on.
    pub options: Options,
}

impl Context {
    /// Drops every structure and restores default options.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.options = Options::default();
    }
}

/// Marks the global context initialized, creating it on first use.
pub fn init_context() -> Result<()> {
    let lock = CONTEXT.get_or_init(|| RwLock::new(Context::default()));
    let mut ctx = lock.write().unwrap_or_else(PoisonError::into_inner);

    if ctx.initialized {
        return Err(MeshscopeError::AlreadyInitialized);
    }
    ctx.initialized = true;
    Ok(())
}

/// Returns whether the context has been initialized.
pub fn is_initialized() -> bool {
    CONTEXT
        .get()
        .and_then(|lock| lock.read().ok())
        .is_some_and(|ctx| ctx.initialized)
}

/// Access the global context for reading.
///
/// # Panics
///
/// Panics if meshscope has never been initialized.
pub fn with_context<F, R>(f: F) -> R
where
    F: FnOnce(&Context) -> R,
{
    let lock = CONTEXT.get().expect("meshscope not initialized");
    let guard = lock.read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Access the global context for writing.
///
/// # Panics
///
/// Panics if meshscope has never been initialized.
pub fn with_context_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Context) -> R,
{
    let lock = CONTEXT.get().expect("meshscope not initialized");
    let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Reads the context if meshscope is initialized.
pub fn try_with_context<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Context) -> R,
{
    let guard = CONTEXT.get()?.read().ok()?;
    guard.initialized.then(|| f(&guard))
}

/// Writes the context if meshscope is initialized.
pub fn try_with_context_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Context) -> R,
{
    let mut guard = CONTEXT.get()?.write().ok()?;
    if !guard.initialized {
        return None;
    }
    Some(f(&mut guard))
}

/// Empties the global context and marks it uninitialized.
pub fn shutdown_context() {
    if let Some(lock) = CONTEXT.get() {
        let mut ctx = lock.write().unwrap_or_else(PoisonError::into_inner);
        ctx.reset();
        ctx.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The context is process-wide, so the whole lifecycle is one test.
    #[test]
    fn test_context_lifecycle() {
        assert!(try_with_context(|_| ()).is_none());

        init_context().unwrap();
        assert!(is_initialized());
        assert!(matches!(
            init_context(),
            Err(MeshscopeError::AlreadyInitialized)
        ));

        with_context_mut(|ctx| ctx.options.scalar.histogram_bins = 7);
        assert_eq!(try_with_context(|ctx| ctx.options.scalar.histogram_bins), Some(7));

        shutdown_context();
        assert!(!is_initialized());
        assert!(try_with_context_mut(|_| ()).is_none());
        // The context outlives shutdown but is emptied
        assert_eq!(with_context(|ctx| ctx.options.clone()), Options::default());

        init_context().unwrap();
        assert!(is_initialized());
        shutdown_context();
    }
}
