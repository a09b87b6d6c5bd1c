//! Lazily loaded type-spec index.
//!
//! # Thread Safety
//!
//! `TypeSpecIndex` is designed for concurrent access:
//! - `spec()` returns `Arc<TypeSpec>` with minimal locking once loaded
//! - The first load uses double-checked locking, so concurrent first callers
//!   wait for a single read and parse of the artifact
//! - A failed load leaves the index uninitialized; the next call retries

use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use refgen_source::SpecSource;

use crate::spec::{ModuleTypes, TypeSpec, TypeSpecError};
use crate::types::MethodTypes;

/// Lazily loaded, process-wide index over the type-spec artifact.
pub struct TypeSpecIndex {
    source: Arc<dyn SpecSource>,
    /// Mutex for serializing load operations.
    load_lock: Mutex<()>,
    /// Loaded spec, `None` until the first successful load.
    current: RwLock<Option<Arc<TypeSpec>>>,
}

impl TypeSpecIndex {
    /// Create an uninitialized index reading from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn SpecSource>) -> Self {
        Self {
            source,
            load_lock: Mutex::new(()),
            current: RwLock::new(None),
        }
    }

    /// Create a ready index from already decoded modules.
    ///
    /// The source is never read.
    #[must_use]
    pub fn from_modules(source: Arc<dyn SpecSource>, modules: Vec<ModuleTypes>) -> Self {
        Self {
            source,
            load_lock: Mutex::new(()),
            current: RwLock::new(Some(Arc::new(TypeSpec::new(modules)))),
        }
    }

    /// Whether the artifact has been loaded.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current.read().unwrap().is_some()
    }

    /// Get the loaded spec, loading it on first access.
    ///
    /// Uses double-checked locking pattern:
    /// 1. Fast path: return the loaded spec
    /// 2. Slow path: acquire `load_lock`, recheck, then load
    ///
    /// # Errors
    ///
    /// Returns [`TypeSpecError`] if the artifact cannot be read or decoded.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn spec(&self) -> Result<Arc<TypeSpec>, TypeSpecError> {
        if let Some(spec) = self.current.read().unwrap().as_ref() {
            return Ok(Arc::clone(spec));
        }

        let _guard = self.load_lock.lock().unwrap();

        if let Some(spec) = self.current.read().unwrap().as_ref() {
            return Ok(Arc::clone(spec));
        }

        let start = Instant::now();
        let spec = Arc::new(self.load()?);
        *self.current.write().unwrap() = Some(Arc::clone(&spec));

        tracing::debug!(
            modules = spec.modules().len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Type spec loaded"
        );

        Ok(spec)
    }

    /// Resolve a ref to its method signature.
    ///
    /// Returns `Ok(None)` for an unknown module or method.
    ///
    /// # Errors
    ///
    /// Returns [`TypeSpecError`] if the artifact cannot be loaded.
    pub fn get_type_spec(&self, reference: &str) -> Result<Option<MethodTypes>, TypeSpecError> {
        let spec = self.spec()?;
        Ok(spec.lookup(reference).cloned())
    }

    fn load(&self) -> Result<TypeSpec, TypeSpecError> {
        let json = self.source.read_typespec().inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to read type spec");
        })?;
        TypeSpec::from_json(&json)
    }
}
