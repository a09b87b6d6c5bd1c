//! Spec source trait and error types.
//!
//! Provides the core [`SpecSource`] trait for reading pipeline inputs,
//! along with [`SourceError`] for unified error handling across backends.

use std::path::{Path, PathBuf};

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Source error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct SourceError {
    kind: SourceErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Create a new source error.
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceErrorKind::NotFound).with_path(path)
    }

    /// Create a source error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SourceErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => SourceErrorKind::PermissionDenied,
            _ => SourceErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    /// Path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend that produced the error, if known.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Whether the error means the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == SourceErrorKind::NotFound
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            SourceErrorKind::NotFound => "Not found",
            SourceErrorKind::PermissionDenied => "Permission denied",
            SourceErrorKind::InvalidPath => "Invalid path",
            SourceErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only access to the inputs of the reference pipeline.
///
/// All methods return raw text; decoding belongs to the consumer. Inputs are
/// never mutated, so implementations must be safe to call concurrently and
/// repeatedly.
pub trait SpecSource: Send + Sync {
    /// Read the shared common sections document (JSON).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the document doesn't exist or can't be read.
    fn read_sections(&self) -> Result<String, SourceError>;

    /// Read one library spec (YAML).
    ///
    /// # Arguments
    ///
    /// * `spec_file` - Spec file name relative to the spec root (e.g., "supabase_js_v2.yml")
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file doesn't exist or can't be read.
    fn read_library_spec(&self, spec_file: &str) -> Result<String, SourceError>;

    /// Read the generated type-spec artifact (JSON).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the artifact doesn't exist or can't be read.
    fn read_typespec(&self) -> Result<String, SourceError>;

    /// Read the markdown for one section of one library version.
    ///
    /// Returns `Ok(None)` when no markdown exists for the section.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the markdown exists but can't be read, or
    /// if an argument is not a valid path segment.
    fn read_markdown(
        &self,
        library: &str,
        version: &str,
        section_id: &str,
    ) -> Result<Option<String>, SourceError>;
}
