//! Mock spec source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::source::{SourceError, SpecSource};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock spec source for testing.
///
/// Stores every input in memory. Use the builder methods to configure the
/// mock with test data. Missing inputs behave like missing files. Reads of
/// the type-spec artifact are counted so tests can assert single-flight
/// loading.
///
/// # Example
///
/// ```ignore
/// use refgen_source::{MockSource, SpecSource};
///
/// let source = MockSource::new()
///     .with_sections(r#"[{"id": "intro", "type": "markdown"}]"#)
///     .with_library_spec("supabase_js_v2.yml", "functions: []")
///     .with_markdown("javascript", "v2", "intro", "# Intro");
///
/// let sections = source.read_sections().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    sections: RwLock<Option<String>>,
    typespec: RwLock<Option<String>>,
    library_specs: RwLock<HashMap<String, String>>,
    markdown: RwLock<HashMap<(String, String, String), String>>,
    typespec_reads: AtomicUsize,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the common sections document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_sections(self, json: impl Into<String>) -> Self {
        *self.sections.write().unwrap() = Some(json.into());
        self
    }

    /// Set the type-spec artifact.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_typespec(self, json: impl Into<String>) -> Self {
        *self.typespec.write().unwrap() = Some(json.into());
        self
    }

    /// Add a library spec file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_library_spec(self, spec_file: impl Into<String>, yaml: impl Into<String>) -> Self {
        self.library_specs
            .write()
            .unwrap()
            .insert(spec_file.into(), yaml.into());
        self
    }

    /// Add markdown for one section of one library version.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_markdown(
        self,
        library: impl Into<String>,
        version: impl Into<String>,
        section_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.markdown.write().unwrap().insert(
            (library.into(), version.into(), section_id.into()),
            content.into(),
        );
        self
    }

    /// Number of times the type-spec artifact has been read.
    #[must_use]
    pub fn typespec_reads(&self) -> usize {
        self.typespec_reads.load(Ordering::SeqCst)
    }

    fn missing(name: &str) -> SourceError {
        SourceError::not_found(name).with_backend(BACKEND)
    }
}

impl SpecSource for MockSource {
    fn read_sections(&self) -> Result<String, SourceError> {
        self.sections
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("sections"))
    }

    fn read_library_spec(&self, spec_file: &str) -> Result<String, SourceError> {
        self.library_specs
            .read()
            .unwrap()
            .get(spec_file)
            .cloned()
            .ok_or_else(|| Self::missing(spec_file))
    }

    fn read_typespec(&self) -> Result<String, SourceError> {
        self.typespec_reads.fetch_add(1, Ordering::SeqCst);
        self.typespec
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("typespec"))
    }

    fn read_markdown(
        &self,
        library: &str,
        version: &str,
        section_id: &str,
    ) -> Result<Option<String>, SourceError> {
        let key = (library.to_owned(), version.to_owned(), section_id.to_owned());
        Ok(self.markdown.read().unwrap().get(&key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceErrorKind;

    #[test]
    fn test_empty_mock_reports_not_found() {
        let source = MockSource::new();
        assert_eq!(
            source.read_sections().unwrap_err().kind(),
            SourceErrorKind::NotFound
        );
        assert_eq!(
            source.read_library_spec("x.yml").unwrap_err().backend(),
            Some("Mock")
        );
        assert!(source.read_typespec().is_err());
        assert_eq!(source.read_markdown("js", "v2", "intro").unwrap(), None);
    }

    #[test]
    fn test_builder_and_read_counter() {
        let source = MockSource::new()
            .with_sections("[]")
            .with_typespec("[]")
            .with_library_spec("js.yml", "functions: []")
            .with_markdown("js", "v2", "intro", "# Intro");

        assert_eq!(source.read_sections().unwrap(), "[]");
        assert_eq!(source.read_library_spec("js.yml").unwrap(), "functions: []");
        assert_eq!(
            source.read_markdown("js", "v2", "intro").unwrap().as_deref(),
            Some("# Intro")
        );

        assert_eq!(source.typespec_reads(), 0);
        source.read_typespec().unwrap();
        source.read_typespec().unwrap();
        assert_eq!(source.typespec_reads(), 2);
    }
}
