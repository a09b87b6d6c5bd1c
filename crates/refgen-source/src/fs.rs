//! Filesystem spec source.
//!
//! Provides [`FsSource`] for reading pipeline inputs from a local checkout.
//!
//! # Layout
//!
//! ```text
//! spec/
//! ├── common-client-libs-sections.json
//! ├── enrichments/tsdoc_v2/combined.json
//! ├── supabase_js_v2.yml
//! └── supabase_py_v2.yml
//! docs/ref/
//! └── javascript/v2/installing.mdx
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::source::{SourceError, SourceErrorKind, SpecSource};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default common sections file name, relative to the spec directory.
const DEFAULT_SECTIONS_FILE: &str = "common-client-libs-sections.json";

/// Default type-spec artifact path, relative to the spec directory.
const DEFAULT_TYPESPEC_FILE: &str = "enrichments/tsdoc_v2/combined.json";

/// Markdown extensions, in lookup order.
const MARKDOWN_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Filesystem spec source.
///
/// Library specs, the common sections file and the type-spec artifact are
/// resolved against `spec_dir`. Markdown is resolved against `markdown_dir`
/// as `{library}/{version}/{section_id}.mdx` (falling back to `.md`).
#[derive(Clone, Debug)]
pub struct FsSource {
    spec_dir: PathBuf,
    sections_file: PathBuf,
    typespec_file: PathBuf,
    markdown_dir: PathBuf,
}

impl FsSource {
    /// Create a filesystem source with the default file layout.
    ///
    /// Markdown defaults to `{spec_dir}/../docs/ref`.
    ///
    /// # Arguments
    ///
    /// * `spec_dir` - Directory holding library specs and shared inputs
    #[must_use]
    pub fn new(spec_dir: PathBuf) -> Self {
        let markdown_dir = spec_dir
            .parent()
            .map_or_else(|| PathBuf::from("docs/ref"), |p| p.join("docs/ref"));
        Self {
            sections_file: spec_dir.join(DEFAULT_SECTIONS_FILE),
            typespec_file: spec_dir.join(DEFAULT_TYPESPEC_FILE),
            markdown_dir,
            spec_dir,
        }
    }

    /// Override the common sections file location.
    #[must_use]
    pub fn with_sections_file(mut self, path: PathBuf) -> Self {
        self.sections_file = path;
        self
    }

    /// Override the type-spec artifact location.
    #[must_use]
    pub fn with_typespec_file(mut self, path: PathBuf) -> Self {
        self.typespec_file = path;
        self
    }

    /// Override the markdown root directory.
    #[must_use]
    pub fn with_markdown_dir(mut self, path: PathBuf) -> Self {
        self.markdown_dir = path;
        self
    }

    /// Validate that a relative path doesn't escape its root directory.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`).
    fn validate_path(path: &Path) -> Result<(), SourceError> {
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            return Err(SourceError::new(SourceErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<String, SourceError> {
        tracing::debug!(path = %path.display(), "Reading spec input");
        fs::read_to_string(path)
            .map_err(|e| SourceError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }
}

impl SpecSource for FsSource {
    fn read_sections(&self) -> Result<String, SourceError> {
        Self::read_file(&self.sections_file)
    }

    fn read_library_spec(&self, spec_file: &str) -> Result<String, SourceError> {
        let relative = Path::new(spec_file);
        Self::validate_path(relative)?;
        Self::read_file(&self.spec_dir.join(relative))
    }

    fn read_typespec(&self) -> Result<String, SourceError> {
        Self::read_file(&self.typespec_file)
    }

    fn read_markdown(
        &self,
        library: &str,
        version: &str,
        section_id: &str,
    ) -> Result<Option<String>, SourceError> {
        let dir = Path::new(library).join(version);
        Self::validate_path(&dir.join(section_id))?;

        for ext in MARKDOWN_EXTENSIONS {
            let path = self.markdown_dir.join(&dir).join(format!("{section_id}.{ext}"));
            match Self::read_file(&path) {
                Ok(content) => return Ok(Some(content)),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        Ok(None)
    }
}
