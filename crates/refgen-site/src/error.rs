use refgen_sections::SectionsError;
use refgen_source::{SourceError, SpecError};
use refgen_typespec::TypeSpecError;

/// Error returned by reference site operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The common sections document is invalid.
    #[error(transparent)]
    Sections(#[from] SectionsError),
    /// The type-spec artifact is missing or corrupt.
    #[error(transparent)]
    TypeSpec(#[from] TypeSpecError),
    /// An input could not be read.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// No such library or library version is registered.
    #[error("Unknown library: {0}")]
    LibraryNotFound(String),
    /// The spec file of a registered library version is missing.
    #[error("Spec for {library} {version} not found: {source}")]
    LibrarySpecMissing {
        library: String,
        version: String,
        #[source]
        source: SourceError,
    },
    /// The spec file of a library version is not valid YAML.
    #[error("Invalid spec for {library} {version}: {source}")]
    InvalidLibrarySpec {
        library: String,
        version: String,
        #[source]
        source: SpecError,
    },
    /// No page is generated for the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),
}
