//! Static path enumeration.

use refgen_sections::SectionDescriptor;
use serde::{Deserialize, Serialize};

use crate::library::{LibraryRegistry, LibraryVersion};

/// Every path a static build generates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPaths {
    /// Paths in library-version order, then section order.
    pub paths: Vec<StaticPath>,
}

/// One generated path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPath {
    /// Route parameters.
    pub params: PathParams,
}

/// Route parameters of a generated path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParams {
    /// URL segments.
    pub slug: Vec<String>,
}

impl StaticPath {
    /// Create a path from its URL segments.
    #[must_use]
    pub fn new(slug: Vec<String>) -> Self {
        Self {
            params: PathParams { slug },
        }
    }

    /// URL segments.
    #[must_use]
    pub fn slug(&self) -> &[String] {
        &self.params.slug
    }
}

/// Path of one section within one library version.
#[must_use]
pub fn section_path(library: &LibraryVersion, section: &SectionDescriptor) -> StaticPath {
    let mut slug = library.slug_prefix();
    slug.push(section.slug.clone());
    StaticPath::new(slug)
}

/// Enumerate one path per (library version, section) pair.
///
/// Sections hidden for a library version are skipped for that version.
#[must_use]
pub fn ref_static_paths(sections: &[SectionDescriptor], libraries: &LibraryRegistry) -> StaticPaths {
    let paths = libraries
        .iter()
        .flat_map(|library| {
            let excluded_name = library.excluded_name();
            sections
                .iter()
                .filter(move |section| !section.is_excluded_for(&excluded_name))
                .map(move |section| section_path(library, section))
        })
        .collect();

    StaticPaths { paths }
}
