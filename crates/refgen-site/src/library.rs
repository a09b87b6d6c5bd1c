//! Library registry.
//!
//! Every client library is documented in one or more major versions. The
//! first registered version of a library is its latest one and is served
//! without a version segment in its URLs.

use serde::Serialize;

/// One version of one client library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryVersion {
    /// Library id (e.g. "javascript").
    pub library: String,
    /// Version name (e.g. "v2").
    pub version: String,
    /// Spec file name, relative to the spec directory.
    pub spec_file: String,
    /// Whether this is the library's latest version.
    pub is_latest: bool,
}

impl LibraryVersion {
    /// Name used in section `excludes` lists, e.g. `reference_dart_v1`.
    #[must_use]
    pub fn excluded_name(&self) -> String {
        format!("reference_{}_{}", self.library, self.version)
    }

    /// URL prefix of this version's pages.
    #[must_use]
    pub fn library_path(&self) -> String {
        if self.is_latest {
            format!("/{}", self.library)
        } else {
            format!("/{}/{}", self.library, self.version)
        }
    }

    /// Leading slug segments of this version's pages.
    #[must_use]
    pub fn slug_prefix(&self) -> Vec<String> {
        if self.is_latest {
            vec![self.library.clone()]
        } else {
            vec![self.library.clone(), self.version.clone()]
        }
    }
}

/// Registered library versions, in registration order.
#[derive(Clone, Debug, Default)]
pub struct LibraryRegistry {
    versions: Vec<LibraryVersion>,
}

impl LibraryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a library with its `(version, spec_file)` pairs, latest first.
    #[must_use]
    pub fn with_library<V, S>(
        mut self,
        library: impl Into<String>,
        versions: impl IntoIterator<Item = (V, S)>,
    ) -> Self
    where
        V: Into<String>,
        S: Into<String>,
    {
        let library = library.into();
        for (i, (version, spec_file)) in versions.into_iter().enumerate() {
            self.versions.push(LibraryVersion {
                library: library.clone(),
                version: version.into(),
                spec_file: spec_file.into(),
                is_latest: i == 0,
            });
        }
        self
    }

    /// Find a library version. `None` selects the latest version.
    #[must_use]
    pub fn get(&self, library: &str, version: Option<&str>) -> Option<&LibraryVersion> {
        self.versions.iter().find(|v| {
            v.library == library
                && match version {
                    Some(version) => v.version == version,
                    None => v.is_latest,
                }
        })
    }

    /// Iterate over all versions.
    pub fn iter(&self) -> impl Iterator<Item = &LibraryVersion> {
        self.versions.iter()
    }

    /// Versions whose slug prefix opens `slug`, longest prefix first.
    pub fn candidates<'s, 'a>(
        &'s self,
        slug: &'a [String],
    ) -> impl Iterator<Item = (&'s LibraryVersion, &'a [String])> + use<'s, 'a> {
        let versioned = self.versions.iter().filter(|v| !v.is_latest);
        let latest = self.versions.iter().filter(|v| v.is_latest);
        versioned.chain(latest).filter_map(move |v| {
            let prefix = v.slug_prefix();
            slug.starts_with(&prefix).then(|| (v, &slug[prefix.len()..]))
        })
    }

    /// Number of registered versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether no version is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
