//! Reference site orchestration.
//!
//! [`RefSite`] ties the inputs together: it owns the source, the library
//! registry and the type-spec index, and lazily loads the common sections
//! and library specs.
//!
//! # Thread Safety
//!
//! `RefSite` is designed for concurrent access from parallel page builds:
//! - Sections and specs are cached as `Arc` snapshots behind `RwLock`s
//! - First loads use double-checked locking, so each input is read once
//! - The type-spec index does the same for the generated artifact

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use refgen_sections::{SectionDescriptor, flatten_sections, parse_sections};
use refgen_source::{LibrarySpec, SourceError, SpecSource};
use refgen_typespec::TypeSpecIndex;

use crate::error::SiteError;
use crate::library::{LibraryRegistry, LibraryVersion};
use crate::menu::MenuCategory;
use crate::paths::{StaticPaths, ref_static_paths};
use crate::props::{PageProps, RefPropsInput, RefStaticProps, page_props, ref_static_props};

type SpecKey = (String, String);

/// Reference site for a set of library versions.
pub struct RefSite {
    source: Arc<dyn SpecSource>,
    libraries: LibraryRegistry,
    types: TypeSpecIndex,
    /// Mutex for serializing input loads.
    load_lock: Mutex<()>,
    sections: RwLock<Option<Arc<Vec<SectionDescriptor>>>>,
    specs: RwLock<HashMap<SpecKey, Arc<LibrarySpec>>>,
}

impl RefSite {
    /// Create a site reading every input from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn SpecSource>, libraries: LibraryRegistry) -> Self {
        Self {
            types: TypeSpecIndex::new(Arc::clone(&source)),
            source,
            libraries,
            load_lock: Mutex::new(()),
            sections: RwLock::new(None),
            specs: RwLock::new(HashMap::new()),
        }
    }

    /// Registered library versions.
    #[must_use]
    pub fn libraries(&self) -> &LibraryRegistry {
        &self.libraries
    }

    /// Find a library version. `None` selects the latest version.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::LibraryNotFound`] if it is not registered.
    pub fn library(&self, library: &str, version: Option<&str>) -> Result<&LibraryVersion, SiteError> {
        self.libraries.get(library, version).ok_or_else(|| {
            SiteError::LibraryNotFound(match version {
                Some(version) => format!("{library} {version}"),
                None => library.to_owned(),
            })
        })
    }

    /// Flattened common sections, loaded on first access.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the sections file cannot be read or decoded.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn sections(&self) -> Result<Arc<Vec<SectionDescriptor>>, SiteError> {
        if let Some(sections) = self.sections.read().unwrap().as_ref() {
            return Ok(Arc::clone(sections));
        }

        let _guard = self.load_lock.lock().unwrap();

        if let Some(sections) = self.sections.read().unwrap().as_ref() {
            return Ok(Arc::clone(sections));
        }

        let json = self.source.read_sections()?;
        let sections = Arc::new(flatten_sections(&parse_sections(&json)?));
        tracing::debug!(count = sections.len(), "Common sections loaded");

        *self.sections.write().unwrap() = Some(Arc::clone(&sections));
        Ok(sections)
    }

    /// Decoded spec of a library version, loaded on first access.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::LibrarySpecMissing`] if the spec file does not
    /// exist and [`SiteError::InvalidLibrarySpec`] if it is not valid YAML.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn library_spec(&self, library: &LibraryVersion) -> Result<Arc<LibrarySpec>, SiteError> {
        let key = (library.library.clone(), library.version.clone());

        if let Some(spec) = self.specs.read().unwrap().get(&key) {
            return Ok(Arc::clone(spec));
        }

        let _guard = self.load_lock.lock().unwrap();

        if let Some(spec) = self.specs.read().unwrap().get(&key) {
            return Ok(Arc::clone(spec));
        }

        let yaml = self
            .source
            .read_library_spec(&library.spec_file)
            .map_err(|e| {
                if e.is_not_found() {
                    SiteError::LibrarySpecMissing {
                        library: library.library.clone(),
                        version: library.version.clone(),
                        source: e,
                    }
                } else {
                    SiteError::Source(e)
                }
            })?;

        let spec = LibrarySpec::from_yaml(&yaml).map_err(|e| SiteError::InvalidLibrarySpec {
            library: library.library.clone(),
            version: library.version.clone(),
            source: e,
        })?;
        let spec = Arc::new(spec);
        tracing::debug!(
            library = %library.library,
            version = %library.version,
            functions = spec.functions.len(),
            "Library spec loaded"
        );

        self.specs.write().unwrap().insert(key, Arc::clone(&spec));
        Ok(spec)
    }

    /// Every path a static build generates.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the sections cannot be loaded.
    pub fn static_paths(&self) -> Result<StaticPaths, SiteError> {
        Ok(ref_static_paths(&self.sections()?, &self.libraries))
    }

    /// Sidebar of a library version.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the sections or the library spec cannot be
    /// loaded.
    pub fn menu(&self, library: &LibraryVersion) -> Result<MenuCategory, SiteError> {
        self.with_input(library, |input| Ok(input.menu()))
    }

    /// Library-wide payload of a library version.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if an input cannot be loaded.
    pub fn static_props(&self, library: &LibraryVersion) -> Result<RefStaticProps, SiteError> {
        self.with_input(library, |input| {
            ref_static_props(input, |id| self.read_markdown(library, id)).map_err(SiteError::from)
        })
    }

    /// Map a generated path back to its library version and section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::PageNotFound`] if no generated path matches.
    pub fn resolve_path(&self, slug: &[String]) -> Result<(&LibraryVersion, SectionDescriptor), SiteError> {
        let sections = self.sections()?;

        for (library, rest) in self.libraries.candidates(slug) {
            let section_slug = rest.join("/");
            let excluded_name = library.excluded_name();
            if let Some(section) = sections
                .iter()
                .find(|s| s.slug == section_slug && !s.is_excluded_for(&excluded_name))
            {
                return Ok((library, section.clone()));
            }
        }

        Err(SiteError::PageNotFound(slug.join("/")))
    }

    /// Payload of the page at `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::PageNotFound`] for an unknown path and
    /// [`SiteError`] if an input cannot be loaded.
    pub fn page_props(&self, slug: &[String]) -> Result<PageProps, SiteError> {
        let (library, section) = self.resolve_path(slug)?;
        self.with_input(library, |input| {
            page_props(
                &section,
                input,
                |id| self.read_markdown(library, id),
                &self.types,
            )
        })
    }

    /// Run `f` with the props inputs of a library version.
    fn with_input<T>(
        &self,
        library: &LibraryVersion,
        f: impl FnOnce(&RefPropsInput<'_>) -> Result<T, SiteError>,
    ) -> Result<T, SiteError> {
        let sections = self.sections()?;
        let spec = self.library_spec(library)?;
        let library_path = library.library_path();
        let excluded_name = library.excluded_name();

        f(&RefPropsInput {
            sections: &sections,
            spec: &spec,
            library_path: &library_path,
            excluded_name: &excluded_name,
        })
    }

    fn read_markdown(&self, library: &LibraryVersion, section_id: &str) -> Result<Option<String>, SourceError> {
        self.source
            .read_markdown(&library.library, &library.version, section_id)
    }
}
