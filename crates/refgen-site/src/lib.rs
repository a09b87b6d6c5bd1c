//! Menus, page props and static paths for refgen.
//!
//! This crate turns the flattened common sections, the per-library specs and
//! the type-spec index into what a static build needs:
//! - [`client_library_menu`]: Sidebar of one library version
//! - [`ref_static_props`] and [`page_props`]: Page payloads
//! - [`ref_static_paths`]: Every path to generate
//! - [`RefSite`]: Lazily loading orchestrator over a [`SpecSource`](refgen_source::SpecSource)
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use refgen_site::{LibraryRegistry, RefSite};
//! use refgen_source::FsSource;
//!
//! let source = Arc::new(FsSource::new(PathBuf::from("spec")));
//! let libraries = LibraryRegistry::new()
//!     .with_library("javascript", [("v2", "supabase_js_v2.yml"), ("v1", "supabase_js_v1.yml")]);
//! let site = RefSite::new(source, libraries);
//!
//! for path in site.static_paths()?.paths {
//!     let props = site.page_props(path.slug())?;
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod library;
mod menu;
mod paths;
mod props;
mod site;

pub use error::SiteError;
pub use library::{LibraryRegistry, LibraryVersion};
pub use menu::{MenuCategory, MenuLeaf, MenuNode, MenuOptions, client_library_menu};
pub use paths::{PathParams, StaticPath, StaticPaths, ref_static_paths, section_path};
pub use props::{
    FunctionContent, MarkdownContent, PageDocs, PageProps, RefPropsInput, RefStaticProps,
    page_props, ref_static_props,
};
pub use site::RefSite;
