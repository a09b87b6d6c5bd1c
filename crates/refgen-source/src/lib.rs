//! Spec source abstraction for refgen.
//!
//! This crate provides a [`SpecSource`] trait for reading the raw inputs of
//! the reference pipeline independently of where they live. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between the pipeline logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`SpecSource`] trait for the common sections file, library specs,
//!   the generated type-spec artifact and per-library markdown
//! - [`FsSource`] implementation for filesystem layouts
//! - [`MockSource`] for testing (behind `mock` feature flag)
//! - [`LibrarySpec`] and friends, the decoded per-library YAML spec
//! - [`MarkdownDocument`], markdown content split from its frontmatter
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use refgen_source::{FsSource, LibrarySpec, SpecSource};
//!
//! let source = FsSource::new(PathBuf::from("spec"));
//! let yaml = source.read_library_spec("supabase_js_v2.yml")?;
//! let spec = LibrarySpec::from_yaml(&yaml)?;
//! ```

mod fs;
mod markdown;
#[cfg(feature = "mock")]
mod mock;
mod source;
mod spec;

pub use fs::FsSource;
pub use markdown::{FrontMatter, MarkdownDocument};
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{SourceError, SourceErrorKind, SpecSource};
pub use spec::{Example, FunctionSpec, LibrarySpec, Param, SpecError, SpecInfo};
