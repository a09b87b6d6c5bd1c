//! Common sections tree and section flattening for refgen.
//!
//! The common sections file is a library-agnostic tree of documentation
//! topics shared by every client library reference. This crate provides:
//!
//! - [`SectionNode`]: Tree node decoded from the common sections JSON
//! - [`SectionDescriptor`]: Flat, documentable section (markdown page, function page, ...)
//! - [`flatten_sections`]: Pre-order flattening of the tree into descriptors
//!
//! # Example
//!
//! ```
//! use refgen_sections::{SectionKind, flatten_sections, parse_sections};
//!
//! let json = r#"[
//!     {"id": "introduction", "type": "markdown", "title": "Introduction"},
//!     {"title": "Auth", "items": [
//!         {"id": "auth-signup", "type": "function", "title": "Sign up"}
//!     ]}
//! ]"#;
//!
//! let nodes = parse_sections(json).unwrap();
//! let sections = flatten_sections(&nodes);
//!
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[1].kind, SectionKind::Function);
//! assert_eq!(sections[1].trail, vec!["Auth".to_owned()]);
//! ```

mod flatten;
mod node;

pub use flatten::{SectionDescriptor, flatten_sections, slug_from_id};
pub use node::{SectionGroup, SectionKind, SectionLeaf, SectionNode, SectionsError, parse_sections};
