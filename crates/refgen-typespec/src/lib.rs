//! Generated type-spec index for refgen.
//!
//! The type-spec artifact is produced by an external generator from the
//! client libraries' source. It maps each module to its methods and their
//! signatures. This crate provides:
//!
//! - [`MethodTypes`] and [`TypeDetails`]: Signature model
//! - [`TypeSpec`]: Decoded artifact with O(1) module and method lookups
//! - [`TypeSpecIndex`]: Lazily loaded, single-flight cache over a [`SpecSource`](refgen_source::SpecSource)
//!
//! # Example
//!
//! ```
//! use refgen_typespec::TypeSpec;
//!
//! let spec = TypeSpec::from_json(
//!     r#"[{"name": "auth", "methods": {"auth.signUp": {"name": "auth.signUp", "params": []}}}]"#,
//! )
//! .unwrap();
//!
//! assert!(spec.lookup("auth.signUp").is_some());
//! assert!(spec.lookup("storage.upload").is_none());
//! ```

mod index;
mod spec;
mod types;

pub use index::TypeSpecIndex;
pub use spec::{ModuleTypes, TypeSpec, TypeSpecError};
pub use types::{
    AltSignature, Comment, CommentExample, CommentTag, FunctionParameter, MethodTypes,
    ReturnType, TypeDetails, TypeProperty,
};
