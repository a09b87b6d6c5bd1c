//! Decoded type-spec artifact.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use refgen_source::SourceError;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::MethodTypes;

/// Error returned when the type-spec artifact cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum TypeSpecError {
    /// The artifact could not be read.
    #[error("Failed to read type spec: {0}")]
    Source(#[from] SourceError),
    /// The artifact is not valid JSON or has the wrong shape.
    #[error("Invalid type spec: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Methods of one module, keyed by their ref.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleTypes {
    /// Module name (the text before the first `.` of a ref).
    pub name: String,
    /// Methods in artifact order.
    #[serde(default, deserialize_with = "deserialize_methods")]
    pub methods: IndexMap<String, MethodTypes>,
}

/// Accepts `{ "ref": {...} }` as well as `[["ref", {...}], ...]`.
fn deserialize_methods<'de, D>(deserializer: D) -> Result<IndexMap<String, MethodTypes>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MethodsVisitor;

    impl<'de> Visitor<'de> for MethodsVisitor {
        type Value = IndexMap<String, MethodTypes>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of methods or a list of [ref, method] entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut methods = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, MethodTypes>()? {
                methods.insert(key, value);
            }
            Ok(methods)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut methods = IndexMap::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some((key, value)) = seq.next_element::<(String, MethodTypes)>()? {
                methods.insert(key, value);
            }
            Ok(methods)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(IndexMap::new())
        }
    }

    deserializer.deserialize_any(MethodsVisitor)
}

/// Decoded type-spec artifact.
///
/// Module lookups are O(1). When two modules share a name, the first one
/// wins.
#[derive(Clone, Debug, Default)]
pub struct TypeSpec {
    modules: Vec<ModuleTypes>,
    by_name: HashMap<String, usize>,
}

impl TypeSpec {
    /// Build a spec from already decoded modules.
    #[must_use]
    pub fn new(modules: Vec<ModuleTypes>) -> Self {
        let mut by_name = HashMap::with_capacity(modules.len());
        for (i, module) in modules.iter().enumerate() {
            by_name.entry(module.name.clone()).or_insert(i);
        }
        Self { modules, by_name }
    }

    /// Decode the artifact from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TypeSpecError::Parse`] if the JSON is malformed or is not a
    /// list of modules.
    pub fn from_json(json: &str) -> Result<Self, TypeSpecError> {
        let modules: Vec<ModuleTypes> = serde_json::from_str(json)?;
        Ok(Self::new(modules))
    }

    /// Find a module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&ModuleTypes> {
        self.by_name.get(name).map(|&i| &self.modules[i])
    }

    /// All modules, in artifact order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleTypes] {
        &self.modules
    }

    /// Resolve a dotted ref such as `auth.signUp`.
    ///
    /// The module is the text before the first `.`. Within it, the method is
    /// looked up by the full ref, then by the remainder after the module.
    #[must_use]
    pub fn lookup(&self, reference: &str) -> Option<&MethodTypes> {
        let (module_name, rest) = reference.split_once('.')?;
        let module = self.module(module_name)?;
        module
            .methods
            .get(reference)
            .or_else(|| module.methods.get(rest))
    }
}
