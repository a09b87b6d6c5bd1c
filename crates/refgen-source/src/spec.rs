//! Per-library YAML spec model.
//!
//! One spec file exists per client library per major version. Only the
//! `functions` list is required; entries without an `id` are dropped.

use serde::{Deserialize, Serialize};

/// Error returned when a library spec cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// YAML parsing error.
    #[error("Invalid library spec: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Decoded library spec.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LibrarySpec {
    /// Spec header.
    pub info: SpecInfo,
    /// Documented functions, in spec order.
    pub functions: Vec<FunctionSpec>,
}

/// Spec header.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecInfo {
    /// Spec identifier (e.g., "reference/supabase-js").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Library display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Library description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path to the type definitions this spec was written against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// URL prefix for function slugs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_prefix: Option<String>,
}

/// One documented function or operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSpec {
    /// Function id, matching a common section id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Dotted reference into the type-spec artifact.
    #[serde(
        rename = "$ref",
        alias = "ref",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,
    /// Markdown description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Hand-written parameter docs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Usage examples.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

/// Hand-written parameter documentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Whether the parameter may be omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,
    /// Type as written in the spec.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Markdown description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Nested properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_content: Vec<Param>,
}

/// Usage example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Example id (anchor).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Markdown code block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Markdown response block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Markdown description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Shown first and expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_spotlight: Option<bool>,
}

/// On-disk shape, before compaction.
#[derive(Deserialize)]
struct RawLibrarySpec {
    #[serde(default)]
    info: SpecInfo,
    #[serde(default)]
    functions: Vec<RawFunctionSpec>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFunctionSpec {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "$ref", alias = "ref", default)]
    reference: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    params: Vec<Param>,
    #[serde(default)]
    examples: Vec<Example>,
}

impl RawFunctionSpec {
    fn compact(self) -> Option<FunctionSpec> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(FunctionSpec {
            title: self.title.unwrap_or_else(|| id.clone()),
            id,
            reference: self.reference,
            description: self.description,
            notes: self.notes,
            params: self.params,
            examples: self.examples,
        })
    }
}

impl LibrarySpec {
    /// Decode a library spec from YAML.
    ///
    /// Function entries without an `id` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Parse`] if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, SpecError> {
        let raw: RawLibrarySpec = if content.trim().is_empty() {
            RawLibrarySpec {
                info: SpecInfo::default(),
                functions: Vec::new(),
            }
        } else {
            serde_yaml::from_str(content)?
        };

        let total = raw.functions.len();
        let functions: Vec<FunctionSpec> = raw
            .functions
            .into_iter()
            .filter_map(RawFunctionSpec::compact)
            .collect();

        if functions.len() < total {
            tracing::warn!(
                dropped = total - functions.len(),
                "Library spec has function entries without an id"
            );
        }

        Ok(Self {
            info: raw.info,
            functions,
        })
    }

    /// Find a function by id.
    #[must_use]
    pub fn function(&self, id: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|f| f.id == id)
    }

    /// Ids of all documented functions, in spec order.
    pub fn function_ids(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const JS_SPEC: &str = r#"
openref: 0.1
info:
  id: reference/supabase-js
  title: Supabase Client
  definition: spec/enrichments/tsdoc_v2/combined.json
  slugPrefix: '/'
functions:
  - id: initializing
    title: 'Initializing'
    $ref: '@supabase/supabase-js.index.SupabaseClient.constructor'
    description: |
      Create a new client.
    params:
      - name: supabaseUrl
        isOptional: false
        type: string
        description: The unique Supabase URL.
      - name: options
        isOptional: true
        type: SupabaseClientOptions
        subContent:
          - name: db.schema
            type: string
    examples:
      - id: create-client
        name: Creating a client
        code: |
          ```js
          createClient(url, key)
          ```
        isSpotlight: true
  - id: auth-signup
    $ref: '@supabase/auth-js.GoTrueClient.signUp'
    notes: |
      Requires email confirmation by default.
  - title: Entry without an id
"#;

    #[test]
    fn test_from_yaml() {
        let spec = LibrarySpec::from_yaml(JS_SPEC).unwrap();

        assert_eq!(spec.info.id.as_deref(), Some("reference/supabase-js"));
        assert_eq!(spec.info.slug_prefix.as_deref(), Some("/"));
        assert_eq!(
            spec.function_ids().collect::<Vec<_>>(),
            vec!["initializing", "auth-signup"]
        );

        let init = spec.function("initializing").unwrap();
        assert_eq!(init.title, "Initializing");
        assert_eq!(
            init.reference.as_deref(),
            Some("@supabase/supabase-js.index.SupabaseClient.constructor")
        );
        assert_eq!(init.params.len(), 2);
        assert_eq!(init.params[1].is_optional, Some(true));
        assert_eq!(init.params[1].sub_content[0].name, "db.schema");
        assert_eq!(init.examples[0].is_spotlight, Some(true));
    }

    #[test]
    fn test_title_falls_back_to_id() {
        let spec = LibrarySpec::from_yaml(JS_SPEC).unwrap();
        let signup = spec.function("auth-signup").unwrap();
        assert_eq!(signup.title, "auth-signup");
        assert!(signup.notes.is_some());
    }

    #[test]
    fn test_entries_without_id_are_dropped() {
        let spec = LibrarySpec::from_yaml("functions:\n  - title: a\n  - id: ''\n  - id: b\n").unwrap();
        assert_eq!(spec.function_ids().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_ref_alias() {
        let spec = LibrarySpec::from_yaml("functions:\n  - id: signUp\n    ref: auth.signUp\n").unwrap();
        assert_eq!(
            spec.function("signUp").unwrap().reference.as_deref(),
            Some("auth.signUp")
        );
    }

    #[test]
    fn test_empty_spec() {
        let spec = LibrarySpec::from_yaml("").unwrap();
        assert!(spec.functions.is_empty());
        let spec = LibrarySpec::from_yaml("info:\n  title: CLI\n").unwrap();
        assert!(spec.functions.is_empty());
        assert_eq!(spec.info.title.as_deref(), Some("CLI"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(LibrarySpec::from_yaml("functions: [unclosed").is_err());
    }

    #[test]
    fn test_missing_function() {
        let spec = LibrarySpec::from_yaml(JS_SPEC).unwrap();
        assert!(spec.function("storage-from-upload").is_none());
    }

    #[test]
    fn test_serializes_ref_as_dollar_ref() {
        let spec = LibrarySpec::from_yaml("functions:\n  - id: signUp\n    ref: auth.signUp\n").unwrap();
        let json = serde_json::to_value(spec.function("signUp").unwrap()).unwrap();
        assert_eq!(json["$ref"], "auth.signUp");
        assert_eq!(json["title"], "signUp");
    }
}
