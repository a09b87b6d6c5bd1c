//! Signature model of the type-spec artifact.
//!
//! Anonymous nodes (placeholders in the generated output) have no `name`.

use serde::{Deserialize, Serialize};

/// Documentation comment attached to a method, parameter or type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// One-line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_text: Option<String>,
    /// Extended description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Modifier tags (e.g. `experimental`, `deprecated`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<CommentTag>,
    /// `@example` blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<CommentExample>,
}

/// Comment tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentTag {
    /// Tag name without `@`.
    pub tag: String,
    /// Tag text.
    #[serde(default)]
    pub text: String,
}

/// `@example` block extracted from a comment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentExample {
    /// Kebab-case anchor.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Example code.
    pub code: String,
    /// Example response, if the block had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Type definition of one method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTypes {
    /// Fully qualified method name (usually the method's ref).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Method documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    /// Parameters of the primary signature.
    #[serde(default)]
    pub params: Vec<FunctionParameter>,
    /// Return type of the primary signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<ReturnType>,
    /// Overloads after the primary signature.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_signatures: Vec<AltSignature>,
}

impl MethodTypes {
    /// Compact signature for display, e.g. `signUp(credentials, options?)`.
    ///
    /// Only the last dotted segment of the name is kept. Constructors render
    /// as an empty string and anonymous parameters as `arg`.
    #[must_use]
    pub fn display_signature(&self) -> String {
        let full_name = self.name.as_deref().unwrap_or("anonymous");
        let method_name = full_name.rsplit('.').next().unwrap_or(full_name);

        if method_name.eq_ignore_ascii_case("constructor") {
            return String::new();
        }

        let params = self
            .params
            .iter()
            .map(|param| {
                let name = param.name.as_deref().unwrap_or("arg");
                if param.is_optional {
                    format!("{name}?")
                } else {
                    name.to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("{method_name}({params})")
    }
}

/// Alternative overload signature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AltSignature {
    /// Overload parameters.
    #[serde(default)]
    pub params: Vec<FunctionParameter>,
    /// Overload return type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<ReturnType>,
}

/// Function parameter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionParameter {
    /// Parameter name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Parameter documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    /// Whether the parameter may be omitted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_optional: bool,
    /// Parameter type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_details: Option<TypeDetails>,
}

/// Return type of a signature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnType {
    /// Returned type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_details: Option<TypeDetails>,
    /// Return documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
}

/// Property of an object type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeProperty {
    /// Property name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Property documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    /// Whether the property may be omitted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_optional: bool,
    /// Property type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_details: Option<TypeDetails>,
}

/// Type details, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum TypeDetails {
    /// Built-in type such as `string` or `boolean`.
    #[serde(rename = "intrinsic")]
    Intrinsic {
        name: Option<String>,
        comment: Option<Comment>,
    },
    /// Literal type such as `"pkce"` or `null`.
    #[serde(rename = "literal")]
    Literal {
        name: Option<String>,
        /// `Some(Value::Null)` for an explicit `null`, `None` when absent.
        #[serde(
            default,
            deserialize_with = "deserialize_present",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<serde_json::Value>,
        comment: Option<Comment>,
    },
    /// Type known only by name.
    #[serde(rename = "nameOnly")]
    NameOnly { name: Option<String> },
    /// Object with properties.
    #[serde(rename = "object")]
    Object {
        name: Option<String>,
        comment: Option<Comment>,
        #[serde(default)]
        properties: Vec<TypeProperty>,
    },
    /// Union of sub-types.
    #[serde(rename = "union")]
    Union {
        name: Option<String>,
        comment: Option<Comment>,
        #[serde(default)]
        sub_types: Vec<Option<TypeDetails>>,
    },
    /// Function type.
    #[serde(rename = "function")]
    Function {
        name: Option<String>,
        comment: Option<Comment>,
        #[serde(default)]
        params: Vec<FunctionParameter>,
        ret: Option<Box<ReturnType>>,
    },
    /// Array of an element type.
    #[serde(rename = "array")]
    Array {
        name: Option<String>,
        comment: Option<Comment>,
        elem_type: Option<Box<TypeDetails>>,
    },
    /// `Record<K, V>`.
    #[serde(rename = "record")]
    Record {
        name: Option<String>,
        comment: Option<Comment>,
        key_type: Option<Box<TypeDetails>>,
        value_type: Option<Box<TypeDetails>>,
    },
    /// `{ [key: K]: V }`.
    #[serde(rename = "index signature")]
    IndexSignature {
        name: Option<String>,
        comment: Option<Comment>,
        key_type: Option<Box<TypeDetails>>,
        value_type: Option<Box<TypeDetails>>,
    },
    /// `Promise<T>`.
    #[serde(rename = "promise")]
    Promise {
        name: Option<String>,
        comment: Option<Comment>,
        awaited: Option<Box<TypeDetails>>,
    },
    /// Tag this model does not know about.
    #[serde(other)]
    Unknown,
}

impl TypeDetails {
    /// Render the type the way it reads in TypeScript.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Intrinsic { name, .. } | Self::NameOnly { name } => {
                name.clone().unwrap_or_else(|| "any".to_owned())
            }
            Self::Literal { name, value, .. } => match value {
                Some(serde_json::Value::Null) => "null".to_owned(),
                Some(serde_json::Value::String(s)) => format!("\"{s}\""),
                Some(other) => format!("\"{other}\""),
                None => name.clone().unwrap_or_else(|| "any".to_owned()),
            },
            Self::Promise { awaited, .. } => format!("Promise<{}>", display_opt(awaited.as_deref())),
            Self::Array { elem_type, .. } => format!("{}[]", display_opt(elem_type.as_deref())),
            Self::Object { name, .. } => name.clone().unwrap_or_else(|| "object".to_owned()),
            Self::Function { .. } => "Function".to_owned(),
            Self::Union { sub_types, .. } if !sub_types.is_empty() => sub_types
                .iter()
                .map(|t| display_opt(t.as_ref()))
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Record {
                key_type,
                value_type,
                ..
            } => format!(
                "Record<{}, {}>",
                display_opt(key_type.as_deref()),
                display_opt(value_type.as_deref())
            ),
            Self::IndexSignature {
                key_type,
                value_type,
                ..
            } => format!(
                "{{ [key: {}]: {} }}",
                display_opt(key_type.as_deref()),
                display_opt(value_type.as_deref())
            ),
            Self::Union { .. } | Self::Unknown => "any".to_owned(),
        }
    }
}

/// Keep an explicit `null` as `Some(Value::Null)`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

fn display_opt(details: Option<&TypeDetails>) -> String {
    details.map_or_else(|| "any".to_owned(), TypeDetails::display)
}
