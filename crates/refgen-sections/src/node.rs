//! Common sections tree nodes.
//!
//! The on-disk format is loosely typed: groups carry `items` (or `children`),
//! leaves carry `id` and `type`. Anything else decodes into
//! [`SectionNode::Malformed`] so a single broken topic never fails the whole
//! document.

use serde::{Deserialize, Serialize};

/// Error returned when the common sections document cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum SectionsError {
    /// The document is not valid JSON or not an array of nodes.
    #[error("Invalid common sections document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Section type tag.
///
/// Unknown tags are preserved verbatim in [`SectionKind::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    /// Hand-authored markdown topic.
    Markdown,
    /// Function placeholder, filled from a library spec.
    Function,
    /// Any other tag (e.g. `category`, `cli-command`).
    Other(String),
}

impl SectionKind {
    /// Tag as written in the common sections file.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Markdown => "markdown",
            Self::Function => "function",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for SectionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "markdown" => Self::Markdown,
            "function" => Self::Function,
            _ => Self::Other(tag),
        }
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Markdown => "markdown".to_owned(),
            SectionKind::Function => "function".to_owned(),
            SectionKind::Other(tag) => tag,
        }
    }
}

/// Group of sections (a sidebar category).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SectionGroup {
    /// Group title.
    #[serde(default)]
    pub title: Option<String>,
    /// Child nodes in display order.
    #[serde(alias = "children")]
    pub items: Vec<SectionNode>,
}

/// Documentable section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SectionLeaf {
    /// Stable section id.
    pub id: String,
    /// Section type tag.
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Explicit URL slug (derived from `id` when absent).
    #[serde(default)]
    pub slug: Option<String>,
    /// Library-version names this section is hidden for.
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// Node of the common sections tree.
///
/// Variants are tried in order: a node with child items is a group, a node
/// with `id` and `type` is a leaf, anything else is malformed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SectionNode {
    /// Group with children.
    Group(SectionGroup),
    /// Leaf section.
    Leaf(SectionLeaf),
    /// Node that is neither a group nor a leaf.
    Malformed(serde_json::Value),
}

/// Decode a common sections document.
///
/// # Errors
///
/// Returns [`SectionsError::Parse`] if `json` is not a JSON array. Malformed
/// entries inside the array are not errors.
pub fn parse_sections(json: &str) -> Result<Vec<SectionNode>, SectionsError> {
    Ok(serde_json::from_str(json)?)
}
