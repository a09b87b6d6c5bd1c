//! Markdown content with optional YAML frontmatter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Frontmatter delimiter line.
const DELIMITER: &str = "---";

/// Fields recognized in a markdown frontmatter block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    /// Title override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Hide the section heading when rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_title: Option<bool>,
    /// Any other keys, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Markdown split from its frontmatter.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkdownDocument {
    /// Parsed frontmatter, if the file has a valid block.
    pub meta: Option<FrontMatter>,
    /// Markdown body.
    pub content: String,
}

impl MarkdownDocument {
    /// Split a markdown file into frontmatter and body.
    ///
    /// A frontmatter block starts with a `---` line at the very top and ends
    /// at the next `---` line. A block that is not valid YAML is left in the
    /// body.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Some((yaml, body)) = split_frontmatter(raw) else {
            return Self {
                meta: None,
                content: raw.to_owned(),
            };
        };

        let meta = if yaml.trim().is_empty() {
            Ok(FrontMatter::default())
        } else {
            serde_yaml::from_str::<FrontMatter>(yaml)
        };

        match meta {
            Ok(meta) => Self {
                meta: Some(meta),
                content: body.to_owned(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid markdown frontmatter");
                Self {
                    meta: None,
                    content: raw.to_owned(),
                }
            }
        }
    }
}

/// Return `(frontmatter, body)` if `raw` opens with a delimited block.
fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }

    None
}
