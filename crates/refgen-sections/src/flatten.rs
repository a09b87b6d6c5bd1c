//! Flattening of the common sections tree.

use std::collections::HashSet;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::node::{SectionKind, SectionLeaf, SectionNode};

/// Flat, documentable section.
///
/// Produced by [`flatten_sections`]. `id` is unique within one flattening
/// pass and `slug` is stable across builds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Stable section id (menu and spec lookup key).
    pub id: String,
    /// Section type.
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL path segment.
    pub slug: String,
    /// Titles of the enclosing groups, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trail: Vec<String>,
    /// Library-version names this section is hidden for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

impl SectionDescriptor {
    /// Title to display, falling back to the id.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Whether this section is hidden for the given library-version name.
    #[must_use]
    pub fn is_excluded_for(&self, excluded_name: &str) -> bool {
        self.id == excluded_name || self.excludes.iter().any(|name| name == excluded_name)
    }

    fn from_leaf(leaf: &SectionLeaf, slug: String, trail: &[String]) -> Self {
        Self {
            id: leaf.id.clone(),
            kind: leaf.kind.clone(),
            title: leaf.title.clone(),
            slug,
            trail: trail.to_vec(),
            excludes: leaf.excludes.clone(),
        }
    }
}

/// Derive a URL slug from a section id.
///
/// Lowercases the id and collapses every run of non-alphanumeric
/// characters into a single `-`, trimming leading and trailing dashes.
/// Non-ASCII letters and digits are kept. An id without any alphanumeric
/// character yields an empty string.
#[must_use]
pub fn slug_from_id(id: &str) -> String {
    let mut slug = String::with_capacity(id.len());
    let mut pending_dash = false;

    for c in id.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Flatten a common sections tree into an ordered list of leaf sections.
///
/// Leaves are emitted in pre-order; groups only contribute their title to
/// each descendant's `trail`. Malformed nodes are skipped and a repeated id
/// is emitted once, at its first position.
///
/// Every emitted slug is a non-empty single path segment, unique within the
/// result. A slug already taken by an earlier section gets a numeric suffix
/// (`auth-signup-2`).
#[must_use]
pub fn flatten_sections(nodes: &[SectionNode]) -> Vec<SectionDescriptor> {
    let mut flattener = Flattener::default();
    flattener.visit_all(nodes);
    flattener.sections
}

#[derive(Default)]
struct Flattener {
    sections: Vec<SectionDescriptor>,
    seen_ids: HashSet<String>,
    seen_slugs: HashSet<String>,
    trail: Vec<String>,
}

impl Flattener {
    fn visit_all(&mut self, nodes: &[SectionNode]) {
        for node in nodes {
            self.visit(node);
        }
    }

    fn visit(&mut self, node: &SectionNode) {
        match node {
            SectionNode::Group(group) => {
                let pushed = match &group.title {
                    Some(title) => {
                        self.trail.push(title.clone());
                        true
                    }
                    None => false,
                };
                self.visit_all(&group.items);
                if pushed {
                    self.trail.pop();
                }
            }
            SectionNode::Leaf(leaf) => {
                if !self.seen_ids.insert(leaf.id.clone()) {
                    tracing::warn!(id = %leaf.id, "Duplicate section id, keeping first occurrence");
                    return;
                }
                let slug = self.unique_slug(leaf);
                self.sections
                    .push(SectionDescriptor::from_leaf(leaf, slug, &self.trail));
            }
            SectionNode::Malformed(value) => {
                tracing::debug!(node = %value, "Skipping malformed section node");
            }
        }
    }

    fn unique_slug(&mut self, leaf: &SectionLeaf) -> String {
        let base = leaf_slug(leaf);
        let mut slug = base.clone();
        let mut n = 2;
        while !self.seen_slugs.insert(slug.clone()) {
            slug = format!("{base}-{n}");
            n += 1;
        }
        if slug != base {
            tracing::warn!(id = %leaf.id, taken = %base, slug = %slug, "Section slug already taken, renamed");
        }
        slug
    }
}

/// Explicit slug of a leaf if usable, otherwise one derived from its id.
fn leaf_slug(leaf: &SectionLeaf) -> String {
    if let Some(slug) = leaf.slug.as_deref().filter(|slug| !slug.is_empty()) {
        if is_path_segment(slug) {
            return slug.to_owned();
        }
        tracing::warn!(id = %leaf.id, slug, "Ignoring slug that is not a single path segment");
    }

    let slug = slug_from_id(&leaf.id);
    if slug.is_empty() {
        hex_slug(&leaf.id)
    } else {
        slug
    }
}

fn is_path_segment(slug: &str) -> bool {
    !slug.contains(['/', '\\']) && slug != "." && slug != ".."
}

/// `section-` followed by the hex-encoded id bytes.
fn hex_slug(id: &str) -> String {
    id.bytes().fold(String::from("section-"), |mut slug, b| {
        let _ = write!(slug, "{b:02x}");
        slug
    })
}
