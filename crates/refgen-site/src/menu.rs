//! Sidebar menu for one library version.

use std::collections::HashSet;

use refgen_sections::{SectionDescriptor, SectionKind};
use serde::Serialize;

/// Menu category (a sidebar group).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MenuCategory {
    /// Category title.
    pub title: String,
    /// Child nodes in section order.
    pub children: Vec<MenuNode>,
}

/// Node of a menu tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MenuNode {
    /// Nested category.
    Category(MenuCategory),
    /// Link to a page.
    Leaf(MenuLeaf),
}

/// Link to a reference page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuLeaf {
    /// Section id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Absolute page URL.
    pub href: String,
    /// Section type.
    #[serde(rename = "type")]
    pub kind: SectionKind,
}

impl MenuCategory {
    /// Iterate over every leaf in the tree, depth first.
    pub fn leaves(&self) -> impl Iterator<Item = &MenuLeaf> {
        let mut stack: Vec<&MenuNode> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    MenuNode::Leaf(leaf) => return Some(leaf),
                    MenuNode::Category(category) => stack.extend(category.children.iter().rev()),
                }
            }
            None
        })
    }

    fn category_mut(&mut self, title: &str) -> &mut MenuCategory {
        let position = self
            .children
            .iter()
            .position(|node| matches!(node, MenuNode::Category(c) if c.title == title));
        let index = position.unwrap_or_else(|| {
            self.children.push(MenuNode::Category(MenuCategory {
                title: title.to_owned(),
                children: Vec::new(),
            }));
            self.children.len() - 1
        });
        match &mut self.children[index] {
            MenuNode::Category(category) => category,
            MenuNode::Leaf(_) => unreachable!("index points at a category"),
        }
    }
}

/// Inputs of [`client_library_menu`].
#[derive(Clone, Copy, Debug)]
pub struct MenuOptions<'a> {
    /// Root category title.
    pub title: &'a str,
    /// Library-version name; matching sections are left out.
    pub excluded_name: &'a str,
    /// URL prefix of every href (e.g. `/python`).
    pub section_path: &'a str,
    /// Function ids documented by the library's spec.
    pub included_functions: &'a HashSet<String>,
}

/// Build the sidebar menu of one library version.
///
/// Markdown sections are always listed; function sections only when the
/// library documents them. Sections hidden for `excluded_name` are dropped.
/// Categories are rebuilt from each section's `trail` in first-appearance
/// order, so a category whose sections are all dropped does not appear.
#[must_use]
pub fn client_library_menu(sections: &[SectionDescriptor], options: &MenuOptions<'_>) -> MenuCategory {
    let mut root = MenuCategory {
        title: options.title.to_owned(),
        children: Vec::new(),
    };
    let section_path = options.section_path.trim_end_matches('/');

    for section in sections {
        if section.is_excluded_for(options.excluded_name) {
            continue;
        }
        if section.kind == SectionKind::Function && !options.included_functions.contains(&section.id) {
            continue;
        }

        let parent = section
            .trail
            .iter()
            .fold(&mut root, |category, title| category.category_mut(title));

        parent.children.push(MenuNode::Leaf(MenuLeaf {
            id: section.id.clone(),
            title: section.display_title().to_owned(),
            href: format!("{section_path}/{}", section.slug),
            kind: section.kind.clone(),
        }));
    }

    root
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use refgen_sections::{flatten_sections, parse_sections};

    use super::*;

    const SECTIONS: &str = r#"[
        {"id": "introduction", "type": "markdown", "title": "Introduction"},
        {"title": "Database", "items": [
            {"id": "select", "type": "function", "title": "Fetch data"},
            {"id": "insert", "type": "function", "title": "Create data"},
            {"title": "Filters", "items": [
                {"id": "eq", "type": "function", "title": "Column is equal to a value"}
            ]}
        ]},
        {"title": "Auth", "items": [
            {"id": "auth-signup", "type": "function", "title": "Create a new user"},
            {"id": "auth-mfa", "type": "markdown", "title": "Overview", "excludes": ["reference_dart_v1"]}
        ]},
        {"title": "Realtime", "items": [
            {"id": "subscribe", "type": "function", "title": "Subscribe to channel"}
        ]},
        {"id": "reference_javascript_v2", "type": "markdown", "title": "Self"}
    ]"#;

    fn sections() -> Vec<SectionDescriptor> {
        flatten_sections(&parse_sections(SECTIONS).unwrap())
    }

    fn functions(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| (*id).to_owned()).collect()
    }

    fn leaf_ids(menu: &MenuCategory) -> Vec<&str> {
        menu.leaves().map(|leaf| leaf.id.as_str()).collect()
    }

    #[test]
    fn test_menu_structure() {
        let included = functions(&["select", "eq", "auth-signup"]);
        let menu = client_library_menu(
            &sections(),
            &MenuOptions {
                title: "JavaScript",
                excluded_name: "reference_javascript_v2",
                section_path: "/javascript",
                included_functions: &included,
            },
        );

        assert_eq!(menu.title, "JavaScript");
        assert_eq!(
            menu.children[0],
            MenuNode::Leaf(MenuLeaf {
                id: "introduction".to_owned(),
                title: "Introduction".to_owned(),
                href: "/javascript/introduction".to_owned(),
                kind: SectionKind::Markdown,
            })
        );

        let MenuNode::Category(database) = &menu.children[1] else {
            panic!("expected Database category");
        };
        assert_eq!(database.title, "Database");
        assert_eq!(database.children.len(), 2);
        let MenuNode::Category(filters) = &database.children[1] else {
            panic!("expected Filters category");
        };
        assert_eq!(filters.title, "Filters");

        // Realtime has no included function, so the category is omitted.
        assert_eq!(menu.children.len(), 3);
        assert_eq!(
            leaf_ids(&menu),
            vec!["introduction", "select", "eq", "auth-signup", "auth-mfa"]
        );
    }

    #[test]
    fn test_excluded_name_never_listed() {
        let all: Vec<&str> = vec!["select", "insert", "eq", "auth-signup", "subscribe"];
        for excluded in ["reference_javascript_v2", "auth-signup", "introduction", "eq"] {
            let menu = client_library_menu(
                &sections(),
                &MenuOptions {
                    title: "",
                    excluded_name: excluded,
                    section_path: "/javascript",
                    included_functions: &functions(&all),
                },
            );
            assert!(menu.leaves().all(|leaf| leaf.id != excluded));
        }
    }

    #[test]
    fn test_excludes_list() {
        let menu = client_library_menu(
            &sections(),
            &MenuOptions {
                title: "Dart",
                excluded_name: "reference_dart_v1",
                section_path: "/dart/v1",
                included_functions: &functions(&["auth-signup"]),
            },
        );
        assert_eq!(
            leaf_ids(&menu),
            vec!["introduction", "auth-signup", "reference_javascript_v2"]
        );
    }

    #[test]
    fn test_function_inclusion() {
        let included = functions(&["insert", "subscribe", "not-a-section"]);
        let menu = client_library_menu(
            &sections(),
            &MenuOptions {
                title: "",
                excluded_name: "reference_python_v2",
                section_path: "/python/",
                included_functions: &included,
            },
        );

        let function_ids: Vec<&str> = menu
            .leaves()
            .filter(|leaf| leaf.kind == SectionKind::Function)
            .map(|leaf| leaf.id.as_str())
            .collect();
        assert_eq!(function_ids, vec!["insert", "subscribe"]);
        assert!(menu.leaves().all(|leaf| leaf.href.starts_with("/python/")));
        assert!(menu.leaves().all(|leaf| !leaf.href.contains("//")));
    }

    #[test]
    fn test_no_functions_still_valid() {
        let menu = client_library_menu(
            &sections(),
            &MenuOptions {
                title: "CLI",
                excluded_name: "reference_cli_v1",
                section_path: "/cli",
                included_functions: &HashSet::new(),
            },
        );
        assert_eq!(
            leaf_ids(&menu),
            vec!["introduction", "auth-mfa", "reference_javascript_v2"]
        );
    }

    #[test]
    fn test_empty_sections() {
        let menu = client_library_menu(
            &[],
            &MenuOptions {
                title: "Swift",
                excluded_name: "reference_swift_v1",
                section_path: "/swift",
                included_functions: &HashSet::new(),
            },
        );
        assert_eq!(
            menu,
            MenuCategory {
                title: "Swift".to_owned(),
                children: Vec::new(),
            }
        );
    }

    #[test]
    fn test_serializes_leaf_type() {
        let menu = client_library_menu(
            &sections(),
            &MenuOptions {
                title: "",
                excluded_name: "",
                section_path: "/js",
                included_functions: &HashSet::new(),
            },
        );
        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json["children"][0]["type"], "markdown");
        assert_eq!(json["children"][0]["href"], "/js/introduction");
    }
}
