//! Page payload assembly.
//!
//! Missing data never fails a page: a function absent from the library spec,
//! a ref absent from the type spec and a missing markdown file all produce a
//! sparser payload. Only I/O failures and a broken type-spec artifact
//! propagate.

use std::collections::HashSet;

use refgen_sections::{SectionDescriptor, SectionKind};
use refgen_source::{FrontMatter, FunctionSpec, LibrarySpec, MarkdownDocument, SourceError};
use refgen_typespec::{MethodTypes, TypeDetails, TypeSpecIndex};
use serde::Serialize;

use crate::error::SiteError;
use crate::menu::{MenuCategory, MenuOptions, client_library_menu};

/// Resolved markdown section.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownContent {
    /// Section id.
    pub id: String,
    /// Frontmatter title, falling back to the section title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL path segment.
    pub slug: String,
    /// Markdown body, `None` when no file exists.
    pub content: Option<String>,
    /// Frontmatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<FrontMatter>,
}

/// Resolved function section.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionContent {
    /// Section id.
    pub id: String,
    /// Spec title, falling back to the section title.
    pub title: String,
    /// URL path segment.
    pub slug: String,
    /// Library spec entry, `None` when the library does not document it.
    pub function: Option<FunctionSpec>,
    /// Generated signature, `None` when the ref is unknown.
    pub signature: Option<MethodTypes>,
    /// Compact signature, e.g. `signUp(credentials)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_display: Option<String>,
    /// Return type as it reads in TypeScript.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
}

/// Body of one reference page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageDocs {
    /// Markdown page.
    Markdown(MarkdownContent),
    /// Function page.
    Function(FunctionContent),
    /// Page for a section of another type.
    Section(SectionDescriptor),
}

/// Payload of one reference page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    /// Page body.
    pub docs: PageDocs,
    /// Sidebar of the page's library version.
    pub menu_data: MenuCategory,
}

/// Library-wide payload: every markdown section and the sidebar.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefStaticProps {
    /// Markdown sections in section order.
    pub docs: Vec<MarkdownContent>,
    /// Sidebar of the library version.
    pub menu_data: MenuCategory,
}

/// Inputs shared by every page of one library version.
#[derive(Clone, Copy, Debug)]
pub struct RefPropsInput<'a> {
    /// Flattened common sections.
    pub sections: &'a [SectionDescriptor],
    /// Library spec.
    pub spec: &'a LibrarySpec,
    /// URL prefix of the library version.
    pub library_path: &'a str,
    /// Library-version name used by section `excludes`.
    pub excluded_name: &'a str,
}

impl RefPropsInput<'_> {
    /// Ids of the functions documented by the library spec.
    #[must_use]
    pub fn included_functions(&self) -> HashSet<String> {
        self.spec.function_ids().map(str::to_owned).collect()
    }

    /// Sidebar of the library version.
    #[must_use]
    pub fn menu(&self) -> MenuCategory {
        let included_functions = self.included_functions();
        client_library_menu(
            self.sections,
            &MenuOptions {
                title: self.spec.info.title.as_deref().unwrap_or_default(),
                excluded_name: self.excluded_name,
                section_path: self.library_path,
                included_functions: &included_functions,
            },
        )
    }
}

/// Assemble the library-wide payload.
///
/// `markdown` resolves a section id to its raw markdown, `None` when the
/// library version has no file for it.
///
/// # Errors
///
/// Returns [`SourceError`] if a markdown file exists but cannot be read.
pub fn ref_static_props<F>(input: &RefPropsInput<'_>, markdown: F) -> Result<RefStaticProps, SourceError>
where
    F: Fn(&str) -> Result<Option<String>, SourceError>,
{
    let docs = input
        .sections
        .iter()
        .filter(|s| s.kind == SectionKind::Markdown && !s.is_excluded_for(input.excluded_name))
        .map(|section| markdown(&section.id).map(|raw| markdown_content(section, raw)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RefStaticProps {
        docs,
        menu_data: input.menu(),
    })
}

/// Assemble the payload of one page.
///
/// # Errors
///
/// Returns [`SiteError`] if the markdown cannot be read or the type-spec
/// artifact cannot be loaded.
pub fn page_props<F>(
    section: &SectionDescriptor,
    input: &RefPropsInput<'_>,
    markdown: F,
    types: &TypeSpecIndex,
) -> Result<PageProps, SiteError>
where
    F: Fn(&str) -> Result<Option<String>, SourceError>,
{
    let docs = match section.kind {
        SectionKind::Markdown => PageDocs::Markdown(markdown_content(section, markdown(&section.id)?)),
        SectionKind::Function => PageDocs::Function(function_content(section, input.spec, types)?),
        SectionKind::Other(_) => PageDocs::Section(section.clone()),
    };

    Ok(PageProps {
        docs,
        menu_data: input.menu(),
    })
}

fn markdown_content(section: &SectionDescriptor, raw: Option<String>) -> MarkdownContent {
    let (content, meta) = match raw {
        Some(raw) => {
            let doc = MarkdownDocument::parse(&raw);
            (Some(doc.content), doc.meta)
        }
        None => {
            tracing::debug!(section = %section.id, "No markdown for section");
            (None, None)
        }
    };

    MarkdownContent {
        id: section.id.clone(),
        title: meta
            .as_ref()
            .and_then(|m| m.title.clone())
            .or_else(|| section.title.clone()),
        slug: section.slug.clone(),
        content,
        meta,
    }
}

fn function_content(
    section: &SectionDescriptor,
    spec: &LibrarySpec,
    types: &TypeSpecIndex,
) -> Result<FunctionContent, SiteError> {
    let function = spec.function(&section.id).cloned();
    if function.is_none() {
        tracing::debug!(section = %section.id, "Function not documented by library spec");
    }

    let signature = match function.as_ref().and_then(|f| f.reference.as_deref()) {
        Some(reference) => {
            let signature = types.get_type_spec(reference)?;
            if signature.is_none() {
                tracing::debug!(reference, "No type signature for ref");
            }
            signature
        }
        None => None,
    };

    let signature_display = signature
        .as_ref()
        .map(MethodTypes::display_signature)
        .filter(|s| !s.is_empty());
    let returns = signature
        .as_ref()
        .and_then(|s| s.ret.as_ref())
        .and_then(|ret| ret.type_details.as_ref())
        .map(TypeDetails::display);

    Ok(FunctionContent {
        id: section.id.clone(),
        title: function
            .as_ref()
            .map_or_else(|| section.display_title().to_owned(), |f| f.title.clone()),
        slug: section.slug.clone(),
        function,
        signature,
        signature_display,
        returns,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use refgen_sections::{flatten_sections, parse_sections};
    use refgen_source::{MockSource, SpecSource};

    use super::*;
    use crate::menu::MenuNode;

    const SECTIONS: &str = r#"[
        {"id": "signUp", "type": "function", "title": "Sign up"},
        {"id": "overview", "type": "markdown", "title": "Overview"}
    ]"#;

    const SPEC: &str = "functions:\n  - id: signUp\n    ref: auth.signUp\n";

    struct Fixture {
        sections: Vec<SectionDescriptor>,
        spec: LibrarySpec,
        source: Arc<MockSource>,
    }

    impl Fixture {
        fn new(sections: &str, spec: &str, source: MockSource) -> Self {
            Self {
                sections: flatten_sections(&parse_sections(sections).unwrap()),
                spec: LibrarySpec::from_yaml(spec).unwrap(),
                source: Arc::new(source),
            }
        }

        fn input(&self) -> RefPropsInput<'_> {
            RefPropsInput {
                sections: &self.sections,
                spec: &self.spec,
                library_path: "/javascript",
                excluded_name: "reference_javascript_v2",
            }
        }

        fn markdown(&self) -> impl Fn(&str) -> Result<Option<String>, SourceError> + '_ {
            |id: &str| self.source.read_markdown("javascript", "v2", id)
        }

        fn types(&self) -> TypeSpecIndex {
            TypeSpecIndex::new(Arc::clone(&self.source) as Arc<dyn SpecSource>)
        }

        fn section(&self, id: &str) -> &SectionDescriptor {
            self.sections.iter().find(|s| s.id == id).unwrap()
        }
    }

    #[test]
    fn test_static_props_scenario() {
        let fixture = Fixture::new(
            SECTIONS,
            SPEC,
            MockSource::new().with_markdown("javascript", "v2", "overview", "# Overview\n"),
        );

        let props = ref_static_props(&fixture.input(), fixture.markdown()).unwrap();

        let leaves: Vec<_> = props.menu_data.leaves().collect();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].id, "signUp");
        assert_eq!(leaves[0].href, "/javascript/signup");

        assert_eq!(props.docs.len(), 1);
        assert_eq!(props.docs[0].id, "overview");
        assert_eq!(props.docs[0].content.as_deref(), Some("# Overview\n"));
    }

    #[test]
    fn test_function_page_without_module() {
        let fixture = Fixture::new(
            SECTIONS,
            SPEC,
            MockSource::new().with_typespec(r#"[{"name": "storage", "methods": {}}]"#),
        );

        let props = page_props(
            fixture.section("signUp"),
            &fixture.input(),
            fixture.markdown(),
            &fixture.types(),
        )
        .unwrap();

        let PageDocs::Function(content) = props.docs else {
            panic!("expected function docs");
        };
        assert_eq!(content.title, "signUp");
        assert_eq!(
            content.function.unwrap().reference.as_deref(),
            Some("auth.signUp")
        );
        assert_eq!(content.signature, None);
        assert_eq!(content.signature_display, None);
    }

    #[test]
    fn test_function_page_with_signature() {
        let fixture = Fixture::new(
            SECTIONS,
            SPEC,
            MockSource::new().with_typespec(
                r#"[{"name": "auth", "methods": {"auth.signUp": {
                    "name": "auth.signUp",
                    "params": [{"name": "credentials"}],
                    "ret": {"type": {"type": "promise", "awaited": {"type": "nameOnly", "name": "AuthResponse"}}}
                }}}]"#,
            ),
        );

        let props = page_props(
            fixture.section("signUp"),
            &fixture.input(),
            fixture.markdown(),
            &fixture.types(),
        )
        .unwrap();

        let PageDocs::Function(content) = props.docs else {
            panic!("expected function docs");
        };
        assert!(content.signature.is_some());
        assert_eq!(content.signature_display.as_deref(), Some("signUp(credentials)"));
        assert_eq!(content.returns.as_deref(), Some("Promise<AuthResponse>"));
    }

    #[test]
    fn test_undocumented_function_degrades() {
        // No type spec is configured: it must not be read when there is no ref.
        let fixture = Fixture::new(SECTIONS, "functions: []", MockSource::new());
        let types = fixture.types();

        let props = page_props(
            fixture.section("signUp"),
            &fixture.input(),
            fixture.markdown(),
            &types,
        )
        .unwrap();

        let PageDocs::Function(content) = &props.docs else {
            panic!("expected function docs");
        };
        assert_eq!(content.title, "Sign up");
        assert_eq!(content.function, None);
        assert_eq!(content.signature, None);
        assert!(!types.is_loaded());
        assert_eq!(fixture.source.typespec_reads(), 0);

        // The function is not in the menu either.
        assert_eq!(props.menu_data.leaves().count(), 1);
    }

    #[test]
    fn test_missing_markdown_degrades() {
        let fixture = Fixture::new(SECTIONS, SPEC, MockSource::new());

        let props = page_props(
            fixture.section("overview"),
            &fixture.input(),
            fixture.markdown(),
            &fixture.types(),
        )
        .unwrap();

        assert_eq!(
            props.docs,
            PageDocs::Markdown(MarkdownContent {
                id: "overview".to_owned(),
                title: Some("Overview".to_owned()),
                slug: "overview".to_owned(),
                content: None,
                meta: None,
            })
        );
    }

    #[test]
    fn test_markdown_frontmatter_title() {
        let fixture = Fixture::new(
            SECTIONS,
            SPEC,
            MockSource::new().with_markdown(
                "javascript",
                "v2",
                "overview",
                "---\ntitle: About the client\n---\nBody",
            ),
        );

        let props = ref_static_props(&fixture.input(), fixture.markdown()).unwrap();
        assert_eq!(props.docs[0].title.as_deref(), Some("About the client"));
        assert_eq!(props.docs[0].content.as_deref(), Some("Body"));
        assert!(props.docs[0].meta.is_some());
    }

    #[test]
    fn test_other_section_kind() {
        let fixture = Fixture::new(
            r#"[{"id": "cli-start", "type": "cli-command", "title": "supabase start"}]"#,
            SPEC,
            MockSource::new(),
        );

        let props = page_props(
            fixture.section("cli-start"),
            &fixture.input(),
            fixture.markdown(),
            &fixture.types(),
        )
        .unwrap();

        assert_eq!(props.docs, PageDocs::Section(fixture.section("cli-start").clone()));
        assert!(matches!(
            &props.menu_data.children[0],
            MenuNode::Leaf(leaf) if leaf.kind == SectionKind::Other("cli-command".to_owned())
        ));
    }

    #[test]
    fn test_excluded_markdown_not_in_docs() {
        let fixture = Fixture::new(
            r#"[
                {"id": "overview", "type": "markdown"},
                {"id": "legacy", "type": "markdown", "excludes": ["reference_javascript_v2"]}
            ]"#,
            SPEC,
            MockSource::new(),
        );

        let props = ref_static_props(&fixture.input(), fixture.markdown()).unwrap();
        assert_eq!(
            props.docs.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            vec!["overview"]
        );
    }

    #[test]
    fn test_corrupt_typespec_propagates() {
        let fixture = Fixture::new(SECTIONS, SPEC, MockSource::new().with_typespec("{"));

        let err = page_props(
            fixture.section("signUp"),
            &fixture.input(),
            fixture.markdown(),
            &fixture.types(),
        )
        .unwrap_err();
        assert!(matches!(err, SiteError::TypeSpec(_)));
    }

    #[test]
    fn test_page_docs_serialization() {
        let fixture = Fixture::new(SECTIONS, SPEC, MockSource::new().with_typespec("[]"));
        let props = page_props(
            fixture.section("signUp"),
            &fixture.input(),
            fixture.markdown(),
            &fixture.types(),
        )
        .unwrap();

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["docs"]["kind"], "function");
        assert_eq!(json["docs"]["function"]["$ref"], "auth.signUp");
        assert!(json["docs"]["signature"].is_null());
        assert!(json["menuData"]["children"].is_array());
    }
}
