//! Benchmarks for menu and page assembly.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use refgen_sections::{flatten_sections, parse_sections};
use refgen_site::{LibraryRegistry, MenuOptions, RefSite, client_library_menu, ref_static_paths};
use refgen_source::{MockSource, SpecSource};

/// Create a common sections document with `groups` groups of `per_group` functions.
fn create_sections(groups: usize, per_group: usize) -> String {
    let mut json = String::from(r#"[{"id": "introduction", "type": "markdown", "title": "Introduction"}"#);
    for g in 0..groups {
        write!(json, r#", {{"title": "Group {g}", "items": ["#).unwrap();
        for f in 0..per_group {
            if f > 0 {
                json.push_str(", ");
            }
            write!(json, r#"{{"id": "fn-{g}-{f}", "type": "function", "title": "Function {g}.{f}"}}"#)
                .unwrap();
        }
        json.push_str("]}");
    }
    json.push(']');
    json
}

/// Create a library spec documenting every other function.
fn create_spec(groups: usize, per_group: usize) -> String {
    let mut yaml = String::from("functions:\n");
    for g in 0..groups {
        for f in (0..per_group).step_by(2) {
            writeln!(yaml, "  - id: fn-{g}-{f}\n    $ref: mod{g}.fn{f}").unwrap();
        }
    }
    yaml
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_sections");

    for (groups, per_group) in [(10, 10), (50, 20)] {
        let nodes = parse_sections(&create_sections(groups, per_group)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(groups * per_group),
            &nodes,
            |b, nodes| b.iter(|| flatten_sections(nodes)),
        );
    }

    group.finish();
}

fn bench_menu(c: &mut Criterion) {
    let sections = flatten_sections(&parse_sections(&create_sections(50, 20)).unwrap());
    let included: HashSet<String> = sections
        .iter()
        .step_by(2)
        .map(|s| s.id.clone())
        .collect();

    c.bench_function("client_library_menu", |b| {
        b.iter(|| {
            client_library_menu(
                &sections,
                &MenuOptions {
                    title: "JavaScript",
                    excluded_name: "reference_javascript_v2",
                    section_path: "/javascript",
                    included_functions: &included,
                },
            )
        });
    });
}

fn bench_site(c: &mut Criterion) {
    let source = Arc::new(
        MockSource::new()
            .with_sections(create_sections(20, 10))
            .with_typespec("[]")
            .with_library_spec("js_v2.yml", create_spec(20, 10))
            .with_library_spec("py_v2.yml", create_spec(20, 10)),
    );
    let libraries = LibraryRegistry::new()
        .with_library("javascript", [("v2", "js_v2.yml")])
        .with_library("python", [("v2", "py_v2.yml")]);
    let site = RefSite::new(Arc::clone(&source) as Arc<dyn SpecSource>, libraries.clone());
    let sections = site.sections().unwrap();
    let paths = site.static_paths().unwrap();

    let mut group = c.benchmark_group("site");

    group.bench_function("static_paths", |b| {
        b.iter(|| ref_static_paths(&sections, &libraries));
    });

    group.bench_function("page_props_all", |b| {
        b.iter(|| {
            for path in &paths.paths {
                site.page_props(path.slug()).unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_flatten, bench_menu, bench_site);
criterion_main!(benches);
