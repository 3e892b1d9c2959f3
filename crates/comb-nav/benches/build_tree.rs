//! Benchmarks for navigation tree building.

use std::collections::HashSet;

use comb_nav::{CategoryDecl, ItemDecl, LinkPolicy, build};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Create a declaration with specified depth and breadth, plus the slugs it references.
fn create_declaration(depth: usize, breadth: usize) -> (Vec<ItemDecl>, HashSet<String>) {
    fn create_level(
        prefix: &str,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
        slugs: &mut HashSet<String>,
    ) -> Vec<ItemDecl> {
        let mut items = Vec::with_capacity(breadth * 2);
        for i in 0..breadth {
            let slug = format!("{prefix}doc-{i}");
            slugs.insert(slug.clone());
            items.push(ItemDecl::doc(slug));

            if current_depth < max_depth {
                let child_prefix = format!("{prefix}section-{i}/");
                let children =
                    create_level(&child_prefix, current_depth + 1, max_depth, breadth, slugs);
                items.push(ItemDecl::Category(
                    CategoryDecl::new(format!("Section {i}"), children)
                        .with_generated_slug(format!("/category/{child_prefix}")),
                ));
            }
        }
        items
    }

    let mut slugs = HashSet::new();
    let items = create_level("", 0, depth, breadth, &mut slugs);
    (items, slugs)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for (depth, breadth) in [(2, 5), (3, 5), (5, 3)] {
        let (declaration, slugs) = create_declaration(depth, breadth);
        group.bench_with_input(
            BenchmarkId::new("tree", format!("d{depth}_b{breadth}")),
            &(declaration, slugs),
            |b, (declaration, slugs)| {
                b.iter(|| build("docs", declaration, slugs, LinkPolicy::Throw));
            },
        );
    }

    group.finish();
}

fn bench_generated_pages(c: &mut Criterion) {
    let (declaration, slugs) = create_declaration(3, 5);
    let tree = build("docs", &declaration, &slugs, LinkPolicy::Throw)
        .unwrap()
        .tree;

    c.bench_function("generated_pages", |b| b.iter(|| tree.generated_pages()));
}

criterion_group!(benches, bench_build, bench_generated_pages);
criterion_main!(benches);
