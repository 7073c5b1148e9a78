use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filekeep::path::{normalize, resolve_under, PathRelationship, VirtualPath};
use std::path::Path;

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    // Benchmark a clean rooted path
    group.bench_function("rooted_path", |b| {
        b.iter(|| normalize::normalize(black_box("/projects/demo/report.txt")));
    });

    // Benchmark backslash conversion
    group.bench_function("backslashes", |b| {
        b.iter(|| normalize::normalize(black_box("projects\\demo\\report.txt")));
    });

    // Benchmark path with . and .. segments
    group.bench_function("with_dots", |b| {
        b.iter(|| normalize::normalize(black_box("/a/b/../c/./d")));
    });

    // Benchmark path with repeated separators
    group.bench_function("repeated_separators", |b| {
        b.iter(|| normalize::normalize(black_box("//a///b////c")));
    });

    group.finish();
}

fn bench_relationship(c: &mut Criterion) {
    let mut group = c.benchmark_group("relationship");

    let ancestor = "/users/test/projects/keep";
    let descendant = "/users/test/projects/keep/src/path";
    let sibling = "/users/test/projects/keep-other";

    group.bench_function("ancestor", |b| {
        b.iter(|| PathRelationship::between(black_box(ancestor), black_box(descendant)));
    });

    group.bench_function("unrelated_sibling_prefix", |b| {
        b.iter(|| PathRelationship::between(black_box(ancestor), black_box(sibling)));
    });

    group.bench_function("contains", |b| {
        b.iter(|| PathRelationship::contains(black_box(ancestor), black_box(descendant)));
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let root = Path::new("/srv/storage");

    // The common case: a clean virtual path against a nonexistent root
    group.bench_function("clean_suffix", |b| {
        b.iter(|| resolve_under(black_box(root), black_box("/projects/demo/report.txt")));
    });

    // Hostile traversal input
    group.bench_function("traversal_suffix", |b| {
        b.iter(|| resolve_under(black_box(root), black_box("../../../etc/passwd")));
    });

    group.finish();
}

fn bench_virtual_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_path");

    group.bench_function("parse", |b| {
        b.iter(|| VirtualPath::parse(black_box("projects\\demo\\..\\final\\report.txt")));
    });

    let path = VirtualPath::parse("/projects/demo/report.txt");
    group.bench_function("join", |b| {
        b.iter(|| black_box(&path).join(black_box("attachment.bin")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_relationship,
    bench_resolve,
    bench_virtual_path
);
criterion_main!(benches);
