//! Benchmarks for route resolution and comment threading.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use landmark::{
    comments::{build_comment_tree, CommentRecord},
    routes::{AccessId, RoutePermission, RouteResolver, UserAccessContext},
};

/// Builds a navigation tree of `count` routes, four levels deep, every
/// third route restricted to a department.
fn navigation(count: usize) -> Vec<RoutePermission> {
    (0..count)
        .map(|i| {
            let mut route = RoutePermission::new(format!("r{}", i), format!("/section/{}", i));
            if i >= 4 {
                route.parent_path = Some(format!("r{}", i / 4));
            }
            if i % 3 == 0 {
                route.department_ids.push(AccessId::Number((i % 5) as i64));
            }
            route.sort_order = Some((i % 7) as i32);
            route
        })
        .collect()
}

/// Builds `count` comments where each reply answers a recent comment.
fn discussion(count: usize) -> Vec<CommentRecord> {
    (0..count)
        .map(|i| {
            let parent = if i % 10 == 0 {
                None
            } else {
                Some(format!("c{}", i - 1 - (i % 3).min(i - 1)))
            };
            CommentRecord::new(format!("c{}", i), parent.as_deref(), (count - i) as u64)
        })
        .collect()
}

fn bench_route_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_resolution");
    let resolver = RouteResolver::default();

    let mut user = UserAccessContext::new("u1");
    user.department_ids.insert(AccessId::Number(1));
    user.departments.insert("Technology".to_string());

    for size in [50usize, 500, 5000] {
        let routes = navigation(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("resolve", size), &routes, |b, routes| {
            b.iter(|| resolver.resolve(black_box(routes), black_box(&user)))
        });
    }

    let routes = navigation(500);
    let resolved = resolver.resolve(&routes, &user).unwrap();
    group.bench_function("children_500", |b| {
        b.iter(|| resolved.children(black_box("r1")))
    });

    group.finish();
}

fn bench_comment_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("comment_tree");

    for size in [20usize, 200, 2000] {
        let comments = discussion(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &comments, |b, comments| {
            b.iter(|| build_comment_tree(black_box(comments)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_route_resolution, bench_comment_tree);
criterion_main!(benches);
