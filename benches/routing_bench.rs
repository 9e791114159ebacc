use criterion::{criterion_group, criterion_main, Criterion};
use suite_router::core::config::{CompiledProject, Environment, ProjectDefinition};
use suite_router::core::selector::{resolve, route, ConflictPolicy};

fn compiled_projects() -> Vec<CompiledProject> {
    let defs = vec![
        ProjectDefinition {
            name: "client".to_string(),
            environment: Environment::Browser,
            include: vec!["src/**/*.svelte.test.ts".to_string()],
            exclude: vec!["src/lib/server/**".to_string()],
            ..ProjectDefinition::default()
        },
        ProjectDefinition {
            name: "server".to_string(),
            environment: Environment::Node,
            include: vec!["src/**/*.test.ts".to_string()],
            exclude: vec!["src/**/*.svelte.test.ts".to_string()],
            ..ProjectDefinition::default()
        },
    ];
    defs.into_iter()
        .map(|def| CompiledProject::compile(def).unwrap())
        .collect()
}

fn synthetic_tree(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| match i % 4 {
            0 => format!("src/ui/component_{}.svelte.test.ts", i),
            1 => format!("src/util/module_{}.test.ts", i),
            2 => format!("src/lib/server/handler_{}.svelte.test.ts", i),
            _ => format!("src/plain/source_{}.ts", i),
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let projects = compiled_projects();

    c.bench_function("resolve_single_file", |b| {
        b.iter(|| resolve("src/ui/button.svelte.test.ts", &projects))
    });
}

fn bench_route_tree(c: &mut Criterion) {
    let projects = compiled_projects();
    let files = synthetic_tree(1000);

    c.bench_function("route_1000_files", |b| {
        b.iter(|| route(&files, &projects, ConflictPolicy::Fail))
    });
}

criterion_group!(benches, bench_resolve, bench_route_tree);
criterion_main!(benches);
