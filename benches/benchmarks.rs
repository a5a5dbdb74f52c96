use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

use hbb::prompt::Metadata;
use hbb::render::{build_context, plan_render, DEFAULT_OPAQUE_EXTENSIONS};

fn sample_metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("name".to_string(), "bench-project".to_string());
    metadata.insert(
        "projectDes".to_string(),
        "A project named bench-project".to_string(),
    );
    metadata
}

fn sample_template(root: &Path) {
    for i in 0..50 {
        let dir = root.join(format!("src/components/c{i}"));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("index.js"),
            format!("// {{{{ name }}}} component {i}\nexport default {{}};\n"),
        )
        .unwrap();
    }
    std::fs::create_dir_all(root.join("public")).unwrap();
    std::fs::write(root.join("public/favicon.ico"), [0u8; 1024]).unwrap();
}

fn bench_context_building(c: &mut Criterion) {
    let metadata = sample_metadata();

    c.bench_function("build_context", |b| {
        b.iter(|| {
            let context = build_context(black_box(&metadata));
            black_box(context)
        });
    });
}

fn bench_render_planning(c: &mut Criterion) {
    let template = tempfile::tempdir().unwrap();
    sample_template(template.path());
    let metadata = sample_metadata();
    let extensions: Vec<String> = DEFAULT_OPAQUE_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect();

    c.bench_function("plan_render", |b| {
        b.iter(|| {
            let plan = plan_render(
                black_box(template.path()),
                black_box(&metadata),
                black_box(&extensions),
            )
            .unwrap();
            black_box(plan)
        });
    });
}

criterion_group!(benches, bench_context_building, bench_render_planning);
criterion_main!(benches);
