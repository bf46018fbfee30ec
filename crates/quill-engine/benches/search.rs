use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use quill_engine::editing::{Document, Editor};
use quill_engine::reconcile::{extract, find_pattern, replace_all};
mod common;

fn bench_find_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_pattern");
    group.sample_size(20);

    let doc = common::generate_chapter(1000);
    let extraction = extract(&doc);

    group.bench_function("case_sensitive", |b| {
        b.iter(|| black_box(find_pattern(&extraction, black_box("Voss"), true)));
    });
    group.bench_function("case_insensitive", |b| {
        b.iter(|| black_box(find_pattern(&extraction, black_box("nadie"), false)));
    });

    group.finish();
}

fn bench_replace_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_all");
    group.sample_size(10);

    let doc = common::generate_chapter(200);

    group.bench_function("extract_find_replace", |b| {
        b.iter_batched(
            || Document::new(doc.clone()),
            |mut document| {
                let matches = find_pattern(&extract(document.doc()), "Teh", true);
                let report = replace_all(&mut document, &matches, "The");
                black_box(report);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_find_pattern, bench_replace_all);
criterion_main!(benches);
