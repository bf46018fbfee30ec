use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quill_engine::reconcile::{extract, resolve_offset};
mod common;

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group.sample_size(20);

    for sections in [10, 100, 1000] {
        let doc = common::generate_chapter(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &doc, |b, doc| {
            b.iter(|| {
                let extraction = extract(black_box(doc));
                black_box(extraction);
            });
        });
    }

    group.finish();
}

fn bench_resolve_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_offset");

    let doc = common::generate_chapter(1000);
    let extraction = extract(&doc);
    let offsets: Vec<usize> = (0..extraction.char_len()).step_by(97).collect();

    group.bench_function("every_97th_char", |b| {
        b.iter(|| {
            for offset in &offsets {
                let _ = black_box(resolve_offset(&extraction, *offset, 3));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_extract, bench_resolve_offset);
criterion_main!(benches);
