use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqldiff_core::{align, DiffAlgorithm, DiffEngine};

fn statement(lines: usize, variant: usize) -> String {
    (0..lines)
        .map(|i| {
            if variant > 0 && i % 7 == 0 {
                format!("  COALESCE(col_{i}, {variant}) AS c{i},\n")
            } else {
                format!("  col_{i},\n")
            }
        })
        .collect()
}

fn bench_diff(c: &mut Criterion) {
    let old = statement(200, 0);
    let new = statement(200, 1);

    c.bench_function("diff_200_lines_lcs", |b| {
        let engine = DiffEngine::new().with_algorithm(DiffAlgorithm::Lcs);
        b.iter(|| engine.diff_strings(black_box(&old), black_box(&new)))
    });

    c.bench_function("diff_200_lines_myers", |b| {
        let engine = DiffEngine::new().with_algorithm(DiffAlgorithm::Myers);
        b.iter(|| engine.diff_strings(black_box(&old), black_box(&new)))
    });

    c.bench_function("diff_and_align_200_lines", |b| {
        let engine = DiffEngine::new();
        b.iter(|| align(&engine.diff_strings(black_box(&old), black_box(&new)).segments))
    });
}

criterion_group!(benches, bench_diff);
criterion_main!(benches);
