use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sequitur_engine::Sequitur;

fn generate_repetitive_text(size: usize) -> String {
    let pattern = "the quick brown fox jumps over the lazy dog ";
    pattern.repeat(size / pattern.len())
}

fn generate_source_code(size: usize) -> String {
    let patterns = [
        "fn main() {\n",
        "    let x = 42;\n",
        "    println!(\"Hello, world!\");\n",
        "    if x > 0 {\n",
        "        return x;\n",
        "    }\n",
        "}\n",
    ];

    let mut result = String::new();
    let mut i = 0;
    while result.len() < size {
        result.push_str(patterns[i % patterns.len()]);
        i += 1;
    }
    result.truncate(size);
    result
}

fn generate_low_repetition(size: usize) -> String {
    let chars = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut result = String::new();
    let mut seed = 12345u64;

    for _ in 0..size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        let idx = (seed % chars.len() as u64) as usize;
        result.push(chars.chars().nth(idx).unwrap());
    }
    result
}

fn bench_construction_repetitive(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("repetitive_text");

    for size in sizes.iter() {
        let data = generate_repetitive_text(*size);
        group.bench_with_input(BenchmarkId::new("push", size), &data, |b, data| {
            b.iter(|| {
                let mut seq = Sequitur::new();
                seq.extend(black_box(data.chars()));
                black_box(seq)
            });
        });
    }

    group.finish();
}

fn bench_construction_source_code(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 50_000];
    let mut group = c.benchmark_group("source_code");

    for size in sizes.iter() {
        let data = generate_source_code(*size);
        group.bench_with_input(BenchmarkId::new("push", size), &data, |b, data| {
            b.iter(|| {
                let mut seq = Sequitur::new();
                seq.extend(black_box(data.chars()));
                black_box(seq)
            });
        });
    }

    group.finish();
}

fn bench_construction_low_repetition(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 50_000];
    let mut group = c.benchmark_group("low_repetition");

    for size in sizes.iter() {
        let data = generate_low_repetition(*size);
        group.bench_with_input(BenchmarkId::new("push", size), &data, |b, data| {
            b.iter(|| {
                let mut seq = Sequitur::new();
                seq.extend(black_box(data.chars()));
                black_box(seq)
            });
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("iteration");

    for size in sizes.iter() {
        let data = generate_repetitive_text(*size);
        let mut seq = Sequitur::new();
        seq.extend(data.chars());

        group.bench_with_input(BenchmarkId::new("forward", size), &seq, |b, seq| {
            b.iter(|| black_box(seq.iter().count()));
        });

        group.bench_with_input(BenchmarkId::new("reverse", size), &seq, |b, seq| {
            b.iter(|| black_box(seq.rev_iter().count()));
        });
    }

    group.finish();
}

fn print_compression_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    let data = generate_repetitive_text(50_000);
    let mut seq = Sequitur::new();
    seq.extend(data.chars());
    let stats = seq.stats();
    println!(
        "repetitive_text(50000): {} terminals, {} grammar symbols, {} rules, ratio {:.2}",
        stats.input_length,
        stats.grammar_symbols,
        stats.rule_count,
        stats.compression_ratio()
    );
    group.bench_function("stats_snapshot", |b| {
        b.iter(|| black_box(seq.stats()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_construction_repetitive,
    bench_construction_source_code,
    bench_construction_low_repetition,
    bench_iteration,
    print_compression_stats,
);
criterion_main!(benches);
