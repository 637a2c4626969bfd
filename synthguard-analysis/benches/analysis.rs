use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use synthguard_analysis::config::{SafetyParams, SynthesisParams};
use synthguard_analysis::{safety, synthesis, Analyzer};
use synthguard_seq::GeneticCode;

fn random_dna(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = Analyzer::new();

    for len in [1_000, 10_002] {
        let seq = random_dna(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &seq, |b, seq| {
            b.iter(|| analyzer.analyze(black_box(seq)))
        });
    }
    group.finish();
}

fn bench_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzers");
    let seq = random_dna(10_002);
    let code = GeneticCode::standard();
    let synthesis_params = SynthesisParams::default();
    let safety_params = SafetyParams::default();

    group.bench_function("repeats_10kb", |b| {
        b.iter(|| synthesis::check_repeats(black_box(&seq), synthesis_params.repeat_window))
    });
    group.bench_function("gc_profile_10kb", |b| {
        b.iter(|| {
            synthesis::gc_profile(
                black_box(&seq),
                synthesis_params.gc_window,
                synthesis_params.gc_max_points,
            )
        })
    });
    group.bench_function("safety_10kb", |b| {
        b.iter(|| safety::analyze_safety(black_box(&seq), &code, &safety_params))
    });
    group.finish();
}

criterion_group!(benches, bench_full_analysis, bench_analyzers);
criterion_main!(benches);
