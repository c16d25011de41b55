//! Performance benchmarks for harmonic analysis

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stratum_harmony::{analyze, analyze_with_config, match_chords, AnalysisConfig, DetectionSettings, NoteSet, PitchClass};

fn triad(seconds: usize) -> Vec<f32> {
    (0..44100 * seconds)
        .map(|i| {
            let t = i as f32 / 44100.0;
            [261.63f32, 329.63, 392.0]
                .iter()
                .map(|f| (t * f * 2.0 * std::f32::consts::PI).sin() * 0.3)
                .sum()
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let samples = triad(30);

    c.bench_function("analyze_30s", |b| {
        b.iter(|| analyze(black_box(&samples), black_box(44100)));
    });

    let sequential = AnalysisConfig {
        parallel: false,
        ..AnalysisConfig::default()
    };
    c.bench_function("analyze_30s_sequential", |b| {
        b.iter(|| analyze_with_config(black_box(&samples), black_box(44100), black_box(&sequential)));
    });
}

fn bench_match_chords(c: &mut Criterion) {
    let notes: NoteSet = [0u8, 2, 4, 7, 11].iter().collect();
    let settings = DetectionSettings::default();

    c.bench_function("match_chords_5_notes", |b| {
        b.iter(|| match_chords(black_box(notes), black_box(PitchClass::new(0)), black_box(&settings)));
    });
}

criterion_group!(benches, bench_analyze, bench_match_chords);
criterion_main!(benches);
