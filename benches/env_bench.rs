//! Benchmarks for the tension envelope generator.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure per-block rendering cost in each stage plus the
//! trigger-time coefficient solve, to ensure both complete well within
//! real-time audio deadlines.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tension_env::{Envelope, EnvelopeParams};

/// Common buffer sizes used in audio applications.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

const SAMPLE_RATE: f64 = 48_000.0;

fn curved_params() -> EnvelopeParams {
    EnvelopeParams {
        attack_ms: 100.0,
        decay_ms: 100.0,
        sustain_db: -6.0,
        release_ms: 300.0,
        tension_attack: 0.6,
        tension_decay: -0.4,
        tension_release: 0.3,
    }
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope/render");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up)
        let mut env = Envelope::with_params(SAMPLE_RATE, curved_params());
        env.note_on(1.0);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::adsr(SAMPLE_RATE, 1.0, 1.0, -6.0, 300.0);
        env.note_on(1.0);
        for _ in 0..200 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Release phase (ramping down)
        let mut env = Envelope::adsr(SAMPLE_RATE, 1.0, 1.0, -6.0, 300.0);
        env.note_on(1.0);
        for _ in 0..200 {
            env.next_sample();
        }
        env.note_off();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

fn bench_trigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope/trigger");

    // note_on solves the attack and decay coefficient pairs; note_off the
    // release pair. Both run on note events, not per sample, but must still
    // be cheap enough for dense MIDI streams.
    let mut env = Envelope::with_params(SAMPLE_RATE, curved_params());
    group.bench_function("note_on", |b| {
        b.iter(|| {
            env.note_on(black_box(0.8));
        })
    });

    let mut env = Envelope::with_params(SAMPLE_RATE, curved_params());
    env.note_on(1.0);
    for _ in 0..100 {
        env.next_sample();
    }
    group.bench_function("note_off", |b| {
        b.iter(|| {
            env.note_off();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_trigger);
criterion_main!(benches);
