//! Benchmark the render callback against its real-time deadline.
//!
//! Run with: cargo bench
//!
//! At 44.1kHz, a 210-frame buffer must render in under 4.76ms; the
//! callback budget shrinks proportionally with smaller buffers.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tablesynth::{SynthConfig, SynthEngine, Waveform, WavetableBank};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/render_block");
    let config = SynthConfig::default();
    let bank = WavetableBank::new(config.table_size);

    // Notes long enough to outlast any measurement run, so the bench
    // sees steady-state tone rendering rather than queue refills.
    let (mut engine, mut handle) =
        SynthEngine::new(&config, &bank, &[Waveform::Sine, Waveform::Saw]);
    handle.play(0, u32::MAX, 440.0);
    handle.play(1, u32::MAX, 110.0);

    let mut out = vec![0.0f32; config.frames_per_buffer * 2];
    group.bench_function("two_voices", |b| {
        b.iter(|| engine.render_block(black_box(&mut out)));
    });

    let (mut engine, _handle) = SynthEngine::new(&config, &bank, &[Waveform::Sine, Waveform::Saw]);
    group.bench_function("two_voices_idle", |b| {
        b.iter(|| engine.render_block(black_box(&mut out)));
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
