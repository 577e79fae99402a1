use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::f64::consts::PI;
use tonescope::signal::SamplingInfo;
use tonescope::spectrum::FourierConfig;
use tonescope::stft::{ReassignmentTransform, ShortTimeTransform};
use tonescope::window::{WindowFunction, WindowKind};

const SAMPLE_RATE: f64 = 48000.0;

/// A 440 Hz sine at 48 kHz
fn sine_signal(len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| (2.0 * PI * 440.0 * n as f64 / SAMPLE_RATE).sin())
        .collect()
}

fn forward_4096(c: &mut Criterion) {
    let config = FourierConfig::new(
        SamplingInfo::new(SAMPLE_RATE, 1.0),
        WindowFunction::new(WindowKind::Hanning, 4096),
        0,
    );
    let mut engine = config.make_engine();
    let signal = sine_signal(4096);

    c.bench_function("forward_4096", |b| {
        b.iter(|| {
            black_box(
                config
                    .forward(&mut engine, &signal, 0)
                    .expect("benchmark engine matches its configuration"),
            );
        });
    });
}

fn stft_1024_hop_256(c: &mut Criterion) {
    let config = FourierConfig::new(
        SamplingInfo::new(SAMPLE_RATE, 1.0),
        WindowFunction::new(WindowKind::Hanning, 1024),
        0,
    );
    let mut stft =
        ShortTimeTransform::with_hop(config, 256).expect("benchmark hop is nonzero");
    let signal = sine_signal(32768);

    c.bench_function("stft_1024_hop_256", |b| {
        b.iter(|| {
            black_box(
                stft.transform(&signal)
                    .expect("benchmark signal satisfies transform preconditions"),
            );
        });
    });
}

fn reassignment_1024_hop_256(c: &mut Criterion) {
    let sampling = SamplingInfo::new(SAMPLE_RATE, 1.0);
    let mut transform = ReassignmentTransform::with_hop(sampling, 1024, 0, 256)
        .expect("benchmark hop is nonzero");
    let signal = sine_signal(32768);

    c.bench_function("reassignment_1024_hop_256", |b| {
        b.iter(|| {
            let spectra = transform
                .transform(&signal)
                .expect("benchmark signal satisfies transform preconditions");
            let points: usize = spectra.iter().map(|s| s.points().len()).sum();
            black_box(points);
        });
    });
}

criterion_group!(
    benches,
    forward_4096,
    stft_1024_hop_256,
    reassignment_1024_hop_256,
);
criterion_main!(benches);
