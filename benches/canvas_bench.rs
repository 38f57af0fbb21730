// Canvas Benchmarks
// Performance benchmarks for pixel writes, clears and full frame cycles

use criterion::{criterion_group, criterion_main, Criterion};
use fenster_rs::{Canvas, HeadlessPlatform, Session, WindowOptions};
use std::hint::black_box;

/// Benchmark filling every logical pixel with `set` at different scales
fn bench_canvas_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas_set");

    for scale in [1, 2, 4] {
        group.bench_function(format!("fill_320x240_x{}", scale), |b| {
            let mut canvas = Canvas::new(320, 240, scale).unwrap();
            b.iter(|| {
                for y in 0..240 {
                    for x in 0..320 {
                        canvas.set(x, y, black_box((x * y) & 0xFFFFFF)).unwrap();
                    }
                }
                black_box(canvas.as_slice());
            });
        });
    }

    group.finish();
}

/// Benchmark clearing the whole physical buffer
fn bench_canvas_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas_clear");

    group.bench_function("clear_640x480_x2", |b| {
        let mut canvas = Canvas::new(640, 480, 2).unwrap();
        b.iter(|| {
            canvas.clear(black_box(0x336699)).unwrap();
            black_box(canvas.as_slice());
        });
    });

    group.finish();
}

/// Benchmark a full frame cycle on the headless platform with pacing disabled
fn bench_session_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_frame");

    group.bench_function("frame_320x240_x2", |b| {
        let options = WindowOptions::new(320, 240)
            .with_scale(2)
            .with_target_fps(0.0);
        let mut session = Session::open(HeadlessPlatform::new(), &options).unwrap();
        b.iter(|| {
            black_box(session.frame().unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_canvas_set, bench_canvas_clear, bench_session_frame);
criterion_main!(benches);
