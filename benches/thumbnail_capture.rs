// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use framemark::media::capture::capture_thumbnail;
use framemark::media::Frame;
use std::hint::black_box;
use std::sync::Arc;

fn frame(width: u32, height: u32) -> Frame {
    let rgba: Vec<u8> = (0..width * height * 4).map(|i| (i % 251) as u8).collect();
    Frame {
        rgba_data: Arc::new(rgba),
        width,
        height,
        pts_secs: 0.0,
    }
}

fn thumbnail_capture_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("thumbnail_capture");

    let hd = frame(1280, 720);
    group.bench_function("capture_720p", |b| {
        b.iter(|| black_box(capture_thumbnail(black_box(&hd))))
    });

    let full_hd = frame(1920, 1080);
    group.bench_function("capture_1080p", |b| {
        b.iter(|| black_box(capture_thumbnail(black_box(&full_hd))))
    });

    group.finish();
}

criterion_group!(benches, thumbnail_capture_benchmark);
criterion_main!(benches);
