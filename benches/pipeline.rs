//! Benchmarks for the beadgen pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};

use beadgen::{
    render_export, render_preview, replace_global, replace_single, ExportOptions, Palette,
    PreviewOptions, Quantizer, Resample, TargetHeight,
};

/// Diagonal colour gradient with a transparent corner.
fn gradient(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if x < width / 8 && y < height / 8 { 0 } else { 255 };
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 127 / (width + height).max(1)) as u8,
            alpha,
        ])
    });
    DynamicImage::ImageRgba8(img)
}

// -- Quantization benchmarks --

fn bench_quantization(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantization");

    let palette = Palette::perler();
    let source = gradient(640, 480);

    group.bench_function("quantize_29_auto", |b| {
        let quantizer = Quantizer::new();
        b.iter(|| {
            quantizer
                .quantize(black_box(&source), 29, TargetHeight::Auto, &palette)
                .unwrap()
        })
    });

    group.bench_function("quantize_100_auto", |b| {
        let quantizer = Quantizer::new();
        b.iter(|| {
            quantizer
                .quantize(black_box(&source), 100, TargetHeight::Auto, &palette)
                .unwrap()
        })
    });

    group.bench_function("quantize_100_nearest", |b| {
        let quantizer = Quantizer::new().with_filter(Resample::Nearest);
        b.iter(|| {
            quantizer
                .quantize(black_box(&source), 100, TargetHeight::Auto, &palette)
                .unwrap()
        })
    });

    group.finish();
}

// -- Editing benchmarks --

fn bench_editing(c: &mut Criterion) {
    let mut group = c.benchmark_group("editing");

    let palette = Palette::perler();
    let pattern = Quantizer::new()
        .quantize(&gradient(640, 480), 100, TargetHeight::Fixed(100), &palette)
        .unwrap();
    let target = pattern.materials()[0].entry.id.clone();
    let replacement = palette.get("P02").unwrap().clone();

    group.bench_function("replace_global_100x100", |b| {
        b.iter(|| replace_global(black_box(&pattern), &target, &replacement))
    });

    group.bench_function("replace_single_100x100", |b| {
        b.iter(|| replace_single(black_box(&pattern), 50, 50, &replacement).unwrap())
    });

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let palette = Palette::perler();
    let pattern = Quantizer::new()
        .quantize(&gradient(640, 480), 29, TargetHeight::Auto, &palette)
        .unwrap();

    group.bench_function("render_preview_29", |b| {
        b.iter(|| render_preview(black_box(&pattern), &PreviewOptions::default()).unwrap())
    });

    group.bench_function("render_export_29", |b| {
        b.iter(|| render_export(black_box(&pattern), &ExportOptions::default()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_quantization, bench_editing, bench_rendering);
criterion_main!(benches);
