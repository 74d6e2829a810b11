use criterion::{criterion_group, criterion_main, Criterion};

use fractalgen_core::geometry::{koch_snowflake, sierpinski};
use fractalgen_core::{DrawCommand, Julia, Mandelbrot, Viewport};
use fractalgen_render::{
    render, render_escape_time, ColorMode, Coloring, FractalKind, RequestFields, Rgb,
};

fn rainbow() -> Coloring {
    Coloring {
        mode: ColorMode::Rainbow,
        inside: Rgb::BLACK,
        custom: Rgb::WHITE,
    }
}

fn bench_full_frame_render(c: &mut Criterion) {
    let request = RequestFields {
        kind: FractalKind::Mandelbrot,
        depth: "100".into(),
        ..RequestFields::default()
    }
    .parse()
    .unwrap();
    let viewport = Viewport::default();

    c.bench_function("mandelbrot_640x480_100iter", |b| {
        b.iter(|| render(&request, &viewport, 640, 480).unwrap());
    });
}

fn bench_iteration_throughput(c: &mut Criterion) {
    let mandelbrot = Mandelbrot::new(1000);
    let viewport = Viewport::new(4.0, 0.5, 0.0);
    let coloring = rainbow();

    c.bench_function("mandelbrot_256x256_1000iter", |b| {
        b.iter(|| render_escape_time(&mandelbrot, &viewport, 256, 256, &coloring).unwrap());
    });

    let julia = Julia::new(Julia::DEFAULT_C, 300);
    c.bench_function("julia_256x256_300iter", |b| {
        b.iter(|| render_escape_time(&julia, &Viewport::default(), 256, 256, &coloring).unwrap());
    });
}

fn bench_subdivision(c: &mut Criterion) {
    c.bench_function("sierpinski_depth8", |b| {
        b.iter(|| {
            let mut commands: Vec<DrawCommand> = Vec::new();
            sierpinski(1200, 800, 8, &mut commands).unwrap();
            commands
        });
    });
    c.bench_function("koch_depth6", |b| {
        b.iter(|| {
            let mut commands: Vec<DrawCommand> = Vec::new();
            koch_snowflake(1200, 800, 6, &mut commands).unwrap();
            commands
        });
    });
}

fn bench_rasterize(c: &mut Criterion) {
    let request = RequestFields {
        kind: FractalKind::Sierpinski,
        depth: "7".into(),
        ..RequestFields::default()
    }
    .parse()
    .unwrap();
    let frame = render(&request, &Viewport::default(), 1200, 800).unwrap();

    c.bench_function("rasterize_sierpinski_depth7", |b| {
        b.iter(|| frame.to_pixels().unwrap());
    });
}

criterion_group!(
    benches,
    bench_full_frame_render,
    bench_iteration_throughput,
    bench_subdivision,
    bench_rasterize
);
criterion_main!(benches);
