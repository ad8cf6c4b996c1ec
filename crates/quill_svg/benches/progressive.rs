use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quill_animation::AnimObject;
use quill_core::{Point, RecordingContext, Size, Vec2};
use quill_svg::{interpolate_shapes, RenderConfig, RenderContext, Shape, ShapeBuilder};

/// Closed wave of `n` cubic segments
fn wave(n: usize) -> Shape {
    let mut builder = ShapeBuilder::new();
    builder.begin_contour(Point::new(0.0, 0.0));
    for i in 0..n {
        let x = i as f32 * 10.0;
        builder
            .bezier3_to(
                Point::new(x + 3.0, 8.0),
                Point::new(x + 7.0, -8.0),
                Point::new(x + 10.0, 0.0),
                true,
            )
            .expect("contour is open");
    }
    builder.close_contour(true, false).expect("contour has curves");
    builder.build()
}

fn bench_render(c: &mut Criterion) {
    let shape = wave(256);
    let parent = AnimObject::new();

    c.bench_function("render_animated_256_cubics", |b| {
        let mut ctx =
            RenderContext::init(RenderConfig::default(), RecordingContext::new(Size::ZERO))
                .expect("default config is valid");
        b.iter(|| {
            ctx.reset_frame();
            shape
                .render_animated(
                    &mut ctx,
                    black_box(0.9),
                    &parent,
                    Vec2::ZERO,
                    Vec2::ONE,
                    false,
                )
                .expect("render succeeds")
        })
    });
}

fn bench_interpolate(c: &mut Criterion) {
    let src = wave(256);
    let dst = wave(256);

    c.bench_function("interpolate_256_cubics", |b| {
        b.iter(|| interpolate_shapes(&src, &dst, black_box(0.5)))
    });
}

criterion_group!(benches, bench_render, bench_interpolate);
criterion_main!(benches);
