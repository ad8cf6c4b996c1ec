use quill_animation::{AnimObject, ObjectFlags};
use quill_core::{
    Color, DrawCommand, OrthoCamera, PathCommand, Point, RecordingContext, Rect, Size, Vec2,
};
use quill_svg::{
    render_interpolation, CacheSurface, MorphEndpoint, PixmapSurface, RenderConfig, RenderContext,
    Shape, ShapeBuilder, ShapeGroup,
};

fn square(origin: Point, size: f32) -> Shape {
    let mut builder = ShapeBuilder::new();
    builder.begin_contour(origin);
    builder
        .hz_line_to(size, false)
        .unwrap()
        .vt_line_to(size, false)
        .unwrap()
        .hz_line_to(-size, false)
        .unwrap()
        .close_contour(true, false)
        .unwrap();
    builder.build()
}

fn recording(config: RenderConfig) -> RenderContext<RecordingContext> {
    RenderContext::init(config, RecordingContext::new(Size::ZERO)).unwrap()
}

/// Length of the polyline traced by a stroked path
fn traced_length(commands: &[PathCommand]) -> f32 {
    let mut pen = Point::ZERO;
    let mut length = 0.0;
    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => pen = p,
            PathCommand::LineTo(p) => {
                length += pen.distance(p);
                pen = p;
            }
            _ => {}
        }
    }
    length
}

fn stroke_lengths(surface: &RecordingContext) -> Vec<f32> {
    surface
        .strokes()
        .filter_map(|c| match c {
            DrawCommand::Stroke { path, .. } => Some(traced_length(path.commands())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_stroke_is_truncated_at_t_times_perimeter() {
    let shape = square(Point::new(20.0, 30.0), 100.0);
    assert_eq!(shape.approximate_perimeter(), 400.0);

    for t in [0.1, 0.3, 0.65] {
        let mut ctx = recording(RenderConfig::default());
        shape
            .render_animated(&mut ctx, t, &AnimObject::new(), Vec2::ZERO, Vec2::ONE, false)
            .unwrap();
        let drawn: f32 = stroke_lengths(ctx.cache_surface()).iter().sum();
        assert!((drawn - t * 400.0).abs() < 1e-2, "t = {t}: drew {drawn}");
    }
}

#[test]
fn test_fill_alpha_quarter_at_085() {
    let mut ctx = recording(RenderConfig::default());
    let parent = AnimObject::new().with_fill(Color::rgba(0.2, 0.4, 0.6, 1.0));
    square(Point::ZERO, 10.0)
        .render_animated(&mut ctx, 0.85, &parent, Vec2::ZERO, Vec2::ONE, false)
        .unwrap();

    let alphas: Vec<f32> = ctx
        .cache_surface()
        .fills()
        .filter_map(|c| match c {
            DrawCommand::Fill { color, .. } => Some(color.a),
            _ => None,
        })
        .collect();
    assert_eq!(alphas.len(), 1);
    assert!((alphas[0] - 0.25).abs() < 1e-4);
}

#[test]
fn test_frame_is_bracketed() {
    let mut ctx = recording(RenderConfig::default());
    square(Point::ZERO, 10.0)
        .render(&mut ctx, &AnimObject::new(), Vec2::ZERO, Vec2::ONE)
        .unwrap();

    let commands = ctx.cache_surface().commands();
    assert!(matches!(
        commands.first(),
        Some(DrawCommand::BeginFrame { size, .. }) if *size == Size::new(1024.0, 1024.0)
    ));
    assert!(matches!(commands.last(), Some(DrawCommand::EndFrame)));
}

#[test]
fn test_group_stagger_percentages() {
    let mut ctx = recording(RenderConfig::default());
    let mut group = ShapeGroup::new("row", Rect::new(0.0, 0.0, 100.0, 20.0));
    for i in 0..3 {
        group.push(
            &square(Point::ZERO, 10.0),
            "square",
            Vec2::new(i as f32 * 20.0, 0.0),
        );
    }
    group.end();

    group
        .render_animated(&mut ctx, 0.5, &AnimObject::new(), Vec2::ONE, false)
        .unwrap();

    // 1.5 of 3 members: the first at 0.75, the second at 0.25
    let lengths = stroke_lengths(ctx.cache_surface());
    assert_eq!(lengths.len(), 2);
    assert!((lengths[0] - 30.0).abs() < 1e-3);
    assert!((lengths[1] - 10.0).abs() < 1e-3);
    assert_eq!(group.unique_shapes().count(), 1);
}

#[test]
fn test_last_group_member_is_not_lagged() {
    let mut ctx = recording(RenderConfig::default());
    let mut group = ShapeGroup::new("pair", Rect::ZERO);
    group.push(&square(Point::ZERO, 10.0), "a", Vec2::ZERO);
    group.push(&square(Point::ZERO, 10.0), "b", Vec2::new(20.0, 0.0));
    group.end();

    // 1.8 of 2 members: the first at 0.9, the last at 0.8 with no lag
    group
        .render_animated(&mut ctx, 0.9, &AnimObject::new(), Vec2::ONE, false)
        .unwrap();
    let lengths = stroke_lengths(ctx.cache_surface());
    assert!((lengths[0] - 36.0).abs() < 1e-3);
    assert!((lengths[1] - 32.0).abs() < 1e-3);
}

#[test]
fn test_one_contour_morphs_with_first_of_three() {
    let one = square(Point::ZERO, 10.0);
    let mut builder = ShapeBuilder::from_shape(square(Point::new(100.0, 0.0), 10.0));
    for x in [200.0, 300.0] {
        builder.begin_contour(Point::new(x, 0.0));
        builder
            .hz_line_to(10.0, false)
            .unwrap()
            .vt_line_to(10.0, false)
            .unwrap()
            .close_contour(true, false)
            .unwrap();
    }
    let three = builder.build();
    assert_eq!(three.num_contours(), 3);

    let object = AnimObject::new();
    let mut vg = RecordingContext::new(Size::new(1920.0, 1080.0));
    render_interpolation(
        &mut vg,
        &OrthoCamera::default(),
        &RenderConfig::default(),
        MorphEndpoint::new(&object, &one),
        MorphEndpoint::new(&object, &three),
        1.0,
    );

    let starts: Vec<PathCommand> = vg
        .strokes()
        .filter_map(|c| match c {
            DrawCommand::Stroke { path, .. } => path.commands().first().copied(),
            _ => None,
        })
        .collect();
    assert_eq!(starts, vec![PathCommand::MoveTo(Point::new(100.0, 0.0))]);
}

#[test]
fn test_surface_resizes_when_atlas_grows() {
    let config = RenderConfig {
        initial_cache_size: 64,
        max_cache_size: 256,
        ..RenderConfig::default()
    };
    let mut ctx = RenderContext::init(config, PixmapSurface::new(1, 1).unwrap()).unwrap();
    assert_eq!(ctx.cache_surface().dimensions(), (64, 64));

    let shape = square(Point::ZERO, 50.0);
    let parent = AnimObject::new().with_fill(Color::RED);
    let first = shape.render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE).unwrap();
    let second = shape.render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE).unwrap();

    assert_eq!(ctx.cache_surface().dimensions(), (128, 128));
    assert_eq!(second.region.y, 58.0);
    assert_eq!(second.uv[1], 58.0 / 128.0);
    // Pixels of the first cell survive the resize
    assert_eq!(ctx.cache_surface().alpha_at(27, 27), Some(255));
    assert_eq!(first.region.origin(), Point::ZERO);
}

#[test]
fn test_full_render_rasterizes_fill() {
    let mut ctx =
        RenderContext::init(RenderConfig::default(), PixmapSurface::new(1, 1).unwrap()).unwrap();
    let parent = AnimObject::new()
        .with_fill(Color::RED)
        .with_stroke(Color::BLACK, 4.0);
    let blit = square(Point::ZERO, 50.0)
        .render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE)
        .unwrap();

    let surface = ctx.shutdown();
    let cell = Rect::from_origin_size(blit.region.origin(), blit.region.size());
    assert!(surface.covered_pixels(cell) > 2000);
    assert_eq!(surface.alpha_at(27, 27), Some(255));
    assert_eq!(surface.alpha_at(200, 200), Some(0));
}

#[test]
fn test_reset_frame_clears_pixels() {
    let mut ctx =
        RenderContext::init(RenderConfig::default(), PixmapSurface::new(1, 1).unwrap()).unwrap();
    let parent = AnimObject::new()
        .with_fill(Color::RED)
        .with_flags(ObjectFlags {
            draw_debug_boxes: true,
            ..ObjectFlags::default()
        });
    square(Point::ZERO, 20.0)
        .render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE)
        .unwrap();
    assert_eq!(ctx.cache_surface().alpha_at(12, 12), Some(255));

    ctx.reset_frame();
    assert_eq!(ctx.cache_surface().alpha_at(12, 12), Some(0));
    assert_eq!(ctx.atlas().cursor(), Point::ZERO);
}

#[test]
fn test_hole_contour_stays_transparent() {
    let mut builder = ShapeBuilder::from_shape(square(Point::ZERO, 100.0));
    builder.begin_contour(Point::new(30.0, 30.0));
    builder
        .vt_line_to(70.0, true)
        .unwrap()
        .hz_line_to(70.0, true)
        .unwrap()
        .vt_line_to(30.0, true)
        .unwrap()
        .close_contour(true, true)
        .unwrap();
    let ring = builder.build();

    let mut ctx =
        RenderContext::init(RenderConfig::default(), PixmapSurface::new(1, 1).unwrap()).unwrap();
    let parent = AnimObject::new().with_fill(Color::RED);
    ring.render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE).unwrap();

    // Cell anchor is offset by half the default stroke width
    let surface = ctx.cache_surface();
    assert_eq!(surface.alpha_at(52, 52), Some(0));
    assert_eq!(surface.alpha_at(15, 15), Some(255));
    assert_eq!(surface.alpha_at(90, 52), Some(255));
}
