//! Progressive reveal renderer
//!
//! A shape is revealed in two passes driven by `t`: the outline is stroked up
//! to `t` of the approximate perimeter, then the fill fades in over the last
//! stretch of the animation while the stroke fades out. Each render lands in
//! its own cache cell and is described to the caller by a [`Blit`].

use quill_animation::AnimObject;
use quill_core::{
    Affine2D, BBox, Color, DrawContext, DrawContextExt, Mat4, Point, Rect, Size, Vec2, Winding,
};

use crate::atlas::AtlasRegion;
use crate::config::RenderConfig;
use crate::context::{CacheSurface, RenderContext};
use crate::curve::{Curve, CurveKind};
use crate::error::Result;
use crate::group::ShapeGroup;
use crate::shape::Shape;

/// `t` used for a static render, past the end of the fade-in
pub const STATIC_RENDER_T: f32 = 1.01;

/// Scale applied to cell sizes for quads placed in the 3D scene
const WORLD_UNITS_PER_PIXEL: f32 = 0.01;

/// Where the cached cell goes on the final target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// 2D overlay, camera centred
    Screen(Affine2D),
    /// 3D scene
    World { transform: Mat4, transparent: bool },
}

/// Describes a cached cell for the external renderer to draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blit {
    /// Cell in cache pixels
    pub region: AtlasRegion,
    /// `[u_min, v_min, u_max, v_max]`, top-left origin
    pub uv: [f32; 4],
    /// Size of the textured quad in target units
    pub quad_size: Size,
    pub placement: Placement,
}

/// Maps shape-local points into a cache cell
#[derive(Clone, Copy, Debug)]
struct CacheMapping {
    anchor: Point,
    min: Point,
    scale: Vec2,
}

impl CacheMapping {
    fn apply(&self, p: Point) -> Point {
        self.anchor + (p - self.min).scale(self.scale)
    }

    fn apply_bbox(&self, bbox: BBox) -> Rect {
        Rect::from_points(self.apply(bbox.min), self.apply(bbox.max))
    }
}

/// Fill opacity at `t`
pub fn fade_amount(t: f32, config: &RenderConfig) -> f32 {
    ((t - config.fade_in_start) / config.fade_in_span()).clamp(0.0, 1.0)
}

fn emit_curve(vg: &mut dyn DrawContext, curve: &Curve, map: &CacheMapping) {
    match curve.kind {
        CurveKind::Line { p1 } => vg.line_to(map.apply(p1)),
        _ => {
            let [_, c1, c2, end] = curve.to_cubic();
            vg.bezier_to(map.apply(c1), map.apply(c2), map.apply(end));
        }
    }
}

/// Stroke the first `t` of the outline, then fade in the fill
fn draw_progressive(
    vg: &mut dyn DrawContext,
    shape: &Shape,
    t: f32,
    parent: &AnimObject,
    map: &CacheMapping,
    config: &RenderConfig,
) {
    let length_to_draw = t * shape.approximate_perimeter();
    let fade = fade_amount(t, config);

    if length_to_draw > 0.0 {
        let stroke_color = parent.stroke_color.fade(1.0 - fade);
        let stroke_width = parent.effective_stroke_width(config.default_stroke_width);
        let mut drawn = 0.0;

        'contours: for contour in shape.contours() {
            let Some(start) = contour.first_point() else {
                continue;
            };
            vg.begin_path();
            vg.set_stroke_color(stroke_color);
            vg.set_stroke_width(stroke_width);
            vg.move_to(map.apply(start));

            for curve in contour.curves() {
                let left = length_to_draw - drawn;
                if left <= 0.0 {
                    vg.stroke();
                    break 'contours;
                }
                if curve.starts_subpath {
                    vg.move_to(map.apply(curve.p0));
                }

                let length = curve.approximate_length();
                drawn += length;
                if left < length {
                    emit_curve(vg, &curve.head(left / length), map);
                } else {
                    emit_curve(vg, curve, map);
                }
            }
            vg.stroke();

            if drawn >= length_to_draw {
                break;
            }
        }
    }

    if t > config.fade_in_start {
        // One path for every contour so holes cut through the outer fill
        vg.begin_path();
        let mut any = false;
        for contour in shape.contours() {
            let Some(start) = contour.first_point() else {
                continue;
            };
            any = true;
            vg.move_to(map.apply(start));
            for (i, curve) in contour.curves().iter().enumerate() {
                if i != 0 && curve.starts_subpath {
                    vg.move_to(map.apply(curve.p0));
                    vg.set_path_winding(Winding::Hole);
                }
                emit_curve(vg, curve, map);
            }
            if contour.is_hole {
                vg.set_path_winding(Winding::Hole);
            }
        }
        if any {
            vg.set_fill_color(parent.fill_color.fade(fade));
            vg.fill();
        }
    }
}

fn draw_curve_boxes(
    vg: &mut dyn DrawContext,
    shape: &Shape,
    map: &CacheMapping,
    config: &RenderConfig,
) {
    let width = config.debug_stroke_width();
    for curve in shape.curves() {
        vg.stroke_rect(map.apply_bbox(curve.bbox()), Color::RED, width);
    }
}

/// Outline a whole cell, inset so the box stays inside the padding
fn draw_cell_box(vg: &mut dyn DrawContext, region: &AtlasRegion, color: Color, config: &RenderConfig) {
    let width = config.debug_stroke_width();
    let rect = Rect::from_origin_size(region.origin(), region.size()).inset(width * 0.5, width * 0.5);
    vg.stroke_rect(rect, color, width);
}

fn cell_size(bbox: BBox, scale: Vec2, stroke_width: f32) -> Size {
    Size::new(
        bbox.width() * scale.x + stroke_width,
        bbox.height() * scale.y + stroke_width,
    )
}

/// Transform that places the cell on the final target
fn placement<S: CacheSurface>(
    ctx: &RenderContext<S>,
    parent: &AnimObject,
    offset: Vec2,
) -> Placement {
    let pos = parent.position;
    let scale = parent.scale;
    if parent.flags.is_3d {
        let transform = Mat4::translation(
            pos.x + offset.x * scale.x,
            pos.y + offset.y * scale.y,
            pos.z,
        )
        .mul(&Mat4::rotation_euler(parent.rotation_radians()))
        .mul(&Mat4::scale(scale.x, scale.y, scale.z));
        Placement::World {
            transform,
            transparent: parent.flags.is_transparent,
        }
    } else {
        let centered = ctx.ortho.centered_position();
        let mut transform = Affine2D::translation(
            pos.x - centered.x + offset.x * scale.x,
            pos.y - centered.y + offset.y * scale.y,
        );
        if parent.rotation.z.abs() > f32::EPSILON {
            transform = transform.then(&Affine2D::rotation(parent.rotation_z_radians()));
        }
        Placement::Screen(transform.then(&Affine2D::scale(scale.x, scale.y)))
    }
}

fn make_blit<S: CacheSurface>(
    ctx: &RenderContext<S>,
    region: AtlasRegion,
    parent: &AnimObject,
    offset: Vec2,
) -> Blit {
    let (width, height) = ctx.surface.dimensions();
    let quad_size = if parent.flags.is_3d {
        Size::new(
            region.width * WORLD_UNITS_PER_PIXEL,
            region.height * WORLD_UNITS_PER_PIXEL,
        )
    } else {
        region.size()
    };

    Blit {
        region,
        uv: region.uv_bounds(width, height),
        quad_size,
        placement: placement(ctx, parent, offset),
    }
}

fn surface_size<S: CacheSurface>(surface: &S) -> Size {
    let (width, height) = surface.dimensions();
    Size::new(width as f32, height as f32)
}

impl Shape {
    /// Render the finished shape into the cache
    pub fn render<S: CacheSurface>(
        &self,
        ctx: &mut RenderContext<S>,
        parent: &AnimObject,
        offset: Vec2,
        scale: Vec2,
    ) -> Result<Blit> {
        self.render_animated(ctx, STATIC_RENDER_T, parent, offset, scale, false)
    }

    /// Render the shape at animation time `t` into a new cache cell
    pub fn render_animated<S: CacheSurface>(
        &self,
        ctx: &mut RenderContext<S>,
        t: f32,
        parent: &AnimObject,
        offset: Vec2,
        scale: Vec2,
        reverse: bool,
    ) -> Result<Blit> {
        let t = if reverse { 1.0 - t } else { t };
        let stroke_width = parent.effective_stroke_width(ctx.config.default_stroke_width);
        let region = ctx.reserve(cell_size(self.bbox(), scale, stroke_width))?;

        let map = CacheMapping {
            anchor: region.origin() + Vec2::splat(stroke_width * 0.5),
            min: self.bbox().min,
            scale,
        };

        let size = surface_size(&ctx.surface);
        let surface = &mut ctx.surface;
        surface.begin_frame(size, 1.0);
        draw_progressive(surface, self, t, parent, &map, &ctx.config);
        if parent.flags.draw_debug_boxes {
            if parent.flags.draw_curve_debug_boxes {
                draw_curve_boxes(surface, self, &map, &ctx.config);
            }
            draw_cell_box(surface, &region, Color::GREEN, &ctx.config);
        }
        surface.end_frame();

        let blit = make_blit(ctx, region, parent, offset);
        ctx.finish_cell(&region);
        Ok(blit)
    }
}

impl ShapeGroup {
    /// Render the finished group into the cache
    pub fn render<S: CacheSurface>(
        &self,
        ctx: &mut RenderContext<S>,
        parent: &AnimObject,
        scale: Vec2,
    ) -> Result<Blit> {
        self.render_animated(ctx, STATIC_RENDER_T, parent, scale, false)
    }

    /// Render the group at time `t` into one cache cell.
    ///
    /// Members are revealed one after another, each starting before the
    /// previous one finishes.
    pub fn render_animated<S: CacheSurface>(
        &self,
        ctx: &mut RenderContext<S>,
        t: f32,
        parent: &AnimObject,
        scale: Vec2,
        reverse: bool,
    ) -> Result<Blit> {
        let stroke_width = parent.effective_stroke_width(ctx.config.default_stroke_width);
        let group_bbox = self.bbox();
        let region = ctx.reserve(cell_size(group_bbox, scale, stroke_width))?;
        let anchor = region.origin() + Vec2::splat(stroke_width * 0.5);
        let translation = self.viewbox().origin.to_vec2();

        let size = surface_size(&ctx.surface);
        let surface = &mut ctx.surface;
        surface.begin_frame(size, 1.0);

        let count = self.len();
        let to_draw = t * count as f32;
        let lag = ctx.config.group_lag;
        for (i, member) in self.members().iter().enumerate() {
            let denominator = if i + 1 == count { 1.0 } else { lag };
            let percent = (to_draw - i as f32) / denominator;
            let percent = if reverse { 1.0 - percent } else { percent };

            if !member.shape.is_empty() {
                let bbox = member.shape.bbox();
                let placed = (bbox.min + member.offset - translation) - group_bbox.min;
                let map = CacheMapping {
                    anchor: anchor + placed.scale(scale),
                    min: bbox.min,
                    scale,
                };
                draw_progressive(surface, &member.shape, percent, parent, &map, &ctx.config);
                if parent.flags.draw_debug_boxes && parent.flags.draw_curve_debug_boxes {
                    draw_curve_boxes(surface, &member.shape, &map, &ctx.config);
                }
            }

            if (i + 1) as f32 >= to_draw {
                break;
            }
        }

        if parent.flags.draw_debug_boxes {
            draw_cell_box(surface, &region, Color::CYAN, &ctx.config);
        }
        surface.end_frame();

        let blit = make_blit(ctx, region, parent, Vec2::ZERO);
        ctx.finish_cell(&region);
        Ok(blit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ShapeBuilder;
    use quill_animation::ObjectFlags;
    use quill_core::{DrawCommand, OrthoCamera, PathCommand, RecordingContext, Vec3};

    fn context() -> RenderContext<RecordingContext> {
        RenderContext::init(RenderConfig::default(), RecordingContext::new(Size::ZERO)).unwrap()
    }

    /// 10x10 square outline starting at `origin`
    fn square(origin: Point) -> Shape {
        let mut builder = ShapeBuilder::new();
        builder.begin_contour(origin);
        builder
            .hz_line_to(10.0, false)
            .unwrap()
            .vt_line_to(10.0, false)
            .unwrap()
            .hz_line_to(-10.0, false)
            .unwrap()
            .close_contour(true, false)
            .unwrap();
        builder.build()
    }

    fn stroke_paths(ctx: &RenderContext<RecordingContext>) -> Vec<(Vec<PathCommand>, Color, f32)> {
        ctx.cache_surface()
            .strokes()
            .filter_map(|c| match c {
                DrawCommand::Stroke {
                    path, color, width, ..
                } => Some((path.commands().to_vec(), *color, *width)),
                _ => None,
            })
            .collect()
    }

    fn fill_colors(ctx: &RenderContext<RecordingContext>) -> Vec<Color> {
        ctx.cache_surface()
            .fills()
            .filter_map(|c| match c {
                DrawCommand::Fill { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fade_amount() {
        let config = RenderConfig::default();
        assert_eq!(fade_amount(0.5, &config), 0.0);
        assert!((fade_amount(0.9, &config) - 0.5).abs() < 1e-5);
        assert_eq!(fade_amount(STATIC_RENDER_T, &config), 1.0);
    }

    #[test]
    fn test_half_reveal_strokes_two_sides() {
        let mut ctx = context();
        let parent = AnimObject::new().with_stroke(Color::BLACK, 2.0);
        square(Point::ZERO)
            .render_animated(&mut ctx, 0.5, &parent, Vec2::ZERO, Vec2::ONE, false)
            .unwrap();

        let strokes = stroke_paths(&ctx);
        assert_eq!(strokes.len(), 1);
        let line_count = strokes[0]
            .0
            .iter()
            .filter(|c| matches!(c, PathCommand::LineTo(_)))
            .count();
        assert_eq!(line_count, 2);
        assert_eq!(strokes[0].2, 2.0);
        assert_eq!(fill_colors(&ctx).len(), 0);
    }

    #[test]
    fn test_partial_line_is_truncated() {
        let mut ctx = context();
        let parent = AnimObject::new().with_stroke(Color::BLACK, 2.0);
        square(Point::ZERO)
            .render_animated(&mut ctx, 0.125, &parent, Vec2::ZERO, Vec2::ONE, false)
            .unwrap();

        let strokes = stroke_paths(&ctx);
        let last = strokes[0].0.last().copied();
        // anchor is the cell origin plus half the stroke width
        assert_eq!(last, Some(PathCommand::LineTo(Point::new(6.0, 1.0))));
    }

    #[test]
    fn test_reverse_uses_complement() {
        let mut forward = context();
        let mut backward = context();
        let parent = AnimObject::new();
        let shape = square(Point::ZERO);

        shape
            .render_animated(&mut forward, 0.25, &parent, Vec2::ZERO, Vec2::ONE, false)
            .unwrap();
        shape
            .render_animated(&mut backward, 0.75, &parent, Vec2::ZERO, Vec2::ONE, true)
            .unwrap();
        assert_eq!(stroke_paths(&forward), stroke_paths(&backward));
    }

    #[test]
    fn test_fill_fades_in_and_stroke_fades_out() {
        let mut ctx = context();
        let parent = AnimObject::new()
            .with_fill(Color::WHITE)
            .with_stroke(Color::BLACK, 2.0);
        square(Point::ZERO)
            .render_animated(&mut ctx, 0.9, &parent, Vec2::ZERO, Vec2::ONE, false)
            .unwrap();

        let fills = fill_colors(&ctx);
        assert_eq!(fills.len(), 1);
        assert!((fills[0].a - 0.5).abs() < 1e-4);
        assert!((stroke_paths(&ctx)[0].1.a - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_static_render_fully_filled() {
        let mut ctx = context();
        let parent = AnimObject::new().with_fill(Color::BLUE);
        square(Point::ZERO)
            .render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE)
            .unwrap();

        assert_eq!(fill_colors(&ctx), vec![Color::BLUE]);
        assert_eq!(stroke_paths(&ctx)[0].1.a, 0.0);
    }

    #[test]
    fn test_hole_contours_share_one_fill_path() {
        let mut builder = ShapeBuilder::from_shape(square(Point::ZERO));
        builder.begin_contour(Point::new(3.0, 3.0));
        builder
            .vt_line_to(4.0, false)
            .unwrap()
            .hz_line_to(4.0, false)
            .unwrap()
            .vt_line_to(-4.0, false)
            .unwrap()
            .close_contour(true, true)
            .unwrap();
        let ring = builder.build();

        let mut ctx = context();
        ring.render(&mut ctx, &AnimObject::new(), Vec2::ZERO, Vec2::ONE)
            .unwrap();

        let paths: Vec<_> = ctx
            .cache_surface()
            .fills()
            .filter_map(|c| match c {
                DrawCommand::Fill { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].subpath_count(), 2);
        assert!(paths[0].has_holes());
    }

    #[test]
    fn test_points_are_mapped_into_cell() {
        let mut ctx = context();
        let parent = AnimObject::new().with_stroke(Color::BLACK, 4.0);
        // Far from the origin; the cell mapping removes the bbox offset
        square(Point::new(500.0, 700.0))
            .render(&mut ctx, &parent, Vec2::ZERO, Vec2::new(2.0, 2.0))
            .unwrap();

        let strokes = stroke_paths(&ctx);
        assert_eq!(strokes[0].0[0], PathCommand::MoveTo(Point::new(2.0, 2.0)));
        let bounds = ctx
            .cache_surface()
            .fills()
            .find_map(|c| match c {
                DrawCommand::Fill { path, .. } => Some(path.bounds()),
                _ => None,
            })
            .unwrap();
        assert_eq!(bounds.max, Point::new(22.0, 22.0));
    }

    #[test]
    fn test_cells_advance_across_renders() {
        let mut ctx = context();
        let parent = AnimObject::new().with_stroke(Color::BLACK, 2.0);
        let shape = square(Point::ZERO);

        let a = shape.render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE).unwrap();
        let b = shape.render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE).unwrap();

        assert_eq!(a.region.size(), Size::new(12.0, 12.0));
        assert_eq!(b.region.x, 15.0);
        assert_eq!(a.uv, [0.0, 0.0, 12.0 / 1024.0, 12.0 / 1024.0]);
    }

    #[test]
    fn test_screen_placement_is_camera_centred() {
        let mut ctx = context();
        let parent = AnimObject::new().with_position(Vec3::new(960.0, 540.0, 0.0));
        let blit = square(Point::ZERO)
            .render(&mut ctx, &parent, Vec2::new(10.0, 0.0), Vec2::ONE)
            .unwrap();

        match blit.placement {
            Placement::Screen(transform) => {
                let p = transform.transform_point(Point::ZERO);
                assert_eq!(p, Point::new(10.0, 0.0));
            }
            Placement::World { .. } => panic!("expected screen placement"),
        }
        assert_eq!(blit.quad_size, blit.region.size());
    }

    #[test]
    fn test_screen_placement_follows_camera() {
        let camera = OrthoCamera::new(Vec2::new(200.0, 100.0)).with_position(Vec2::new(20.0, 0.0));
        let mut ctx = context().with_ortho_camera(camera);
        let parent = AnimObject::new().with_position(Vec3::new(100.0, 50.0, 0.0));
        let blit = square(Point::ZERO)
            .render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE)
            .unwrap();

        match blit.placement {
            Placement::Screen(transform) => {
                assert_eq!(transform.transform_point(Point::ZERO), Point::new(20.0, 0.0));
            }
            Placement::World { .. } => panic!("expected screen placement"),
        }
    }

    #[test]
    fn test_world_placement_scales_quad() {
        let mut ctx = context();
        let parent = AnimObject::new()
            .with_stroke(Color::BLACK, 10.0)
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0))
            .with_flags(ObjectFlags {
                is_3d: true,
                is_transparent: true,
                ..ObjectFlags::default()
            });
        let blit = square(Point::ZERO)
            .render(&mut ctx, &parent, Vec2::ZERO, Vec2::new(9.0, 9.0))
            .unwrap();

        assert!((blit.quad_size.width - 1.0).abs() < 1e-5);
        match blit.placement {
            Placement::World {
                transform,
                transparent,
            } => {
                assert!(transparent);
                assert_eq!(transform.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(
                    transform.transform_point(Vec3::new(1.0, 0.0, 0.0)),
                    Vec3::new(3.0, 2.0, 3.0)
                );
            }
            Placement::Screen(_) => panic!("expected world placement"),
        }
    }

    #[test]
    fn test_debug_boxes() {
        let mut ctx = context();
        let parent = AnimObject::new().with_flags(ObjectFlags {
            draw_debug_boxes: true,
            draw_curve_debug_boxes: true,
            ..ObjectFlags::default()
        });
        square(Point::ZERO)
            .render(&mut ctx, &parent, Vec2::ZERO, Vec2::ONE)
            .unwrap();

        let strokes = stroke_paths(&ctx);
        let red = strokes.iter().filter(|s| s.1 == Color::RED).count();
        let green = strokes.iter().filter(|s| s.1 == Color::GREEN).count();
        assert_eq!(red, 4);
        assert_eq!(green, 1);
        assert!(strokes.iter().all(|s| s.1 != Color::RED || s.2 == 3.0));
    }

    #[test]
    fn test_group_members_stagger() {
        let mut ctx = context();
        let mut group = ShapeGroup::new("pair", Rect::ZERO);
        group.push(&square(Point::ZERO), "sq", Vec2::ZERO);
        group.push(&square(Point::ZERO), "sq", Vec2::new(20.0, 0.0));
        group.push(&square(Point::ZERO), "sq", Vec2::new(40.0, 0.0));
        group.end();

        // 3 members at t = 0.5: 1.5 to draw, so two members are visited
        group
            .render_animated(&mut ctx, 0.5, &AnimObject::new(), Vec2::ONE, false)
            .unwrap();
        assert_eq!(stroke_paths(&ctx).len(), 2);
    }

    #[test]
    fn test_group_uses_single_cell() {
        let mut ctx = context();
        let mut group = ShapeGroup::new("pair", Rect::ZERO);
        group.push(&square(Point::ZERO), "sq", Vec2::ZERO);
        group.push(&square(Point::ZERO), "sq", Vec2::new(20.0, 0.0));
        group.end();

        let parent = AnimObject::new().with_stroke(Color::BLACK, 2.0);
        let blit = group.render(&mut ctx, &parent, Vec2::ONE).unwrap();
        assert_eq!(blit.region.size(), Size::new(32.0, 12.0));
        assert_eq!(ctx.atlas().cursor().x, 35.0);

        // Second member starts at its offset inside the cell
        let strokes = stroke_paths(&ctx);
        assert_eq!(strokes[1].0[0], PathCommand::MoveTo(Point::new(21.0, 1.0)));
    }
}
