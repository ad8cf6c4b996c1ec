//! Shape interpolation
//!
//! Morphs one shape into another by pairing contours and blending every curve
//! as a cubic. Shapes with different contour counts pair each contour of the
//! smaller shape with an evenly spaced contour of the larger one.

use quill_animation::{AnimObject, Interpolate};
use quill_core::{DrawContext, DrawContextExt, OrthoCamera, Point};
use tracing::{error, warn};

use crate::config::RenderConfig;
use crate::shape::{Contour, Shape};

/// One blended contour: a start point followed by cubic segments
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolatedContour {
    pub start: Point,
    /// Full control polygons; `curve[0]` is the previous end point
    pub curves: Vec<[Point; 4]>,
}

/// A shape and the object that styles it, at one end of a morph
#[derive(Clone, Copy, Debug)]
pub struct MorphEndpoint<'a> {
    pub object: &'a AnimObject,
    pub shape: &'a Shape,
}

impl<'a> MorphEndpoint<'a> {
    pub fn new(object: &'a AnimObject, shape: &'a Shape) -> Self {
        Self { object, shape }
    }
}

/// Pair indices of the shape with `less` contours against the one with `more`.
///
/// Returns `(less_index, more_index)` pairs; the more index steps by
/// `more / less` and stays in bounds.
pub fn contour_pairs(less: usize, more: usize) -> Vec<(usize, usize)> {
    if less == 0 || more == 0 {
        return Vec::new();
    }
    let skip = (more / less).max(1);
    (0..less).map(|i| (i, (i * skip).min(more - 1))).collect()
}

fn blend_contours(src: &Contour, dst: &Contour, t: f32) -> Option<InterpolatedContour> {
    let (Some(src_start), Some(dst_start)) = (src.first_point(), dst.first_point()) else {
        return None;
    };

    let count = src.len().max(dst.len());
    let mut curves = Vec::with_capacity(count);
    for i in 0..count {
        let (Some(a), Some(b)) = (src.curves().get(i), dst.curves().get(i)) else {
            error!(
                src_curves = src.len(),
                dst_curves = dst.len(),
                "cannot interpolate contours with different curve counts; truncating"
            );
            break;
        };
        curves.push(a.to_cubic().lerp(&b.to_cubic(), t));
    }

    Some(InterpolatedContour {
        start: src_start.lerp(dst_start, t),
        curves,
    })
}

/// Blend `src` into `dst` at `t`
pub fn interpolate_shapes(src: &Shape, dst: &Shape, t: f32) -> Vec<InterpolatedContour> {
    let src_is_less = src.num_contours() <= dst.num_contours();
    let (less, more) = if src_is_less { (src, dst) } else { (dst, src) };

    if less.num_contours() == 0 {
        warn!(
            src_contours = src.num_contours(),
            dst_contours = dst.num_contours(),
            "cannot interpolate a shape without contours"
        );
        return Vec::new();
    }

    contour_pairs(less.num_contours(), more.num_contours())
        .into_iter()
        .filter_map(|(li, mi)| {
            let (l, m) = (&less.contours()[li], &more.contours()[mi]);
            if src_is_less {
                blend_contours(l, m, t)
            } else {
                blend_contours(m, l, t)
            }
        })
        .collect()
}

/// Draw the morph between `src` and `dst` at `t` directly onto `vg`.
///
/// Styles are blended along with the geometry; unset stroke widths take the
/// configured default before blending.
pub fn render_interpolation(
    vg: &mut dyn DrawContext,
    camera: &OrthoCamera,
    config: &RenderConfig,
    src: MorphEndpoint<'_>,
    dst: MorphEndpoint<'_>,
    t: f32,
) {
    let style = src.object.lerp(dst.object, t);
    let src_width = src.object.effective_stroke_width(config.default_stroke_width);
    let dst_width = dst.object.effective_stroke_width(config.default_stroke_width);
    let stroke_width = Interpolate::lerp(&src_width, &dst_width, t);

    let centered = camera.centered_position();
    vg.translate(
        style.position.x - centered.x,
        style.position.y - centered.y,
    );
    if style.rotation.z.abs() > f32::EPSILON {
        vg.rotate(style.rotation_z_radians());
    }

    for contour in interpolate_shapes(src.shape, dst.shape, t) {
        vg.begin_path();
        vg.set_fill_color(style.fill_color);
        vg.set_stroke_color(style.stroke_color);
        vg.set_stroke_width(stroke_width);

        vg.move_to(contour.start);
        for [_, c1, c2, end] in contour.curves {
            vg.bezier_to(c1, c2, end);
        }
        vg.close_path();
        vg.stroke();
        vg.fill();
    }

    vg.reset_transform();
}
