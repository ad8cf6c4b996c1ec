//! Built-in demo shapes
//!
//! Each shape lives roughly in a 100x100 box and exercises a different part of
//! the path builder.

use anyhow::{bail, Result};
use quill_core::{Point, Rect, Vec2};
use quill_svg::{Shape, ShapeBuilder, ShapeGroup};

pub const DEMO_SHAPES: [&str; 6] = ["square", "heart", "ring", "star", "wave", "dome"];

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Build a demo shape by name
pub fn shape(name: &str) -> Result<Shape> {
    let mut builder = ShapeBuilder::new();
    match name {
        "square" => {
            builder.begin_contour(p(0.0, 0.0));
            builder
                .hz_line_to(100.0, false)?
                .vt_line_to(100.0, false)?
                .hz_line_to(-100.0, false)?
                .close_contour(true, false)?;
        }
        "heart" => {
            builder.begin_contour(p(50.0, 30.0));
            builder
                .bezier3_to(p(50.0, 27.0), p(45.0, 15.0), p(25.0, 15.0), true)?
                .bezier3_to(p(0.0, 15.0), p(0.0, 42.5), p(0.0, 42.5), true)?
                .bezier3_to(p(0.0, 60.0), p(20.0, 77.0), p(50.0, 95.0), true)?
                .bezier3_to(p(80.0, 77.0), p(100.0, 60.0), p(100.0, 42.5), true)?
                .bezier3_to(p(100.0, 42.5), p(100.0, 15.0), p(75.0, 15.0), true)?
                .bezier3_to(p(62.0, 15.0), p(50.0, 27.0), p(50.0, 30.0), true)?
                .close_contour(false, false)?;
        }
        "ring" => {
            builder.begin_contour(p(0.0, 0.0));
            builder
                .line_to(p(100.0, 0.0), true)?
                .line_to(p(100.0, 100.0), true)?
                .line_to(p(0.0, 100.0), true)?
                .close_contour(true, false)?;
            builder.begin_contour(p(30.0, 30.0));
            builder
                .vt_line_to(70.0, true)?
                .hz_line_to(70.0, true)?
                .vt_line_to(30.0, true)?
                .close_contour(true, true)?;
        }
        "star" => {
            let center = Vec2::new(50.0, 50.0);
            let vertex = |i: usize| {
                let radius = if i % 2 == 0 { 50.0 } else { 20.0 };
                let angle = std::f32::consts::PI * (i as f32 / 5.0) - std::f32::consts::FRAC_PI_2;
                p(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            };
            builder.begin_contour(vertex(0));
            for i in 1..10 {
                builder.line_to(vertex(i), true)?;
            }
            builder.close_contour(true, false)?;
        }
        "wave" => {
            builder.begin_contour(p(0.0, 50.0));
            builder
                .bezier2_to(p(12.5, 20.0), p(25.0, 50.0), true)?
                .smooth_bezier2_to(p(25.0, 0.0), false)?
                .smooth_bezier2_to(p(25.0, 0.0), false)?
                .smooth_bezier2_to(p(25.0, 0.0), false)?
                .vt_line_to(100.0, true)?
                .hz_line_to(0.0, true)?
                .close_contour(true, false)?;
        }
        "dome" => {
            builder.begin_contour(p(0.0, 60.0));
            builder
                .arc_to(Vec2::splat(50.0), 0.0, false, true, p(100.0, 60.0), true)?
                .vt_line_to(100.0, true)?
                .hz_line_to(0.0, true)?
                .close_contour(true, false)?;
        }
        _ => bail!(
            "Unknown shape '{}'. Valid shapes: {:?}",
            name,
            DEMO_SHAPES
        ),
    }
    Ok(builder.build())
}

/// Every demo shape in a row, 120 units apart
pub fn gallery() -> Result<ShapeGroup> {
    let mut group = ShapeGroup::new("gallery", Rect::new(0.0, 0.0, 720.0, 100.0));
    for (i, name) in DEMO_SHAPES.iter().enumerate() {
        group.push(&shape(name)?, name, Vec2::new(i as f32 * 120.0, 0.0));
    }
    group.end();
    Ok(group)
}
