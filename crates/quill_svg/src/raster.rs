//! CPU cache surface backed by tiny-skia
//!
//! Paths are accumulated in Quill's own [`Path`] type and converted to
//! tiny-skia paths when painted. Holes are filled with the even-odd rule.

use std::path::Path as FsPath;

use quill_core::{Affine2D, Color, DrawContext, Path, PathCommand, Point, Rect, Size, Winding};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};
use tracing::{debug, trace};

use crate::context::CacheSurface;
use crate::error::{Result, SvgError};

/// Anti-aliased RGBA cache surface
pub struct PixmapSurface {
    pixmap: Pixmap,
    path: Path,
    fill_color: Color,
    stroke_color: Color,
    stroke_width: f32,
    transform: Affine2D,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
            path: Path::new(),
            fill_color: Color::WHITE,
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            transform: Affine2D::IDENTITY,
        })
    }

    /// Premultiplied RGBA pixels
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha RGBA pixels
    pub fn pixels_unpremultiplied(&self) -> Vec<u8> {
        unpremultiply_alpha(self.pixmap.data())
    }

    /// Alpha at a pixel, or `None` outside the surface
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixmap.pixel(x, y).map(|p| p.alpha())
    }

    /// Number of pixels with any coverage inside `rect`
    pub fn covered_pixels(&self, rect: Rect) -> usize {
        let x0 = rect.x().max(0.0) as u32;
        let y0 = rect.y().max(0.0) as u32;
        let x1 = (rect.x() + rect.width()).max(0.0) as u32;
        let y1 = (rect.y() + rect.height()).max(0.0) as u32;
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| self.alpha_at(x, y).is_some_and(|a| a > 0))
            .count()
    }

    /// Encode the surface as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| SvgError::Png(e.to_string()))
    }

    pub fn save_png(&self, path: &FsPath) -> Result<()> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        debug!(path = %path.display(), "cache surface written");
        Ok(())
    }

    fn paint(color: Color) -> Paint<'static> {
        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn skia_transform(&self) -> Transform {
        let [a, b, c, d, tx, ty] = self.transform.elements;
        Transform::from_row(a, b, c, d, tx, ty)
    }
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or_else(|| {
        SvgError::Surface(format!("cannot allocate a {width}x{height} pixmap"))
    })
}

/// Convert a Quill path to tiny-skia; `None` when it has no drawable segment
fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
            PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => builder.cubic_to(
                control1.x, control1.y, control2.x, control2.y, end.x, end.y,
            ),
            PathCommand::Close => builder.close(),
            PathCommand::Winding(_) => {}
        }
    }
    builder.finish()
}

/// Convert premultiplied alpha to straight alpha
fn unpremultiply_alpha(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());

    for chunk in data.chunks_exact(4) {
        let a = chunk[3] as f32 / 255.0;
        if a > 0.0 {
            let r = (chunk[0] as f32 / a).min(255.0) as u8;
            let g = (chunk[1] as f32 / a).min(255.0) as u8;
            let b = (chunk[2] as f32 / a).min(255.0) as u8;
            result.extend_from_slice(&[r, g, b, chunk[3]]);
        } else {
            result.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    result
}

impl DrawContext for PixmapSurface {
    fn begin_frame(&mut self, _size: Size, _pixel_ratio: f32) {
        self.path.clear();
        self.transform = Affine2D::IDENTITY;
    }

    fn end_frame(&mut self) {}

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(PathCommand::LineTo(p));
    }

    fn bezier_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.path.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
    }

    fn rect(&mut self, rect: Rect) {
        self.path.extend(&Path::rect(rect));
    }

    fn close_path(&mut self) {
        self.path.push(PathCommand::Close);
    }

    fn set_path_winding(&mut self, winding: Winding) {
        self.path.push(PathCommand::Winding(winding));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    fn fill(&mut self) {
        if self.fill_color.a <= 0.0 {
            return;
        }
        let Some(path) = to_skia_path(&self.path) else {
            trace!("skipping fill of empty path");
            return;
        };
        let rule = if self.path.has_holes() {
            FillRule::EvenOdd
        } else {
            FillRule::Winding
        };
        let paint = Self::paint(self.fill_color);
        let transform = self.skia_transform();
        self.pixmap.fill_path(&path, &paint, rule, transform, None);
    }

    fn stroke(&mut self) {
        if self.stroke_color.a <= 0.0 || self.stroke_width <= 0.0 {
            return;
        }
        let Some(path) = to_skia_path(&self.path) else {
            trace!("skipping stroke of empty path");
            return;
        };
        let paint = Self::paint(self.stroke_color);
        let stroke = Stroke {
            width: self.stroke_width,
            ..Stroke::default()
        };
        let transform = self.skia_transform();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, transform, None);
    }

    fn push_transform(&mut self, transform: Affine2D) {
        self.transform = self.transform.then(&transform);
    }

    fn reset_transform(&mut self) {
        self.transform = Affine2D::IDENTITY;
    }
}

impl CacheSurface for PixmapSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Reallocate, keeping existing pixels in the top-left corner
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.dimensions() == (width, height) {
            return Ok(());
        }
        let mut pixmap = new_pixmap(width, height)?;
        pixmap.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.pixmap = pixmap;
        debug!(width, height, "pixmap surface resized");
        Ok(())
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.path.clear();
        self.transform = Affine2D::IDENTITY;
    }
}
