//! Cursor-based shape construction
//!
//! [`ShapeBuilder`] mirrors SVG path data: every drawing command starts at the
//! pen position and leaves the pen at its end point. Commands take an
//! `absolute` flag; relative coordinates are offsets from the pen position at
//! the start of the command.
//!
//! # Example
//!
//! ```rust
//! use quill_core::Point;
//! use quill_svg::ShapeBuilder;
//!
//! # fn main() -> quill_svg::Result<()> {
//! let mut builder = ShapeBuilder::new();
//! builder.begin_contour(Point::new(0.0, 0.0));
//! builder
//!     .line_to(Point::new(10.0, 0.0), true)?
//!     .line_to(Point::new(0.0, 10.0), false)?
//!     .close_contour(true, false)?;
//! let shape = builder.build();
//! assert_eq!(shape.num_curves(), 3);
//! # Ok(())
//! # }
//! ```

use quill_core::{Point, Vec2};
use tracing::trace;

use crate::curve::Curve;
use crate::error::{Result, SvgError};
use crate::shape::{Contour, Shape};

/// Tolerance used for degenerate arc checks
const ARC_EPSILON: f32 = 1e-5;

/// Stateful builder that appends curves to a [`Shape`]
#[derive(Debug, Default)]
pub struct ShapeBuilder {
    shape: Shape,
    cursor: Point,
    pending_subpath: bool,
}

impl ShapeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue building on an existing shape with the pen at the origin
    pub fn from_shape(shape: Shape) -> Self {
        Self {
            shape,
            cursor: Point::ZERO,
            pending_subpath: false,
        }
    }

    /// Current pen position
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The shape built so far; cached metrics are stale until [`build`](Self::build)
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Recompute metrics and return the shape
    pub fn build(mut self) -> Shape {
        self.shape.compute_approximate_perimeter();
        self.shape.compute_bounding_box();
        self.shape
    }

    fn resolve(&self, point: Point, absolute: bool) -> Point {
        if absolute {
            point
        } else {
            self.cursor + point.to_vec2()
        }
    }

    /// Append a curve starting at the pen and move the pen to its end
    fn append(&mut self, op: &'static str, curve: Curve) -> Result<&mut Self> {
        let starts_subpath = self.pending_subpath;
        let contour = self
            .shape
            .last_contour_mut()
            .ok_or(SvgError::NoContour { op })?;

        contour.push(curve.with_subpath_start(starts_subpath));
        self.cursor = curve.end_point();
        self.pending_subpath = false;
        Ok(self)
    }

    /// Control point of the previous curve in the active contour, when it has
    /// the given degree
    fn previous_control(&self, degree: u8) -> Option<Point> {
        self.shape
            .contours()
            .last()
            .and_then(Contour::last)
            .filter(|c| c.degree() == degree)
            .and_then(Curve::last_control)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Contours and moves
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a new contour with the pen at `first_point`
    pub fn begin_contour(&mut self, first_point: Point) -> &mut Self {
        self.shape.push_contour(Contour::new());
        self.cursor = first_point;
        self.pending_subpath = false;
        self
    }

    /// Lift the pen.
    ///
    /// On a shape with no contours this begins the first contour. Otherwise the
    /// next appended curve is flagged as starting a new subpath.
    pub fn move_to(&mut self, point: Point, absolute: bool) -> &mut Self {
        let target = self.resolve(point, absolute);
        if self.shape.num_contours() == 0 {
            return self.begin_contour(target);
        }
        self.cursor = target;
        self.pending_subpath = true;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lines
    // ─────────────────────────────────────────────────────────────────────────

    pub fn line_to(&mut self, point: Point, absolute: bool) -> Result<&mut Self> {
        let end = self.resolve(point, absolute);
        self.append("line_to", Curve::line(self.cursor, end))
    }

    /// Horizontal line; `y` stays at the pen position
    pub fn hz_line_to(&mut self, x: f32, absolute: bool) -> Result<&mut Self> {
        let x = if absolute { x } else { self.cursor.x + x };
        self.line_to(Point::new(x, self.cursor.y), true)
    }

    /// Vertical line; `x` stays at the pen position
    pub fn vt_line_to(&mut self, y: f32, absolute: bool) -> Result<&mut Self> {
        let y = if absolute { y } else { self.cursor.y + y };
        self.line_to(Point::new(self.cursor.x, y), true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Béziers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn bezier2_to(&mut self, control: Point, dest: Point, absolute: bool) -> Result<&mut Self> {
        let p1 = self.resolve(control, absolute);
        let p2 = self.resolve(dest, absolute);
        self.append("bezier2_to", Curve::quadratic(self.cursor, p1, p2))
    }

    pub fn bezier3_to(
        &mut self,
        control1: Point,
        control2: Point,
        dest: Point,
        absolute: bool,
    ) -> Result<&mut Self> {
        let p1 = self.resolve(control1, absolute);
        let p2 = self.resolve(control2, absolute);
        let p3 = self.resolve(dest, absolute);
        self.append("bezier3_to", Curve::cubic(self.cursor, p1, p2, p3))
    }

    /// Quadratic whose control reflects the previous quadratic's control
    /// through the pen; the pen itself when the previous curve is not a
    /// quadratic.
    pub fn smooth_bezier2_to(&mut self, dest: Point, absolute: bool) -> Result<&mut Self> {
        let control = self
            .previous_control(2)
            .map_or(self.cursor, |c| c.reflect_about(self.cursor));
        let p2 = self.resolve(dest, absolute);
        self.append("smooth_bezier2_to", Curve::quadratic(self.cursor, control, p2))
    }

    /// Cubic whose first control reflects the previous cubic's second control
    /// through the pen; the pen itself when the previous curve is not a cubic.
    pub fn smooth_bezier3_to(
        &mut self,
        control2: Point,
        dest: Point,
        absolute: bool,
    ) -> Result<&mut Self> {
        let control1 = self
            .previous_control(3)
            .map_or(self.cursor, |c| c.reflect_about(self.cursor));
        let p2 = self.resolve(control2, absolute);
        let p3 = self.resolve(dest, absolute);
        self.append(
            "smooth_bezier3_to",
            Curve::cubic(self.cursor, control1, p2, p3),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Arcs and closing
    // ─────────────────────────────────────────────────────────────────────────

    /// Elliptical arc, drawn as a straight line to `dest`.
    ///
    /// A destination at the pen position is a no-op.
    pub fn arc_to(
        &mut self,
        radius: Vec2,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        dest: Point,
        absolute: bool,
    ) -> Result<&mut Self> {
        let end = self.resolve(dest, absolute);
        if self.cursor.approx_eq(end, ARC_EPSILON) {
            return Ok(self);
        }

        if radius.x.abs() > ARC_EPSILON && radius.y.abs() > ARC_EPSILON {
            trace!(
                ?radius,
                x_axis_rotation,
                large_arc,
                sweep,
                "elliptical arc drawn as a line"
            );
        }
        self.line_to(end, true)
    }

    /// Finish the active contour.
    ///
    /// Marks it as a hole when `is_hole`, optionally draws a line back to its
    /// first point, and returns the pen to the origin.
    pub fn close_contour(&mut self, line_to_endpoint: bool, is_hole: bool) -> Result<&mut Self> {
        let contour = self
            .shape
            .last_contour_mut()
            .ok_or(SvgError::NoContour {
                op: "close_contour",
            })?;
        let first = contour.first_point().ok_or(SvgError::EmptyContour)?;
        contour.is_hole = is_hole;

        if line_to_endpoint {
            self.line_to(first, true)?;
        }
        self.cursor = Point::ZERO;
        Ok(self)
    }
}
