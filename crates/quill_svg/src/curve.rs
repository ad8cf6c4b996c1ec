//! Curve segments
//!
//! A curve is one segment of a contour: a line, a quadratic or a cubic Bézier.
//! Every kind shares its start point `p0`, which always equals the end point of
//! the previous curve unless the curve begins a new subpath.

use quill_core::bezier::{self, elevate_quad, split_cubic_head};
use quill_core::{BBox, Point};
use smallvec::{smallvec, SmallVec};

/// Segment-specific control and end points
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveKind {
    Line { p1: Point },
    Quadratic { p1: Point, p2: Point },
    Cubic { p1: Point, p2: Point, p3: Point },
}

/// One segment of a contour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    pub p0: Point,
    pub kind: CurveKind,
    /// Set when the pen was lifted before this curve
    pub starts_subpath: bool,
}

impl Curve {
    pub fn line(p0: Point, p1: Point) -> Self {
        Self {
            p0,
            kind: CurveKind::Line { p1 },
            starts_subpath: false,
        }
    }

    pub fn quadratic(p0: Point, p1: Point, p2: Point) -> Self {
        Self {
            p0,
            kind: CurveKind::Quadratic { p1, p2 },
            starts_subpath: false,
        }
    }

    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            p0,
            kind: CurveKind::Cubic { p1, p2, p3 },
            starts_subpath: false,
        }
    }

    pub fn with_subpath_start(mut self, starts_subpath: bool) -> Self {
        self.starts_subpath = starts_subpath;
        self
    }

    /// 1 for lines, 2 for quadratics, 3 for cubics
    pub fn degree(&self) -> u8 {
        match self.kind {
            CurveKind::Line { .. } => 1,
            CurveKind::Quadratic { .. } => 2,
            CurveKind::Cubic { .. } => 3,
        }
    }

    pub fn end_point(&self) -> Point {
        match self.kind {
            CurveKind::Line { p1 } => p1,
            CurveKind::Quadratic { p2, .. } => p2,
            CurveKind::Cubic { p3, .. } => p3,
        }
    }

    /// The control point that precedes the end point, if any.
    ///
    /// Smooth curve commands reflect this through the pen position.
    pub fn last_control(&self) -> Option<Point> {
        match self.kind {
            CurveKind::Line { .. } => None,
            CurveKind::Quadratic { p1, .. } => Some(p1),
            CurveKind::Cubic { p2, .. } => Some(p2),
        }
    }

    /// All points in order, start point first
    pub fn points(&self) -> SmallVec<[Point; 4]> {
        match self.kind {
            CurveKind::Line { p1 } => smallvec![self.p0, p1],
            CurveKind::Quadratic { p1, p2 } => smallvec![self.p0, p1, p2],
            CurveKind::Cubic { p1, p2, p3 } => smallvec![self.p0, p1, p2, p3],
        }
    }

    /// Apply `f` to every point of the curve
    pub fn map_points(&mut self, f: impl Fn(Point) -> Point) {
        self.p0 = f(self.p0);
        match &mut self.kind {
            CurveKind::Line { p1 } => *p1 = f(*p1),
            CurveKind::Quadratic { p1, p2 } => {
                *p1 = f(*p1);
                *p2 = f(*p2);
            }
            CurveKind::Cubic { p1, p2, p3 } => {
                *p1 = f(*p1);
                *p2 = f(*p2);
                *p3 = f(*p3);
            }
        }
    }

    /// Promote to a cubic control polygon.
    ///
    /// Lines collapse their controls onto the endpoints; quadratics are
    /// degree-elevated exactly.
    pub fn to_cubic(&self) -> [Point; 4] {
        match self.kind {
            CurveKind::Line { p1 } => [self.p0, self.p0, p1, p1],
            CurveKind::Quadratic { p1, p2 } => elevate_quad(self.p0, p1, p2),
            CurveKind::Cubic { p1, p2, p3 } => [self.p0, p1, p2, p3],
        }
    }

    /// Average of chord and control-net length
    pub fn approximate_length(&self) -> f32 {
        bezier::approximate_length(&self.points())
    }

    /// Tight axis-aligned bounds
    pub fn bbox(&self) -> BBox {
        match self.kind {
            CurveKind::Line { p1 } => BBox::from_points([self.p0, p1]),
            CurveKind::Quadratic { p1, p2 } => bezier::quad_bbox(self.p0, p1, p2),
            CurveKind::Cubic { p1, p2, p3 } => bezier::cubic_bbox(self.p0, p1, p2, p3),
        }
    }

    /// The `[0, t]` portion of the curve.
    ///
    /// Lines stay lines; quadratics come back as the equivalent cubic.
    pub fn head(&self, t: f32) -> Curve {
        let t = t.clamp(0.0, 1.0);
        let head = match self.kind {
            CurveKind::Line { p1 } => Curve::line(self.p0, self.p0.lerp(p1, t)),
            CurveKind::Quadratic { .. } | CurveKind::Cubic { .. } => {
                let [p0, p1, p2, p3] = split_cubic_head(self.to_cubic(), t);
                Curve::cubic(p0, p1, p2, p3)
            }
        };
        head.with_subpath_start(self.starts_subpath)
    }
}
