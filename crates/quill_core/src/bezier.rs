//! Bézier helpers
//!
//! Evaluation, subdivision, degree elevation and tight bounds for quadratic
//! and cubic Bézier segments.

use smallvec::SmallVec;

use crate::geometry::{BBox, Point};

/// Roots of the derivative that fall strictly inside `(0, 1)`
pub type Extrema = SmallVec<[f32; 4]>;

/// Evaluate a quadratic Bézier at `t`
pub fn quad_point(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

/// Evaluate a cubic Bézier at `t`
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Elevate a quadratic to the equivalent cubic control polygon
pub fn elevate_quad(p0: Point, p1: Point, p2: Point) -> [Point; 4] {
    let c1 = Point::new(
        p0.x / 3.0 + 2.0 * p1.x / 3.0,
        p0.y / 3.0 + 2.0 * p1.y / 3.0,
    );
    let c2 = Point::new(
        2.0 * p1.x / 3.0 + p2.x / 3.0,
        2.0 * p1.y / 3.0 + p2.y / 3.0,
    );
    [p0, c1, c2, p2]
}

/// Split a cubic at `t` with de Casteljau and return the `[0, t]` half
pub fn split_cubic_head(points: [Point; 4], t: f32) -> [Point; 4] {
    let [p0, p1, p2, p3] = points;
    let p01 = p0.lerp(p1, t);
    let p12 = p1.lerp(p2, t);
    let p23 = p2.lerp(p3, t);
    let p012 = p01.lerp(p12, t);
    let p123 = p12.lerp(p23, t);
    let split = p012.lerp(p123, t);
    [p0, p01, p012, split]
}

/// Chord and control-net average, a cheap arc length estimate
pub fn approximate_length(points: &[Point]) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    let chord = first.distance(*last);
    let net: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    (chord + net) / 2.0
}

fn push_root(roots: &mut Extrema, t: f32) {
    if t > 0.0 && t < 1.0 {
        roots.push(t);
    }
}

/// Parameter values where a quadratic's derivative vanishes, per axis
fn quad_extrema(a: f32, b: f32, c: f32, roots: &mut Extrema) {
    let denom = a - 2.0 * b + c;
    if denom.abs() > f32::EPSILON {
        push_root(roots, (a - b) / denom);
    }
}

/// Parameter values where a cubic's derivative vanishes, per axis
fn cubic_extrema(a: f32, b: f32, c: f32, d: f32, roots: &mut Extrema) {
    // B'(t) / 3 = qa t^2 + qb t + qc
    let qa = -a + 3.0 * b - 3.0 * c + d;
    let qb = 2.0 * (a - 2.0 * b + c);
    let qc = b - a;

    if qa.abs() <= f32::EPSILON {
        if qb.abs() > f32::EPSILON {
            push_root(roots, -qc / qb);
        }
        return;
    }

    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return;
    }
    let sq = disc.sqrt();
    push_root(roots, (-qb + sq) / (2.0 * qa));
    push_root(roots, (-qb - sq) / (2.0 * qa));
}

/// Tight bounds of a quadratic, including interior extrema
pub fn quad_bbox(p0: Point, p1: Point, p2: Point) -> BBox {
    let mut roots = Extrema::new();
    quad_extrema(p0.x, p1.x, p2.x, &mut roots);
    quad_extrema(p0.y, p1.y, p2.y, &mut roots);

    roots
        .iter()
        .map(|&t| quad_point(p0, p1, p2, t))
        .fold(BBox::from_points([p0, p2]), BBox::include)
}

/// Tight bounds of a cubic, including interior extrema
pub fn cubic_bbox(p0: Point, p1: Point, p2: Point, p3: Point) -> BBox {
    let mut roots = Extrema::new();
    cubic_extrema(p0.x, p1.x, p2.x, p3.x, &mut roots);
    cubic_extrema(p0.y, p1.y, p2.y, p3.y, &mut roots);

    roots
        .iter()
        .map(|&t| cubic_point(p0, p1, p2, p3, t))
        .fold(BBox::from_points([p0, p3]), BBox::include)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_bbox_includes_apex() {
        // Apex of this parabola is at y = 5
        let bbox = quad_bbox(Point::new(0.0, 0.0), Point::new(5.0, 10.0), Point::new(10.0, 0.0));
        assert_eq!(bbox.min, Point::new(0.0, 0.0));
        assert!((bbox.max.y - 5.0).abs() < 1e-5);
        assert_eq!(bbox.max.x, 10.0);
    }

    #[test]
    fn test_cubic_bbox_tighter_than_hull() {
        let bbox = cubic_bbox(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        // Peak of this symmetric cubic is 7.5
        assert!((bbox.max.y - 7.5).abs() < 1e-4);
        assert_eq!(bbox.min.y, 0.0);
    }

    #[test]
    fn test_split_cubic_head_endpoints() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        let head = split_cubic_head(pts, 0.5);
        assert_eq!(head[0], pts[0]);
        let mid = cubic_point(pts[0], pts[1], pts[2], pts[3], 0.5);
        assert!(head[3].approx_eq(mid, 1e-5));

        let whole = split_cubic_head(pts, 1.0);
        assert!(whole[3].approx_eq(pts[3], 1e-6));
    }

    #[test]
    fn test_elevate_quad_preserves_curve() {
        let (p0, p1, p2) = (Point::new(0.0, 0.0), Point::new(3.0, 6.0), Point::new(6.0, 0.0));
        let [c0, c1, c2, c3] = elevate_quad(p0, p1, p2);
        for t in [0.25, 0.5, 0.75] {
            let q = quad_point(p0, p1, p2, t);
            let c = cubic_point(c0, c1, c2, c3, t);
            assert!(q.approx_eq(c, 1e-4));
        }
    }

    #[test]
    fn test_approximate_length_of_line() {
        let len = approximate_length(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert_eq!(len, 5.0);
        assert_eq!(approximate_length(&[]), 0.0);
    }
}
