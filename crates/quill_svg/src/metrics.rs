//! Shape metrics: bounding box, perimeter and normalization

use quill_core::{map_range, BBox, Point};
use tracing::trace;

use crate::shape::Shape;

impl Shape {
    /// Recompute the cached tight bounding box.
    ///
    /// A shape without curves gets a zero box at the origin.
    pub fn compute_bounding_box(&mut self) -> BBox {
        let bbox = self
            .curves()
            .map(|c| c.bbox())
            .fold(BBox::EMPTY, BBox::merge);

        self.bbox = if bbox.is_empty() { BBox::ZERO } else { bbox };
        self.bbox
    }

    /// Recompute the cached approximate perimeter
    pub fn compute_approximate_perimeter(&mut self) -> f32 {
        self.approximate_perimeter = self.curves().map(|c| c.approximate_length()).sum();
        self.approximate_perimeter
    }

    /// Bounds of every point, control points included
    pub fn point_range(&self) -> BBox {
        BBox::from_points(self.curves().flat_map(|c| c.points()))
    }

    /// Remap all points from `range` into the unit square, per axis.
    ///
    /// With `None` the range is the bounds of all points. An explicit range is
    /// remembered, and normalizing again against the same range is a no-op.
    /// Cached metrics are left untouched.
    pub fn normalize(&mut self, range: Option<BBox>) {
        let range = match range {
            Some(range) if self.normalized_range == Some(range) => {
                trace!(?range, "shape already normalized against range");
                return;
            }
            Some(range) => {
                self.normalized_range = Some(range);
                range
            }
            None => {
                self.normalized_range = None;
                self.point_range()
            }
        };
        if range.is_empty() {
            return;
        }

        let map = |p: Point| {
            Point::new(
                map_range((range.min.x, range.max.x), (0.0, 1.0), p.x),
                map_range((range.min.y, range.max.y), (0.0, 1.0), p.y),
            )
        };
        for contour in self.contours_mut() {
            for curve in contour.curves_mut() {
                curve.map_points(&map);
            }
        }
    }
}
