//! Geometry buffers
//!
//! A [`Shape`] owns an ordered list of [`Contour`]s, each of which owns an
//! ordered list of [`Curve`]s. Contours grow their curve storage in doubling
//! steps from a small initial capacity and never shrink.
//!
//! The perimeter and bounding box cached on a shape are only valid after an
//! explicit recompute (see the metrics methods); appending curves does not
//! refresh them.

use quill_core::BBox;

use crate::curve::Curve;

/// Curve capacity of a freshly created contour
pub const INITIAL_CURVE_CAPACITY: usize = 5;

/// An ordered run of curves, optionally filled as a hole
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    curves: Vec<Curve>,
    capacity: usize,
    pub is_hole: bool,
}

impl Default for Contour {
    fn default() -> Self {
        Self::new()
    }
}

impl Contour {
    pub fn new() -> Self {
        Self {
            curves: Vec::with_capacity(INITIAL_CURVE_CAPACITY),
            capacity: INITIAL_CURVE_CAPACITY,
            is_hole: false,
        }
    }

    /// Append a curve, doubling the capacity when full
    pub fn push(&mut self, curve: Curve) {
        if self.curves.len() == self.capacity {
            self.capacity *= 2;
            self.curves
                .reserve_exact(self.capacity - self.curves.len());
        }
        self.curves.push(curve);
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub(crate) fn curves_mut(&mut self) -> &mut [Curve] {
        &mut self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Logical capacity; always `INITIAL_CURVE_CAPACITY * 2^k`
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Start point of the first curve
    pub fn first_point(&self) -> Option<quill_core::Point> {
        self.curves.first().map(|c| c.p0)
    }

    pub fn last(&self) -> Option<&Curve> {
        self.curves.last()
    }

    /// Replace the curves with `other`'s, keeping this contour's capacity
    fn copy_from(&mut self, other: &Contour) {
        self.curves.clear();
        for curve in &other.curves {
            self.push(*curve);
        }
        self.is_hole = other.is_hole;
    }
}

/// A vector shape made of contours
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    contours: Vec<Contour>,
    pub(crate) approximate_perimeter: f32,
    pub(crate) bbox: BBox,
    pub(crate) normalized_range: Option<BBox>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub(crate) fn contours_mut(&mut self) -> &mut [Contour] {
        &mut self.contours
    }

    pub fn num_contours(&self) -> usize {
        self.contours.len()
    }

    /// Total number of curves across all contours
    pub fn num_curves(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// True when no contour holds a curve
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(Contour::is_empty)
    }

    /// Every curve in contour order
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.contours.iter().flat_map(|c| c.curves().iter())
    }

    /// Cached perimeter from the last recompute
    pub fn approximate_perimeter(&self) -> f32 {
        self.approximate_perimeter
    }

    /// Cached bounding box from the last recompute
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Geometry edits invalidate any remembered normalization range
    pub(crate) fn push_contour(&mut self, contour: Contour) {
        self.normalized_range = None;
        self.contours.push(contour);
    }

    pub(crate) fn last_contour_mut(&mut self) -> Option<&mut Contour> {
        self.normalized_range = None;
        self.contours.last_mut()
    }

    /// Release all geometry and reset the cached metrics
    pub fn clear(&mut self) {
        self.contours = Vec::new();
        self.approximate_perimeter = 0.0;
        self.bbox = BBox::ZERO;
        self.normalized_range = None;
    }

    /// Make `self` a structural copy of `src` and recompute its metrics.
    ///
    /// Existing contours are reused; excess ones are dropped and missing
    /// ones are allocated at the initial capacity.
    pub fn copy_from(&mut self, src: &Shape) {
        self.contours.truncate(src.contours.len());
        while self.contours.len() < src.contours.len() {
            self.contours.push(Contour::new());
        }
        for (dst, src) in self.contours.iter_mut().zip(&src.contours) {
            dst.copy_from(src);
        }
        self.normalized_range = src.normalized_range;

        self.compute_approximate_perimeter();
        self.compute_bounding_box();
    }
}
