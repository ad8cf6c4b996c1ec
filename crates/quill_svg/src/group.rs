//! Shape groups
//!
//! A group places several shapes inside one viewbox, each at its own offset,
//! and renders them into a single cache cell. Shapes pushed under the same
//! identifier are also kept once in a registry of unique shapes.

use indexmap::IndexMap;
use quill_core::{BBox, Rect, Vec2};
use rustc_hash::FxBuildHasher;

use crate::shape::Shape;

/// A shape placed in a group
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedShape {
    pub shape: Shape,
    /// Offset in viewbox coordinates
    pub offset: Vec2,
}

/// Named collection of placed shapes sharing a viewbox
#[derive(Clone, Debug)]
pub struct ShapeGroup {
    name: String,
    viewbox: Rect,
    members: Vec<PlacedShape>,
    unique: IndexMap<String, Shape, FxBuildHasher>,
    bbox: BBox,
}

impl ShapeGroup {
    /// Begin an empty group
    pub fn new(name: impl Into<String>, viewbox: Rect) -> Self {
        Self {
            name: name.into(),
            viewbox,
            members: Vec::new(),
            unique: IndexMap::with_hasher(FxBuildHasher),
            bbox: BBox::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn viewbox(&self) -> Rect {
        self.viewbox
    }

    pub fn members(&self) -> &[PlacedShape] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Aggregate bounds from the last recompute
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Place a copy of `shape` at `offset`.
    ///
    /// The first shape pushed under `id` is also kept in the unique registry.
    pub fn push(&mut self, shape: &Shape, id: &str, offset: Vec2) {
        let mut placed = Shape::new();
        placed.copy_from(shape);
        self.members.push(PlacedShape {
            shape: placed,
            offset,
        });

        if !self.unique.contains_key(id) {
            let mut unique = Shape::new();
            unique.copy_from(shape);
            self.unique.insert(id.to_owned(), unique);
        }
    }

    /// Unique shapes in first-pushed order
    pub fn unique_shapes(&self) -> impl Iterator<Item = (&str, &Shape)> {
        self.unique.iter().map(|(id, shape)| (id.as_str(), shape))
    }

    pub fn unique_shape(&self, id: &str) -> Option<&Shape> {
        self.unique.get(id)
    }

    /// Finish building the group
    pub fn end(&mut self) {
        self.normalize();
    }

    /// Bring the cached aggregate bounds up to date
    pub fn normalize(&mut self) {
        self.compute_bounding_box();
    }

    /// Union of member bounds placed at their offsets relative to the viewbox
    /// origin; members without curves are skipped.
    pub fn compute_bounding_box(&mut self) -> BBox {
        let translation = self.viewbox.origin.to_vec2();
        let bbox = self
            .members
            .iter()
            .filter(|m| !m.shape.is_empty())
            .map(|m| m.shape.bbox().translate(m.offset - translation))
            .fold(BBox::EMPTY, BBox::merge);

        self.bbox = if bbox.is_empty() { BBox::ZERO } else { bbox };
        self.bbox
    }

    /// Release all members and registered shapes
    pub fn clear(&mut self) {
        self.members = Vec::new();
        self.unique.clear();
        self.bbox = BBox::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ShapeBuilder;
    use quill_core::Point;

    fn unit_square() -> Shape {
        let mut builder = ShapeBuilder::new();
        builder.begin_contour(Point::ZERO);
        builder
            .line_to(Point::new(1.0, 0.0), true)
            .unwrap()
            .line_to(Point::new(1.0, 1.0), true)
            .unwrap()
            .line_to(Point::new(0.0, 1.0), true)
            .unwrap()
            .close_contour(true, false)
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_bbox_accounts_for_offsets_and_viewbox() {
        let mut group = ShapeGroup::new("word", Rect::new(10.0, 0.0, 100.0, 100.0));
        let square = unit_square();
        group.push(&square, "a", Vec2::new(10.0, 0.0));
        group.push(&square, "a", Vec2::new(15.0, 5.0));
        group.end();

        assert_eq!(group.bbox().min, Point::new(0.0, 0.0));
        assert_eq!(group.bbox().max, Point::new(6.0, 6.0));
    }

    #[test]
    fn test_unique_registry_keeps_first_copy() {
        let mut group = ShapeGroup::new("word", Rect::ZERO);
        let square = unit_square();
        group.push(&square, "a", Vec2::ZERO);
        group.push(&Shape::new(), "a", Vec2::ZERO);
        group.push(&Shape::new(), "b", Vec2::ZERO);

        assert_eq!(group.len(), 3);
        let ids: Vec<_> = group.unique_shapes().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(group.unique_shape("a").map(Shape::num_curves), Some(4));
    }

    #[test]
    fn test_empty_members_do_not_affect_bbox() {
        let mut group = ShapeGroup::new("word", Rect::ZERO);
        group.push(&Shape::new(), "space", Vec2::new(-50.0, -50.0));
        group.push(&unit_square(), "a", Vec2::new(2.0, 3.0));
        group.end();

        assert_eq!(group.bbox().min, Point::new(2.0, 3.0));
        assert_eq!(group.bbox().max, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_clear() {
        let mut group = ShapeGroup::new("word", Rect::ZERO);
        group.push(&unit_square(), "a", Vec2::ZERO);
        group.end();
        group.clear();
        assert!(group.is_empty());
        assert_eq!(group.unique_shapes().count(), 0);
        assert_eq!(group.bbox(), BBox::ZERO);
    }
}
