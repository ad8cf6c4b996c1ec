//! Quill Core
//!
//! Foundational types shared by the Quill crates:
//!
//! - **Geometry**: points, vectors, bounding boxes, 2D/3D transforms, colors
//! - **Bézier helpers**: evaluation, subdivision, degree elevation, tight bounds
//! - **Cameras**: the orthographic descriptor used for 2D placement
//! - **Draw Context**: the immediate-mode vector backend trait and a
//!   command-recording implementation
//!
//! # Example
//!
//! ```rust
//! use quill_core::{Color, DrawContext, Point, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(64.0, 64.0));
//! ctx.begin_path();
//! ctx.move_to(Point::new(0.0, 0.0));
//! ctx.line_to(Point::new(32.0, 32.0));
//! ctx.set_stroke_color(Color::BLUE);
//! ctx.stroke();
//! assert_eq!(ctx.strokes().count(), 1);
//! ```

pub mod bezier;
pub mod camera;
pub mod draw;
pub mod geometry;

pub use camera::OrthoCamera;
pub use draw::{
    DrawCommand, DrawContext, DrawContextExt, Path, PathCommand, RecordingContext, Winding,
};
pub use geometry::{map_range, Affine2D, BBox, Color, Mat4, Point, Rect, Size, Vec2, Vec3};
