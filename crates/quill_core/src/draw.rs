//! Draw Context - immediate-mode vector backend
//!
//! The `DrawContext` trait is the seam between Quill's geometry code and
//! whatever actually produces pixels. It follows the classic immediate-mode
//! canvas model: a frame is bracketed by `begin_frame`/`end_frame`, a path is
//! accumulated with `begin_path`/`move_to`/`line_to`/`bezier_to`, and then
//! painted with `fill` or `stroke` using the current paint state.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.begin_path();
//!     ctx.move_to(Point::new(0.0, 0.0));
//!     ctx.line_to(Point::new(100.0, 0.0));
//!     ctx.set_stroke_color(Color::BLUE);
//!     ctx.set_stroke_width(2.0);
//!     ctx.stroke();
//! }
//! ```

use crate::geometry::{Affine2D, BBox, Color, Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Winding applied to the most recent subpath
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Winding {
    /// Regular filled area
    #[default]
    Solid,
    /// Subtracts from enclosing solid subpaths
    Hole,
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current subpath
    Close,
    /// Mark the current subpath's winding
    Winding(Winding),
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Create a rectangle path
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x(), rect.y())
            .line_to(rect.x() + rect.width(), rect.y())
            .line_to(rect.x() + rect.width(), rect.y() + rect.height())
            .line_to(rect.x(), rect.y() + rect.height())
            .close()
    }

    /// Append a command in place
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Append all commands of another path
    pub fn extend(&mut self, other: &Path) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of subpaths started with `MoveTo`
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Whether any subpath was marked as a hole
    pub fn has_holes(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::Winding(Winding::Hole)))
    }

    /// Bounds of all points including control points
    pub fn bounds(&self) -> BBox {
        self.commands
            .iter()
            .flat_map(|cmd| match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![*p],
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => vec![*control1, *control2, *end],
                PathCommand::Close | PathCommand::Winding(_) => Vec::new(),
            })
            .fold(BBox::EMPTY, BBox::include)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Immediate-mode vector drawing backend
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // Frame
    // ─────────────────────────────────────────────────────────────────────────

    /// Begin a frame targeting a surface of `size` pixels
    fn begin_frame(&mut self, size: Size, pixel_ratio: f32);

    /// Flush the frame
    fn end_frame(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // Path Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Discard the current path and start a new one
    fn begin_path(&mut self);

    fn move_to(&mut self, p: Point);

    fn line_to(&mut self, p: Point);

    fn bezier_to(&mut self, control1: Point, control2: Point, end: Point);

    /// Append a closed rectangle subpath
    fn rect(&mut self, rect: Rect);

    fn close_path(&mut self);

    /// Set the winding of the current subpath
    fn set_path_winding(&mut self, winding: Winding);

    // ─────────────────────────────────────────────────────────────────────────
    // Paint
    // ─────────────────────────────────────────────────────────────────────────

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_stroke_width(&mut self, width: f32);

    /// Fill the current path with the fill color
    fn fill(&mut self);

    /// Stroke the current path with the stroke color and width
    fn stroke(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // Transform
    // ─────────────────────────────────────────────────────────────────────────

    /// Pre-multiply the current transform by `transform`
    fn push_transform(&mut self, transform: Affine2D);

    /// Restore the identity transform
    fn reset_transform(&mut self);
}

/// Convenience helpers over [`DrawContext`]
pub trait DrawContextExt: DrawContext {
    /// Stroke an outlined rectangle as its own path
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.begin_path();
        self.rect(rect);
        self.set_stroke_color(color);
        self.set_stroke_width(width);
        self.stroke();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.push_transform(Affine2D::translation(dx, dy));
    }

    /// Rotate by `angle` radians
    fn rotate(&mut self, angle: f32) {
        self.push_transform(Affine2D::rotation(angle));
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Context
// ─────────────────────────────────────────────────────────────────────────────

/// A painted operation captured by [`RecordingContext`]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    BeginFrame {
        size: Size,
        pixel_ratio: f32,
    },
    EndFrame,
    Fill {
        path: Path,
        color: Color,
        transform: Affine2D,
    },
    Stroke {
        path: Path,
        color: Color,
        width: f32,
        transform: Affine2D,
    },
    ResetTransform,
}

/// Draw context that records painted paths instead of rasterizing them
///
/// Path construction is folded into the `Fill`/`Stroke` commands, so the
/// recording reads as "what was painted, with which paint".
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    path: Path,
    fill_color: Color,
    stroke_color: Color,
    stroke_width: f32,
    transform: Affine2D,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            path: Path::new(),
            fill_color: Color::WHITE,
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            transform: Affine2D::IDENTITY,
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear all recorded commands and paint state
    pub fn clear(&mut self) {
        self.commands.clear();
        self.path.clear();
        self.transform = Affine2D::IDENTITY;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// The path under construction
    pub fn current_path(&self) -> &Path {
        &self.path
    }

    pub fn current_transform(&self) -> Affine2D {
        self.transform
    }

    /// Recorded strokes in order
    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    /// Recorded fills in order
    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
    }
}

impl DrawContext for RecordingContext {
    fn begin_frame(&mut self, size: Size, pixel_ratio: f32) {
        self.commands
            .push(DrawCommand::BeginFrame { size, pixel_ratio });
    }

    fn end_frame(&mut self) {
        self.commands.push(DrawCommand::EndFrame);
    }

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
        self.commands.push(DrawCommand::Fill {
            path: self.path.clone(),
            color: self.fill_color,
            transform: self.transform,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke {
            path: self.path.clone(),
            color: self.stroke_color,
            width: self.stroke_width,
            transform: self.transform,
        });
    }

    fn push_transform(&mut self, transform: Affine2D) {
        self.transform = self.transform.then(&transform);
    }

    fn reset_transform(&mut self) {
        self.transform = Affine2D::IDENTITY;
        self.commands.push(DrawCommand::ResetTransform);
    }
}
