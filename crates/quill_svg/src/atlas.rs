//! Cache atlas packing
//!
//! Shapes are rendered into one shared square cache surface. Cells are packed
//! left to right on shelves (rows); a cell that does not fit the current row
//! starts a new one below the tallest cell of the row, and a row that does not
//! fit the surface doubles it, up to a maximum edge.

use quill_core::{Point, Size, Vec2};
use tracing::{debug, warn};

/// Region of the cache surface reserved for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    /// X position in the surface (pixels)
    pub x: f32,
    /// Y position in the surface (pixels)
    pub y: f32,
    /// Width (pixels)
    pub width: f32,
    /// Height (pixels)
    pub height: f32,
}

impl AtlasRegion {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get UV coordinates for this region given surface dimensions.
    ///
    /// Returns `[u_min, v_min, u_max, v_max]` with the origin at the top left.
    pub fn uv_bounds(&self, surface_width: u32, surface_height: u32) -> [f32; 4] {
        let w = surface_width as f32;
        let h = surface_height as f32;
        [
            self.x / w,
            self.y / h,
            (self.x + self.width) / w,
            (self.y + self.height) / h,
        ]
    }
}

/// Shelf packer for the cache surface
pub struct AtlasPacker {
    /// Surface width in pixels
    width: u32,
    /// Surface height in pixels
    height: u32,
    /// Largest edge the surface may grow to
    max_size: u32,
    /// Next free position on the current row
    cursor: Point,
    /// Tallest cell placed on the current row
    row_height: f32,
    /// Gap between cells and between rows
    padding: Vec2,
}

impl AtlasPacker {
    /// Create a packer for a `size` x `size` surface
    pub fn new(size: u32, max_size: u32, padding: Vec2) -> Self {
        Self {
            width: size,
            height: size,
            max_size,
            cursor: Point::ZERO,
            row_height: 0.0,
            padding,
        }
    }

    /// Get surface dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn padding(&self) -> Vec2 {
        self.padding
    }

    /// Reserve a cell at the cursor.
    ///
    /// Starts a new row when the cell would cross the right edge and grows the
    /// surface when it would cross the bottom edge. The caller advances the
    /// cursor with [`advance_x`](Self::advance_x) and
    /// [`note_row_height`](Self::note_row_height) once the cell is drawn.
    pub fn reserve(&mut self, size: Size) -> AtlasRegion {
        if self.cursor.x > 0.0 && self.cursor.x + size.width > self.width as f32 {
            self.new_row();
        }
        while self.cursor.y + size.height > self.height as f32 {
            if !self.grow() {
                break;
            }
        }

        AtlasRegion {
            x: self.cursor.x,
            y: self.cursor.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn advance_x(&mut self, dx: f32) {
        self.cursor.x += dx;
    }

    /// Record a cell height on the current row
    pub fn note_row_height(&mut self, height: f32) {
        self.row_height = self.row_height.max(height);
    }

    /// Move to the start of the next row
    pub fn new_row(&mut self) {
        self.cursor.y += self.row_height + self.padding.y;
        self.cursor.x = 0.0;
        self.row_height = 0.0;
    }

    /// Double both dimensions, capped at the maximum edge.
    ///
    /// Returns whether the surface changed size.
    pub fn grow(&mut self) -> bool {
        let (old_w, old_h) = (self.width, self.height);
        let want_w = self.width.saturating_mul(2);
        let want_h = self.height.saturating_mul(2);

        if want_w > self.max_size || want_h > self.max_size {
            warn!(
                requested = ?(want_w, want_h),
                max = self.max_size,
                "cache surface request exceeds maximum size; truncated"
            );
        }
        self.width = want_w.min(self.max_size);
        self.height = want_h.min(self.max_size);

        let grew = (self.width, self.height) != (old_w, old_h);
        if grew {
            debug!(width = self.width, height = self.height, "cache surface grown");
        }
        grew
    }

    /// Rewind to the origin for a new frame
    pub fn reset_frame(&mut self) {
        self.cursor = Point::ZERO;
        self.row_height = 0.0;
    }

    /// Fraction of the surface height used by finished and current rows
    pub fn utilization(&self) -> f32 {
        let used = self.cursor.y + self.row_height;
        (used / self.height as f32).min(1.0)
    }
}

impl Default for AtlasPacker {
    fn default() -> Self {
        Self::new(1024, 4096, Vec2::splat(3.0))
    }
}

impl std::fmt::Debug for AtlasPacker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasPacker")
            .field("dimensions", &(self.width, self.height))
            .field("cursor", &(self.cursor.x, self.cursor.y))
            .field("row_height", &self.row_height)
            .field(
                "utilization",
                &format!("{:.1}%", self.utilization() * 100.0),
            )
            .finish()
    }
}
