//! Camera descriptors
//!
//! Quill does not own a camera system. [`OrthoCamera`] carries the state the
//! renderer reads when centring cached shapes on a 2D target; 3D placements
//! are world-space and leave view and projection to the caller.

use crate::geometry::Vec2;

/// Orthographic camera for 2D placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoCamera {
    /// Size of the projection in world units
    pub projection_size: Vec2,
    /// Camera position in world units
    pub position: Vec2,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self::new(Vec2::new(1920.0, 1080.0))
    }
}

impl OrthoCamera {
    pub fn new(projection_size: Vec2) -> Self {
        Self {
            projection_size,
            position: Vec2::ZERO,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Translation that places world origin at the center of the projection
    pub fn centered_position(&self) -> Vec2 {
        self.projection_size * 0.5 - self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_position() {
        let camera = OrthoCamera::new(Vec2::new(800.0, 600.0)).with_position(Vec2::new(100.0, 0.0));
        assert_eq!(camera.centered_position(), Vec2::new(300.0, 300.0));
    }
}
