//! Animated object descriptor
//!
//! The timeline owns animated objects; the shape renderer only reads the
//! transform, paint and flags captured here.

use quill_core::{Color, Vec3};

use crate::values::Interpolate;

/// Stroke widths at or below this are treated as unset
pub const STROKE_WIDTH_EPSILON: f32 = 0.01;

/// Render flags carried by an [`AnimObject`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectFlags {
    /// Place the object in the 3D scene instead of the 2D overlay
    pub is_3d: bool,
    /// Blend the 3D quad with transparency
    pub is_transparent: bool,
    /// Outline the shape's bounding box
    pub draw_debug_boxes: bool,
    /// Also outline every curve's bounding box
    pub draw_curve_debug_boxes: bool,
}

/// Transform, paint and flags of an animated object
#[derive(Clone, Debug, PartialEq)]
pub struct AnimObject {
    pub position: Vec3,
    /// Euler rotation in degrees
    pub rotation: Vec3,
    pub scale: Vec3,
    pub fill_color: Color,
    pub stroke_color: Color,
    /// Zero means "not set"; see [`AnimObject::effective_stroke_width`]
    pub stroke_width: f32,
    pub flags: ObjectFlags,
}

impl Default for AnimObject {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            fill_color: Color::WHITE,
            stroke_color: Color::WHITE,
            stroke_width: 0.0,
            flags: ObjectFlags::default(),
        }
    }
}

impl AnimObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke_color = color;
        self.stroke_width = width;
        self
    }

    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether a stroke width was explicitly set
    pub fn has_stroke_width(&self) -> bool {
        self.stroke_width.abs() > STROKE_WIDTH_EPSILON
    }

    /// Stroke width, or `default` when none is set
    pub fn effective_stroke_width(&self, default: f32) -> f32 {
        if self.has_stroke_width() {
            self.stroke_width
        } else {
            default
        }
    }

    /// Rotation around z in radians
    pub fn rotation_z_radians(&self) -> f32 {
        self.rotation.z.to_radians()
    }

    /// Euler rotation in radians
    pub fn rotation_radians(&self) -> Vec3 {
        Vec3::new(
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        )
    }
}

impl Interpolate for AnimObject {
    /// Blends transform and paint; flags are taken from `self`
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            rotation: self.rotation.lerp(&other.rotation, t),
            scale: self.scale.lerp(&other.scale, t),
            fill_color: Interpolate::lerp(&self.fill_color, &other.fill_color, t),
            stroke_color: Interpolate::lerp(&self.stroke_color, &other.stroke_color, t),
            stroke_width: self.stroke_width + (other.stroke_width - self.stroke_width) * t,
            flags: self.flags,
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.position.approx_eq(&other.position, epsilon)
            && self.rotation.approx_eq(&other.rotation, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
            && self.fill_color.approx_eq(&other.fill_color, epsilon)
            && self.stroke_color.approx_eq(&other.stroke_color, epsilon)
            && (self.stroke_width - other.stroke_width).abs() < epsilon
    }
}
