//! Quill Animation
//!
//! Interpolation primitives and the animated-object descriptor consumed by
//! the shape renderer.
//!
//! # Features
//!
//! - **Interpolate**: linear blending for scalars, vectors, points and colors
//! - **AnimObject**: position, rotation, scale, paint and render flags of an
//!   object driven by the timeline

pub mod object;
pub mod values;

pub use object::{AnimObject, ObjectFlags, STROKE_WIDTH_EPSILON};
pub use values::Interpolate;
