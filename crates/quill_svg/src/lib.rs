//! Vector shapes with progressive-reveal rendering for Quill
//!
//! Shapes are built from SVG-style path commands into contours of line,
//! quadratic and cubic curves. A shape can be revealed over an animation
//! parameter `t` (outline first, then a fading fill), morphed into another
//! shape, and cached: every render lands in a cell of a shared cache surface
//! and returns a [`Blit`] describing how to draw that cell on the final target.
//!
//! # Example
//!
//! ```rust
//! use quill_animation::AnimObject;
//! use quill_core::{Point, RecordingContext, Size, Vec2};
//! use quill_svg::{RenderConfig, RenderContext, ShapeBuilder};
//!
//! # fn main() -> quill_svg::Result<()> {
//! let mut builder = ShapeBuilder::new();
//! builder.begin_contour(Point::new(0.0, 0.0));
//! builder
//!     .line_to(Point::new(100.0, 0.0), true)?
//!     .line_to(Point::new(50.0, 80.0), true)?
//!     .close_contour(true, false)?;
//! let triangle = builder.build();
//!
//! let mut ctx = RenderContext::init(RenderConfig::default(), RecordingContext::new(Size::ZERO))?;
//! let blit = triangle.render_animated(&mut ctx, 0.5, &AnimObject::new(), Vec2::ZERO, Vec2::ONE, false)?;
//! assert_eq!(blit.region.origin(), Point::ZERO);
//! # Ok(())
//! # }
//! ```

mod atlas;
mod builder;
mod config;
mod context;
mod curve;
mod error;
mod group;
mod interpolate;
mod metrics;
mod raster;
mod render;
mod shape;

pub use atlas::{AtlasPacker, AtlasRegion};
pub use builder::ShapeBuilder;
pub use config::RenderConfig;
pub use context::{CacheSurface, RenderContext};
pub use curve::{Curve, CurveKind};
pub use error::{Result, SvgError};
pub use group::{PlacedShape, ShapeGroup};
pub use interpolate::{
    contour_pairs, interpolate_shapes, render_interpolation, InterpolatedContour, MorphEndpoint,
};
pub use raster::PixmapSurface;
pub use render::{fade_amount, Blit, Placement, STATIC_RENDER_T};
pub use shape::{Contour, Shape, INITIAL_CURVE_CAPACITY};
