//! Render context
//!
//! Owns everything the shape renderer shares between draws: the camera used
//! to place cached 2D cells, the atlas packer, the cache surface and the render
//! configuration. One context serves one thread; pass it by `&mut`.

use quill_core::{DrawContext, OrthoCamera, RecordingContext, Size, Vec2};
use tracing::debug;

use crate::atlas::{AtlasPacker, AtlasRegion};
use crate::config::RenderConfig;
use crate::error::Result;

/// An offscreen surface that shapes are rendered into
pub trait CacheSurface: DrawContext {
    /// Current size in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Reallocate at a new size; previous contents may be lost
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Clear all contents to transparent
    fn clear(&mut self);
}

impl CacheSurface for RecordingContext {
    fn dimensions(&self) -> (u32, u32) {
        let viewport = self.viewport();
        (viewport.width as u32, viewport.height as u32)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.set_viewport(Size::new(width as f32, height as f32));
        Ok(())
    }

    fn clear(&mut self) {
        RecordingContext::clear(self);
    }
}

/// Shared state for rendering shapes into the cache
pub struct RenderContext<S: CacheSurface> {
    pub(crate) config: RenderConfig,
    pub(crate) ortho: OrthoCamera,
    pub(crate) atlas: AtlasPacker,
    pub(crate) surface: S,
}

impl<S: CacheSurface> RenderContext<S> {
    /// Validate `config` and size `surface` for use as the cache
    pub fn init(config: RenderConfig, mut surface: S) -> Result<Self> {
        config.validate()?;

        let size = config.initial_cache_size;
        surface.resize(size, size)?;
        surface.clear();

        let atlas = AtlasPacker::new(
            size,
            config.max_cache_size,
            Vec2::new(config.cache_padding[0], config.cache_padding[1]),
        );
        debug!(size, max = config.max_cache_size, "render context initialized");

        Ok(Self {
            config,
            ortho: OrthoCamera::default(),
            atlas,
            surface,
        })
    }

    pub fn with_ortho_camera(mut self, camera: OrthoCamera) -> Self {
        self.ortho = camera;
        self
    }

    /// Tear down the context and hand back the cache surface
    pub fn shutdown(self) -> S {
        debug!("render context shut down");
        self.surface
    }

    /// Rewind the atlas and clear the cache for a new frame
    pub fn reset_frame(&mut self) {
        self.atlas.reset_frame();
        self.surface.clear();
    }

    pub fn cache_surface(&self) -> &S {
        &self.surface
    }

    pub fn cache_surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn atlas(&self) -> &AtlasPacker {
        &self.atlas
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn ortho_camera(&self) -> &OrthoCamera {
        &self.ortho
    }

    pub fn set_ortho_camera(&mut self, camera: OrthoCamera) {
        self.ortho = camera;
    }

    /// Reserve a cache cell, resizing the surface if the atlas grew
    pub fn reserve(&mut self, size: Size) -> Result<AtlasRegion> {
        let before = self.atlas.dimensions();
        let region = self.atlas.reserve(size);
        let (width, height) = self.atlas.dimensions();
        if (width, height) != before || self.surface.dimensions() != (width, height) {
            self.surface.resize(width, height)?;
        }
        Ok(region)
    }

    /// Advance the atlas past a drawn cell
    pub(crate) fn finish_cell(&mut self, region: &AtlasRegion) {
        let padding = self.atlas.padding();
        self.atlas.advance_x(region.width + padding.x);
        self.atlas.note_row_height(region.height);
    }
}
