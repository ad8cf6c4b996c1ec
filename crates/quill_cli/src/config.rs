//! Quill configuration file handling
//!
//! `quill.toml` holds the render tunables under `[render]` and the paint used
//! for demo shapes under `[style]`. Every key is optional.

use anyhow::{Context, Result};
use quill_core::Color;
use quill_svg::RenderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE: &str = "quill.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Paint applied to demo shapes
#[derive(Debug, Deserialize, Serialize)]
pub struct StyleConfig {
    /// Fill color as `0xRRGGBB`
    #[serde(default = "default_fill")]
    pub fill: u32,
    /// Stroke color as `0xRRGGBB`
    #[serde(default = "default_stroke")]
    pub stroke: u32,
    /// Stroke width; 0 uses the render default
    #[serde(default)]
    pub stroke_width: f32,
    /// Scale from shape units to cache pixels
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_fill() -> u32 {
    0x4a90d9
}

fn default_stroke() -> u32 {
    0x1b1b1b
}

fn default_scale() -> f32 {
    2.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill: default_fill(),
            stroke: default_stroke(),
            stroke_width: 0.0,
            scale: default_scale(),
        }
    }
}

impl StyleConfig {
    pub fn fill_color(&self) -> Color {
        Color::from_hex(self.fill)
    }

    pub fn stroke_color(&self) -> Color {
        Color::from_hex(self.stroke)
    }
}

impl QuillConfig {
    /// Load `path`, which must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: QuillConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .render
            .validate()
            .with_context(|| format!("Invalid render settings in {}", path.display()))?;

        Ok(config)
    }

    /// Load `quill.toml` from `dir`, or the defaults when there is none
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
