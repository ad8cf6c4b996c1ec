//! Render configuration
//!
//! Tunables for the cache atlas and the progressive renderer. Every field has
//! a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! initial_cache_size = 1024
//! max_cache_size = 4096
//! cache_padding = [3.0, 3.0]
//! fade_in_start = 0.8
//! group_lag = 2.0
//! default_stroke_width = 5.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SvgError};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Edge length of the cache surface at init, in pixels
    #[serde(default = "default_initial_cache_size")]
    pub initial_cache_size: u32,
    /// Largest edge the cache surface may grow to
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: u32,
    /// Gap kept between packed cells and rows
    #[serde(default = "default_cache_padding")]
    pub cache_padding: [f32; 2],
    /// Point in `t` where the fill starts fading in
    #[serde(default = "default_fade_in_start")]
    pub fade_in_start: f32,
    /// How many members a group staggers across
    #[serde(default = "default_group_lag")]
    pub group_lag: f32,
    /// Stroke width used when the object sets none
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: f32,
    /// Debug box line width; the padding width when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_stroke_width: Option<f32>,
}

fn default_initial_cache_size() -> u32 {
    1024
}

fn default_max_cache_size() -> u32 {
    4096
}

fn default_cache_padding() -> [f32; 2] {
    [3.0, 3.0]
}

fn default_fade_in_start() -> f32 {
    0.8
}

fn default_group_lag() -> f32 {
    2.0
}

fn default_stroke_width() -> f32 {
    5.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            initial_cache_size: default_initial_cache_size(),
            max_cache_size: default_max_cache_size(),
            cache_padding: default_cache_padding(),
            fade_in_start: default_fade_in_start(),
            group_lag: default_group_lag(),
            default_stroke_width: default_stroke_width(),
            debug_stroke_width: None,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RenderConfig =
            toml::from_str(content).map_err(|e| SvgError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SvgError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_cache_size == 0 {
            return Err(SvgError::Config("initial_cache_size must be > 0".into()));
        }
        if self.max_cache_size < self.initial_cache_size {
            return Err(SvgError::Config(format!(
                "max_cache_size ({}) is smaller than initial_cache_size ({})",
                self.max_cache_size, self.initial_cache_size
            )));
        }
        if !(0.0..1.0).contains(&self.fade_in_start) {
            return Err(SvgError::Config(format!(
                "fade_in_start must be in [0, 1), got {}",
                self.fade_in_start
            )));
        }
        if self.group_lag < 1.0 {
            return Err(SvgError::Config(format!(
                "group_lag must be >= 1, got {}",
                self.group_lag
            )));
        }
        Ok(())
    }

    /// Width of the fade-in window at the end of the animation
    pub fn fade_in_span(&self) -> f32 {
        1.0 - self.fade_in_start
    }

    pub fn debug_stroke_width(&self) -> f32 {
        self.debug_stroke_width.unwrap_or(self.cache_padding[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.cache_padding, [3.0, 3.0]);
        assert_eq!(config.debug_stroke_width(), 3.0);
    }

    #[test]
    fn test_partial_override() {
        let config = RenderConfig::from_toml_str("group_lag = 3.0\nmax_cache_size = 2048").unwrap();
        assert_eq!(config.group_lag, 3.0);
        assert_eq!(config.max_cache_size, 2048);
        assert_eq!(config.initial_cache_size, 1024);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = RenderConfig {
            fade_in_start: 0.5,
            ..RenderConfig::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(RenderConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(RenderConfig::from_toml_str("initial_cache_size = 0").is_err());
        assert!(RenderConfig::from_toml_str("max_cache_size = 512").is_err());
        assert!(RenderConfig::from_toml_str("fade_in_start = 1.5").is_err());
        assert!(RenderConfig::from_toml_str("group_lag = \"two\"").is_err());
    }
}
