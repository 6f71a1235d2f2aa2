// ABOUTME: Layout configuration handling.
// ABOUTME: Loads and saves pane layout policy from a TOML config file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::geometry::{Axis, Size};

/// Pane layout policy: minimum pane size, resize step and split defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Smallest width a pane may be given by a split or a resize
    pub min_pane_width: f32,

    /// Smallest height a pane may be given by a split or a resize
    pub min_pane_height: f32,

    /// How far one resize step moves a separator, as a fraction of the parent
    pub resize_step: f32,

    /// Share of space given to the existing pane when splitting
    pub default_split_ratio: f32,

    /// Give focus to the newly created pane after a split
    pub focus_new_pane: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_pane_width: 16.0,
            min_pane_height: 8.0,
            resize_step: 0.05,
            default_split_ratio: 0.5,
            focus_new_pane: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl LayoutConfig {
    /// Minimum pane size as a `Size`
    pub fn min_size(&self) -> Size {
        Size::new(self.min_pane_width, self.min_pane_height)
    }

    /// Minimum pane length along an axis
    pub fn min_along(&self, axis: Axis) -> f32 {
        self.min_size().along(axis)
    }

    /// Replace out-of-range values with their defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_pane_width.is_finite() && self.min_pane_width >= 0.0) {
            self.min_pane_width = defaults.min_pane_width;
        }
        if !(self.min_pane_height.is_finite() && self.min_pane_height >= 0.0) {
            self.min_pane_height = defaults.min_pane_height;
        }
        if !(self.resize_step > 0.0 && self.resize_step < 1.0) {
            self.resize_step = defaults.resize_step;
        }
        if !(self.default_split_ratio > 0.0 && self.default_split_ratio < 1.0) {
            self.default_split_ratio = defaults.default_split_ratio;
        }
        self
    }

    /// Get the default config file path (~/.config/splitterm/layout.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("splitterm").join("layout.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config.validated())
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }
}
