//! Configuration system

use crate::foundation::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Engine-wide settings: window, scripts location, font and dialog layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Directory scanned for scene scripts
    pub scripts_dir: PathBuf,
    /// Font file used when a scene's font fails to load
    pub fallback_font: PathBuf,
    /// Dialog font size in pixels
    pub font_size: f32,
    /// Seconds per character at normal reveal speed
    pub normal_char_delay: f32,
    /// Seconds per character at fast reveal speed
    pub fast_char_delay: f32,
    /// Seconds after full reveal before advancement unlocks
    pub advance_cooldown: f32,
    /// Dialog layout metrics
    pub dialog: DialogLayout,
}

/// Fixed chrome layout for the dialog box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogLayout {
    /// Dialog backdrop position (top-left, pixels)
    pub box_position: [f32; 2],
    /// Dialog backdrop size
    pub box_size: [f32; 2],
    /// Pen origin of the first text row (baseline)
    pub text_origin: [f32; 2],
    /// Maximum rendered line width in pixels
    pub max_line_width: f32,
    /// Vertical distance between rows
    pub line_height: f32,
    /// Speaker name box position (top-left, pixels)
    pub name_position: [f32; 2],
    /// Speaker name box height
    pub name_height: f32,
    /// Horizontal padding inside the name box
    pub name_padding: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            scripts_dir: PathBuf::from("assets/scripts"),
            fallback_font: PathBuf::from("assets/fonts/default.ttf"),
            font_size: 24.0,
            normal_char_delay: 0.05,
            fast_char_delay: 0.01,
            advance_cooldown: 0.2,
            dialog: DialogLayout::default(),
        }
    }
}

impl Default for DialogLayout {
    fn default() -> Self {
        Self {
            box_position: [120.0, 530.0],
            box_size: [1040.0, 150.0],
            text_origin: [140.0, 560.0],
            max_line_width: 980.0,
            line_height: 30.0,
            name_position: [140.0, 490.0],
            name_height: 40.0,
            name_padding: 20.0,
        }
    }
}

impl DialogLayout {
    /// Dialog backdrop rectangle
    pub fn box_rect(&self) -> Rect {
        Rect::new(
            self.box_position[0],
            self.box_position[1],
            self.box_size[0],
            self.box_size[1],
        )
    }

    /// Baseline origin of the first text row
    pub fn text_origin(&self) -> Vec2 {
        Vec2::new(self.text_origin[0], self.text_origin[1])
    }

    /// Top-left corner of the speaker name box
    pub fn name_position(&self) -> Vec2 {
        Vec2::new(self.name_position[0], self.name_position[1])
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_layout_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.font_size, 24.0);
        assert_eq!(config.dialog.max_line_width, 980.0);
        assert_eq!(config.dialog.box_rect().size, Vec2::new(1040.0, 150.0));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.dialog.line_height, config.dialog.line_height);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: EngineConfig = toml::from_str("font_size = 32.0").unwrap();
        assert_eq!(parsed.font_size, 32.0);
        assert_eq!(parsed.window_width, 1280);
    }
}
