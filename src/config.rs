use std::path::{Path, PathBuf};

use egui::{Color32, Vec2};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::{ToolKind, ToolSettings};

/// Startup configuration. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Native canvas size in surface units
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Initial brush thickness
    pub thickness: f32,
    /// Slider bounds offered by the host UI
    pub min_thickness: f32,
    pub max_thickness: f32,
    /// Initial brush colour, sRGB
    pub color: [u8; 3],
    /// Stamp palette; the first entry is the initial glyph
    pub stamps: Vec<String>,
    pub background: [u8; 3],
    /// Edge length of exported images
    pub export_size: u32,
    pub export_file: PathBuf,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 256.0,
            canvas_height: 256.0,
            thickness: 4.0,
            min_thickness: 1.0,
            max_thickness: 40.0,
            color: [0, 0, 0],
            stamps: ["😀", "★", "❤", "☀", "☁", "⚡"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            background: [255, 255, 255],
            export_size: 1024,
            export_file: PathBuf::from("sketch.png"),
        }
    }
}

impl SketchConfig {
    /// Environment variable naming an optional JSON config file
    pub const ENV_VAR: &'static str = "EFRAME_SKETCH_CONFIG";

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by [`Self::ENV_VAR`], or use defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }

    /// Tool settings a fresh session starts with
    pub fn tool_settings(&self) -> ToolSettings {
        let [r, g, b] = self.color;
        let defaults = ToolSettings::default();
        ToolSettings {
            tool: ToolKind::Brush,
            thickness: self.thickness,
            color: Color32::from_rgb(r, g, b),
            glyph: self.stamps.first().cloned().unwrap_or(defaults.glyph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SketchConfig::from_json(r#"{ "thickness": 9.0, "color": [255, 0, 0] }"#).unwrap();
        assert_eq!(config.thickness, 9.0);
        assert_eq!(config.canvas_size(), Vec2::new(256.0, 256.0));
        assert_eq!(config.export_size, 1024);

        let settings = config.tool_settings();
        assert_eq!(settings.color, Color32::RED);
        assert_eq!(settings.glyph, "😀");
    }

    #[test]
    fn test_empty_palette_falls_back_to_default_glyph() {
        let config = SketchConfig::from_json(r#"{ "stamps": [] }"#).unwrap();
        assert_eq!(config.tool_settings().glyph, ToolSettings::default().glyph);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "canvas_width": 512.0, "export_size": 2048 }}"#).unwrap();

        let config = SketchConfig::load(file.path()).unwrap();
        assert_eq!(config.canvas_width, 512.0);
        assert_eq!(config.canvas_height, 256.0);
        assert_eq!(config.export_size, 2048);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = SketchConfig::load("/nonexistent/sketch.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = SketchConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
