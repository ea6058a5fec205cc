use serde::Deserialize;

use crate::color::{DEFAULT_PALETTE, Palette};
use crate::controller::DEFAULT_LINE_WIDTH;
use crate::error::ConfigError;

/// Environment variable naming a JSON config file (native only)
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct AppConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub line_width: f32,
    /// Color buttons, as `#rrggbb` strings
    pub palette: Vec<String>,
    pub texture_cache_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            line_width: DEFAULT_LINE_WIDTH,
            palette: DEFAULT_PALETTE.iter().map(|s| (*s).to_owned()).collect(),
            texture_cache_size: 8,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.line_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "line width must be positive, got {}",
                self.line_width
            )));
        }
        Ok(())
    }

    /// Config from `SKETCHPAD_CONFIG` if set, defaults otherwise.
    ///
    /// A broken config file is logged and ignored.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            let path = std::path::PathBuf::from(path);
            match Self::from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(err) => log::warn!("Ignoring config {}: {}", path.display(), err),
            }
        }
        Self::default()
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2(self.canvas_width, self.canvas_height)
    }

    pub fn palette(&self) -> Palette {
        Palette::from_hex_list(&self.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r##"{ "canvas_width": 320, "palette": ["#112233"] }"##).unwrap();
        assert_eq!(config.canvas_width, 320.0);
        assert_eq!(config.canvas_height, AppConfig::default().canvas_height);
        assert_eq!(config.palette().swatches().len(), 1);
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let err = AppConfig::from_json(r#"{ "canvas_height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = AppConfig::from_json(r#"{ "line_width": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(AppConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_default_palette_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.palette().swatches().len(), DEFAULT_PALETTE.len());
    }
}
