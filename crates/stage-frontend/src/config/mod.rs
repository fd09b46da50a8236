//! Application configuration module
//!
//! Editor behaviour (video cap, cleanup cadence, drag sensitivity, memory
//! budget) and UI preferences, persisted as RON.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use serde::{Deserialize, Serialize};
use stage_editor::{EditorSettings, PreviewMode};

/// UI theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

impl UiTheme {
    pub fn visuals(self) -> egui::Visuals {
        match self {
            UiTheme::Dark => egui::Visuals::dark(),
            UiTheme::Light => egui::Visuals::light(),
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: UiTheme,
    /// Font size multiplier
    pub font_size: f32,
    /// Draw the ground grid
    pub show_grid: bool,
    pub show_resource_monitor: bool,
    /// Video preview mode at startup
    pub preview_mode: PreviewMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            font_size: 1.0,
            show_grid: true,
            show_resource_monitor: true,
            preview_mode: PreviewMode::Live,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_has_current_version() {
        let config = AppConfig::new();
        assert_eq!(config.version, AppConfig::CURRENT_VERSION);
        assert_eq!(config.editor.max_concurrent_videos, 5);
        assert!(config.ui.show_grid);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = ron::from_str("(version: 1, ui: (theme: Light))").unwrap();
        assert_eq!(config.ui.theme, UiTheme::Light);
        assert_eq!(config.ui.font_size, 1.0);
        assert_eq!(config.editor, EditorSettings::default());
    }
}
