//! Configuration loader plus strongly typed settings structures.
//!
//! Deserializes `config.toml` (UI options and one entry per typewriter),
//! extracts the embedded default on first run, and resolves the data
//! directory (`~/.typewriter`, overridable with `TYPEWRITER_DIR`).

use crate::theme::{parse_hex_color, AppTheme, ThemePresets};
use crate::widgets::{CursorBlink, TypewriterError, TypewriterState, TypewriterTiming};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod validator;

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TYPEWRITER_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub typewriters: Vec<TypewriterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Frame pacing of the host loop
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default = "default_cursor_glyph")]
    pub cursor_glyph: String,
    #[serde(default = "default_true")]
    pub cursor_blink: bool,
    /// Hex override for the theme's link color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_color: Option<String>,
    #[serde(default = "default_true")]
    pub show_border: bool,
    #[serde(default = "default_border_style")]
    pub border_style: String,
}

/// One typewriter instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub texts: Vec<String>,
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,
    #[serde(default = "default_type_interval_ms")]
    pub type_interval_ms: u64,
    #[serde(default = "default_dwell_ms")]
    pub dwell_ms: u64,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_frame_ms() -> u64 {
    16 // ~60 FPS
}

fn default_cursor_glyph() -> String {
    " |".to_string()
}

fn default_true() -> bool {
    true
}

fn default_border_style() -> String {
    "rounded".to_string()
}

fn default_start_delay_ms() -> u64 {
    crate::widgets::typewriter::START_UP_DELAY.as_millis() as u64
}

fn default_type_interval_ms() -> u64 {
    crate::widgets::typewriter::TYPE_INTERVAL.as_millis() as u64
}

fn default_dwell_ms() -> u64 {
    crate::widgets::typewriter::DWELL_PERIOD.as_millis() as u64
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            frame_ms: default_frame_ms(),
            cursor_glyph: default_cursor_glyph(),
            cursor_blink: true,
            cursor_color: None,
            show_border: true,
            border_style: default_border_style(),
        }
    }
}

impl UiConfig {
    /// Resolve the active theme, applying the cursor color override
    pub fn theme(&self) -> AppTheme {
        let theme = ThemePresets::get(&self.theme);
        match self.cursor_color.as_deref() {
            Some(hex) => match parse_hex_color(hex) {
                Some(color) => theme.with_link_color(color),
                None => {
                    tracing::warn!("Invalid cursor_color '{}', keeping theme color", hex);
                    theme
                }
            },
            None => theme,
        }
    }

    pub fn cursor_blink(&self) -> CursorBlink {
        CursorBlink::new(self.cursor_blink)
    }
}

impl TypewriterConfig {
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            title: None,
            texts,
            start_delay_ms: default_start_delay_ms(),
            type_interval_ms: default_type_interval_ms(),
            dwell_ms: default_dwell_ms(),
        }
    }

    pub fn timing(&self) -> TypewriterTiming {
        TypewriterTiming::from_millis(self.start_delay_ms, self.type_interval_ms, self.dwell_ms)
    }

    /// Construct the (unmounted) widget state for this entry
    pub fn build(&self) -> Result<TypewriterState, TypewriterError> {
        TypewriterState::new(self.texts.clone(), self.timing())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            tracing::error!("Embedded default config is invalid: {}", e);
            Self {
                ui: UiConfig::default(),
                typewriters: Vec::new(),
            }
        })
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config")
    }

    /// Load config from a custom path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load config from the data directory, extracting defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&Self::base_dir()?)
    }

    /// Load `config.toml` from `dir`, creating it from the embedded default if missing
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::extract_defaults(dir)?;
        Self::load_from_path(&dir.join("config.toml"))
    }

    /// Write the embedded default config into `dir` (idempotent - only creates missing files)
    pub fn extract_defaults(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).context(format!("Failed to create data directory {:?}", dir))?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .context(format!("Failed to write {:?}", config_path))?;
            tracing::info!("Extracted default config to {:?}", config_path);
        }

        Ok(())
    }

    /// Replace every configured typewriter with a single one cycling `texts`
    pub fn override_texts(&mut self, texts: Vec<String>) {
        let title = self.typewriters.first().and_then(|tw| tw.title.clone());
        let mut typewriter = TypewriterConfig::new(texts);
        typewriter.title = title;
        self.typewriters = vec![typewriter];
    }

    /// Get the base typewriter directory (~/.typewriter/)
    /// Can be overridden with TYPEWRITER_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".typewriter"))
    }

}
