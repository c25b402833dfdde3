//! Start-up configuration for the board.
//!
//! Defines the widget set the application binds to: swatches, widths,
//! timer presets and roulette pacing. Everything has a default, so an
//! empty JSON object is a valid config file.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::history;
use crate::surface;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "CLASSROOM_BOARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Canvas size before the first layout pass
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub history_capacity: usize,
    /// JPEG quality for downloads, 1..=100
    pub jpeg_quality: u8,
    pub palette: Vec<Color32>,
    pub widths: Vec<u32>,
    pub default_color: Color32,
    pub default_width: u32,
    pub timer: TimerConfig,
    pub roulette: RouletteConfig,
    /// Where downloads are written on native builds
    pub download_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Preset durations in seconds; the first is selected at start-up
    pub presets: Vec<u32>,
    /// Remaining time at or below which the display turns to warning colours
    pub warning_ms: u64,
    pub blink_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouletteConfig {
    /// Random topics flashed before the final pick
    pub spin_ticks: u32,
    pub spin_interval_ms: u64,
    /// Plain text file with one topic per line, read when nothing is stored
    pub topics_file: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            history_capacity: history::DEFAULT_CAPACITY,
            jpeg_quality: surface::DEFAULT_JPEG_QUALITY,
            palette: vec![
                Color32::BLACK,
                Color32::from_rgb(0xE5, 0x39, 0x35),
                Color32::from_rgb(0x1E, 0x88, 0xE5),
                Color32::from_rgb(0x43, 0xA0, 0x47),
                Color32::from_rgb(0xFB, 0x8C, 0x00),
                Color32::from_rgb(0x8E, 0x24, 0xAA),
            ],
            widths: vec![2, 5, 10],
            default_color: Color32::BLACK,
            default_width: 2,
            timer: TimerConfig::default(),
            roulette: RouletteConfig::default(),
            download_dir: ".".to_owned(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            presets: vec![10, 30, 60, 180],
            warning_ms: 10_000,
            blink_interval_ms: 500,
        }
    }
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            spin_ticks: 20,
            spin_interval_ms: 100,
            topics_file: Some("roulette.txt".to_owned()),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file named by `CLASSROOM_BOARD_CONFIG`, or returns defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                log::info!("Loading config from {}", path);
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Self::from_json(&json)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::default())
    }

    /// Rejects configs the UI could not bind to
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_owned()));

        if self.palette.is_empty() {
            return invalid("palette needs at least one colour");
        }
        if self.widths.is_empty() || self.widths.contains(&0) {
            return invalid("widths must be a non-empty list of positive values");
        }
        if self.default_width == 0 {
            return invalid("default_width must be positive");
        }
        if self.history_capacity == 0 {
            return invalid("history_capacity must be positive");
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return invalid("jpeg_quality must be within 1..=100");
        }
        if self.timer.presets.is_empty() || self.timer.presets.contains(&0) {
            return invalid("timer presets must be a non-empty list of positive seconds");
        }
        if self.timer.blink_interval_ms == 0 {
            return invalid("timer blink_interval_ms must be positive");
        }
        if self.roulette.spin_interval_ms == 0 {
            return invalid("roulette spin_interval_ms must be positive");
        }
        Ok(())
    }
}
