//! Configuration for the reach-metrics pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters of the trial metrics engine.
///
/// The target starts at `-travel_px / 2` and ends at `+travel_px / 2`;
/// the ideal motion begins at the per-trial delay `tau` and lasts
/// `motion_duration_s` seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Total travel distance of the target in pixels
    pub travel_px: f64,
    /// Half-width of the truth-centered variance windows in milliseconds
    pub poswin_ms: f64,
    /// Onset threshold margin above the start position in pixels (position detection)
    pub start_margin_px: f64,
    /// Offset threshold margin below the goal position in pixels (position detection)
    pub end_margin_px: f64,
    /// Ideal motion duration in seconds; truth windows center on tau and tau + T
    pub motion_duration_s: f64,
    /// Velocity threshold for onset detection in px/s
    pub v_start: f64,
    /// Velocity threshold for offset detection in px/s
    pub v_stop: f64,
    /// Minimum sustained duration for onset detection in milliseconds
    pub hold_start_ms: f64,
    /// Minimum sustained duration for offset detection in milliseconds
    pub hold_stop_ms: f64,
    /// Detect onset/offset from velocity instead of position thresholds
    pub use_velocity: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            travel_px: 400.0,
            poswin_ms: 100.0,
            start_margin_px: 20.0,
            end_margin_px: 20.0,
            motion_duration_s: 1.0,
            v_start: 50.0,
            v_stop: 20.0,
            hold_start_ms: 80.0,
            hold_stop_ms: 100.0,
            use_velocity: true,
        }
    }
}

/// Parameters of the synthetic session generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Mean onset delay in seconds
    pub mean_delay_s: f64,
    /// Standard deviation of the onset delay in seconds
    pub delay_sd_s: f64,
    /// Trials generated per condition
    pub trials_per_condition: u32,
    /// Recording time kept after the ideal motion ends, in seconds
    pub post_motion_s: f64,
    /// Frame rate of the simulated recording in Hz
    pub sample_rate_hz: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mean_delay_s: 0.5,
            delay_sd_s: 0.12,
            trials_per_condition: 5,
            post_motion_s: 0.3,
            sample_rate_hz: 60.0,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Metrics engine parameters
    pub analysis: AnalysisConfig,
    /// Synthetic session parameters
    pub simulation: SimulationConfig,
    /// Directory where metrics tables are written
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            simulation: SimulationConfig::default(),
            output_dir: PathBuf::from("analysis"),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reach-metrics")
            .join("config.json")
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
