use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::pipeline::{CompilerConfig, WeightTable};

/// The fixed league roster used when configuration supplies none
pub const DEFAULT_ROSTER: [&str; 32] = [
    "ANA", "BOS", "BUF", "CAR", "CBJ", "CGY", "CHI", "COL", "DAL", "DET", "EDM", "FLA", "LAK",
    "MIN", "MTL", "NJD", "NSH", "NYI", "NYR", "OTT", "PHI", "PIT", "SEA", "SJS", "STL", "TBL",
    "TOR", "UTA", "VAN", "VGK", "WPG", "WSH",
];

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Teams to rank
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            ranking: RankingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Most-recent completed games folded into each team's window
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Concurrent per-team workers (small, to respect upstream rate limits)
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Scoring weight override; the standard table applies when absent
    #[serde(default)]
    pub weights: Option<WeightTable>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            workers: default_workers(),
            weights: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_roster() -> Vec<String> {
    DEFAULT_ROSTER.iter().map(|t| t.to_string()).collect()
}

fn default_window_size() -> usize {
    10
}

fn default_workers() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Override with environment variables (PUCKRANK_RANKING__WORKERS, etc.)
            .add_source(
                Environment::with_prefix("PUCKRANK")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// The effective scoring weight table
    pub fn weight_table(&self) -> WeightTable {
        self.ranking.weights.clone().unwrap_or_default()
    }

    pub fn compiler_config(&self) -> CompilerConfig {
        CompilerConfig {
            window_size: self.ranking.window_size,
            workers: self.ranking.workers,
            weights: self.weight_table(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.roster.is_empty() {
            errors.push("roster must not be empty".to_string());
        }

        if self.ranking.window_size == 0 {
            errors.push("ranking.window_size must be at least 1".to_string());
        }

        if !(1..=8).contains(&self.ranking.workers) {
            errors.push("ranking.workers must be between 1 and 8".to_string());
        }

        if let Some(weights) = &self.ranking.weights {
            if let Err(e) = weights.validate() {
                errors.push(e.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
