use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use itinex_itinerary::{DEFAULT_SURPRISE_LEVEL, MAX_TRIP_DAYS};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Trip length when neither `--days` nor a date range is given
    #[serde(default = "default_days")]
    pub default_days: usize,
    #[serde(default = "default_max_days")]
    pub max_days: usize,
    /// Use the hidden-gems style unless the command line says otherwise
    #[serde(default)]
    pub hidden_gems: bool,
    #[serde(default = "default_surprise_level")]
    pub surprise_level: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_days: default_days(),
            max_days: default_max_days(),
            hidden_gems: false,
            surprise_level: default_surprise_level(),
        }
    }
}

fn default_days() -> usize {
    3
}

fn default_max_days() -> usize {
    MAX_TRIP_DAYS
}

fn default_surprise_level() -> f64 {
    DEFAULT_SURPRISE_LEVEL
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ITINEX__PLANNER__DEFAULT_DAYS, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("planner.default_days", default_days() as i64)?
            .set_default("planner.max_days", default_max_days() as i64)?
            .set_default("planner.hidden_gems", false)?
            .set_default("planner.surprise_level", default_surprise_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ITINEX")
                .separator("__")
                .try_parsing(true),
        );

        // RUST_LOG-style shortcut
        if let Ok(level) = env::var("LOG_LEVEL") {
            builder = builder.set_override("logging.level", level)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.planner.max_days < 1 || self.planner.max_days > MAX_TRIP_DAYS {
            return Err(format!(
                "Planner max_days must be between 1 and {MAX_TRIP_DAYS}"
            ));
        }
        if self.planner.default_days < 1 || self.planner.default_days > self.planner.max_days {
            return Err("Planner default_days must be between 1 and max_days".to_string());
        }
        if !(0.0..=1.0).contains(&self.planner.surprise_level) {
            return Err("Planner surprise_level must be between 0.0 and 1.0".to_string());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err("Logging format must be either 'pretty' or 'json'".to_string());
        }
        Ok(())
    }
}
