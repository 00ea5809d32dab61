use config::{Config, Environment, File, FileFormat};
use engine::config::{ConfigPatch, LabelFormat, LabelFormatInput};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

pub mod limits;
pub mod validation;

pub use validation::{ConfigLoadResult, ConfigValidationError};

use limits::*;

/// Embedded defaults, always the lowest-priority source
pub const DEFAULT_CONFIG: &str = include_str!("../../panel.default.toml");

/// User file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "panel.toml";

/// Prefix of environment overrides, e.g. `PANEL__LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "PANEL";

/// Load the panel configuration.
///
/// Sources in increasing priority: embedded defaults, the user file
/// (`user_file` when given, otherwise an optional `panel.toml`), then
/// `PANEL__*` environment variables. A `.env` file is read first.
pub fn load_config(user_file: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let file_source = match user_file {
        Some(path) => File::from(path),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let config = match Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(file_source)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your panel.toml file and PANEL__ environment variables."
            ));
        }
    };

    match config.try_deserialize::<PanelConfig>() {
        Ok(panel_config) => ConfigLoadResult::Success(Box::new(panel_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Main panel configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelConfig {
    tick_interval_ms: Option<u64>,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    engine: EngineSettings,
}

impl PanelConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Some(rate) = self.engine.debounce_rate_ms {
            if rate > MAX_DEBOUNCE_RATE_MS {
                errors.push(ConfigValidationError::DebounceRate {
                    configured: rate,
                    limit: MAX_DEBOUNCE_RATE_MS,
                });
            }
        }

        let tick = self.tick_interval_ms();
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&tick) {
            errors.push(ConfigValidationError::TickInterval {
                configured: tick,
                min_limit: MIN_TICK_INTERVAL_MS,
                max_limit: MAX_TICK_INTERVAL_MS,
            });
        }

        if let Some(format) = self.engine.label_format.as_deref() {
            if !SUPPORTED_LABEL_FORMATS.contains(&format) {
                errors.push(ConfigValidationError::LabelFormat {
                    configured: format.to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.unwrap_or(50)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms())
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn engine(&self) -> &EngineSettings {
        &self.engine
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

/// Engine behaviour configured on the panel side.
///
/// These values form the base of every payload's `config`; keys sent by the
/// host win.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    label_format: Option<String>,
    debounce: Option<bool>,
    debounce_rate_ms: Option<u64>,
    show_code: Option<bool>,
}

impl EngineSettings {
    pub fn to_patch(&self) -> ConfigPatch {
        ConfigPatch {
            label_format: self.label_format.as_deref().map(label_format_input),
            debounce: self.debounce,
            debounce_rate: self.debounce_rate_ms,
            show_code: self.show_code,
        }
    }
}

fn label_format_input(raw: &str) -> LabelFormatInput {
    match raw {
        "path" => LabelFormat::Path.into(),
        "startCase" => LabelFormat::StartCase.into(),
        other => LabelFormatInput::Invalid(Value::String(other.to_string())),
    }
}
