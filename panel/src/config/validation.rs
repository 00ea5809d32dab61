use super::PanelConfig;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid engine.debounce_rate_ms: {configured} (limit: {limit})")]
    DebounceRate { configured: u64, limit: u64 },
    #[error("Invalid tick_interval_ms: {configured} (min: {min_limit}, max: {max_limit})")]
    TickInterval {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid engine.label_format: '{configured}'")]
    LabelFormat { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::DebounceRate { configured, limit } => {
                format!(
                    "Debounce rate too high!\n\n\
                    Your configured value: {configured} ms\n\
                    Maximum: {limit} ms\n\n\
                    Please update debounce_rate_ms in the [engine] section of panel.toml."
                )
            }
            ConfigValidationError::TickInterval {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Tick interval out of range!\n\n\
                    Your configured value: {configured} ms\n\
                    Valid range: {min_limit} - {max_limit} ms\n\n\
                    Please update tick_interval_ms in panel.toml to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::LabelFormat { configured } => {
                format!(
                    "Unsupported label format: '{configured}'\n\n\
                    Accepted values: 'path' or 'startCase'.\n\n\
                    Please update label_format in the [engine] section of panel.toml."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<PanelConfig>),
    LoadError(String),
    DeserializeError(String),
}
