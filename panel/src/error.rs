use engine::EngineError;
use std::fmt::Display;

/// Panel-wide error types.
///
/// Errors raised while handling an editor command are reported and the
/// command loop keeps running. Errors raised during startup end the process.
///
/// # Error Categories
///
/// - [`Config`] - configuration loading and validation
/// - [`Io`] - stdin/stdout and file access
/// - [`Payload`] - host payload files that are not valid JSON of the expected shape
/// - [`Engine`] - operations rejected by the theme engine
/// - [`Command`] - editor command lines that cannot be parsed
///
/// # Examples
///
/// ```no_run
/// use theme_panel::error::{AppError, AppResult};
///
/// fn require_object(raw: &str) -> AppResult<serde_json::Value> {
///     let value: serde_json::Value = serde_json::from_str(raw)?;
///     if !value.is_object() {
///         return Err(AppError::Payload("expected a JSON object".to_string()));
///     }
///     Ok(value)
/// }
/// ```
///
/// [`Config`]: AppError::Config
/// [`Io`]: AppError::Io
/// [`Payload`]: AppError::Payload
/// [`Engine`]: AppError::Engine
/// [`Command`]: AppError::Command
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration loading and validation errors.
    ///
    /// Fatal at startup; the process exits with the user message printed.
    Config(String),

    /// File system and terminal I/O failures
    Io(String),

    /// Malformed host payloads
    Payload(String),

    /// Engine operation failures.
    ///
    /// The engine leaves its state untouched when it rejects an operation, so
    /// these are always recoverable.
    Engine(EngineError),

    /// Unparseable editor command lines
    Command(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
            AppError::Payload(msg) => write!(f, "Payload Error: {msg}"),
            AppError::Engine(err) => write!(f, "Engine Error: {err}"),
            AppError::Command(msg) => write!(f, "Command Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Engine(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Payload(err.to_string())
    }
}

/// Result type alias for panel operations
pub type AppResult<T> = Result<T, AppError>;

/// Log an error and show it on stderr without interrupting the session
pub fn report_error(error: &AppError) {
    match error {
        AppError::Command(_) => log::warn!("{error}"),
        _ => log::error!("{error}"),
    }
    eprintln!("{error}");
}
