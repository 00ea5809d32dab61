use thiserror::Error;

/// Faults raised by engine operations.
///
/// Every variant is local to the operation that produced it: the engine state is
/// left exactly as it was before the call, and callers (normally the editor
/// surface) are expected to drop the offending action rather than abort.
///
/// # Error Categories
///
/// ## Path Errors
/// - [`InvalidPath`] - a path with no segments
/// - [`PathConflict`] - a segment that cannot be descended into
///
/// ## Registry Errors
/// - [`UnknownField`] - an edit targeting a path the active registry does not know
/// - [`NonScalarValue`] - an edit writing an object or array over a leaf
///
/// ## Ingestion Errors
/// - [`EmptyThemeList`] - a multi-theme payload without any theme
/// - [`DuplicateThemeName`] - two themes sharing a name
///
/// ## Runtime Errors
/// - [`RuntimeUnavailable`] - no tokio runtime to drive the debounce timer
///
/// # Examples
///
/// ```no_run
/// use engine::errors::EngineError;
///
/// fn describe(error: &EngineError) -> &'static str {
///     match error {
///         EngineError::InvalidPath | EngineError::PathConflict { .. } => "edit ignored",
///         EngineError::UnknownField { .. } => "field is not editable",
///         EngineError::NonScalarValue { .. } => "value must be a scalar",
///         _ => "payload rejected",
///     }
/// }
/// ```
///
/// [`InvalidPath`]: EngineError::InvalidPath
/// [`PathConflict`]: EngineError::PathConflict
/// [`UnknownField`]: EngineError::UnknownField
/// [`NonScalarValue`]: EngineError::NonScalarValue
/// [`EmptyThemeList`]: EngineError::EmptyThemeList
/// [`DuplicateThemeName`]: EngineError::DuplicateThemeName
/// [`RuntimeUnavailable`]: EngineError::RuntimeUnavailable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid path: a path needs at least one segment")]
    InvalidPath,

    #[error("Path conflict at '{path}': segment '{segment}' cannot be descended into")]
    PathConflict { path: String, segment: String },

    #[error("Unknown field '{path}' for theme '{theme}'")]
    UnknownField { theme: String, path: String },

    #[error("Field '{path}' only takes scalar values, got an object or array")]
    NonScalarValue { path: String },

    #[error("Options payload contains an empty theme list")]
    EmptyThemeList,

    #[error("Duplicate theme name '{0}' in options payload")]
    DuplicateThemeName(String),

    #[error("No tokio runtime available to drive the debounce timer")]
    RuntimeUnavailable,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Non-fatal configuration problems found while ingesting host options.
///
/// Warnings never abort ingestion. The offending value is ignored and the
/// previously held setting stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error(
        "config.labelFormat needs to be one of 'path', 'startCase' or a custom formatter, got {0}"
    )]
    InvalidLabelFormat(String),
}

impl ConfigWarning {
    pub fn user_message(&self) -> String {
        match self {
            ConfigWarning::InvalidLabelFormat(value) => {
                format!(
                    "Unsupported label format: {value}\n\n\
                    Accepted values: 'path', 'startCase' or a custom formatter.\n\n\
                    The current label format has been kept."
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_conflict_display_names_segment() {
        let error = EngineError::PathConflict {
            path: "colors.primary.dark".to_string(),
            segment: "primary".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("colors.primary.dark"));
        assert!(message.contains("'primary'"));
    }

    #[test]
    fn test_label_format_warning_user_message() {
        let warning = ConfigWarning::InvalidLabelFormat("5".to_string());

        assert!(warning.to_string().contains("got 5"));
        assert!(warning.user_message().contains("has been kept"));
    }
}
