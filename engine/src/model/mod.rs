use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Theme name used when the host supplies a single theme instead of a list
pub const DEFAULT_THEME_NAME: &str = "__default";

/// Nested key/value tree being edited. Key insertion order is preserved.
pub type Theme = Map<String, Value>;

/// A theme together with its unique display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeObject {
    pub name: String,
    pub theme: Theme,
}

impl ThemeObject {
    pub fn new(name: impl Into<String>, theme: Theme) -> Self {
        Self {
            name: name.into(),
            theme,
        }
    }

    /// Wrap a lone theme under the [`DEFAULT_THEME_NAME`] sentinel
    pub fn default_named(theme: Theme) -> Self {
        Self::new(DEFAULT_THEME_NAME, theme)
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_THEME_NAME
    }
}

/// Ordered list of named themes; the first entry is the default selection
pub type ThemesArray = Vec<ThemeObject>;

/// Lifecycle of the engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineStatus {
    /// Nothing ingested yet, or the surface was torn down
    #[default]
    Uninitialized,
    /// Themes and an active theme are populated
    Ready,
}
