//! Behavioural configuration supplied by the host.

use crate::errors::ConfigWarning;
use crate::path::ThemePath;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: bool = true;
pub const DEFAULT_DEBOUNCE_RATE_MS: u64 = 500;
pub const DEFAULT_SHOW_CODE: bool = true;

/// Host-provided label function
pub type LabelFormatter = Arc<dyn Fn(&ThemePath) -> String + Send + Sync>;

/// How field labels are derived from paths
#[derive(Clone, Default)]
pub enum LabelFormat {
    /// The dotted path itself, e.g. `colors.primaryDark`
    Path,
    /// Start case of the dotted path, e.g. `Colors Primary Dark`
    #[default]
    StartCase,
    Custom(LabelFormatter),
}

impl LabelFormat {
    pub fn custom<F>(formatter: F) -> Self
    where
        F: Fn(&ThemePath) -> String + Send + Sync + 'static,
    {
        LabelFormat::Custom(Arc::new(formatter))
    }

    pub fn label(&self, path: &ThemePath) -> String {
        match self {
            LabelFormat::Path => path.to_string(),
            LabelFormat::StartCase => start_case(&path.to_string()),
            LabelFormat::Custom(formatter) => formatter(path),
        }
    }
}

impl fmt::Debug for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFormat::Path => write!(f, "Path"),
            LabelFormat::StartCase => write!(f, "StartCase"),
            LabelFormat::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Label format as received from the host, before validation
#[derive(Debug, Clone)]
pub enum LabelFormatInput {
    Format(LabelFormat),
    /// Anything other than `"path"`, `"startCase"` or a formatter
    Invalid(Value),
}

impl From<LabelFormat> for LabelFormatInput {
    fn from(format: LabelFormat) -> Self {
        LabelFormatInput::Format(format)
    }
}

impl<'de> Deserialize<'de> for LabelFormatInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            Some("path") => LabelFormatInput::Format(LabelFormat::Path),
            Some("startCase") => LabelFormatInput::Format(LabelFormat::StartCase),
            _ => LabelFormatInput::Invalid(raw),
        })
    }
}

/// Effective engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    label_format: LabelFormat,
    debounce: bool,
    debounce_rate_ms: u64,
    show_code: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            label_format: LabelFormat::default(),
            debounce: DEFAULT_DEBOUNCE,
            debounce_rate_ms: DEFAULT_DEBOUNCE_RATE_MS,
            show_code: DEFAULT_SHOW_CODE,
        }
    }
}

impl EngineConfig {
    pub fn label_format(&self) -> &LabelFormat {
        &self.label_format
    }

    pub fn debounce(&self) -> bool {
        self.debounce
    }

    /// Quiet period before an emission; only meaningful with [`debounce`](Self::debounce)
    pub fn debounce_rate(&self) -> Duration {
        Duration::from_millis(self.debounce_rate_ms)
    }

    pub fn debounce_rate_ms(&self) -> u64 {
        self.debounce_rate_ms
    }

    pub fn show_code(&self) -> bool {
        self.show_code
    }

    pub fn label(&self, path: &ThemePath) -> String {
        self.label_format.label(path)
    }

    /// Shallow merge of `patch` over this configuration.
    ///
    /// Host keys win. An invalid label format is reported and the current one
    /// is kept.
    pub fn merged(&self, patch: &ConfigPatch) -> (EngineConfig, Vec<ConfigWarning>) {
        let mut next = self.clone();
        let mut warnings = Vec::new();

        match &patch.label_format {
            Some(LabelFormatInput::Format(format)) => next.label_format = format.clone(),
            Some(LabelFormatInput::Invalid(raw)) => {
                warnings.push(ConfigWarning::InvalidLabelFormat(raw.to_string()));
            }
            None => {}
        }
        if let Some(debounce) = patch.debounce {
            next.debounce = debounce;
        }
        if let Some(rate) = patch.debounce_rate {
            next.debounce_rate_ms = rate;
        }
        if let Some(show_code) = patch.show_code {
            next.show_code = show_code;
        }

        (next, warnings)
    }
}

/// Partial configuration carried by a host payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub label_format: Option<LabelFormatInput>,
    pub debounce: Option<bool>,
    pub debounce_rate: Option<u64>,
    pub show_code: Option<bool>,
}

impl ConfigPatch {
    /// Layer `other` over `self`; keys present in `other` win
    pub fn overlay(mut self, other: ConfigPatch) -> ConfigPatch {
        if other.label_format.is_some() {
            self.label_format = other.label_format;
        }
        self.debounce = other.debounce.or(self.debounce);
        self.debounce_rate = other.debounce_rate.or(self.debounce_rate);
        self.show_code = other.show_code.or(self.show_code);
        self
    }
}

/// Start case of `input`: words split on separators, case changes and digit
/// boundaries, each capitalised and joined by single spaces.
pub fn start_case(input: &str) -> String {
    words(input)
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    for token in input.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = token.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
                let next = chars.get(i + 1).copied();
                let boundary = (prev.is_lowercase() && c.is_uppercase())
                    || (prev.is_alphabetic() && c.is_ascii_digit())
                    || (prev.is_ascii_digit() && c.is_alphabetic())
                    || (prev.is_uppercase()
                        && c.is_uppercase()
                        && next.is_some_and(char::is_lowercase));
                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}
