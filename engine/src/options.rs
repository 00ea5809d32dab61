//! Host payload ingestion.
//!
//! The host hands over either one theme or a list of named themes, optional
//! override hints and optional configuration. [`normalize`] turns that payload
//! into the engine's internal shape in one pass; nothing is committed to engine
//! state unless the whole payload is acceptable.

use crate::components::{ComponentRegistry, Overrides, build_theme_components};
use crate::config::{ConfigPatch, EngineConfig};
use crate::errors::{ConfigWarning, EngineError, EngineResult};
use crate::model::{Theme, ThemeObject, ThemesArray};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;

/// Shape of the `theme` key in a host payload
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionsTheme {
    Multiple(ThemesArray),
    Single(Theme),
}

/// Initial payload delivered through `receiveOptions`
#[derive(Debug, Clone, Deserialize)]
pub struct Options {
    pub theme: OptionsTheme,
    #[serde(default)]
    pub overrides: Option<Overrides>,
    #[serde(default)]
    pub config: Option<ConfigPatch>,
}

impl Options {
    pub fn single(theme: Theme) -> Self {
        Self {
            theme: OptionsTheme::Single(theme),
            overrides: None,
            config: None,
        }
    }

    pub fn multiple(themes: ThemesArray) -> Self {
        Self {
            theme: OptionsTheme::Multiple(themes),
            overrides: None,
            config: None,
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_config(mut self, config: ConfigPatch) -> Self {
        self.config = Some(config);
        self
    }
}

/// Engine state derived from one payload, ready to be committed
#[derive(Debug, Clone)]
pub struct NormalizedOptions {
    /// Empty in single-theme mode
    pub themes: ThemesArray,
    pub active: ThemeObject,
    pub components: IndexMap<String, ComponentRegistry>,
    pub overrides: Overrides,
    pub config: EngineConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Validate and reshape `options` against the currently held overrides and
/// configuration.
///
/// Fails on an empty theme list or duplicate theme names. Configuration
/// problems are returned as warnings and never fail the call.
pub fn normalize(
    options: Options,
    current_overrides: &Overrides,
    current_config: &EngineConfig,
) -> EngineResult<NormalizedOptions> {
    let Options {
        theme,
        overrides,
        config,
    } = options;

    let overrides = overrides.unwrap_or_else(|| current_overrides.clone());

    let (config, warnings) = match config {
        Some(patch) => current_config.merged(&patch),
        None => (current_config.clone(), Vec::new()),
    };
    for warning in &warnings {
        log::warn!("{warning} - keeping the current value");
    }

    let (themes, active, components) = match theme {
        OptionsTheme::Multiple(themes) => {
            let Some(first) = themes.first() else {
                return Err(EngineError::EmptyThemeList);
            };
            let active = first.clone();

            let mut seen = HashSet::new();
            let mut components = IndexMap::with_capacity(themes.len());
            for object in &themes {
                if !seen.insert(object.name.as_str()) {
                    return Err(EngineError::DuplicateThemeName(object.name.clone()));
                }
                components.insert(
                    object.name.clone(),
                    build_theme_components(&object.theme, &overrides),
                );
            }
            (themes, active, components)
        }
        OptionsTheme::Single(theme) => {
            let active = ThemeObject::default_named(theme);
            let mut components = IndexMap::with_capacity(1);
            components.insert(
                active.name.clone(),
                build_theme_components(&active.theme, &overrides),
            );
            (ThemesArray::new(), active, components)
        }
    };

    log::debug!(
        "Normalized options: {} theme(s), active '{}', {} override(s)",
        components.len(),
        active.name,
        overrides.len()
    );

    Ok(NormalizedOptions {
        themes,
        active,
        components,
        overrides,
        config,
        warnings,
    })
}
