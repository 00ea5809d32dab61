//! Known themes, the active theme and per-theme field registries.

use crate::components::{
    ComponentRegistry, Overrides, build_theme_components, refresh_theme_components,
};
use crate::errors::{EngineError, EngineResult};
use crate::model::{EngineStatus, ThemeObject, ThemesArray};
use crate::options::NormalizedOptions;
use crate::path::{ThemePath, is_container, set_at_path};
use indexmap::IndexMap;
use serde_json::Value;

/// Themes and active theme as captured at ingestion, used by reset
#[derive(Debug, Clone)]
struct Baseline {
    themes: ThemesArray,
    active: ThemeObject,
}

/// Holds the themes, the active one and their component registries.
///
/// Edits are copy-on-write: every successful [`edit_field`](Self::edit_field)
/// replaces the active tree with a new one and writes it back into the matching
/// entry of the theme list, so switching away and back keeps the edit.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    status: EngineStatus,
    themes: ThemesArray,
    active: ThemeObject,
    components: IndexMap<String, ComponentRegistry>,
    baseline: Option<Baseline>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == EngineStatus::Ready
    }

    pub fn themes(&self) -> &ThemesArray {
        &self.themes
    }

    pub fn active(&self) -> &ThemeObject {
        &self.active
    }

    pub fn components(&self) -> &IndexMap<String, ComponentRegistry> {
        &self.components
    }

    pub fn components_for(&self, name: &str) -> Option<&ComponentRegistry> {
        self.components.get(name)
    }

    pub fn active_components(&self) -> Option<&ComponentRegistry> {
        self.components.get(&self.active.name)
    }

    /// Replace all state with a freshly normalized payload
    pub fn load(&mut self, normalized: &NormalizedOptions) {
        self.themes = normalized.themes.clone();
        self.active = normalized.active.clone();
        self.components = normalized.components.clone();
        self.baseline = Some(Baseline {
            themes: normalized.themes.clone(),
            active: normalized.active.clone(),
        });
        self.status = EngineStatus::Ready;
    }

    /// Activate a fresh copy of the theme called `name`.
    ///
    /// The theme's registry is built or refreshed so it matches the selected
    /// tree. Returns `false`, leaving everything untouched, when no theme has
    /// that name or nothing has been ingested yet.
    pub fn select_theme(&mut self, name: &str, overrides: &Overrides) -> bool {
        if !self.is_ready() {
            log::warn!("Cannot select theme '{name}': no options received yet");
            return false;
        }
        let Some(selected) = self.themes.iter().find(|t| t.name == name).cloned() else {
            log::warn!("Cannot select theme '{name}': no theme with that name");
            return false;
        };

        log::info!("Switching active theme: '{}' -> '{}'", self.active.name, name);
        self.sync_components(&selected, overrides);
        self.active = selected;
        true
    }

    /// Overwrite the active theme wholesale.
    ///
    /// Returns `false` without any change before the first ingestion.
    pub fn replace_active_theme(&mut self, theme: ThemeObject, overrides: &Overrides) -> bool {
        if !self.is_ready() {
            log::warn!(
                "Cannot replace active theme with '{}': no options received yet",
                theme.name
            );
            return false;
        }
        log::debug!("Replacing active theme with '{}'", theme.name);
        self.sync_components(&theme, overrides);
        self.active = theme;
        true
    }

    /// Set the leaf at `path` of the active theme to `value`.
    ///
    /// Nothing changes when the path is unknown to the active registry, the
    /// value is an object or array, or the tree cannot take the value.
    pub fn edit_field(&mut self, path: &ThemePath, value: Value) -> EngineResult<()> {
        let name = self.active.name.clone();
        let known = self
            .components
            .get(&name)
            .is_some_and(|registry| registry.contains_key(path));
        if !known {
            return Err(EngineError::UnknownField {
                theme: name,
                path: path.to_string(),
            });
        }

        // A container would turn one leaf into several the registry does not track
        if is_container(&value) {
            return Err(EngineError::NonScalarValue {
                path: path.to_string(),
            });
        }

        let tree = set_at_path(&self.active.theme, path, value.clone())?;

        if let Some(entry) = self.themes.iter_mut().find(|t| t.name == name) {
            entry.theme = tree.clone();
        }
        if let Some(meta) = self
            .components
            .get_mut(&name)
            .and_then(|registry| registry.get_mut(path))
        {
            meta.value = value;
        }
        self.active.theme = tree;

        log::debug!("Edited field '{path}' of theme '{name}'");
        Ok(())
    }

    /// Replace the theme list only.
    ///
    /// The active theme and the registries stay as they are until the next
    /// selection or ingestion.
    pub fn set_themes(&mut self, themes: ThemesArray) {
        if !self.active.is_default() && !themes.iter().any(|t| t.name == self.active.name) {
            log::debug!(
                "Active theme '{}' is not part of the new theme list",
                self.active.name
            );
        }
        self.themes = themes;
    }

    /// Restore the themes captured at the last ingestion.
    ///
    /// Returns `false` when nothing has been ingested.
    pub fn reset(&mut self, overrides: &Overrides) -> bool {
        let Some(baseline) = self.baseline.clone() else {
            return false;
        };

        let mut components = IndexMap::with_capacity(baseline.themes.len().max(1));
        if baseline.themes.is_empty() {
            components.insert(
                baseline.active.name.clone(),
                build_theme_components(&baseline.active.theme, overrides),
            );
        } else {
            for object in &baseline.themes {
                components.insert(
                    object.name.clone(),
                    build_theme_components(&object.theme, overrides),
                );
            }
        }

        log::info!("Reset {} theme(s) to their ingested state", components.len());
        self.themes = baseline.themes;
        self.active = baseline.active;
        self.components = components;
        true
    }

    /// Drop all state and return to [`EngineStatus::Uninitialized`]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn sync_components(&mut self, theme: &ThemeObject, overrides: &Overrides) {
        match self.components.get_mut(&theme.name) {
            Some(registry) => refresh_theme_components(registry, &theme.theme, overrides),
            None => {
                self.components.insert(
                    theme.name.clone(),
                    build_theme_components(&theme.theme, overrides),
                );
            }
        }
    }
}
