use crate::components::{ComponentRegistry, FieldType, Overrides};
use crate::config::EngineConfig;
use crate::errors::{ConfigWarning, EngineResult};
use crate::events::{EventSink, HostEvent};
use crate::model::{EngineStatus, ThemeObject, ThemesArray};
use crate::options::{Options, normalize};
use crate::path::ThemePath;
use crate::registry::ThemeRegistry;
use crate::sync::{Scheduler, SyncController, TokioScheduler};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Outcome of a successful ingestion
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub theme_count: usize,
    pub active: String,
    pub warnings: Vec<ConfigWarning>,
}

/// One editable field as presented to the editor surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub path: ThemePath,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: Value,
}

/// The theme state engine.
///
/// ThemeEngine is an explicitly constructed instance owned by whatever drives
/// the editing surface. It ingests host options, keeps the active theme and
/// its field registries, applies editor actions and forwards active-theme
/// changes to the host through a [`SyncController`].
///
/// # Examples
///
/// ```no_run
/// use engine::{Options, ThemeEngine, ThemePath};
/// use serde_json::json;
/// use std::sync::{mpsc, Arc};
///
/// let (tx, rx) = mpsc::channel();
/// let mut engine = ThemeEngine::new(Arc::new(tx))?;
///
/// let options: Options = serde_json::from_value(json!({
///     "theme": {"colors": {"primary": "#ff4785"}}
/// }))?;
/// engine.ingest(options)?;
///
/// engine.edit_field(&ThemePath::parse("colors.primary"), json!("#1ea7fd"))?;
/// ```
pub struct ThemeEngine {
    registry: ThemeRegistry,
    overrides: Overrides,
    config: EngineConfig,
    sync: SyncController,
}

impl ThemeEngine {
    /// Engine whose debounce timers run on the current tokio runtime
    pub fn new(sink: Arc<dyn EventSink>) -> EngineResult<Self> {
        let scheduler = TokioScheduler::current()?;
        Ok(Self::with_scheduler(sink, Arc::new(scheduler)))
    }

    pub fn with_scheduler(sink: Arc<dyn EventSink>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            registry: ThemeRegistry::new(),
            overrides: Overrides::new(),
            config: EngineConfig::default(),
            sync: SyncController::new(scheduler, sink),
        }
    }

    /// Dispatch a signal received from the host bus
    pub fn handle_event(&mut self, event: HostEvent) -> EngineResult<()> {
        log::debug!("Received host event '{}'", event.name());
        match event {
            HostEvent::ReceiveOptions(options) => self.ingest(*options).map(|_| ()),
            HostEvent::SetThemes(themes) => {
                self.set_themes(themes);
                Ok(())
            }
        }
    }

    /// Replace all engine state with the content of `options`.
    ///
    /// A rejected payload leaves the previous state in place.
    pub fn ingest(&mut self, options: Options) -> EngineResult<IngestReport> {
        let normalized = normalize(options, &self.overrides, &self.config)?;
        let was_ready = self.registry.is_ready();

        self.overrides = normalized.overrides.clone();
        self.config = normalized.config.clone();
        self.registry.load(&normalized);

        let report = IngestReport {
            theme_count: normalized.components.len(),
            active: normalized.active.name.clone(),
            warnings: normalized.warnings,
        };
        log::info!(
            "Ingested {} theme(s), active theme '{}'",
            report.theme_count,
            report.active
        );

        self.active_theme_changed(was_ready);
        Ok(report)
    }

    /// Replace the theme list; the active theme and registries are untouched
    pub fn set_themes(&mut self, themes: ThemesArray) {
        log::info!("Host replaced theme list ({} theme(s))", themes.len());
        self.registry.set_themes(themes);
    }

    /// Switch to the theme called `name`; unknown names are ignored, as is
    /// any selection before the first ingestion
    pub fn select_theme(&mut self, name: &str) -> bool {
        let switched = self.registry.select_theme(name, &self.overrides);
        if switched {
            self.active_theme_changed(true);
        }
        switched
    }

    /// Overwrite the active theme; refused until options have been ingested
    pub fn replace_active_theme(&mut self, theme: ThemeObject) -> bool {
        let replaced = self.registry.replace_active_theme(theme, &self.overrides);
        if replaced {
            self.active_theme_changed(true);
        }
        replaced
    }

    pub fn edit_field(&mut self, path: &ThemePath, value: Value) -> EngineResult<()> {
        self.registry.edit_field(path, value)?;
        self.active_theme_changed(true);
        Ok(())
    }

    /// Discard all edits and restore the themes from the last ingestion
    pub fn reset_themes(&mut self) -> bool {
        let reset = self.registry.reset(&self.overrides);
        if reset {
            self.active_theme_changed(true);
        }
        reset
    }

    /// Cancel pending emissions and drop all state
    pub fn teardown(&mut self) {
        self.sync.cancel();
        if self.registry.is_ready() {
            log::info!("Tearing down theme engine");
        }
        self.registry.clear();
    }

    pub fn status(&self) -> EngineStatus {
        self.registry.status()
    }

    pub fn is_pending(&self) -> bool {
        self.sync.is_pending()
    }

    pub fn themes(&self) -> &ThemesArray {
        self.registry.themes()
    }

    pub fn active_theme(&self) -> &ThemeObject {
        self.registry.active()
    }

    pub fn component_registries(&self) -> &IndexMap<String, ComponentRegistry> {
        self.registry.components()
    }

    pub fn active_components(&self) -> Option<&ComponentRegistry> {
        self.registry.active_components()
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Editable fields of the active theme, labelled with the configured format
    pub fn fields(&self) -> Vec<FieldView> {
        self.active_components()
            .map(|registry| {
                registry
                    .iter()
                    .map(|(path, meta)| FieldView {
                        path: path.clone(),
                        label: self.config.label(path),
                        field_type: meta.field_type.clone(),
                        value: meta.value.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn active_theme_changed(&self, debounce_allowed: bool) {
        self.sync
            .active_theme_changed(&self.registry.active().theme, &self.config, debounce_allowed);
    }
}

impl Drop for ThemeEngine {
    fn drop(&mut self) {
        self.sync.cancel();
    }
}
