//! Host side of the event bus.
//!
//! The bridge plays the host: it reads payload files, hands them to the engine
//! as `receiveOptions`/`setThemes` signals and collects the `updateTheme`
//! emissions the engine sends back.

use crate::error::{AppError, AppResult};
use engine::config::ConfigPatch;
use engine::{EngineEvent, HostEvent, IngestReport, Options, Theme, ThemeEngine, ThemesArray};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

/// One line of the stdout protocol
#[derive(Debug, Serialize)]
struct UpdateLine<'a> {
    event: &'static str,
    theme: &'a Theme,
}

pub struct HostBridge {
    engine: ThemeEngine,
    emissions: Receiver<EngineEvent>,
    base_config: ConfigPatch,
}

impl HostBridge {
    /// Bridge around a fresh engine. Must be called inside a tokio runtime.
    ///
    /// `base_config` is layered under every payload's own `config`.
    pub fn new(base_config: ConfigPatch) -> AppResult<Self> {
        let (tx, emissions) = mpsc::channel();
        let engine = ThemeEngine::new(Arc::new(tx))?;
        Ok(Self {
            engine,
            emissions,
            base_config,
        })
    }

    pub fn engine(&self) -> &ThemeEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ThemeEngine {
        &mut self.engine
    }

    /// Deliver a `receiveOptions` payload
    pub fn receive_options(&mut self, mut options: Options) -> AppResult<IngestReport> {
        let payload_config = options.config.take().unwrap_or_default();
        options.config = Some(self.base_config.clone().overlay(payload_config));

        let report = self.engine.ingest(options)?;
        for warning in &report.warnings {
            eprintln!("{}", warning.user_message());
        }
        Ok(report)
    }

    pub fn receive_options_file(&mut self, path: &Path) -> AppResult<IngestReport> {
        let options = load_options(path)?;
        log::info!("Loaded options payload from {}", path.display());
        self.receive_options(options)
    }

    /// Deliver a `setThemes` signal read from `path`; returns the theme count
    pub fn set_themes_file(&mut self, path: &Path) -> AppResult<usize> {
        let themes = load_themes(path)?;
        let count = themes.len();
        self.engine.handle_event(HostEvent::SetThemes(themes))?;
        Ok(count)
    }

    /// Themes emitted by the engine since the last call
    pub fn drain_updates(&self) -> Vec<Theme> {
        self.emissions
            .try_iter()
            .map(|event| match event {
                EngineEvent::UpdateTheme(theme) => theme,
            })
            .collect()
    }

    pub fn teardown(&mut self) {
        self.engine.teardown();
    }
}

/// Read an options payload (`{"theme": ..., "overrides": ..., "config": ...}`)
pub fn load_options(path: &Path) -> AppResult<Options> {
    let raw = read_payload(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Payload(format!("{}: invalid options payload: {e}", path.display())))
}

/// Read a theme list (`[{"name": ..., "theme": {...}}, ...]`)
pub fn load_themes(path: &Path) -> AppResult<ThemesArray> {
    let raw = read_payload(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Payload(format!("{}: invalid theme list: {e}", path.display())))
}

/// Serialize an emission as a single `updateTheme` protocol line
pub fn update_line(theme: &Theme) -> AppResult<String> {
    let line = UpdateLine {
        event: "updateTheme",
        theme,
    };
    Ok(serde_json::to_string(&line)?)
}

fn read_payload(path: &Path) -> AppResult<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {e}", path.display())))
}
