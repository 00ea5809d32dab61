//! Event-bus boundary between the host and the engine.
//!
//! The bus itself belongs to the host; the engine only consumes
//! [`HostEvent`]s and produces [`EngineEvent`]s through an [`EventSink`].

use crate::model::{Theme, ThemesArray};
use crate::options::Options;
use std::sync::mpsc::Sender;

/// Host to engine signals
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Initial (or replacement) payload; fully resets engine state
    ReceiveOptions(Box<Options>),
    /// Replace the theme list without touching the active theme
    SetThemes(ThemesArray),
}

impl HostEvent {
    /// Logical event identifier on the host bus
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::ReceiveOptions(_) => "receiveOptions",
            HostEvent::SetThemes(_) => "setThemes",
        }
    }
}

/// Engine to host signals
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Full tree of the active theme
    UpdateTheme(Theme),
}

impl EngineEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::UpdateTheme(_) => "updateTheme",
        }
    }
}

/// Receiver of engine emissions.
///
/// Called from the engine's thread for immediate emissions and from a timer
/// task for debounced ones. Implementations must not call back into the
/// engine.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

impl EventSink for Sender<EngineEvent> {
    fn emit(&self, event: EngineEvent) {
        let name = event.name();
        if let Err(e) = self.send(event) {
            log::error!("Failed to deliver '{name}' to host: {e}");
        }
    }
}
