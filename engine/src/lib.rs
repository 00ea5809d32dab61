//! # Theme Sync Engine
//!
//! State engine behind a live theme-editing panel. It ingests theme payloads
//! from a host, derives editable field metadata for every leaf, applies
//! path-addressed edits without mutating shared trees and forwards the active
//! theme back to the host, debounced on request.
//!
//! ## Modules
//!
//! - [`components`] - Field type inference and per-theme component registries
//! - [`config`] - Host configuration: label format, debounce and code preview
//! - [`errors`] - Engine errors and non-fatal configuration warnings
//! - [`events`] - Host and engine bus signals and the [`EventSink`] seam
//! - [`manager`] - The [`ThemeEngine`] facade driving everything else
//! - [`model`] - Theme trees, named themes and engine status
//! - [`options`] - Host payload shapes and their normalization
//! - [`path`] - Dotted paths and copy-on-write tree mutation
//! - [`registry`] - Theme list, active theme and registries
//! - [`sync`] - Debounced propagation to the host

pub mod components;
pub mod config;
pub mod errors;
pub mod events;
pub mod manager;
pub mod model;
pub mod options;
pub mod path;
pub mod registry;
pub mod sync;

pub use components::{ComponentRegistry, FieldMeta, FieldType, Overrides};
pub use config::{ConfigPatch, EngineConfig, LabelFormat};
pub use errors::{ConfigWarning, EngineError, EngineResult};
pub use events::{EngineEvent, EventSink, HostEvent};
pub use manager::{FieldView, IngestReport, ThemeEngine};
pub use model::{DEFAULT_THEME_NAME, EngineStatus, Theme, ThemeObject, ThemesArray};
pub use options::{Options, OptionsTheme};
pub use path::ThemePath;
