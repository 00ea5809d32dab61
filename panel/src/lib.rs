//! # Theme Panel
//!
//! Terminal host for the theme sync engine. It loads an options payload,
//! relays editor commands typed on stdin and prints the engine's `updateTheme`
//! emissions to stdout.
//!
//! ## Modules
//!
//! - [`app`] - Command loop and tick-driven flushing of theme updates
//! - [`bridge`] - Host side of the event bus and payload loading
//! - [`cli`] - Command line arguments
//! - [`commands`] - Editor command parsing
//! - [`config`] - Layered panel configuration and validation
//! - [`error`] - Panel error types
//! - [`logger`] - File logger setup
//! - [`view`] - Text rendering of fields, code and status

pub mod app;
pub mod bridge;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod view;
