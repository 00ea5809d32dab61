//! Debounced propagation of active-theme changes to the host.
//!
//! - [`Scheduler`] - cancellable one-shot timers, [`TokioScheduler`] by default
//! - [`SyncController`] - immediate or trailing-edge debounced `updateTheme` emission

pub mod controller;
pub mod scheduler;

pub use controller::SyncController;
pub use scheduler::{CancelToken, Scheduler, TimerCallback, TokioScheduler};
