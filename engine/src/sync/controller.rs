use super::scheduler::{CancelToken, Scheduler};
use crate::config::EngineConfig;
use crate::events::{EngineEvent, EventSink};
use crate::model::Theme;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Timer bookkeeping shared with the scheduled callback
#[derive(Debug, Default)]
struct SyncState {
    pending: bool,
    /// Bumped on every schedule and cancellation; a callback only fires when
    /// its generation is still current
    generation: u64,
    live: Option<CancelToken>,
}

/// Decides when the host hears about active-theme changes.
///
/// With debouncing enabled only the last change of a burst is emitted, one
/// quiet period after it. At most one timer is live at any time.
pub struct SyncController {
    scheduler: Arc<dyn Scheduler>,
    sink: Arc<dyn EventSink>,
    state: Arc<Mutex<SyncState>>,
}

impl SyncController {
    pub fn new(scheduler: Arc<dyn Scheduler>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            scheduler,
            sink,
            state: Arc::new(Mutex::new(SyncState::default())),
        }
    }

    /// Whether a debounced emission is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        lock(&self.state).pending
    }

    /// React to a change of the active theme.
    ///
    /// `debounce_allowed` is false while the engine handles its first
    /// ingestion, in which case the change is emitted right away.
    pub fn active_theme_changed(&self, theme: &Theme, config: &EngineConfig, debounce_allowed: bool) {
        let mut state = lock(&self.state);
        self.cancel_live(&mut state);

        if !config.debounce() || !debounce_allowed {
            state.pending = false;
            drop(state);
            log::debug!("Emitting theme update immediately");
            self.sink.emit(EngineEvent::UpdateTheme(theme.clone()));
            return;
        }

        let generation = state.generation;
        let snapshot = theme.clone();
        let shared = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);

        let token = self.scheduler.schedule(
            config.debounce_rate(),
            Box::new(move || {
                let mut state = lock(&shared);
                if state.generation != generation || !state.pending {
                    return;
                }
                state.pending = false;
                state.live = None;
                log::debug!("Debounce elapsed, emitting theme update");
                // Emitted under the lock so a concurrent cancel cannot slip in
                sink.emit(EngineEvent::UpdateTheme(snapshot));
            }),
        );

        state.live = Some(token);
        state.pending = true;
        log::debug!(
            "Theme update scheduled in {}ms (generation {generation})",
            config.debounce_rate_ms()
        );
    }

    /// Cancel any scheduled emission without emitting
    pub fn cancel(&self) {
        let mut state = lock(&self.state);
        if state.pending {
            log::debug!("Cancelling pending theme update");
        }
        self.cancel_live(&mut state);
        state.pending = false;
    }

    fn cancel_live(&self, state: &mut SyncState) {
        if let Some(token) = state.live.take() {
            self.scheduler.cancel(&token);
        }
        state.generation = state.generation.wrapping_add(1);
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(state: &Mutex<SyncState>) -> MutexGuard<'_, SyncState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
