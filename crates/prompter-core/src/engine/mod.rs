//! Scroll engine: playback state plus the tick task that drives it.
//!
//! The engine owns a [`ScrollState`] behind a single-writer lock and exposes
//! the operations the shell calls from input handling. Continuous motion is
//! a dedicated tick task ([`ticker`]) spawned on start and cancelled on
//! stop; everything else is an instantaneous mutation under the lock.
//!
//! # Usage
//!
//! ```ignore
//! use prompter_core::{AppConfig, ScrollEngine};
//!
//! let config = AppConfig::load()?;
//! let mut engine = ScrollEngine::from_config(&config);
//!
//! engine.set_content_extent(120.0);   // after the shell measures layout
//! engine.toggle_play_pause();         // Space
//! let state = engine.snapshot();      // each render pass
//! ```

mod state;
mod ticker;

pub use state::{ScrollState, TickOutcome, SPEED_MAX, SPEED_MIN, TICK_INTERVAL};

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::AppConfig;
use ticker::Ticker;

/// Owns the scroll state and enforces all transition rules; the single
/// source of truth for scroll position and playback.
pub struct ScrollEngine {
    state: Arc<Mutex<ScrollState>>,
    ticker: Option<Ticker>,
}

impl ScrollEngine {
    /// Create an engine with the given initial state.
    pub fn new(state: ScrollState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            ticker: None,
        }
    }

    /// Create an engine from the persisted settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ScrollState::new(
            config.prompter.script_content.clone(),
            config.prompter.scroll_speed,
            config.prompter.font_size,
            config.prompter.window_opacity,
        ))
    }

    /// Stop if playing, start otherwise.
    pub fn toggle_play_pause(&mut self) {
        if self.state.lock().is_playing {
            self.stop_scrolling();
        } else {
            self.start_scrolling();
        }
    }

    /// Begin automatic playback.
    ///
    /// Refused (no-op) when the script has already been played out, so a
    /// finished script cannot re-trigger a tick stream with no stop
    /// condition left. Restarting while already playing replaces the tick
    /// stream rather than stacking a second one.
    pub fn start_scrolling(&mut self) {
        {
            let mut state = self.state.lock();
            if !state.can_start() {
                debug!("start refused: script already played out");
                return;
            }
            state.is_playing = true;
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.ticker = Some(Ticker::spawn(self.state.clone(), TICK_INTERVAL));
        debug!("playback started");
    }

    /// Stop automatic playback and cancel the pending tick. Idempotent.
    pub fn stop_scrolling(&mut self) {
        // Flip the flag under the lock first: a tick already in flight
        // re-checks it there and exits without mutating the offset.
        self.state.lock().is_playing = false;
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
            debug!("playback stopped");
        }
    }

    /// Return to the top of the script and stop playback.
    pub fn reset_scroll(&mut self) {
        self.state.lock().reset();
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        debug!("scroll reset");
    }

    /// Nudge the speed by `delta`, clamped to the engine range.
    pub fn update_speed(&self, delta: f64) {
        self.state.lock().adjust_speed(delta);
    }

    /// Apply a manual scroll delta (keyboard nudge). Playback is unaffected.
    pub fn manual_scroll(&self, delta: f64) {
        self.state.lock().manual_scroll(delta);
    }

    /// Apply a raw wheel delta; sign-inverted so a downward swipe rewinds.
    pub fn wheel_scroll(&self, delta_y: f64) {
        self.state.lock().wheel_scroll(delta_y);
    }

    /// Record the shell's latest layout measurement.
    pub fn set_content_extent(&self, extent: f64) {
        self.state.lock().set_content_extent(extent);
    }

    /// Replace the script text. The offset is intentionally kept.
    pub fn set_content(&self, content: String) {
        self.state.lock().content = content;
    }

    /// Set the speed directly (editor slider). The shell enforces its own
    /// narrower range; the engine still clamps to its invariant.
    pub fn set_speed(&self, speed: f64) {
        self.state.lock().speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    }

    /// Set the font size. Range is the shell's responsibility.
    pub fn set_font_size(&self, font_size: f64) {
        self.state.lock().font_size = font_size;
    }

    /// Set the background opacity. Range is the shell's responsibility.
    pub fn set_opacity(&self, opacity: f64) {
        self.state.lock().opacity = opacity;
    }

    /// Flip between locked (click-through display) and interactive mode.
    pub fn toggle_lock(&self) {
        let mut state = self.state.lock();
        state.is_locked = !state.is_locked;
    }

    /// Flip mirrored rendering.
    pub fn toggle_mirror(&self) {
        let mut state = self.state.lock();
        state.is_mirrored = !state.is_mirrored;
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().is_playing
    }

    pub fn is_locked(&self) -> bool {
        self.state.lock().is_locked
    }

    /// Clone the full state for a render pass.
    pub fn snapshot(&self) -> ScrollState {
        self.state.lock().clone()
    }
}

impl Drop for ScrollEngine {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}
