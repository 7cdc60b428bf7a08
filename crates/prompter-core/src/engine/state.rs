//! Scroll state and transition rules.
//!
//! `ScrollState` is the single source of truth for playback: scroll offset,
//! speed, measured content extent, and the display flags the shell reads on
//! every render pass. All mutation funnels through the methods here so the
//! clamping rules live in one place.

use std::time::Duration;

/// Lower bound for scroll speed, in rows per tick.
pub const SPEED_MIN: f64 = 0.1;
/// Upper bound for scroll speed, in rows per tick.
pub const SPEED_MAX: f64 = 20.0;
/// Period of the automatic scroll tick (~60 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Outcome of a single automatic tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Offset advanced by `speed`, playback continues.
    Advanced,
    /// Offset reached the end of content and was clamped there; playback stopped.
    Finished,
    /// Tick arrived while paused; nothing changed.
    Skipped,
}

/// Mutable scroll state for one prompter session.
///
/// `offset` and `content_extent` share a unit: rows of laid-out script text,
/// as measured by the shell. Extent 0 means "not measured yet"; in that
/// state the offset is unclamped upward but never goes negative.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Full script text. Layout is the shell's job; the engine only sees
    /// the measured extent.
    pub content: String,
    /// Rows added to the offset per tick while playing.
    pub speed: f64,
    /// Display size in points. Range is enforced by the shell (20-120).
    pub font_size: f64,
    /// Background opacity. Range is enforced by the shell (0.1-1.0).
    pub opacity: f64,
    /// Current scroll position, measured from the top of the script.
    pub offset: f64,
    /// Total measured height of the laid-out script. 0 until first measure.
    pub content_extent: f64,
    /// True while the automatic tick is running.
    pub is_playing: bool,
    /// True when the overlay is in non-interactive display mode.
    pub is_locked: bool,
    /// True when the display renders each line mirrored.
    pub is_mirrored: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(String::new(), 2.0, 45.0, 0.8)
    }
}

impl ScrollState {
    /// Create a fresh session state from the persisted settings.
    ///
    /// Transient fields (offset, playing, locked, mirrored, extent) always
    /// start at their defaults; only the settings carry over restarts.
    pub fn new(content: String, speed: f64, font_size: f64, opacity: f64) -> Self {
        Self {
            content,
            speed: speed.clamp(SPEED_MIN, SPEED_MAX),
            font_size,
            opacity,
            offset: 0.0,
            content_extent: 0.0,
            is_playing: false,
            is_locked: false,
            is_mirrored: false,
        }
    }

    /// Whether playback may start.
    ///
    /// A fully played-out script (offset at or past a measured extent) must
    /// not re-trigger a tick stream that has no visible stop condition left.
    pub fn can_start(&self) -> bool {
        !(self.content_extent > 0.0 && self.offset >= self.content_extent)
    }

    /// Advance the offset by one tick of playback.
    ///
    /// Clamps exactly to `content_extent` and stops playback when the next
    /// step would reach or pass the end, so playback terminates at the end
    /// of content without overshoot.
    pub fn apply_tick(&mut self) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Skipped;
        }
        let next = self.offset + self.speed;
        if self.content_extent > 0.0 && next >= self.content_extent {
            self.offset = self.content_extent;
            self.is_playing = false;
            TickOutcome::Finished
        } else {
            self.offset = next;
            TickOutcome::Advanced
        }
    }

    /// Apply a manual scroll delta (keyboard nudge or wheel).
    ///
    /// The offset stays within `[0, content_extent]` once the extent has
    /// been measured, and within `[0, inf)` before that. Playback state is
    /// untouched.
    pub fn manual_scroll(&mut self, delta: f64) {
        let next = self.offset + delta;
        self.offset = if self.content_extent > 0.0 {
            next.clamp(0.0, self.content_extent)
        } else {
            next.max(0.0)
        };
    }

    /// Translate a raw wheel delta into a manual scroll.
    ///
    /// The sign is inverted so a natural downward swipe rewinds the script,
    /// opposite to the advancing playback direction.
    pub fn wheel_scroll(&mut self, delta_y: f64) {
        self.manual_scroll(-delta_y);
    }

    /// Nudge the speed, clamped to the engine range.
    pub fn adjust_speed(&mut self, delta: f64) {
        self.speed = (self.speed + delta).clamp(SPEED_MIN, SPEED_MAX);
    }

    /// Record a new measured content extent from the shell.
    ///
    /// Assignment only: an in-flight offset beyond a shrunk extent is left
    /// as-is until the next manual or tick-driven adjustment clamps it.
    pub fn set_content_extent(&mut self, extent: f64) {
        self.content_extent = extent;
    }

    /// Return to the top of the script and stop playback.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.is_playing = false;
    }

    /// Fraction of the script scrolled through, for display. None until the
    /// extent has been measured.
    pub fn progress(&self) -> Option<f64> {
        if self.content_extent > 0.0 {
            Some((self.offset / self.content_extent).clamp(0.0, 1.0))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state(offset: f64, extent: f64, speed: f64) -> ScrollState {
        let mut state = ScrollState::new("script".into(), speed, 45.0, 0.8);
        state.content_extent = extent;
        state.offset = offset;
        state.is_playing = true;
        state
    }

    #[test]
    fn test_speed_clamps_both_ends() {
        let mut state = ScrollState::default();
        state.adjust_speed(100.0);
        assert_eq!(state.speed, SPEED_MAX);
        state.adjust_speed(-100.0);
        assert_eq!(state.speed, SPEED_MIN);
        state.adjust_speed(0.5);
        assert!((state.speed - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_speed_clamped_at_construction() {
        let state = ScrollState::new(String::new(), 50.0, 45.0, 0.8);
        assert_eq!(state.speed, SPEED_MAX);
    }

    #[test]
    fn test_manual_scroll_clamps_to_extent() {
        let mut state = ScrollState::default();
        state.content_extent = 500.0;
        state.offset = 50.0;
        state.manual_scroll(-100.0);
        assert_eq!(state.offset, 0.0);
        state.manual_scroll(10_000.0);
        assert_eq!(state.offset, 500.0);
    }

    #[test]
    fn test_manual_scroll_unmeasured_extent() {
        // Before the first measure the offset is open-ended upward but
        // never negative.
        let mut state = ScrollState::default();
        state.manual_scroll(1_000.0);
        assert_eq!(state.offset, 1_000.0);
        state.manual_scroll(-5_000.0);
        assert_eq!(state.offset, 0.0);
    }

    #[test]
    fn test_manual_scroll_keeps_playback_flag() {
        let mut state = playing_state(10.0, 500.0, 2.0);
        state.manual_scroll(20.0);
        assert!(state.is_playing);
    }

    #[test]
    fn test_tick_advances_by_speed() {
        let mut state = playing_state(0.0, 1000.0, 5.0);
        assert_eq!(state.apply_tick(), TickOutcome::Advanced);
        assert_eq!(state.offset, 5.0);
    }

    #[test]
    fn test_tick_clamps_exactly_at_end() {
        // extent=1000, offset=990, speed=5: two plain steps would land on
        // 995 then 1000; the engine must stop exactly at 1000 on the tick
        // that reaches it.
        let mut state = playing_state(990.0, 1000.0, 5.0);
        assert_eq!(state.apply_tick(), TickOutcome::Advanced);
        assert_eq!(state.offset, 995.0);
        assert_eq!(state.apply_tick(), TickOutcome::Finished);
        assert_eq!(state.offset, 1000.0);
        assert!(!state.is_playing);
    }

    #[test]
    fn test_tick_overshoot_is_clamped() {
        let mut state = playing_state(990.0, 1000.0, 15.0);
        assert_eq!(state.apply_tick(), TickOutcome::Finished);
        assert_eq!(state.offset, 1000.0);
    }

    #[test]
    fn test_termination_tick_count() {
        // Playback ends after ceil((extent - offset) / speed) ticks.
        let mut state = playing_state(30.0, 500.0, 7.0);
        let expected = ((500.0_f64 - 30.0) / 7.0).ceil() as usize;
        let mut ticks = 0;
        while state.apply_tick() != TickOutcome::Finished {
            ticks += 1;
            assert!(ticks < 10_000, "playback did not terminate");
        }
        assert_eq!(ticks + 1, expected);
        assert_eq!(state.offset, 500.0);
        assert!(!state.is_playing);
    }

    #[test]
    fn test_offset_bounded_through_mixed_operations() {
        let mut state = playing_state(0.0, 200.0, 9.0);
        for i in 0..100 {
            if i % 3 == 0 {
                state.manual_scroll(if i % 2 == 0 { 35.0 } else { -50.0 });
            } else {
                state.apply_tick();
            }
            assert!(state.offset >= 0.0);
            assert!(state.offset <= state.content_extent);
        }
    }

    #[test]
    fn test_refusal_at_end() {
        let mut state = playing_state(1000.0, 1000.0, 5.0);
        state.is_playing = false;
        assert!(!state.can_start());
        // Past the end counts too (extent may have shrunk under the offset).
        state.offset = 1200.0;
        assert!(!state.can_start());
    }

    #[test]
    fn test_can_start_before_first_measure() {
        let state = ScrollState::default();
        assert!(state.can_start());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = playing_state(700.0, 1000.0, 5.0);
        state.reset();
        assert_eq!(state.offset, 0.0);
        assert!(!state.is_playing);
        state.reset();
        assert_eq!(state.offset, 0.0);
        assert!(!state.is_playing);
    }

    #[test]
    fn test_wheel_inversion() {
        let mut down = ScrollState::default();
        down.content_extent = 100.0;
        down.offset = 50.0;
        let mut up = down.clone();

        down.wheel_scroll(10.0);
        up.wheel_scroll(-10.0);
        assert!(down.offset < up.offset);
        assert_eq!(down.offset, 40.0);
        assert_eq!(up.offset, 60.0);
    }

    #[test]
    fn test_wheel_holds_at_zero_bound() {
        let mut state = ScrollState::default();
        state.content_extent = 100.0;
        state.wheel_scroll(10.0);
        assert_eq!(state.offset, 0.0);
    }

    #[test]
    fn test_shrunk_extent_leaves_offset_until_next_adjustment() {
        // A remeasure does not re-clamp on its own; the next manual or
        // tick-driven update does.
        let mut state = playing_state(400.0, 500.0, 5.0);
        state.set_content_extent(300.0);
        assert_eq!(state.offset, 400.0);
        state.manual_scroll(1.0);
        assert_eq!(state.offset, 300.0);
    }

    #[test]
    fn test_tick_past_shrunk_extent_finishes() {
        let mut state = playing_state(400.0, 500.0, 5.0);
        state.set_content_extent(300.0);
        assert_eq!(state.apply_tick(), TickOutcome::Finished);
        assert_eq!(state.offset, 300.0);
    }

    #[test]
    fn test_tick_while_paused_is_skipped() {
        let mut state = playing_state(10.0, 100.0, 5.0);
        state.is_playing = false;
        assert_eq!(state.apply_tick(), TickOutcome::Skipped);
        assert_eq!(state.offset, 10.0);
    }

    #[test]
    fn test_progress() {
        let mut state = ScrollState::default();
        assert_eq!(state.progress(), None);
        state.content_extent = 200.0;
        state.offset = 50.0;
        assert_eq!(state.progress(), Some(0.25));
    }
}
