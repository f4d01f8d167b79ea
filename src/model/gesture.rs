//! Timed D-pad gesture disambiguation for the now-playing screen
//!
//! Up/Down carry two meanings each, separated by a double-press window:
//! a single Up opens the queue, a quick second Up toggles like instead;
//! a single Down toggles shuffle, a quick second Down cycles repeat.
//! Left/Right seek on press and escalate to a track skip when held past
//! a threshold.
//!
//! The arbiter is a plain state machine driven by an injected clock:
//! every press, release, and tick takes `now` and returns the player
//! actions that became due. Timers are deadline fields checked by
//! `tick`, not spawned tasks, so a second press always observes the
//! first press's slot and cancellation is race-free on the single
//! event loop.

use std::time::{Duration, Instant};

/// Window in which a second Up/Down press is read as a double press
pub const DOUBLE_PRESS_WINDOW: Duration = Duration::from_millis(450);

/// Hold duration after which Left/Right escalate to a track skip
pub const HOLD_SKIP_THRESHOLD: Duration = Duration::from_millis(5000);

/// Seek distance of a single Left/Right tap, in milliseconds
pub const TAP_SEEK_MS: i64 = 10_000;

/// Commands the gesture layer asks the player connection to run.
/// All of them are fire-and-forget at the collaborator boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    TogglePlayback,
    SeekRelative(i64),
    SkipPrevious,
    SkipNext,
    OpenQueue,
    ToggleLike,
    ToggleShuffle,
    CycleRepeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapKind {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldDirection {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug)]
struct PendingTap {
    kind: TapKind,
    deadline: Instant,
}

#[derive(Clone, Copy, Debug)]
struct ActiveHold {
    direction: HoldDirection,
    started: Instant,
}

/// Gesture state for one now-playing screen instance.
///
/// One pending-tap slot per vertical gesture and a single hold slot
/// (a D-pad cannot hold Left and Right at once). Created on screen
/// entry, dropped on exit.
pub struct GestureArbiter {
    pending_up: Option<PendingTap>,
    pending_down: Option<PendingTap>,
    hold: Option<ActiveHold>,
    holds_enabled: bool,
}

impl GestureArbiter {
    /// `holds_enabled` is false when the terminal cannot report key
    /// releases; Left/Right then stay tap-seek only.
    pub fn new(holds_enabled: bool) -> Self {
        Self {
            pending_up: None,
            pending_down: None,
            hold: None,
            holds_enabled,
        }
    }

    /// Drop all pending timers, e.g. when the screen is left
    pub fn reset(&mut self) {
        self.pending_up = None;
        self.pending_down = None;
        self.hold = None;
    }

    pub fn press_center(&self) -> PlayerAction {
        PlayerAction::TogglePlayback
    }

    pub fn press_up(&mut self, now: Instant) -> Option<PlayerAction> {
        match self.pending_up.take() {
            Some(tap) if now < tap.deadline => Some(PlayerAction::ToggleLike),
            _ => {
                self.pending_up = Some(PendingTap {
                    kind: TapKind::Up,
                    deadline: now + DOUBLE_PRESS_WINDOW,
                });
                None
            }
        }
    }

    pub fn press_down(&mut self, now: Instant) -> Option<PlayerAction> {
        match self.pending_down.take() {
            Some(tap) if now < tap.deadline => Some(PlayerAction::CycleRepeat),
            _ => {
                self.pending_down = Some(PendingTap {
                    kind: TapKind::Down,
                    deadline: now + DOUBLE_PRESS_WINDOW,
                });
                None
            }
        }
    }

    /// Left/Right press: seeks immediately and arms the hold slot.
    /// Repeated presses while a hold is armed are key repeat and do
    /// nothing further.
    pub fn press_horizontal(
        &mut self,
        direction: HoldDirection,
        now: Instant,
    ) -> Option<PlayerAction> {
        if self.hold.is_some() {
            return None;
        }
        if self.holds_enabled {
            self.hold = Some(ActiveHold { direction, started: now });
        }
        let delta = match direction {
            HoldDirection::Left => -TAP_SEEK_MS,
            HoldDirection::Right => TAP_SEEK_MS,
        };
        Some(PlayerAction::SeekRelative(delta))
    }

    /// Key release before the threshold disarms the hold; no further
    /// seek is issued beyond the one fired on press.
    pub fn release_horizontal(&mut self, direction: HoldDirection) {
        if let Some(hold) = self.hold {
            if hold.direction == direction {
                self.hold = None;
            }
        }
    }

    /// Mature any due timers. Called once per event-loop iteration.
    pub fn tick(&mut self, now: Instant) -> Vec<PlayerAction> {
        let mut due = Vec::new();

        if let Some(tap) = self.pending_up {
            if now >= tap.deadline {
                debug_assert_eq!(tap.kind, TapKind::Up);
                self.pending_up = None;
                due.push(PlayerAction::OpenQueue);
            }
        }
        if let Some(tap) = self.pending_down {
            if now >= tap.deadline {
                debug_assert_eq!(tap.kind, TapKind::Down);
                self.pending_down = None;
                due.push(PlayerAction::ToggleShuffle);
            }
        }
        if let Some(hold) = self.hold {
            if now.duration_since(hold.started) >= HOLD_SKIP_THRESHOLD {
                self.hold = None;
                due.push(match hold.direction {
                    HoldDirection::Left => PlayerAction::SkipPrevious,
                    HoldDirection::Right => PlayerAction::SkipNext,
                });
            }
        }

        due
    }

    /// Progress of the active hold in [0, 1], for the skip gauge
    pub fn hold_progress(&self, now: Instant) -> Option<(HoldDirection, f64)> {
        self.hold.map(|hold| {
            let elapsed = now.duration_since(hold.started).as_secs_f64();
            let ratio = (elapsed / HOLD_SKIP_THRESHOLD.as_secs_f64()).clamp(0.0, 1.0);
            (hold.direction, ratio)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn single_up_matures_into_open_queue() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert_eq!(arbiter.press_up(start), None);
        assert!(arbiter.tick(start + Duration::from_millis(200)).is_empty());

        let due = arbiter.tick(start + DOUBLE_PRESS_WINDOW);
        assert_eq!(due, vec![PlayerAction::OpenQueue]);

        // Slot is consumed, nothing fires again
        assert!(arbiter.tick(start + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn double_up_toggles_like_and_never_opens_queue() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert_eq!(arbiter.press_up(start), None);
        assert_eq!(
            arbiter.press_up(start + Duration::from_millis(200)),
            Some(PlayerAction::ToggleLike)
        );

        assert!(arbiter.tick(start + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn second_up_past_window_starts_a_fresh_slot() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert_eq!(arbiter.press_up(start), None);
        let late = start + DOUBLE_PRESS_WINDOW + Duration::from_millis(1);
        assert_eq!(arbiter.press_up(late), None);

        // Only the second slot is pending; it matures once
        let due = arbiter.tick(late + DOUBLE_PRESS_WINDOW);
        assert_eq!(due, vec![PlayerAction::OpenQueue]);
        assert!(arbiter.tick(late + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn down_gestures_mirror_up() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert_eq!(arbiter.press_down(start), None);
        assert_eq!(
            arbiter.press_down(start + Duration::from_millis(100)),
            Some(PlayerAction::CycleRepeat)
        );

        assert_eq!(arbiter.press_down(start + Duration::from_secs(2)), None);
        let due = arbiter.tick(start + Duration::from_secs(2) + DOUBLE_PRESS_WINDOW);
        assert_eq!(due, vec![PlayerAction::ToggleShuffle]);
    }

    #[test]
    fn up_and_down_slots_are_independent() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert_eq!(arbiter.press_up(start), None);
        assert_eq!(arbiter.press_down(start + Duration::from_millis(50)), None);

        let due = arbiter.tick(start + Duration::from_secs(1));
        assert_eq!(
            due,
            vec![PlayerAction::OpenQueue, PlayerAction::ToggleShuffle]
        );
    }

    #[test]
    fn left_press_seeks_immediately() {
        let mut arbiter = GestureArbiter::new(true);
        assert_eq!(
            arbiter.press_horizontal(HoldDirection::Left, t0()),
            Some(PlayerAction::SeekRelative(-TAP_SEEK_MS))
        );
    }

    #[test]
    fn full_hold_skips_exactly_once() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert!(arbiter.press_horizontal(HoldDirection::Left, start).is_some());
        assert!(arbiter.tick(start + Duration::from_millis(4999)).is_empty());

        let due = arbiter.tick(start + HOLD_SKIP_THRESHOLD);
        assert_eq!(due, vec![PlayerAction::SkipPrevious]);
        assert!(arbiter.tick(start + Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn early_release_never_skips() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert!(arbiter.press_horizontal(HoldDirection::Right, start).is_some());
        arbiter.release_horizontal(HoldDirection::Right);

        assert!(arbiter.tick(start + Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn key_repeat_during_hold_does_not_reseek() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert!(arbiter
            .press_horizontal(HoldDirection::Right, start)
            .is_some());
        // Terminal key repeat re-delivers the press while held
        assert_eq!(
            arbiter.press_horizontal(HoldDirection::Right, start + Duration::from_millis(500)),
            None
        );

        let due = arbiter.tick(start + HOLD_SKIP_THRESHOLD);
        assert_eq!(due, vec![PlayerAction::SkipNext]);
    }

    #[test]
    fn holds_disabled_degrades_to_tap_seek() {
        let mut arbiter = GestureArbiter::new(false);
        let start = t0();

        assert_eq!(
            arbiter.press_horizontal(HoldDirection::Left, start),
            Some(PlayerAction::SeekRelative(-TAP_SEEK_MS))
        );
        // No hold slot armed, so no skip can ever mature
        assert!(arbiter.tick(start + Duration::from_secs(60)).is_empty());
        assert!(arbiter.hold_progress(start).is_none());

        // Every press seeks again in this mode
        assert_eq!(
            arbiter.press_horizontal(HoldDirection::Left, start + Duration::from_secs(1)),
            Some(PlayerAction::SeekRelative(-TAP_SEEK_MS))
        );
    }

    #[test]
    fn hold_progress_reaches_one_at_threshold() {
        let mut arbiter = GestureArbiter::new(true);
        let start = t0();

        assert!(arbiter.press_horizontal(HoldDirection::Left, start).is_some());

        let (direction, ratio) = arbiter
            .hold_progress(start + Duration::from_millis(2500))
            .unwrap();
        assert_eq!(direction, HoldDirection::Left);
        assert!((ratio - 0.5).abs() < 0.01);

        let (_, ratio) = arbiter.hold_progress(start + HOLD_SKIP_THRESHOLD).unwrap();
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }
}
