//! Output Hysteresis over the Confirmed Activity State
//!
//! ## Overview
//!
//! The detailed classifiers are deliberately reactive; left alone they
//! would flap between states at window boundaries. This machine is the
//! final gate: a proposed state different from the emitted one is
//! suppressed until a minimum hold has elapsed since the last committed
//! change. Once the hold expires, whatever the classifiers currently
//! propose is committed, so a genuine transition is delayed by at most
//! the hold, never lost.
//!
//! The very first proposal is committed immediately; there is no previous
//! change to hold against.

use crate::{
    constants::motion::MIN_HOLD_MS,
    errors::{ConfigError, ConfigResult},
    events::ActivityState,
    time::{elapsed_ms, Timestamp},
};

/// Debounced activity-state gate
#[derive(Debug, Clone, Copy)]
pub struct HysteresisStateMachine {
    hold_ms: u64,
    emitted: ActivityState,
    last_change: Option<Timestamp>,
}

impl HysteresisStateMachine {
    /// Machine with a custom minimum hold
    pub fn new(hold_ms: u64) -> ConfigResult<Self> {
        if hold_ms == 0 {
            return Err(ConfigError::ZeroDuration { field: "hold_ms" });
        }
        Ok(Self {
            hold_ms,
            emitted: ActivityState::Transient,
            last_change: None,
        })
    }

    /// Gate one proposed state; returns the state to emit
    pub fn update(&mut self, now: Timestamp, proposed: ActivityState) -> ActivityState {
        if proposed == self.emitted {
            return self.emitted;
        }
        match self.last_change {
            Some(at) if elapsed_ms(at, now) < self.hold_ms => {
                // Too soon after the last commit: suppress
                self.emitted
            }
            _ => {
                #[cfg(feature = "std")]
                log::debug!(
                    "state {} -> {} at t={now}",
                    self.emitted.name(),
                    proposed.name()
                );
                self.emitted = proposed;
                self.last_change = Some(now);
                self.emitted
            }
        }
    }

    /// Currently emitted state
    pub fn current(&self) -> ActivityState {
        self.emitted
    }
}

impl Default for HysteresisStateMachine {
    fn default() -> Self {
        Self {
            hold_ms: MIN_HOLD_MS,
            emitted: ActivityState::Transient,
            last_change: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_proposal_commits_immediately() {
        let mut hs = HysteresisStateMachine::default();
        assert_eq!(hs.current(), ActivityState::Transient);
        assert_eq!(hs.update(0, ActivityState::Walking), ActivityState::Walking);
    }

    #[test]
    fn flip_within_hold_is_never_observed() {
        let mut hs = HysteresisStateMachine::default();

        assert_eq!(hs.update(0, ActivityState::Walking), ActivityState::Walking);
        // A -> B -> A flap entirely inside the hold window
        assert_eq!(
            hs.update(500, ActivityState::Running),
            ActivityState::Walking
        );
        assert_eq!(
            hs.update(1000, ActivityState::Walking),
            ActivityState::Walking
        );
        assert_eq!(hs.current(), ActivityState::Walking);
    }

    #[test]
    fn change_commits_once_hold_expires() {
        let mut hs = HysteresisStateMachine::default();

        hs.update(0, ActivityState::Walking);
        assert_eq!(
            hs.update(1499, ActivityState::Running),
            ActivityState::Walking
        );
        assert_eq!(
            hs.update(1500, ActivityState::Running),
            ActivityState::Running
        );
        // The commit restarts the hold
        assert_eq!(
            hs.update(2000, ActivityState::Walking),
            ActivityState::Running
        );
    }

    #[test]
    fn matching_proposal_does_not_touch_the_timer() {
        let mut hs = HysteresisStateMachine::default();

        hs.update(0, ActivityState::Walking);
        // Re-proposing the emitted state repeatedly...
        hs.update(400, ActivityState::Walking);
        hs.update(800, ActivityState::Walking);
        // ...does not extend the hold: a change at 1500 still commits
        assert_eq!(
            hs.update(1500, ActivityState::Running),
            ActivityState::Running
        );
    }

    #[test]
    fn zero_hold_rejected() {
        assert!(HysteresisStateMachine::new(0).is_err());
    }
}
