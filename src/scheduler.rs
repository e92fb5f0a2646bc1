//! Gravity scheduler
//!
//! Polled once per frame by the host loop. Each pulse compares the time since
//! the last gravity tick against the level's interval and ticks the game when
//! it has passed. The caller passes the current time in.

use crate::game::{Game, LockReport};
use std::time::Instant;

/// Result of one scheduler pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// Not armed, or the session is no longer running
    Stopped,
    /// Interval not reached yet
    Waiting,
    /// A gravity tick ran
    Ticked(Option<LockReport>),
}

impl Pulse {
    /// Whether the pulse changed game state, so the view is stale
    pub fn changed_state(&self) -> bool {
        matches!(self, Pulse::Ticked(_))
    }

    /// The lock that ended the session, if this pulse ended it
    pub fn final_lock(&self) -> Option<LockReport> {
        match self {
            Pulse::Ticked(Some(report)) if report.game_over => Some(*report),
            _ => None,
        }
    }
}

/// Periodic gravity driver
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Time of the last gravity tick, None when disarmed
    last_tick: Option<Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn is_armed(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Run one scheduling step.
    ///
    /// The first pulse that sees a running session arms the scheduler and
    /// starts counting from `now`, however the session was started.
    pub fn pulse(&mut self, game: &mut Game, now: Instant) -> Pulse {
        if !game.is_running() {
            self.last_tick = None;
            return Pulse::Stopped;
        }
        let last = *self.last_tick.get_or_insert(now);

        if now.saturating_duration_since(last) > game.gravity_interval() {
            let report = game.tick();
            self.last_tick = Some(now);
            if !game.is_running() {
                self.last_tick = None;
            }
            Pulse::Ticked(report)
        } else {
            Pulse::Waiting
        }
    }
}
