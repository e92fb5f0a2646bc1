//! Score, line count, level and gravity speed

use std::time::Duration;

/// Gravity interval at level 1
pub const INITIAL_INTERVAL: Duration = Duration::from_millis(1000);
/// Gravity never gets faster than this
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);
/// Interval reduction per level
pub const INTERVAL_STEP: Duration = Duration::from_millis(100);
pub const LINES_PER_LEVEL: u32 = 10;
pub const SOFT_DROP_POINTS: u64 = 1;
pub const HARD_DROP_POINTS: u64 = 2;
pub const LINE_CLEAR_POINTS: u64 = 100;

/// Scoring state for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Current level, starting at 1
    pub level: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            level: 1,
        }
    }

    /// Add a line clear and return the points it was worth.
    /// Points use the level from before the clear.
    pub fn add_clear(&mut self, rows: u32) -> u64 {
        if rows == 0 {
            return 0;
        }
        let awarded = rows as u64 * LINE_CLEAR_POINTS * self.level as u64;
        self.points += awarded;
        self.lines += rows;
        self.level = self.lines / LINES_PER_LEVEL + 1;
        awarded
    }

    /// Add score for one row of soft drop
    pub fn add_soft_drop(&mut self) {
        self.points += SOFT_DROP_POINTS;
    }

    /// Add score for hard drop (2 points per row)
    pub fn add_hard_drop(&mut self, rows: u32) {
        self.points += rows as u64 * HARD_DROP_POINTS;
    }

    /// Time between gravity ticks at the current level
    pub fn gravity_interval(&self) -> Duration {
        let faster_by = INTERVAL_STEP * self.level.saturating_sub(1);
        INITIAL_INTERVAL
            .saturating_sub(faster_by)
            .max(MIN_INTERVAL)
    }
}
