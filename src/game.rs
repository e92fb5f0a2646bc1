//! Core game state and logic

use crate::grid::{Cell, Grid};
use crate::piece::Piece;
use crate::rules::is_valid_placement;
use crate::score::Score;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Before the first start
    Idle,
    Running,
    /// Terminal until the next start
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Start,
    Quit,
}

/// What happened when a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub rows_cleared: u32,
    pub points: u64,
    pub game_over: bool,
}

/// Column offsets tried, in order, when a rotation collides
const ROTATION_KICKS: [i32; 3] = [0, -1, 1];

/// The main game struct. All mutation goes through its commands.
pub struct Game {
    grid: Grid,
    current_piece: Option<Piece>,
    score: Score,
    state: GameState,
    /// Report of the most recent lock
    last_lock: Option<LockReport>,
    rng: ChaCha8Rng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create an idle game with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create an idle game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            grid: Grid::default(),
            current_piece: None,
            score: Score::new(),
            state: GameState::Idle,
            last_lock: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn last_lock(&self) -> Option<LockReport> {
        self.last_lock
    }

    /// Time between gravity ticks at the current level
    pub fn gravity_interval(&self) -> Duration {
        self.score.gravity_interval()
    }

    /// Process an action. Returns true if the game changed.
    pub fn process_action(&mut self, action: Action) -> bool {
        match action {
            Action::Start => {
                self.start();
                true
            }
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SoftDrop => self.soft_drop(),
            Action::Rotate => self.rotate(),
            Action::HardDrop => self.hard_drop().is_some(),
            // Handled by the host
            Action::Quit => false,
        }
    }

    /// Reset everything and begin a new session
    pub fn start(&mut self) {
        self.grid = Grid::default();
        self.score = Score::new();
        self.last_lock = None;
        // An empty grid always fits the spawn, so no game-over check here
        self.current_piece = Some(Piece::spawn(&mut self.rng, self.grid.cols()));
        self.state = GameState::Running;
        info!("Session started");
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Move down one row for a point. Does not lock when blocked; the next
    /// gravity tick does that.
    pub fn soft_drop(&mut self) -> bool {
        if self.try_move(1, 0) {
            self.score.add_soft_drop();
            true
        } else {
            false
        }
    }

    /// Rotate clockwise, trying one column left and right if the spot is taken
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = &self.current_piece else {
            return false;
        };

        let kicked = ROTATION_KICKS
            .iter()
            .map(|&d_col| piece.rotated(d_col))
            .find(|candidate| self.fits(candidate));

        match kicked {
            Some(rotated) => {
                self.current_piece = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Drop to the lowest valid row and lock. Returns rows travelled.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_running() || self.current_piece.is_none() {
            return None;
        }

        let mut distance = 0;
        while self.try_move(1, 0) {
            distance += 1;
        }
        self.score.add_hard_drop(distance);
        self.lock_piece();
        Some(distance)
    }

    /// Gravity: move down one row, or lock if the piece is resting.
    /// Returns the lock report if a lock happened.
    pub fn tick(&mut self) -> Option<LockReport> {
        if !self.is_running() || self.current_piece.is_none() {
            return None;
        }
        if self.try_move(1, 0) {
            return None;
        }
        self.lock_piece()
    }

    fn fits(&self, piece: &Piece) -> bool {
        is_valid_placement(&self.grid, &piece.shape, piece.col, piece.row)
    }

    /// Commit a move if the target placement is valid
    fn try_move(&mut self, d_row: i32, d_col: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = &self.current_piece else {
            return false;
        };
        let moved = piece.shifted(d_row, d_col);
        if !self.fits(&moved) {
            return false;
        }
        self.current_piece = Some(moved);
        true
    }

    /// Settle the current piece, clear rows, update score and spawn the next one
    fn lock_piece(&mut self) -> Option<LockReport> {
        let piece = self.current_piece.take()?;

        let cell = Cell::Filled(piece.piece_type);
        for (row, col) in piece.cells() {
            // Cells still above the top are dropped
            if row >= 0 {
                self.grid.settle(row, col, cell);
            }
        }

        let rows_cleared = self.grid.clear_full_rows() as u32;
        let level_before = self.score.level;
        let points = self.score.add_clear(rows_cleared);
        if rows_cleared > 0 {
            debug!(
                "Cleared {} rows for {} points, {} lines total",
                rows_cleared, points, self.score.lines
            );
        }
        if self.score.level != level_before {
            info!(
                "Level {} reached, gravity every {:?}",
                self.score.level,
                self.gravity_interval()
            );
        }

        let next = Piece::spawn(&mut self.rng, self.grid.cols());
        let game_over = !self.fits(&next);
        if game_over {
            self.state = GameState::GameOver;
            info!(
                "Game over: score={} lines={} level={}",
                self.score.points, self.score.lines, self.score.level
            );
        } else {
            self.current_piece = Some(next);
        }

        let report = LockReport {
            rows_cleared,
            points,
            game_over,
        };
        self.last_lock = Some(report);
        Some(report)
    }
}
