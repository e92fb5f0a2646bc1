//! Active falling piece

use crate::tetromino::{Shape, TetrominoType};
use rand::Rng;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino (decides the color)
    pub piece_type: TetrominoType,
    /// Current orientation
    pub shape: Shape,
    /// Top-left anchor in grid coordinates, row 0 at the top
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// Create a piece at the spawn position: horizontally centered, row 0
    pub fn new(piece_type: TetrominoType, grid_cols: usize) -> Self {
        let shape = piece_type.template();
        let col = (grid_cols.saturating_sub(shape.cols()) / 2) as i32;
        Self {
            piece_type,
            shape,
            row: 0,
            col,
        }
    }

    /// Pick one of the 7 tetrominoes uniformly at random and place it at spawn
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid_cols: usize) -> Self {
        let catalog = TetrominoType::all();
        let piece_type = catalog[rng.gen_range(0..catalog.len())];
        Self::new(piece_type, grid_cols)
    }

    /// Get the absolute (row, col) positions of all filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
    }

    /// The same piece moved by (d_row, d_col)
    pub fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self.clone()
        }
    }

    /// The same piece rotated clockwise in place, then moved `d_col` columns
    pub fn rotated(&self, d_col: i32) -> Self {
        Self {
            shape: self.shape.rotate_cw(),
            col: self.col + d_col,
            ..self.clone()
        }
    }
}
