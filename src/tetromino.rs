//! Tetromino catalog and shape matrices
//!
//! All 7 pieces are stored as small 0/1 matrices. Rotation builds a fresh
//! matrix every time instead of looking up precomputed rotation tables.

use ratatui::style::Color;

/// The 7 tetromino types, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    J,
    L,
    S,
    Z,
}

impl TetrominoType {
    /// Get all tetromino types in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::S,
            TetrominoType::Z,
        ]
    }

    /// Color identifier stored in the grid (1..=7, 0 is reserved for empty)
    pub fn color_id(&self) -> u8 {
        match self {
            TetrominoType::I => 1,
            TetrominoType::O => 2,
            TetrominoType::T => 3,
            TetrominoType::J => 4,
            TetrominoType::L => 5,
            TetrominoType::S => 6,
            TetrominoType::Z => 7,
        }
    }

    /// Get the display color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Blue,
            TetrominoType::T => Color::Rgb(255, 170, 0), // Orange
            TetrominoType::J => Color::Yellow,
            TetrominoType::L => Color::Green,
            TetrominoType::S => Color::Magenta,
            TetrominoType::Z => Color::Red,
        }
    }

    /// Spawn orientation of this tetromino
    pub fn template(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoType::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
            TetrominoType::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
            TetrominoType::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
            TetrominoType::S => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            TetrominoType::Z => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        }
    }
}

/// A rectangular 0/1 matrix, row-major, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from rows of 0/1 values. All rows must be the same length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.first().map_or(0, |row| row.len());
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "shape rows must have equal length"
        );
        Self {
            rows: rows.len(),
            cols,
            cells: rows
                .iter()
                .flat_map(|row| row.iter().map(|&v| v != 0))
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at (row, col) is filled; false outside the matrix
    #[allow(dead_code)]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Iterate the (row, col) offsets of all filled cells
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(idx, _)| ((idx / self.cols) as i32, (idx % self.cols) as i32))
    }

    /// Rotate 90° clockwise into a new matrix.
    ///
    /// An R×C input becomes C×R with `out[j][R-1-i] = in[i][j]`.
    pub fn rotate_cw(&self) -> Shape {
        let (rows, cols) = (self.cols, self.rows);
        let mut cells = vec![false; rows * cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                cells[j * cols + (self.rows - 1 - i)] = self.cells[i * self.cols + j];
            }
        }
        Shape { rows, cols, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_distinct_colors() {
        let mut ids: Vec<u8> = TetrominoType::all().iter().map(|t| t.color_id()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_every_template_has_four_cells() {
        for kind in TetrominoType::all() {
            assert_eq!(kind.template().filled().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_bar_is_vertical() {
        let bar = TetrominoType::I.template();
        let rotated = bar.rotate_cw();
        assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
        assert!((0..4).all(|row| rotated.is_filled(row, 0)));
    }

    #[test]
    fn test_rotate_t() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let rotated = TetrominoType::T.template().rotate_cw();
        assert_eq!(rotated, Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]));
    }

    #[test]
    fn test_rotate_does_not_touch_input() {
        let original = TetrominoType::L.template();
        let copy = original.clone();
        let _ = original.rotate_cw();
        assert_eq!(original, copy);
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in TetrominoType::all() {
            let shape = kind.template();
            let full_turn = shape.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
            assert_eq!(full_turn, shape, "{:?}", kind);
        }
    }
}
