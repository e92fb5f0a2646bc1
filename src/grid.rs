//! Settled-block grid and line clearing

use crate::tetromino::TetrominoType;

/// Standard grid dimensions
pub const GRID_COLS: usize = 10;
pub const GRID_ROWS: usize = 20;

/// A cell on the grid - either empty or filled by a settled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Color identifier, 0 for empty
    #[allow(dead_code)]
    pub fn color_id(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.color_id(),
        }
    }
}

/// The settled blocks. Row 0 is the top, rows grow downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cell storage (row * cols + col)
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS)
    }
}

impl Grid {
    /// Create an all-empty grid. A grid needs at least one column.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(cols > 0, "grid must have at least one column");
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Get the cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Write a settled cell. Panics if (row, col) is outside the grid.
    pub fn settle(&mut self, row: i32, col: i32, cell: Cell) {
        let Some(idx) = self.index(row, col) else {
            panic!(
                "settle out of bounds: ({row}, {col}) on {}x{} grid",
                self.rows, self.cols
            );
        };
        self.cells[idx] = cell;
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Check if every cell in a row is filled. Panics if `row` is out of range.
    pub fn is_row_full(&self, row: usize) -> bool {
        assert!(
            row < self.rows,
            "row {} out of range for {} rows",
            row,
            self.rows
        );
        self.row(row).iter().all(|cell| cell.is_filled())
    }

    /// Remove every full row, shift the rows above it down and refill the
    /// top with empty rows. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut write_row = self.rows;

        // Walk bottom-up, copying kept rows down to the write cursor
        for read_row in (0..self.rows).rev() {
            if self.is_row_full(read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let (src, dst) = (read_row * self.cols, write_row * self.cols);
                self.cells.copy_within(src..src + self.cols, dst);
            }
        }

        // One fresh row on top for every row removed
        let cleared = write_row;
        self.cells[..cleared * self.cols].fill(Cell::Empty);

        cleared
    }

    /// Check if the grid has no settled cells
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Iterate rows from top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }
}
