//! Placement validity: the one collision check used for every move

use crate::grid::Grid;
use crate::tetromino::Shape;

/// Check whether `shape` anchored at column `x`, row `y` fits on the grid.
///
/// Every filled cell must land inside the side walls and above the floor,
/// and must not overlap a settled cell. Cells above the top row (negative
/// rows) are allowed and skip the overlap check.
pub fn is_valid_placement(grid: &Grid, shape: &Shape, x: i32, y: i32) -> bool {
    let cols = grid.cols() as i32;
    let rows = grid.rows() as i32;

    shape.filled().all(|(dr, dc)| {
        let (row, col) = (y + dr, x + dc);
        if col < 0 || col >= cols || row >= rows {
            return false;
        }
        row < 0 || grid.get(row, col).is_some_and(|cell| cell.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, GRID_COLS, GRID_ROWS};
    use crate::tetromino::TetrominoType;

    #[test]
    fn test_spawn_on_empty_grid_is_valid() {
        let grid = Grid::default();
        for kind in TetrominoType::all() {
            let shape = kind.template();
            let x = ((GRID_COLS - shape.cols()) / 2) as i32;
            assert!(is_valid_placement(&grid, &shape, x, 0), "{:?}", kind);
        }
    }

    #[test]
    fn test_side_walls() {
        let grid = Grid::default();
        let bar = TetrominoType::I.template();
        assert!(is_valid_placement(&grid, &bar, 0, 5));
        assert!(is_valid_placement(&grid, &bar, 6, 5));
        assert!(!is_valid_placement(&grid, &bar, -1, 5));
        assert!(!is_valid_placement(&grid, &bar, 7, 5));
    }

    #[test]
    fn test_floor() {
        let grid = Grid::default();
        let square = TetrominoType::O.template();
        assert!(is_valid_placement(&grid, &square, 4, GRID_ROWS as i32 - 2));
        assert!(!is_valid_placement(&grid, &square, 4, GRID_ROWS as i32 - 1));
    }

    #[test]
    fn test_above_top_is_allowed() {
        let grid = Grid::default();
        let vertical = TetrominoType::I.template().rotate_cw();
        assert!(is_valid_placement(&grid, &vertical, 0, -3));
        assert!(is_valid_placement(&grid, &vertical, 0, -10));
    }

    #[test]
    fn test_overlap_with_settled_cell() {
        let mut grid = Grid::default();
        grid.settle(10, 4, Cell::Filled(TetrominoType::S));
        let square = TetrominoType::O.template();
        assert!(!is_valid_placement(&grid, &square, 4, 9));
        assert!(!is_valid_placement(&grid, &square, 3, 10));
        assert!(is_valid_placement(&grid, &square, 5, 9));
    }

    #[test]
    fn test_empty_corner_of_shape_may_overlap() {
        let mut grid = Grid::default();
        // T's top-left corner is empty
        grid.settle(5, 3, Cell::Filled(TetrominoType::Z));
        let t = TetrominoType::T.template();
        assert!(is_valid_placement(&grid, &t, 3, 5));
    }
}
