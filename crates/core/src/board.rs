//! Board module - the playfield grid and pure queries/updates on it
//!
//! The board is a 10x20 grid where each cell is empty or holds a color id.
//! Storage is a flat row-major array, so a `Board` is `Copy` and its
//! dimensions cannot change.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! `can_move`, `merge_piece` and `clear_lines` never mutate `self`; the
//! controller builds each new board from the previous one.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Board coordinate of a shape's top-left box cell. `y` may be negative while
/// a piece is still partly above the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy).
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rows removed by [`Board::clear_lines`], as indices into the input board
/// (sorted bottom to top).
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row as a slice of cells.
    ///
    /// # Panics
    ///
    /// Panics if `y >= BOARD_HEIGHT`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Collision test for `shape` with its box at `pos`.
    ///
    /// Fails if any occupied cell lands outside the side walls, below the
    /// floor, or on a filled cell. Cells above the top edge (y < 0) are
    /// allowed and not checked against the grid.
    pub fn can_move(&self, shape: &Shape, pos: Position) -> bool {
        shape.cells().all(|(sx, sy)| {
            let x = pos.x + sx;
            let y = pos.y + sy;
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// A copy of this board with the shape's cells painted in `color`.
    ///
    /// Cells that fall outside the grid are skipped.
    pub fn merge_piece(&self, shape: &Shape, pos: Position, color: Color) -> Board {
        let mut merged = *self;
        for (sx, sy) in shape.cells() {
            merged.set(pos.x + sx, pos.y + sy, Some(color));
        }
        merged
    }

    /// A copy of this board with every full row removed and the same number
    /// of empty rows added at the top.
    ///
    /// Rows that survive keep their relative order. Uses a two-pointer
    /// compaction from the bottom up.
    pub fn clear_lines(&self) -> (Board, ClearedRows) {
        let mut next = *self;
        let mut cleared = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    next.cells[write_y * width..(write_y + 1) * width]
                        .copy_from_slice(&self.cells[src..src + width]);
                }
            }
        }

        next.cells[..write_y * width].fill(None);
        (next, cleared)
    }

    /// Write the grid as color ids (0 = empty) into `out`.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, dst) in row.iter_mut().enumerate() {
                *dst = self.cells[y * BOARD_WIDTH as usize + x].map_or(0, Color::get);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Create from a 2D vector (converts to flat array)
    ///
    /// Returns `None` unless `cells_2d` is exactly 20 rows of 10 cells.
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Option<Self> {
        if cells_2d.len() != BOARD_HEIGHT as usize
            || cells_2d.iter().any(|row| row.len() != BOARD_WIDTH as usize)
        {
            return None;
        }

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Some(Self { cells: flat })
    }

    /// Convert to 2D vector for testing/display
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_HEIGHT as usize)
            .map(|y| self.row(y).to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::PieceKind;

    fn color(id: u8) -> Color {
        Color::new(id).unwrap()
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_can_move_above_top_is_allowed() {
        let board = Board::new();
        let i = get_shape(PieceKind::I);
        // Occupied row of the I box is local y=1, so y=-1 puts it on row 0.
        assert!(board.can_move(&i, Position::new(3, -1)));
        // Entire piece above the grid.
        assert!(board.can_move(&i, Position::new(3, -3)));
    }

    #[test]
    fn test_can_move_ignores_empty_box_cells() {
        let board = Board::new();
        let i = get_shape(PieceKind::I);
        // Rows 2-3 of the I box are empty, so the box may hang below the floor.
        assert!(board.can_move(&i, Position::new(0, 18)));
        assert!(!board.can_move(&i, Position::new(0, 19)));
    }

    #[test]
    fn test_merge_skips_cells_outside_grid() {
        let board = Board::new();
        let o = get_shape(PieceKind::O);
        let merged = board.merge_piece(&o, Position::new(0, -1), color(4));
        assert_eq!(merged.get(0, 0), Some(Some(color(4))));
        assert_eq!(merged.get(1, 0), Some(Some(color(4))));
        assert_eq!(merged.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_clear_lines_keeps_order_of_survivors() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 19, Some(color(1)));
            board.set(x, 17, Some(color(1)));
        }
        board.set(2, 18, Some(color(2)));
        board.set(5, 16, Some(color(3)));

        let (cleared, rows) = board.clear_lines();
        assert_eq!(rows.as_slice(), &[19, 17]);
        assert_eq!(cleared.get(2, 19), Some(Some(color(2))));
        assert_eq!(cleared.get(5, 18), Some(Some(color(3))));
        assert!(!cleared.is_row_full(19));
        assert_eq!(cleared.row(0).iter().filter(|c| c.is_some()).count(), 0);
    }

    #[test]
    fn test_clear_lines_full_board() {
        let board = Board::from_cells(vec![vec![Some(color(1)); 10]; 20]).unwrap();
        let (cleared, rows) = board.clear_lines();
        assert_eq!(rows.len(), 20);
        assert_eq!(cleared, Board::new());
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(3, 7, Some(color(6)));
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[7][3], 6);
        assert_eq!(grid.iter().flatten().filter(|&&v| v != 0).count(), 1);
    }
}
