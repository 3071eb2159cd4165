//! Pieces module - tetromino catalog and the rotation function
//!
//! Each kind has a square bounding box (I: 4x4, O: 2x2, the rest 3x3) stored in
//! a fixed 4x4 matrix. Rotation turns the occupancy pattern inside that box and
//! never changes the box size. There are no wall kicks: a rotation either fits
//! where the piece is or it is rejected by the controller.

use crate::types::{Color, PieceKind};

/// Largest bounding box in the catalog (the I piece).
pub const MAX_BOX: usize = 4;

/// Occupancy matrix of a piece, row-major: `cells[y][x]`.
///
/// Only the top-left `size x size` corner is meaningful; cells outside it are
/// always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_BOX]; MAX_BOX],
}

impl Shape {
    /// Build a shape from a square 0/1 matrix.
    ///
    /// Const so the catalog is checked at compile time: a row whose length
    /// differs from the row count, a box larger than [`MAX_BOX`], or a value
    /// other than 0/1 fails the build.
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N > 0 && N <= MAX_BOX, "shape box out of range");
        let mut cells = [[false; MAX_BOX]; MAX_BOX];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                assert!(rows[y][x] <= 1, "shape cells must be 0 or 1");
                cells[y][x] = rows[y][x] == 1;
                x += 1;
            }
            y += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the bounding box.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether local cell (x, y) is occupied. Out-of-box coordinates are empty.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size as usize && y < self.size as usize && self.cells[y][x]
    }

    /// Iterate the occupied cells as local (x, y) offsets.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.cells[y][x].then_some((x as i8, y as i8)))
        })
    }

    /// Rows of the bounding box as 0/1 values, for display and tests.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        let n = self.size as usize;
        (0..n)
            .map(|y| (0..n).map(|x| self.cells[y][x] as u8).collect())
            .collect()
    }
}

/// Static definition of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub shape: Shape,
}

/// The seven spawn shapes, in [`PieceKind::ALL`] order.
pub const CATALOG: [PieceDef; 7] = [
    PieceDef {
        kind: PieceKind::I,
        shape: Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    },
    PieceDef {
        kind: PieceKind::J,
        shape: Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    },
    PieceDef {
        kind: PieceKind::L,
        shape: Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    },
    PieceDef {
        kind: PieceKind::O,
        shape: Shape::from_rows([[1, 1], [1, 1]]),
    },
    PieceDef {
        kind: PieceKind::S,
        shape: Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    },
    PieceDef {
        kind: PieceKind::T,
        shape: Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    },
    PieceDef {
        kind: PieceKind::Z,
        shape: Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    },
];

/// Spawn shape for a piece kind.
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => CATALOG[0].shape,
        PieceKind::J => CATALOG[1].shape,
        PieceKind::L => CATALOG[2].shape,
        PieceKind::O => CATALOG[3].shape,
        PieceKind::S => CATALOG[4].shape,
        PieceKind::T => CATALOG[5].shape,
        PieceKind::Z => CATALOG[6].shape,
    }
}

/// Rotate a shape 90° clockwise inside its bounding box.
///
/// Local cell (x, y) moves to (size - 1 - y, x). Pure and total; four
/// applications return the original shape.
pub fn rotate_piece(shape: &Shape) -> Shape {
    let n = shape.size as usize;
    let mut cells = [[false; MAX_BOX]; MAX_BOX];
    for y in 0..n {
        for x in 0..n {
            cells[x][n - 1 - y] = shape.cells[y][x];
        }
    }
    Shape {
        size: shape.size,
        cells,
    }
}

/// A piece in play: kind, current orientation, and the color it locks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    /// Create a piece in its spawn orientation.
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            color: kind.color(),
        }
    }

    /// The same piece rotated clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            shape: rotate_piece(&self.shape),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_box_sizes() {
        for def in CATALOG.iter() {
            let expected = match def.kind {
                PieceKind::I => 4,
                PieceKind::O => 2,
                _ => 3,
            };
            assert_eq!(def.shape.size(), expected, "{:?}", def.kind);
        }
    }

    #[test]
    fn test_catalog_order_matches_kinds() {
        for (def, kind) in CATALOG.iter().zip(PieceKind::ALL) {
            assert_eq!(def.kind, kind);
            assert_eq!(get_shape(kind), def.shape);
        }
    }

    #[test]
    fn test_every_piece_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = rotate_piece(&get_shape(PieceKind::T));
        assert_eq!(rotated.rows(), vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let rotated = rotate_piece(&get_shape(PieceKind::I));
        assert_eq!(rotated.size(), 4);
        let cells: Vec<_> = rotated.cells().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_rotate_o_is_identity() {
        let o = get_shape(PieceKind::O);
        assert_eq!(rotate_piece(&o), o);
    }

    #[test]
    fn test_four_rotations_identity() {
        for kind in PieceKind::ALL {
            let start = get_shape(kind);
            let mut shape = start;
            for _ in 0..4 {
                shape = rotate_piece(&shape);
                assert_eq!(shape.size(), start.size());
            }
            assert_eq!(shape, start, "{:?}", kind);
        }
    }

    #[test]
    fn test_is_filled_outside_box() {
        let o = get_shape(PieceKind::O);
        assert!(o.is_filled(1, 1));
        assert!(!o.is_filled(2, 0));
        assert!(!o.is_filled(0, 3));
    }

    #[test]
    fn test_piece_new_uses_kind_color() {
        let piece = Piece::new(PieceKind::S);
        assert_eq!(piece.color, PieceKind::S.color());
        assert_eq!(piece.shape, get_shape(PieceKind::S));
        assert_eq!(piece.rotated().kind, PieceKind::S);
    }
}
