use crate::pieces::{Piece, Shape};
use crate::types::{Color, Lifecycle, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Preview of the piece that spawns after the active one locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextPreview {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

impl From<Piece> for NextPreview {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
        }
    }
}

/// Immutable view handed to renderers after every transition.
///
/// `board` holds color ids (0 = empty) with the active piece already painted
/// in, except after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub next: NextPreview,
    pub score: u32,
    pub lines: u32,
    pub lifecycle: Lifecycle,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.lifecycle.is_active()
    }

    pub fn paused(&self) -> bool {
        self.lifecycle == Lifecycle::Paused
    }

    pub fn game_over(&self) -> bool {
        self.lifecycle == Lifecycle::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            next: NextPreview::from(Piece::new(PieceKind::I)),
            score: 0,
            lines: 0,
            lifecycle: Lifecycle::Active,
        }
    }
}
