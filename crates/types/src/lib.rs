//! Shared types and constants for the falling-block engine.
//!
//! Everything in here is plain data with no dependencies, so it can be used by
//! the core rules, the runtime, and any front end alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (`BOARD_WIDTH / 2 - 1`, 0) = (4, 0) for every piece
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 1000 | Interval between gravity ticks |
//!
//! # Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_CLEAR_POINTS` | 100 | Per cleared row, flat (no multi-line bonus) |
//! | `HARD_DROP_POINTS_PER_ROW` | 2 | Per row descended by a hard drop |
//!
//! # Examples
//!
//! ```
//! use tetrion_types::{GameAction, Lifecycle, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color().get(), 6);
//! assert_eq!(PieceKind::T.color().hue(), Some(300));
//! assert_eq!(GameAction::HardDrop.as_str(), "hardDrop");
//!
//! assert!(Lifecycle::Active.is_active());
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::num::NonZeroU8;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column for the top-left cell of a new piece's bounding box.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Spawn row for the top-left cell of a new piece's bounding box.
pub const SPAWN_Y: i8 = 0;

/// Default gravity interval (one row per second)
pub const DEFAULT_TICK_MS: u32 = 1000;

/// Points per cleared row. Clearing several rows at once earns no bonus.
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points per row descended by a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;


/// The seven tetromino piece kinds
///
/// - **I**: 4x4 box, horizontal bar
/// - **J**: 3x3 box
/// - **L**: 3x3 box (mirror of J)
/// - **O**: 2x2 box, square
/// - **S**: 3x3 box
/// - **T**: 3x3 box
/// - **Z**: 3x3 box (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Color identifier stored on the board for this kind.
    pub fn color(&self) -> Color {
        let id = match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        };
        Color(NonZeroU8::MIN.saturating_add(id - 1))
    }
}

/// Opaque non-zero color identifier.
///
/// The board only stores ids; turning an id into something visible is the
/// front end's business (see [`Color::hue`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(NonZeroU8);

impl Color {
    /// Returns `None` for 0, which is reserved for the empty cell.
    pub fn new(id: u8) -> Option<Self> {
        NonZeroU8::new(id).map(Color)
    }

    pub fn get(self) -> u8 {
        self.0.get()
    }

    /// Display hue in degrees for the catalog colors (1..=7).
    ///
    /// I cyan, J blue, L orange, O yellow, S green, T magenta, Z red.
    /// Ids outside the catalog have no hue.
    pub fn hue(self) -> Option<u16> {
        match self.get() {
            1 => Some(180),
            2 => Some(240),
            3 => Some(30),
            4 => Some(60),
            5 => Some(120),
            6 => Some(300),
            7 => Some(0),
            _ => None,
        }
    }
}

/// A cell on the game board: `None` is empty, `Some(color)` is filled.
pub type Cell = Option<Color>;

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Active,
    Paused,
    GameOver,
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Active => "active",
            Lifecycle::Paused => "paused",
            Lifecycle::GameOver => "gameOver",
        }
    }
}

/// Inputs to the game controller.
///
/// `Tick` comes from the periodic timer; everything else comes from the
/// player (or a test harness).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Gravity step from the timer
    Tick,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Player-requested gravity step (same rules as `Tick`)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its lowest legal row and lock it
    HardDrop,
    /// Active <-> Paused
    TogglePause,
    /// Start a fresh game from any state
    Restart,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Tick => "tick",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
        }
    }
}
