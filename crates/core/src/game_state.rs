//! Game state module - the controller state machine
//!
//! A [`GameState`] is a plain value. [`GameState::step`] (and the free
//! [`transition`] function) consume a state and an action and return the next
//! state; nothing else mutates it. The timer and the input layer only produce
//! [`GameAction`]s.
//!
//! Lifecycle rules:
//!
//! - **Active**: every action applies.
//! - **Paused**: only `TogglePause` and `Restart`; ticks and moves are ignored.
//! - **GameOver**: only `Restart`.

use crate::board::{Board, Position};
use crate::pieces::Piece;
use crate::rng::PieceSpawner;
use crate::snapshot::{GameSnapshot, NextPreview};
use crate::types::*;

/// Canonical spawn position for every piece
pub const SPAWN_POSITION: Position = Position::new(SPAWN_X, SPAWN_Y);

/// What happened when the last piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Hard-drop points (2 per row descended); 0 for gravity locks.
    pub drop_bonus: u32,
    /// `lines_cleared * 100`
    pub line_score: u32,
    /// The next piece did not fit at the spawn position.
    pub topped_out: bool,
}

impl LockEvent {
    pub fn total_score(&self) -> u32 {
        self.drop_bonus + self.line_score
    }
}

/// Complete game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    active: Piece,
    next: Piece,
    position: Position,
    score: u32,
    /// Total rows cleared this game (display only, scoring is per lock).
    lines: u32,
    /// Pieces locked this game.
    pieces_locked: u32,
    lifecycle: Lifecycle,
    spawner: PieceSpawner,
    /// Seed this game started from; `GameState::new(seed)` replays it.
    seed: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Start a new game: empty board, two fresh pieces, score 0, Active.
    pub fn new(seed: u32) -> Self {
        let mut spawner = PieceSpawner::new(seed);
        let active = spawner.generate_piece();
        let next = spawner.generate_piece();
        Self {
            seed,
            ..Self::from_parts(Board::new(), active, next, SPAWN_POSITION, spawner)
        }
    }

    /// Build an Active state around an arbitrary board and pieces.
    ///
    /// Intended for scripted setups (puzzles, tests). The caller is
    /// responsible for `active` fitting at `position`. The reported seed is
    /// the spawner's state as passed in.
    pub fn from_parts(
        board: Board,
        active: Piece,
        next: Piece,
        position: Position,
        spawner: PieceSpawner,
    ) -> Self {
        Self {
            board,
            active,
            next,
            position,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            lifecycle: Lifecycle::Active,
            seed: spawner.rng_state(),
            spawner,
            last_event: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Seed of the current game (not the live generator state).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The most recent lock, if any piece has locked since the last restart.
    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Apply one action and return the resulting state.
    pub fn step(mut self, action: GameAction) -> Self {
        self.apply(action);
        self
    }

    fn apply(&mut self, action: GameAction) {
        match (self.lifecycle, action) {
            (_, GameAction::Restart) => {
                *self = Self::new(self.spawner.rng_state());
            }
            (Lifecycle::Active, GameAction::TogglePause) => {
                self.lifecycle = Lifecycle::Paused;
            }
            (Lifecycle::Paused, GameAction::TogglePause) => {
                self.lifecycle = Lifecycle::Active;
            }
            (Lifecycle::Active, GameAction::Tick | GameAction::SoftDrop) => self.drop_one(),
            (Lifecycle::Active, GameAction::MoveLeft) => {
                self.try_shift(-1);
            }
            (Lifecycle::Active, GameAction::MoveRight) => {
                self.try_shift(1);
            }
            (Lifecycle::Active, GameAction::Rotate) => {
                self.try_rotate();
            }
            (Lifecycle::Active, GameAction::HardDrop) => self.hard_drop(),
            // Paused and GameOver ignore everything else.
            _ => {}
        }
    }

    /// Move one row down, or lock if blocked.
    fn drop_one(&mut self) {
        let below = self.position.shifted(0, 1);
        if self.board.can_move(&self.active.shape, below) {
            self.position = below;
        } else {
            self.lock_and_advance(0);
        }
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        let target = self.position.shifted(dx, 0);
        if self.board.can_move(&self.active.shape, target) {
            self.position = target;
            true
        } else {
            false
        }
    }

    /// Rotate clockwise in place; no kicks.
    fn try_rotate(&mut self) -> bool {
        let rotated = self.active.rotated();
        if self.board.can_move(&rotated.shape, self.position) {
            self.active = rotated;
            true
        } else {
            false
        }
    }

    /// Lowest row the active piece can reach from its current position.
    pub fn drop_target(&self) -> Position {
        let mut target = self.position;
        while self
            .board
            .can_move(&self.active.shape, target.shifted(0, 1))
        {
            target = target.shifted(0, 1);
        }
        target
    }

    fn hard_drop(&mut self) {
        let target = self.drop_target();
        let rows = (target.y - self.position.y) as u32;
        self.position = target;
        self.lock_and_advance(rows * HARD_DROP_POINTS_PER_ROW);
    }

    /// Merge the active piece, clear rows, score, then spawn the next piece
    /// or end the game if it does not fit.
    fn lock_and_advance(&mut self, drop_bonus: u32) {
        let merged = self
            .board
            .merge_piece(&self.active.shape, self.position, self.active.color);
        let (board, cleared) = merged.clear_lines();
        let lines_cleared = cleared.len() as u32;
        let line_score = lines_cleared * LINE_CLEAR_POINTS;

        self.board = board;
        self.score = self.score.saturating_add(drop_bonus + line_score);
        self.lines += lines_cleared;
        self.pieces_locked += 1;

        let topped_out = !self.board.can_move(&self.next.shape, SPAWN_POSITION);
        if topped_out {
            self.lifecycle = Lifecycle::GameOver;
        } else {
            self.active = self.next;
            self.next = self.spawner.generate_piece();
            self.position = SPAWN_POSITION;
        }

        self.last_event = Some(LockEvent {
            lines_cleared,
            drop_bonus,
            line_score,
            topped_out,
        });
    }

    /// Fill `out` with the read-only view a renderer needs.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        if self.lifecycle != Lifecycle::GameOver {
            let color = self.active.color.get();
            for (sx, sy) in self.active.shape.cells() {
                let x = self.position.x + sx;
                let y = self.position.y + sy;
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    out.board[y as usize][x as usize] = color;
                }
            }
        }

        out.next = NextPreview::from(self.next);
        out.score = self.score;
        out.lines = self.lines;
        out.lifecycle = self.lifecycle;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// `(GameState, GameAction) -> GameState`
pub fn transition(state: GameState, action: GameAction) -> GameState {
    state.step(action)
}
