//! Move selection strategies.
//!
//! This module defines the [`MoveStrategy`] trait used by the [`GameSession`](crate::session::GameSession)
//! to answer an opponent move, and the built-in [`TieredStrategy`].
//!
//! # Tiers of [`TieredStrategy`]
//! Evaluated in order, the first hit is played:
//! 1. a cell near the opponent's last stone that completes five for the agent,
//! 2. a cell near the opponent's last stone that would complete five for the opponent,
//! 3. the first free neighbor of the opponent's last stone,
//! 4. the first free cell of the board, row-major from `(0, 0)`.
//!
//! The scan orders are fixed: with several candidates, the first one found is played.

use tracing::trace;

use crate::board::{Board, Pos, Stone};
use crate::win::would_win;

/// Neighbor directions in scan order: right, down, left, up, down-right, down-left, up-right,
/// up-left.
pub const NEIGHBOR_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Distances from the opponent's stone probed along each direction.
pub const PROBE_OFFSETS: [i32; 4] = [-2, -1, 1, 2];

/// Picks the agent's answer to an opponent move.
///
/// Implement this trait to plug another heuristic into the session.
pub trait MoveStrategy {
    /// Returns the cell the agent plays after the opponent played `last_move`.
    ///
    /// `last_move` is already on `board`. The returned cell must be empty; `None` means no
    /// empty cell is left.
    fn select_move(&self, board: &Board, last_move: Pos) -> Option<Pos>;
}

/// Which tier of [`TieredStrategy`] produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Completes five for the agent
    Win,
    /// Prevents the opponent from completing five
    Block,
    /// Touches the opponent's last stone
    Adjacent,
    /// First free cell of the board
    Anywhere,
}

/// Win now, else block, else play next to the opponent, else anywhere free.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredStrategy;

impl TieredStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    /// Same as [`MoveStrategy::select_move`], also telling which tier matched.
    pub fn select_with_tier(&self, board: &Board, last_move: Pos) -> Option<(Pos, Tier)> {
        if let Some(pos) = Self::probe(board, last_move, Stone::Agent) {
            return Some((pos, Tier::Win));
        }
        if let Some(pos) = Self::probe(board, last_move, Stone::Opponent) {
            return Some((pos, Tier::Block));
        }
        if let Some(pos) = Self::adjacent(board, last_move) {
            return Some((pos, Tier::Adjacent));
        }
        board.empty_cells().next().map(|pos| (pos, Tier::Anywhere))
    }

    /// Cells probed for a win-in-one, in scan order.
    pub fn probe_candidates(last_move: Pos) -> impl Iterator<Item = Pos> {
        NEIGHBOR_DIRECTIONS.into_iter().flat_map(move |dir| {
            PROBE_OFFSETS
                .into_iter()
                .filter_map(move |steps| last_move.offset(dir, steps))
        })
    }

    /// First probed cell where a `stone` would complete five.
    fn probe(board: &Board, last_move: Pos, stone: Stone) -> Option<Pos> {
        Self::probe_candidates(last_move)
            .filter(|&pos| board.is_empty(pos))
            .find(|&pos| would_win(board, pos, stone))
    }

    fn adjacent(board: &Board, last_move: Pos) -> Option<Pos> {
        NEIGHBOR_DIRECTIONS
            .into_iter()
            .filter_map(|dir| last_move.offset(dir, 1))
            .find(|&pos| board.is_empty(pos))
    }
}

impl MoveStrategy for TieredStrategy {
    fn select_move(&self, board: &Board, last_move: Pos) -> Option<Pos> {
        let (pos, tier) = self.select_with_tier(board, last_move)?;
        trace!(%last_move, %pos, ?tier, "move selected");
        Some(pos)
    }
}
