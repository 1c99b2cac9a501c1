//! # Renju agent
//!
//! A five-in-a-row (Renju/Gomoku) player on a 31×31 board, driven by a remote referee over TCP.
//!
//! It provides:
//! - The board and its move validation ([`board`])
//! - Five-in-a-row detection ([`win`])
//! - A tiered move heuristic behind the [`MoveStrategy`](crate::strategy::MoveStrategy) trait
//!   ([`strategy`])
//! - The game lifecycle: center opening, opponent moves, reset ([`session`])
//! - The line-based JSON protocol ([`protocol`]) and the TCP accept loop ([`server`])
//!
//! The agent does not search: it wins when it can in one move, blocks a five the opponent could
//! complete in one move, and otherwise plays next to the opponent's last stone.
//! Forbidden-move rules (double-three, double-four, overline) are not enforced.
//!
//! # Protocol
//!
//! The referee opens one connection per request, sends one JSON line and reads one JSON line
//! back, then the agent closes the connection:
//!
//! ```text
//! -> {"command":"start"}
//! <- {"move":{"x":15,"y":15},"team":"TEAM ANGLERS"}
//! -> {"command":"move","opponentMove":{"x":15,"y":16}}
//! <- {"move":{"x":16,"y":16},"team":"TEAM ANGLERS"}
//! -> {"command":"reset"}
//! <- {"reply":"ok"}
//! ```
//!
//! Refused requests get `{"error": "<message>"}` and leave the game untouched. Lines that are
//! not a JSON object get no reply at all.
//!
//! # Usage Example
//!
//! Playing without the network layer:
//!
//! ```
//! use std::time::Duration;
//! use renju_agent::prelude::*;
//!
//! let mut session = GameSession::new("TEAM ANGLERS");
//! let timeout = Duration::from_secs(5);
//!
//! let reply = session.handle(&Command::Start, timeout);
//! assert_eq!(reply, Response::play(CENTER, "TEAM ANGLERS"));
//!
//! let reply = session.handle(&Command::Move { x: 15, y: 16 }, timeout);
//! assert_eq!(reply, Response::play(Pos::new(16, 16), "TEAM ANGLERS"));
//! ```
#![warn(missing_docs)]

pub use anyhow;

pub mod board;
pub mod cli;
pub mod configuration;
pub mod error;
pub mod logger;
pub mod protocol;
pub mod server;
pub mod session;
pub mod strategy;
pub mod win;

/// Commonly used types and traits for quick access.
///
/// ```rust
/// use renju_agent::prelude::*;
/// ```
pub mod prelude {
    pub use crate::board::{Board, Pos, Stone, BOARD_SIZE, CENTER};
    pub use crate::configuration::Configuration;
    pub use crate::error::GameError;
    pub use crate::protocol::{Command, Coords, Response};
    pub use crate::server::Server;
    pub use crate::session::{GameSession, GameState};
    pub use crate::strategy::{MoveStrategy, TieredStrategy};
}
