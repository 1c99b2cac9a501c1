//! Wire format spoken with the referee.
//!
//! One UTF-8 JSON object per line, terminated by `\n`, in both directions.
//!
//! Requests:
//! ```text
//! {"command":"start"}
//! {"command":"move","opponentMove":{"x":15,"y":16}}
//! {"command":"reset"}
//! ```
//!
//! Replies have exactly one of three shapes:
//! ```text
//! {"move":{"x":15,"y":15},"team":"TEAM ANGLERS"}
//! {"reply":"ok"}
//! {"error":"Invalid opponent move"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::board::Pos;
use crate::error::GameError;

/// Coordinate used for absent or non-integer `opponentMove` fields. Always off the board.
pub const MISSING_COORDINATE: i32 = -1;

/// Coordinates as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coords {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl From<Pos> for Coords {
    fn from(pos: Pos) -> Self {
        Coords {
            x: pos.x as i32,
            y: pos.y as i32,
        }
    }
}

/// A decoded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play the opening move
    Start,
    /// The opponent played at `(x, y)`; answer with a move
    Move {
        /// Column, [`MISSING_COORDINATE`] when absent
        x: i32,
        /// Row, [`MISSING_COORDINATE`] when absent
        y: i32,
    },
    /// Forget the current game
    Reset,
    /// Anything else, with the received command name (empty when missing)
    Unknown(String),
}

/// Why a line could not be decoded. The connection is closed without reply.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Nothing but whitespace before the end of line
    #[error("empty request")]
    Empty,
    /// Not JSON at all
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON but not an object
    #[error("request is not a JSON object")]
    NotAnObject,
}

impl Command {
    /// Decodes one request line (with or without its line terminator).
    pub fn decode(line: &str) -> Result<Command, DecodeError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(DecodeError::Empty);
        }

        let Value::Object(request) = serde_json::from_str::<Value>(line)? else {
            return Err(DecodeError::NotAnObject);
        };

        let name = request
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Ok(match name {
            "start" => Command::Start,
            "reset" => Command::Reset,
            "move" => {
                let opponent_move = request.get("opponentMove");
                Command::Move {
                    x: coordinate(opponent_move, "x"),
                    y: coordinate(opponent_move, "y"),
                }
            }
            other => Command::Unknown(other.to_owned()),
        })
    }
}

fn coordinate(opponent_move: Option<&Value>, field: &str) -> i32 {
    opponent_move
        .and_then(|m| m.get(field))
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(MISSING_COORDINATE)
}

/// A reply, encoded as exactly one of the three wire shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// The agent's move
    Move {
        /// Where the agent played
        #[serde(rename = "move")]
        coords: Coords,
        /// Name of the agent
        team: String,
    },
    /// Plain acknowledgement
    Reply {
        /// Always `"ok"`
        reply: String,
    },
    /// The request was refused
    Error {
        /// One of the [`GameError`] messages
        error: String,
    },
}

impl Response {
    /// Move reply for `pos`.
    pub fn play(pos: Pos, team: &str) -> Self {
        Response::Move {
            coords: pos.into(),
            team: team.to_owned(),
        }
    }

    /// `{"reply":"ok"}`
    pub fn ok() -> Self {
        Response::Reply {
            reply: "ok".to_owned(),
        }
    }

    /// Encodes the reply as a single `\n`-terminated line.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

impl From<GameError> for Response {
    fn from(err: GameError) -> Self {
        Response::Error {
            error: err.to_string(),
        }
    }
}
