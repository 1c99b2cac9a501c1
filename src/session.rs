//! Game session lifecycle
//!
//! A [`GameSession`] owns the single board of the process and turns decoded
//! [`Command`]s into [`Response`]s:
//!
//! - `start` plays the fixed opening at the center `(15, 15)`
//! - `move` validates and places the opponent stone, then places the agent's answer
//! - `reset` empties the board
//!
//! Every request either fully succeeds or leaves the session exactly as it was: on any
//! [`GameError`] the session is restored from a snapshot taken before the request.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use crate::board::{Board, Pos, Stone, CENTER};
use crate::error::GameError;
use crate::protocol::{Command, Response};
use crate::strategy::{MoveStrategy, TieredStrategy};
use crate::win::check_win;

/// Where the session is in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No stone placed since process start or the last reset
    AwaitingStart,
    /// At least one stone on the board
    InProgress,
}

/// The single game played by the agent.
#[derive(Debug, Clone)]
pub struct GameSession<S = TieredStrategy> {
    board: Board,
    first_move_placed: bool,
    strategy: S,
    team: String,
}

impl GameSession<TieredStrategy> {
    /// A fresh session answering with the [`TieredStrategy`].
    pub fn new(team: impl Into<String>) -> Self {
        Self::with_strategy(team, TieredStrategy)
    }
}

impl<S: MoveStrategy> GameSession<S> {
    /// A fresh session using `strategy` to answer opponent moves.
    pub fn with_strategy(team: impl Into<String>, strategy: S) -> Self {
        Self {
            board: Board::new(),
            first_move_placed: false,
            strategy,
            team: team.into(),
        }
    }

    /// Current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Name sent in move replies
    pub fn team(&self) -> &str {
        &self.team
    }

    /// See [`GameState`]
    pub fn state(&self) -> GameState {
        if self.first_move_placed {
            GameState::InProgress
        } else {
            GameState::AwaitingStart
        }
    }

    /// Applies `command` and builds the reply.
    ///
    /// Commands computing a move (`start` and `move`) must complete within `timeout`,
    /// measured from this call. Otherwise the reply is a [`GameError::MoveTimeout`] and the
    /// session is left untouched.
    #[instrument(skip(self), fields(state = ?self.state()))]
    pub fn handle(&mut self, command: &Command, timeout: Duration) -> Response {
        let started = Instant::now();
        let snapshot = (self.board.clone(), self.first_move_placed);

        let result = match command {
            Command::Start => self.start().map(Some),
            Command::Move { x, y } => self.answer(*x, *y).map(Some),
            Command::Reset => {
                self.reset();
                Ok(None)
            }
            Command::Unknown(name) => {
                debug!(name = name.as_str(), "unknown command");
                Err(GameError::UnknownCommand)
            }
        };

        let result = match result {
            Ok(Some(_)) if started.elapsed() >= timeout => {
                warn!(elapsed = ?started.elapsed(), ?timeout, "move computed too late");
                Err(GameError::MoveTimeout)
            }
            other => other,
        };

        match result {
            Ok(Some(pos)) => Response::play(pos, &self.team),
            Ok(None) => Response::ok(),
            Err(err) => {
                (self.board, self.first_move_placed) = snapshot;
                debug!(%err, "request refused");
                err.into()
            }
        }
    }

    /// Empties the board and waits for a new game.
    pub fn reset(&mut self) {
        self.board.reset();
        self.first_move_placed = false;
        info!("session reset");
    }

    /// Plays the opening at the center.
    fn start(&mut self) -> Result<Pos, GameError> {
        if !self.board.is_empty(CENTER) {
            return Err(GameError::OpeningNotCenter);
        }
        self.place(CENTER, Stone::Agent);
        Ok(CENTER)
    }

    /// Places the opponent stone at `(x, y)` and the agent's answer.
    fn answer(&mut self, x: i32, y: i32) -> Result<Pos, GameError> {
        if !self.board.is_valid_move(x, y) {
            return Err(GameError::InvalidOpponentMove);
        }
        let opponent_move = Pos::try_new(x, y).ok_or(GameError::InvalidOpponentMove)?;
        self.place(opponent_move, Stone::Opponent);

        let answer = self
            .strategy
            .select_move(&self.board, opponent_move)
            .ok_or(GameError::BoardFull)?;
        self.place(answer, Stone::Agent);
        Ok(answer)
    }

    fn place(&mut self, pos: Pos, stone: Stone) {
        self.board.place(pos, stone);
        self.first_move_placed = true;
        if check_win(&self.board, pos, stone) {
            info!(%pos, ?stone, "five in a row");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn start_and_play(session: &mut GameSession, moves: &[(i32, i32)]) -> Vec<Response> {
        let mut replies = vec![session.handle(&Command::Start, TIMEOUT)];
        for &(x, y) in moves {
            replies.push(session.handle(&Command::Move { x, y }, TIMEOUT));
        }
        replies
    }

    #[test]
    fn start_plays_center() {
        let mut session = GameSession::new("TEAM ANGLERS");
        assert_eq!(session.state(), GameState::AwaitingStart);
        let reply = session.handle(&Command::Start, TIMEOUT);
        assert_eq!(reply, Response::play(CENTER, "TEAM ANGLERS"));
        assert_eq!(session.board().get(CENTER), Stone::Agent);
        assert_eq!(session.state(), GameState::InProgress);
    }

    #[test]
    fn second_start_is_refused() {
        let mut session = GameSession::new("T");
        session.handle(&Command::Start, TIMEOUT);
        let before = session.board().clone();
        let reply = session.handle(&Command::Start, TIMEOUT);
        assert_eq!(reply, Response::from(GameError::OpeningNotCenter));
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn move_answers_adjacent() {
        let mut session = GameSession::new("T");
        let replies = start_and_play(&mut session, &[(15, 16)]);
        assert_eq!(replies[1], Response::play(Pos::new(16, 16), "T"));
        assert_eq!(session.board().get(Pos::new(15, 16)), Stone::Opponent);
        assert_eq!(session.board().get(Pos::new(16, 16)), Stone::Agent);
        assert_eq!(session.board().stone_count(), 3);
    }

    #[test]
    fn occupied_move_is_refused() {
        let mut session = GameSession::new("T");
        start_and_play(&mut session, &[(15, 16)]);
        let before = session.board().clone();
        for (x, y) in [(15, 16), (15, 15), (-1, -1), (31, 0), (0, 31)] {
            let reply = session.handle(&Command::Move { x, y }, TIMEOUT);
            assert_eq!(reply, Response::from(GameError::InvalidOpponentMove));
        }
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn move_without_start() {
        let mut session = GameSession::new("T");
        let reply = session.handle(&Command::Move { x: 0, y: 0 }, TIMEOUT);
        assert_eq!(reply, Response::play(Pos::new(1, 0), "T"));
        assert_eq!(session.state(), GameState::InProgress);
        // the center is still free: the opening can be played
        assert_eq!(
            session.handle(&Command::Start, TIMEOUT),
            Response::play(CENTER, "T")
        );
    }

    #[test]
    fn unknown_command() {
        let mut session = GameSession::new("T");
        session.handle(&Command::Start, TIMEOUT);
        let reply = session.handle(&Command::Unknown("frobnicate".into()), TIMEOUT);
        assert_eq!(reply, Response::from(GameError::UnknownCommand));
        assert_eq!(session.board().stone_count(), 1);
    }

    #[test]
    fn reset_twice() {
        let mut session = GameSession::new("T");
        start_and_play(&mut session, &[(3, 3), (20, 20)]);
        for _ in 0..2 {
            assert_eq!(session.handle(&Command::Reset, TIMEOUT), Response::ok());
            assert!(session.board().is_board_empty());
            assert_eq!(session.state(), GameState::AwaitingStart);
        }
    }

    #[test]
    fn blocks_four_over_adjacency() {
        let mut session = GameSession::new("T");
        let replies = start_and_play(&mut session, &[(20, 5), (20, 6), (20, 7), (20, 8)]);
        assert_eq!(replies[1], Response::play(Pos::new(21, 5), "T"));
        assert_eq!(replies[2], Response::play(Pos::new(21, 6), "T"));
        assert_eq!(replies[3], Response::play(Pos::new(21, 7), "T"));
        // adjacency alone would have answered (21, 8)
        assert_eq!(replies[4], Response::play(Pos::new(20, 9), "T"));
    }

    #[test]
    fn completes_own_five() {
        let mut session = GameSession::new("T");
        for x in 3..7 {
            session.board.place(Pos::new(x, 10), Stone::Agent);
        }
        session.first_move_placed = true;
        // (7, 10) is two cells left of the opponent stone
        let reply = session.handle(&Command::Move { x: 9, y: 10 }, TIMEOUT);
        assert_eq!(reply, Response::play(Pos::new(7, 10), "T"));
        assert!(check_win(session.board(), Pos::new(7, 10), Stone::Agent));
    }

    #[test]
    fn timeout_restores_session() {
        let mut session = GameSession::new("T");
        let reply = session.handle(&Command::Start, Duration::ZERO);
        assert_eq!(reply, Response::from(GameError::MoveTimeout));
        assert!(session.board().is_board_empty());
        assert_eq!(session.state(), GameState::AwaitingStart);

        // acknowledgements are not subject to the timeout
        assert_eq!(session.handle(&Command::Reset, Duration::ZERO), Response::ok());
    }

    #[test]
    fn full_board_restores_opponent_stone() {
        let mut session = GameSession::new("T");
        let empty: Vec<_> = session.board().empty_cells().collect();
        let (last, rest) = empty.split_last().unwrap();
        for &pos in rest {
            session.board.place(pos, Stone::Agent);
        }
        session.first_move_placed = true;
        let reply = session.handle(
            &Command::Move {
                x: last.x as i32,
                y: last.y as i32,
            },
            TIMEOUT,
        );
        assert_eq!(reply, Response::from(GameError::BoardFull));
        assert!(session.board().is_empty(*last));
    }

    struct Corner;

    impl MoveStrategy for Corner {
        fn select_move(&self, board: &Board, _last_move: Pos) -> Option<Pos> {
            let corner = Pos::new(0, 0);
            board.is_empty(corner).then_some(corner)
        }
    }

    #[test]
    fn custom_strategy() {
        let mut session = GameSession::with_strategy("corner", Corner);
        assert_eq!(
            session.handle(&Command::Move { x: 5, y: 5 }, TIMEOUT),
            Response::play(Pos::new(0, 0), "corner")
        );
        // no more corner: refused and rolled back
        assert_eq!(
            session.handle(&Command::Move { x: 6, y: 6 }, TIMEOUT),
            Response::from(GameError::BoardFull)
        );
        assert!(session.board().is_empty(Pos::new(6, 6)));
    }
}
