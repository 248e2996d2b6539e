//! GameSession - the point-or-bust state machine.
//!
//! The first roll establishes the point. Every later roll either matches the
//! point (win), shows a 1 (loss), or keeps the game going. The session owns
//! all game state; the frontend only feeds it roll requests and renders the
//! results it emits.

use crate::dice::{DieConfig, RngRoller, RollSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from GameSession operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A roll was requested after the game finished. The frontend is
    /// expected to stop asking once it sees a terminal result; the session
    /// refuses the call either way and leaves its state untouched.
    #[error("the game is over ({0}); start a new game to roll again")]
    Finished(GameStatus),
}

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Whether the status is one of the two end states.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        write!(f, "{s}")
    }
}

/// How a single roll resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// Neither the point nor a 1; keep rolling.
    Continue,
    /// The point came up again.
    Won,
    /// The die showed a 1.
    Lost,
}

/// Result of one accepted roll, for the frontend to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// The face that was rolled.
    pub face: u32,
    /// How the roll resolved.
    pub outcome: RollOutcome,
}

/// A single game of point-or-bust.
///
/// The session is synchronous: each [`roll`](GameSession::roll) runs to
/// completion and returns its result before another is accepted. Terminal
/// results are emitted immediately; any reveal delay is the frontend's
/// business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    die: DieConfig,
    point: Option<u32>,
    status: GameStatus,
}

impl GameSession {
    /// Start a new game with the given die.
    pub fn new(die: DieConfig) -> Self {
        Self {
            die,
            point: None,
            status: GameStatus::InProgress,
        }
    }

    /// Restart in place with a (possibly new) die.
    ///
    /// Point and status never carry over between games.
    pub fn reset(&mut self, die: DieConfig) {
        *self = Self::new(die);
    }

    /// Roll once and resolve the result against the game state.
    ///
    /// The first roll sets the point; a first roll of 1 both sets the point
    /// and loses the game. Later rolls lose on a 1, win on the point, and
    /// continue otherwise.
    pub fn roll<S: RollSource>(&mut self, source: &mut S) -> Result<RollResult, SessionError> {
        if self.status.is_terminal() {
            return Err(SessionError::Finished(self.status));
        }

        let roll = source.roll(&self.die);
        let outcome = match self.point {
            None => {
                self.point = Some(roll.face);
                if roll.face == 1 {
                    RollOutcome::Lost
                } else {
                    RollOutcome::Continue
                }
            }
            Some(point) => {
                if roll.face == 1 {
                    RollOutcome::Lost
                } else if roll.face == point {
                    RollOutcome::Won
                } else {
                    RollOutcome::Continue
                }
            }
        };

        match outcome {
            RollOutcome::Won => self.status = GameStatus::Won,
            RollOutcome::Lost => self.status = GameStatus::Lost,
            RollOutcome::Continue => {}
        }

        Ok(RollResult {
            face: roll.face,
            outcome,
        })
    }

    /// Roll once using the thread-local RNG.
    pub fn roll_random(&mut self) -> Result<RollResult, SessionError> {
        self.roll(&mut RngRoller::default())
    }

    /// The die in effect for this game.
    pub fn die(&self) -> &DieConfig {
        &self.die
    }

    /// The point to match, once the first roll has established it.
    pub fn point(&self) -> Option<u32> {
        self.point
    }

    /// Where the session stands.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDie;

    fn d6() -> DieConfig {
        DieConfig::fair(6).unwrap()
    }

    #[test]
    fn test_new_session_state() {
        let session = GameSession::new(d6());
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.point(), None);
        assert!(!session.is_over());
    }

    #[test]
    fn test_first_roll_sets_point() {
        let mut session = GameSession::new(d6());
        let mut die = ScriptedDie::new([4]);

        let result = session.roll(&mut die).unwrap();
        assert_eq!(result.face, 4);
        assert_eq!(result.outcome, RollOutcome::Continue);
        assert_eq!(session.point(), Some(4));
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_first_roll_of_one_loses_and_sets_point() {
        let mut session = GameSession::new(d6());
        let mut die = ScriptedDie::new([1]);

        let result = session.roll(&mut die).unwrap();
        assert_eq!(result.outcome, RollOutcome::Lost);
        assert_eq!(session.point(), Some(1));
        assert_eq!(session.status(), GameStatus::Lost);
    }

    #[test]
    fn test_point_never_moves_while_in_progress() {
        let mut session = GameSession::new(d6());
        let mut die = ScriptedDie::new([4, 2, 5, 3]);

        for _ in 0..4 {
            session.roll(&mut die).unwrap();
        }
        assert_eq!(session.point(), Some(4));
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_rolling_the_point_again_wins() {
        let mut session = GameSession::new(d6());
        let mut die = ScriptedDie::new([4, 2, 4]);

        assert_eq!(session.roll(&mut die).unwrap().outcome, RollOutcome::Continue);
        assert_eq!(session.roll(&mut die).unwrap().outcome, RollOutcome::Continue);
        assert_eq!(session.roll(&mut die).unwrap().outcome, RollOutcome::Won);
        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn test_rolling_a_one_loses() {
        let mut session = GameSession::new(d6());
        let mut die = ScriptedDie::new([5, 1]);

        assert_eq!(session.roll(&mut die).unwrap().outcome, RollOutcome::Continue);
        let result = session.roll(&mut die).unwrap();
        assert_eq!(result.face, 1);
        assert_eq!(result.outcome, RollOutcome::Lost);
        assert_eq!(session.status(), GameStatus::Lost);
    }

    #[test]
    fn test_finished_session_refuses_rolls() {
        let mut session = GameSession::new(d6());
        let mut die = ScriptedDie::new([1, 6]);

        session.roll(&mut die).unwrap();
        let err = session.roll(&mut die).unwrap_err();
        assert_eq!(err, SessionError::Finished(GameStatus::Lost));

        // The refused call changed nothing, and consumed no roll.
        assert_eq!(session.point(), Some(1));
        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(die.remaining(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = GameSession::new(d6());
        let mut die = ScriptedDie::new([1]);
        session.roll(&mut die).unwrap();
        assert!(session.is_over());

        session.reset(DieConfig::loaded(8, 3, 40).unwrap());
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.point(), None);
        assert_eq!(session.die().sides(), 8);
    }
}
