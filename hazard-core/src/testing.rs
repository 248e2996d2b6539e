//! Testing utilities for the dice game.
//!
//! This module provides tools for deterministic tests:
//! - `ScriptedDie` for forcing exact roll sequences through the real seam
//! - `TestHarness` for scripted game scenarios
//! - Assertion helpers for verifying session state

use crate::dice::{DieConfig, Roll, RollSource};
use crate::session::{GameSession, GameStatus, RollResult, SessionError};

/// A roll source that returns scripted faces in order.
///
/// Faces are handed out exactly as queued, without range checks against the
/// die, so tests control every roll the session sees. Rolling past the end
/// of the script panics; that is a test-authoring bug, not a game state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDie {
    /// Faces to return, in order.
    faces: Vec<u32>,
    /// Index of the next face to return.
    next: usize,
}

impl ScriptedDie {
    /// Create a scripted die from a fixed sequence of faces.
    pub fn new(faces: impl Into<Vec<u32>>) -> Self {
        Self {
            faces: faces.into(),
            next: 0,
        }
    }

    /// Append a face to the script.
    pub fn queue_face(&mut self, face: u32) {
        self.faces.push(face);
    }

    /// Replay the script from the beginning.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Number of faces not yet rolled.
    pub fn remaining(&self) -> usize {
        self.faces.len() - self.next
    }
}

impl RollSource for ScriptedDie {
    fn roll(&mut self, _die: &DieConfig) -> Roll {
        let face = *self
            .faces
            .get(self.next)
            .expect("scripted die ran out of faces");
        self.next += 1;
        Roll { face }
    }
}

/// Test harness for running scripted game scenarios.
pub struct TestHarness {
    /// The scripted roll source.
    pub die: ScriptedDie,
    /// The session under test.
    pub session: GameSession,
}

impl TestHarness {
    /// Create a harness around a fair six-sided die.
    pub fn new() -> Self {
        Self::with_die(DieConfig::fair(6).expect("a fair d6 is a valid die"))
    }

    /// Create a harness with a custom die.
    pub fn with_die(die: DieConfig) -> Self {
        Self {
            die: ScriptedDie::default(),
            session: GameSession::new(die),
        }
    }

    /// Queue the next face to roll.
    pub fn expect_face(&mut self, face: u32) -> &mut Self {
        self.die.queue_face(face);
        self
    }

    /// Roll once; panics if the session refused the roll.
    pub fn roll(&mut self) -> RollResult {
        self.session
            .roll(&mut self.die)
            .expect("session refused the roll")
    }

    /// Roll once without unwrapping, for probing terminal behavior.
    pub fn try_roll(&mut self) -> Result<RollResult, SessionError> {
        self.session.roll(&mut self.die)
    }

    /// The current point, if established.
    pub fn point(&self) -> Option<u32> {
        self.session.point()
    }

    /// The session status.
    pub fn status(&self) -> GameStatus {
        self.session.status()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the game is still in progress.
#[track_caller]
pub fn assert_in_progress(harness: &TestHarness) {
    assert_eq!(
        harness.status(),
        GameStatus::InProgress,
        "Expected the game to be in progress"
    );
}

/// Assert the game was won.
#[track_caller]
pub fn assert_won(harness: &TestHarness) {
    assert_eq!(harness.status(), GameStatus::Won, "Expected the game to be won");
}

/// Assert the game was lost.
#[track_caller]
pub fn assert_lost(harness: &TestHarness) {
    assert_eq!(harness.status(), GameStatus::Lost, "Expected the game to be lost");
}

/// Assert the point is established at the given face.
#[track_caller]
pub fn assert_point(harness: &TestHarness, face: u32) {
    assert_eq!(
        harness.point(),
        Some(face),
        "Expected the point to be {face}"
    );
}
