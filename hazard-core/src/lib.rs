//! Point-or-bust dice game engine.
//!
//! The player configures a die (side count, optionally one loaded side),
//! then rolls it repeatedly. The first roll establishes the point; rolling
//! the point again wins, rolling a 1 loses.
//!
//! This crate is the game core only: configuration, roll generation, and
//! the session state machine. Prompting, rendering, and pacing belong to
//! whatever frontend embeds it.
//!
//! # Quick Start
//!
//! ```
//! use hazard_core::{DieConfig, GameSession, RollOutcome};
//!
//! let die = DieConfig::fair(6)?;
//! let mut session = GameSession::new(die);
//!
//! let result = session.roll_random()?;
//! match result.outcome {
//!     RollOutcome::Continue => println!("rolled {}, keep going", result.face),
//!     RollOutcome::Won => println!("hit the point, you win"),
//!     RollOutcome::Lost => println!("rolled a 1, you lose"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dice;
pub mod session;
pub mod testing;

// Primary public API
pub use dice::{DieConfig, DieError, Load, RngRoller, Roll, RollSource, MAX_SIDES, MIN_SIDES};
pub use session::{GameSession, GameStatus, RollOutcome, RollResult, SessionError};
