//! Die configuration and roll generation.
//!
//! A die is described once, up front: how many sides it has and whether one
//! of them is loaded. Rolling goes through the [`RollSource`] seam so tests
//! can substitute a scripted sequence for the real RNG.

use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest allowed side count.
pub const MIN_SIDES: u32 = 3;
/// Largest allowed side count.
pub const MAX_SIDES: u32 = 50;

/// Error type for die configuration.
///
/// Each variant carries the rejected input so the frontend can echo it back
/// when re-prompting. A field that fails to parse as an integer is reported
/// the same way as one that parses out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DieError {
    #[error("invalid side count {0:?}: expected an integer between {MIN_SIDES} and {MAX_SIDES}")]
    InvalidSideCount(String),
    #[error("invalid load factor {0:?}: expected an integer between 1 and 100")]
    InvalidLoadFactor(String),
    #[error("invalid loaded side {input:?}: expected an integer between 1 and {sides}")]
    InvalidLoadedSide { input: String, sides: u32 },
}

/// Weighting applied to a single side of a die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Load {
    /// The favored side.
    pub side: u32,
    /// Chance, in percent, that a roll is forced onto the favored side.
    pub percent: u32,
}

/// An immutable, validated die description.
///
/// Construct one through [`DieConfig::fair`], [`DieConfig::loaded`], or
/// [`DieConfig::from_input`]; a value that exists is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieConfig {
    sides: u32,
    load: Option<Load>,
}

impl DieConfig {
    /// Create a fair die with the given number of sides.
    pub fn fair(sides: u32) -> Result<Self, DieError> {
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(DieError::InvalidSideCount(sides.to_string()));
        }
        Ok(Self { sides, load: None })
    }

    /// Create a loaded die.
    ///
    /// `side` is the favored face and `percent` the chance, in percent, that
    /// a roll is forced onto it. Both bounds of `side` are enforced: 0 is
    /// rejected just like `sides + 1`.
    pub fn loaded(sides: u32, side: u32, percent: u32) -> Result<Self, DieError> {
        let fair = Self::fair(sides)?;
        if !(1..=100).contains(&percent) {
            return Err(DieError::InvalidLoadFactor(percent.to_string()));
        }
        if !(1..=sides).contains(&side) {
            return Err(DieError::InvalidLoadedSide {
                input: side.to_string(),
                sides,
            });
        }
        Ok(Self {
            load: Some(Load { side, percent }),
            ..fair
        })
    }

    /// Build a die from the player's raw input strings.
    ///
    /// `load` carries the load factor and loaded side inputs when the player
    /// asked for a loaded die, in that order. Validation is all-or-nothing:
    /// either every field checks out and a die exists, or the first offending
    /// field is reported and nothing is built.
    pub fn from_input(sides: &str, load: Option<(&str, &str)>) -> Result<Self, DieError> {
        let sides = parse_field(sides, DieError::InvalidSideCount)?;
        let die = Self::fair(sides)?;
        match load {
            None => Ok(die),
            Some((factor, side)) => {
                let percent = parse_field(factor, DieError::InvalidLoadFactor)?;
                let side = parse_field(side, |input| DieError::InvalidLoadedSide {
                    input,
                    sides,
                })?;
                Self::loaded(sides, side, percent)
            }
        }
    }

    /// Number of sides on the die.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// The loading, if the die has one.
    pub fn load(&self) -> Option<Load> {
        self.load
    }

    /// Whether the die is loaded.
    pub fn is_loaded(&self) -> bool {
        self.load.is_some()
    }

    /// Roll the die with a specific RNG (useful for testing).
    ///
    /// A fair die picks uniformly from `[1, sides]`. A loaded die first
    /// draws a trial in `[1, 100]`: at or under the load factor the outcome
    /// is the favored side; above it, faces are redrawn uniformly until one
    /// differs from the favored side. The forced branch is therefore the
    /// only path that can produce the favored side.
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> Roll {
        let face = match self.load {
            None => rng.gen_range(1..=self.sides),
            Some(Load { side, percent }) => {
                let trial = rng.gen_range(1..=100);
                if trial <= percent {
                    side
                } else {
                    let mut face = rng.gen_range(1..=self.sides);
                    while face == side {
                        face = rng.gen_range(1..=self.sides);
                    }
                    face
                }
            }
        };
        Roll { face }
    }

    /// Roll the die using the thread-local RNG.
    pub fn roll(&self) -> Roll {
        self.roll_with_rng(&mut rand::thread_rng())
    }
}

impl fmt::Display for DieConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.load {
            None => write!(f, "fair d{}", self.sides),
            Some(load) => write!(
                f,
                "d{} loaded {}% toward {}",
                self.sides, load.percent, load.side
            ),
        }
    }
}

fn parse_field(input: &str, err: impl FnOnce(String) -> DieError) -> Result<u32, DieError> {
    let trimmed = input.trim();
    trimmed.parse().map_err(|_| err(trimmed.to_string()))
}

/// A single roll outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// The face showing after the roll, in `[1, sides]`.
    pub face: u32,
}

/// A source of die rolls.
///
/// The production implementation is [`RngRoller`]; tests substitute
/// [`crate::testing::ScriptedDie`] to drive a session through a fixed
/// sequence of faces.
pub trait RollSource {
    /// Produce one roll of `die`.
    fn roll(&mut self, die: &DieConfig) -> Roll;
}

/// A [`RollSource`] backed by a [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngRoller<R: Rng = ThreadRng> {
    rng: R,
}

impl<R: Rng> RngRoller<R> {
    /// Wrap an RNG as a roll source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RngRoller {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> RollSource for RngRoller<R> {
    fn roll(&mut self, die: &DieConfig) -> Roll {
        die.roll_with_rng(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_side_count_bounds() {
        assert!(matches!(
            DieConfig::fair(2),
            Err(DieError::InvalidSideCount(_))
        ));
        assert!(matches!(
            DieConfig::fair(51),
            Err(DieError::InvalidSideCount(_))
        ));
        assert!(DieConfig::fair(3).is_ok());
        assert!(DieConfig::fair(50).is_ok());
    }

    #[test]
    fn test_load_factor_bounds() {
        assert!(matches!(
            DieConfig::loaded(6, 3, 0),
            Err(DieError::InvalidLoadFactor(_))
        ));
        assert!(matches!(
            DieConfig::loaded(6, 3, 101),
            Err(DieError::InvalidLoadFactor(_))
        ));
        assert!(DieConfig::loaded(6, 3, 1).is_ok());
        assert!(DieConfig::loaded(6, 3, 100).is_ok());
    }

    #[test]
    fn test_loaded_side_bounds() {
        // Both ends of the range are enforced.
        assert!(matches!(
            DieConfig::loaded(6, 0, 50),
            Err(DieError::InvalidLoadedSide { .. })
        ));
        assert!(matches!(
            DieConfig::loaded(6, 7, 50),
            Err(DieError::InvalidLoadedSide { .. })
        ));
        assert!(DieConfig::loaded(6, 1, 50).is_ok());
        assert!(DieConfig::loaded(6, 6, 50).is_ok());
    }

    #[test]
    fn test_from_input_fair() {
        let die = DieConfig::from_input("6", None).unwrap();
        assert_eq!(die.sides(), 6);
        assert!(!die.is_loaded());

        // Surrounding whitespace is harmless.
        assert!(DieConfig::from_input(" 10 ", None).is_ok());
    }

    #[test]
    fn test_from_input_loaded() {
        let die = DieConfig::from_input("8", Some(("25", "5"))).unwrap();
        assert_eq!(die.sides(), 8);
        assert_eq!(die.load(), Some(Load { side: 5, percent: 25 }));
    }

    #[test]
    fn test_from_input_rejects_non_numeric() {
        assert!(matches!(
            DieConfig::from_input("six", None),
            Err(DieError::InvalidSideCount(_))
        ));
        assert!(matches!(
            DieConfig::from_input("6", Some(("lots", "3"))),
            Err(DieError::InvalidLoadFactor(_))
        ));
        assert!(matches!(
            DieConfig::from_input("6", Some(("50", "top"))),
            Err(DieError::InvalidLoadedSide { .. })
        ));
    }

    #[test]
    fn test_from_input_checks_sides_before_load_fields() {
        // A bad side count wins even when the load fields are also bad.
        assert!(matches!(
            DieConfig::from_input("2", Some(("0", "9"))),
            Err(DieError::InvalidSideCount(_))
        ));
    }

    #[test]
    fn test_fair_roll_range() {
        let die = DieConfig::fair(6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let roll = die.roll_with_rng(&mut rng);
            assert!(roll.face >= 1 && roll.face <= 6);
        }
    }

    #[test]
    fn test_loaded_roll_range() {
        let die = DieConfig::loaded(10, 4, 30).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let roll = die.roll_with_rng(&mut rng);
            assert!(roll.face >= 1 && roll.face <= 10);
        }
    }

    #[test]
    fn test_fully_loaded_die_always_shows_favored_side() {
        let die = DieConfig::loaded(6, 4, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(die.roll_with_rng(&mut rng).face, 4);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DieConfig::fair(6).unwrap().to_string(), "fair d6");
        assert_eq!(
            DieConfig::loaded(20, 7, 35).unwrap().to_string(),
            "d20 loaded 35% toward 7"
        );
    }
}
