//! Statistical properties of the roll generator, under a seeded RNG.
//!
//! The loaded-die procedure is two-stage by design: a forced branch that
//! always produces the favored side, and a rejection branch that never does.
//! The favored side's long-run frequency is therefore the load factor alone,
//! not the load factor plus a fair share. These tests pin that behavior.

use hazard_core::DieConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn face_counts(die: &DieConfig, rolls: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = vec![0usize; die.sides() as usize + 1];
    for _ in 0..rolls {
        let roll = die.roll_with_rng(&mut rng);
        assert!(
            roll.face >= 1 && roll.face <= die.sides(),
            "face {} out of range for {die}",
            roll.face
        );
        counts[roll.face as usize] += 1;
    }
    counts
}

#[test]
fn test_fair_die_is_uniform() {
    let die = DieConfig::fair(6).unwrap();
    let counts = face_counts(&die, 60_000, 11);

    // Expected 10,000 per face; allow a wide deterministic margin.
    for face in 1..=6 {
        let n = counts[face];
        assert!(
            (9_500..=10_500).contains(&n),
            "face {face} came up {n} times in 60,000 fair rolls"
        );
    }
}

#[test]
fn test_loaded_side_frequency_is_the_load_factor_alone() {
    // d6 loaded 40% toward 4: the favored side comes from the forced branch
    // only, so it should land near 40% of rolls, not 40% + a fair share
    // (which would be 50%).
    let die = DieConfig::loaded(6, 4, 40).unwrap();
    let counts = face_counts(&die, 50_000, 23);

    let favored = counts[4];
    assert!(
        (19_000..=21_000).contains(&favored),
        "favored side came up {favored} times in 50,000 rolls; expected ~20,000"
    );

    // The remaining 60% spreads over the other five faces, ~12% each.
    for face in [1, 2, 3, 5, 6] {
        let n = counts[face];
        assert!(
            (5_400..=6_600).contains(&n),
            "face {face} came up {n} times in 50,000 rolls; expected ~6,000"
        );
    }
}

#[test]
fn test_rejection_branch_never_yields_the_favored_side() {
    // With a 1% load factor nearly every roll goes through the rejection
    // branch. If that branch could produce the favored side, it would show
    // up near its fair share (~17%); riding the forced branch alone keeps
    // it near 1%.
    let die = DieConfig::loaded(6, 3, 1).unwrap();
    let counts = face_counts(&die, 20_000, 37);

    let favored = counts[3];
    assert!(
        favored <= 400,
        "favored side came up {favored} times in 20,000 rolls at a 1% load factor"
    );
}

#[test]
fn test_extreme_configurations_stay_in_range() {
    for die in [
        DieConfig::fair(3).unwrap(),
        DieConfig::fair(50).unwrap(),
        DieConfig::loaded(3, 3, 100).unwrap(),
        DieConfig::loaded(50, 1, 1).unwrap(),
    ] {
        // face_counts asserts the range on every roll
        face_counts(&die, 5_000, 53);
    }
}
