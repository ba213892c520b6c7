//! Per-iteration chance fixing.
//!
//! Every information-set node in the decision graph can be reached through
//! many histories. Sharing one node across all of them is only sound if
//! every history observes the same chance outcomes, so the trainer draws
//! all of an iteration's rolls up front, before any node is visited, and
//! both sweeps read from the same [`FixedRolls`].

use rand::Rng;

/// Source of uniform chance outcomes in `[1, sides]`.
///
/// Any [`rand::Rng`] is a chance source, so the trainer runs off a seeded
/// `StdRng` by default. Tests substitute scripted sources to pin outcomes.
pub trait ChanceSource {
    /// Draw one uniform integer in `[1, sides]`.
    fn roll(&mut self, sides: usize) -> usize;
}

impl<R: Rng> ChanceSource for R {
    fn roll(&mut self, sides: usize) -> usize {
        self.gen_range(1..=sides)
    }
}

/// The chance outcomes fixed for one training iteration.
///
/// Holds `sides + 1` rolls, one per commitment level including level 0
/// (the game's start). The roll at level `l` is the die value a player
/// sees after the level-`l` commitment is accepted. The draw at level
/// `sides` is part of the fixed layout but is never consumed, since no
/// commitment can follow the maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRolls {
    rolls: Vec<usize>,
}

impl FixedRolls {
    /// Draw a full set of rolls for one iteration.
    pub fn sample<C: ChanceSource>(source: &mut C, sides: usize) -> Self {
        let rolls = (0..=sides).map(|_| source.roll(sides)).collect();
        Self { rolls }
    }

    /// The fixed roll revealed after the commitment at `level` is accepted.
    pub fn at(&self, level: usize) -> usize {
        self.rolls[level]
    }

    /// Number of rolls held (`sides + 1`).
    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    /// Whether the roll set is empty. Never true for a valid game.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }
}
