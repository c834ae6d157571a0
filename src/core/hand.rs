//! The three cyclic agent types used by type-advantage encounters.
//!
//! Rock beats Scissors, Scissors beats Paper, Paper beats Rock.
//! Ordinals are fixed (`Rock = 0`, `Scissors = 1`, `Paper = 2`) because
//! decision functions see them as integers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An agent's current type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Rock = 0,
    Scissors = 1,
    Paper = 2,
}

impl Hand {
    /// All hands in ordinal order.
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Scissors, Hand::Paper];

    /// Get the ordinal (0, 1 or 2).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a hand by ordinal.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Hand::Rock),
            1 => Some(Hand::Scissors),
            2 => Some(Hand::Paper),
            _ => None,
        }
    }

    /// Advance cyclically by `steps` (mod 3).
    #[must_use]
    pub const fn advance(self, steps: u8) -> Self {
        match (self.ordinal() + steps % 3) % 3 {
            0 => Hand::Rock,
            1 => Hand::Scissors,
            _ => Hand::Paper,
        }
    }

    /// Compare against another hand.
    ///
    /// `Greater` means `self` wins, `Less` means `other` wins, `Equal` is a tie.
    #[must_use]
    pub const fn versus(self, other: Hand) -> Ordering {
        match (self, other) {
            (Hand::Rock, Hand::Scissors)
            | (Hand::Scissors, Hand::Paper)
            | (Hand::Paper, Hand::Rock) => Ordering::Greater,
            (Hand::Rock, Hand::Rock)
            | (Hand::Scissors, Hand::Scissors)
            | (Hand::Paper, Hand::Paper) => Ordering::Equal,
            _ => Ordering::Less,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Hand::Rock => "Rock",
            Hand::Scissors => "Scissors",
            Hand::Paper => "Paper",
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
