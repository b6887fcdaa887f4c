//! Moves and Outcome Resolution
//!
//! Rock beats Scissors, Scissors beats Paper, Paper beats Rock.
//! Equal moves draw.

use serde::{Serialize, Deserialize};

/// A hand played in a game.
///
/// `None` is the zero value of the encoding and is never a legal reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum Move {
    /// No move (placeholder, not playable)
    #[default]
    None = 0,
    /// Rock
    Rock = 1,
    /// Paper
    Paper = 2,
    /// Scissors
    Scissors = 3,
}

impl Move {
    /// All playable moves.
    pub const PLAYABLE: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Get move from its integer encoding.
    pub fn from_index(index: u8) -> Option<Move> {
        match index {
            0 => Some(Move::None),
            1 => Some(Move::Rock),
            2 => Some(Move::Paper),
            3 => Some(Move::Scissors),
            _ => None,
        }
    }

    /// Integer encoding used inside commitments.
    #[inline]
    pub fn encode(self) -> u8 {
        self as u8
    }

    /// Whether this move may be revealed.
    #[inline]
    pub fn is_playable(self) -> bool {
        self != Move::None
    }

    /// Check if this move beats another.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }
}

/// Result of a game from the first player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// First player wins
    FirstWins,
    /// Second player wins
    SecondWins,
    /// Same move on both sides
    Draw,
}

impl Outcome {
    /// Resolve two playable moves.
    pub fn resolve(first: Move, second: Move) -> Outcome {
        if first.beats(second) {
            Outcome::FirstWins
        } else if second.beats(first) {
            Outcome::SecondWins
        } else {
            Outcome::Draw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_cycle() {
        assert!(Move::Rock.beats(Move::Scissors));
        assert!(Move::Scissors.beats(Move::Paper));
        assert!(Move::Paper.beats(Move::Rock));

        assert!(!Move::Scissors.beats(Move::Rock));
        assert!(!Move::Paper.beats(Move::Scissors));
        assert!(!Move::Rock.beats(Move::Paper));
    }

    #[test]
    fn test_equal_moves_draw() {
        for m in Move::PLAYABLE {
            assert!(!m.beats(m));
            assert_eq!(Outcome::resolve(m, m), Outcome::Draw);
        }
    }

    #[test]
    fn test_resolve_is_antisymmetric() {
        for a in Move::PLAYABLE {
            for b in Move::PLAYABLE {
                let forward = Outcome::resolve(a, b);
                let backward = Outcome::resolve(b, a);
                match forward {
                    Outcome::FirstWins => assert_eq!(backward, Outcome::SecondWins),
                    Outcome::SecondWins => assert_eq!(backward, Outcome::FirstWins),
                    Outcome::Draw => assert_eq!(backward, Outcome::Draw),
                }
            }
        }
    }

    #[test]
    fn test_encoding() {
        assert_eq!(Move::None.encode(), 0);
        assert_eq!(Move::Rock.encode(), 1);
        assert_eq!(Move::Paper.encode(), 2);
        assert_eq!(Move::Scissors.encode(), 3);
        assert_eq!(Move::from_index(3), Some(Move::Scissors));
        assert_eq!(Move::from_index(4), None);
        assert!(!Move::None.is_playable());
    }
}
