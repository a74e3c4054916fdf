use thiserror::Error;

use crate::state::PlayerId;

/// Errors that can occur when manipulating a round.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("round is already over")]
    RoundOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),
    /// Both piles exhausted at once. Indicates corrupted card accounting and
    /// cannot happen with a well-formed deck.
    #[error("no cards left to draw")]
    OutOfCards,
}

/// Details of rejected plays. The round state is untouched when one of these
/// is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("card cannot be played on the current discard pile")]
    NotPlayable,
    #[error("cannot name a color for a colored card")]
    ColorOnColoredCard,
    #[error("a color must be named when playing a wild card")]
    MissingColor,
}
