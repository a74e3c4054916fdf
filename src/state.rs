use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Zero-based index of a player within the round.
pub type PlayerId = usize;

/// Direction in which play proceeds around the table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Seat offset of one step in this direction.
    #[inline]
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    #[inline]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Serializable memento of a round, sufficient to reconstruct an identical
/// one via [`crate::Round::from_snapshot`].
///
/// `draw_pile` is listed in draw order (next card first) and `discard_pile`
/// in play order (top first). Hands keep their in-hand card order. The
/// accusation window is intentionally not captured: it is transient and a
/// restored round starts with no window open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub players: Vec<String>,
    pub hands: Vec<Vec<Card>>,
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub active_color: Color,
    pub direction: Direction,
    pub dealer: PlayerId,
    /// `None` only when the round has ended.
    pub player_in_turn: Option<PlayerId>,
}

impl RoundSnapshot {
    /// Encodes the snapshot into a compact byte representation.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
    }

    /// Decodes a snapshot produced by [`RoundSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (snapshot, _) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(snapshot)
    }
}
