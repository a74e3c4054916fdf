//! Rules engine for a single round of an UNO-style shedding card game.
//!
//! The [`Round`] owns the piles, hands, turn order, play legality, special
//! card effects, scoring and the declare-low-card accusation window. It is a
//! synchronous state machine: callers serialize access, shuffling is an
//! injected dependency, and every command either completes atomically or
//! rejects without touching state.

pub mod card;
pub mod error;
pub mod round;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::card::{COLORS, Card, Color, full_deck};
pub use crate::error::{IllegalMove, RoundError};
pub use crate::round::{Round, RoundBuilder, Shuffler, seeded_shuffler};
pub use crate::score::{card_points, round_points};
pub use crate::state::{Direction, PlayerId, RoundSnapshot};
pub use crate::visualize::{format_card, render_round};
