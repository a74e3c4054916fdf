use serde::{Deserialize, Serialize};

/// One of the four card colors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Red,
    Green,
    Yellow,
}

/// All colors in canonical deck order.
pub const COLORS: [Color; 4] = [Color::Blue, Color::Red, Color::Green, Color::Yellow];

/// Representation of a single UNO card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Numbered card between 0 and 9.
    Numbered { color: Color, value: u8 },
    /// Skips the next player.
    Skip(Color),
    /// Flips the direction of play.
    Reverse(Color),
    /// Forces the next player to draw two cards and lose their turn.
    DrawTwo(Color),
    /// Playable on anything; the player names the new active color.
    Wild,
    /// Wild that forces the next player to draw four cards.
    WildDrawFour,
}

pub const MAX_CARD_VALUE: u8 = 9;
pub const DECK_SIZE: usize = 108;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const DEFAULT_CARDS_PER_PLAYER: usize = 7;

impl Card {
    /// Returns true for the two wild variants.
    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDrawFour)
    }

    /// Returns the card's own color. Wild cards carry none until played.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Numbered { color, .. }
            | Card::Skip(color)
            | Card::Reverse(color)
            | Card::DrawTwo(color) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    /// Returns the face value when the card is numbered.
    #[inline]
    pub fn value(&self) -> Option<u8> {
        match self {
            Card::Numbered { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// Builds the full 108-card deck in deterministic order (unshuffled).
///
/// Per color: one 0, two each of 1..=9, two Skip, two Reverse, two DrawTwo;
/// plus four Wild and four WildDrawFour.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in COLORS {
        deck.push(Card::Numbered { color, value: 0 });
        for value in 1..=MAX_CARD_VALUE {
            deck.push(Card::Numbered { color, value });
            deck.push(Card::Numbered { color, value });
        }
        for _ in 0..2 {
            deck.push(Card::Skip(color));
            deck.push(Card::Reverse(color));
            deck.push(Card::DrawTwo(color));
        }
    }
    for _ in 0..4 {
        deck.push(Card::Wild);
        deck.push(Card::WildDrawFour);
    }
    deck
}
