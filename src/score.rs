//! Round scoring.
//!
//! The winner collects the sum of every losing hand:
//!   numbered cards score face value, Skip/Reverse/DrawTwo score 20,
//!   Wild/WildDrawFour score 50.

use crate::card::Card;
use crate::state::PlayerId;

/// Point value of a single card.
pub fn card_points(card: Card) -> u32 {
    match card {
        Card::Numbered { value, .. } => u32::from(value),
        Card::Skip(_) | Card::Reverse(_) | Card::DrawTwo(_) => 20,
        Card::Wild | Card::WildDrawFour => 50,
    }
}

/// Total points across all hands except the winner's.
pub fn round_points(hands: &[Vec<Card>], winner: PlayerId) -> u32 {
    hands
        .iter()
        .enumerate()
        .filter(|(player, _)| *player != winner)
        .flat_map(|(_, hand)| hand.iter())
        .map(|card| card_points(*card))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;

    #[test]
    fn card_points_by_kind() {
        assert_eq!(card_points(Card::Numbered { color: Color::Red, value: 0 }), 0);
        assert_eq!(card_points(Card::Numbered { color: Color::Blue, value: 9 }), 9);
        assert_eq!(card_points(Card::Skip(Color::Green)), 20);
        assert_eq!(card_points(Card::Reverse(Color::Yellow)), 20);
        assert_eq!(card_points(Card::DrawTwo(Color::Red)), 20);
        assert_eq!(card_points(Card::Wild), 50);
        assert_eq!(card_points(Card::WildDrawFour), 50);
    }

    #[test]
    fn round_points_skips_the_winner() {
        let hands = vec![
            vec![],
            vec![Card::Numbered { color: Color::Blue, value: 7 }, Card::Skip(Color::Red)],
            vec![Card::WildDrawFour],
        ];
        // 7 + 20 + 50
        assert_eq!(round_points(&hands, 0), 77);
    }

    #[test]
    fn round_points_ignores_cards_held_by_the_winner() {
        let hands = vec![
            vec![Card::Wild, Card::Wild],
            vec![Card::Numbered { color: Color::Green, value: 3 }],
        ];
        assert_eq!(round_points(&hands, 0), 3);
    }
}
