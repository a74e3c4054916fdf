use std::fmt::Write;

use crate::card::{Card, Color};
use crate::round::Round;
use crate::state::Direction;

/// Short textual form of a card, e.g. `B6`, `R-Skip`, `W+4`.
pub fn format_card(card: Card) -> String {
    match card {
        Card::Numbered { color, value } => format!("{}{}", color_letter(color), value),
        Card::Skip(color) => format!("{}-Skip", color_letter(color)),
        Card::Reverse(color) => format!("{}-Rev", color_letter(color)),
        Card::DrawTwo(color) => format!("{}+2", color_letter(color)),
        Card::Wild => String::from("Wild"),
        Card::WildDrawFour => String::from("W+4"),
    }
}

fn color_letter(color: Color) -> char {
    match color {
        Color::Blue => 'B',
        Color::Red => 'R',
        Color::Green => 'G',
        Color::Yellow => 'Y',
    }
}

/// Renders the round for CLI output, hands included.
pub fn render_round(round: &Round) -> String {
    let mut out = String::new();
    let status = match round.winner() {
        Some(winner) => format!("Finished (winner: Player {winner})"),
        None => String::from("Ongoing"),
    };
    let _ = writeln!(out, "Round status: {status}");
    let direction = match round.direction() {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counterclockwise",
    };
    let _ = writeln!(
        out,
        "Top of discard: {}  |  Active color: {:?}  |  Direction: {direction}",
        format_card(round.discard_top()),
        round.active_color()
    );
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Discard pile: {}",
        round.draw_pile_size(),
        round.discard_pile_size()
    );
    for player in 0..round.player_count() {
        let name = round.player(player).unwrap_or("?");
        let current_tag = if round.player_in_turn() == Some(player) {
            " <- in turn"
        } else {
            ""
        };
        let hand = round
            .player_hand(player)
            .map(|cards| {
                cards
                    .iter()
                    .enumerate()
                    .map(|(ix, card)| format!("{}:{}", ix, format_card(*card)))
                    .collect::<Vec<_>>()
                    .join("  ")
            })
            .unwrap_or_default();
        let _ = writeln!(out, "  Player {player} ({name}){current_tag}");
        let _ = writeln!(
            out,
            "    Hand: {}",
            if hand.is_empty() { "(empty)" } else { hand.as_str() }
        );
    }
    out
}
