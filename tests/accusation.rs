use unoround::Color::{Blue, Green, Red, Yellow};
use unoround::{Card, Color, Round, RoundBuilder, RoundError};

fn names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("P{i}")).collect()
}

fn num(color: Color, value: u8) -> Card {
    Card::Numbered { color, value }
}

fn deck_for(dealer: usize, hands: &[Vec<Card>], seed_card: Card, tail: &[Card]) -> Vec<Card> {
    let count = hands.len();
    let mut deck = Vec::new();
    for offset in 1..=count {
        deck.extend_from_slice(&hands[(dealer + offset) % count]);
    }
    deck.push(seed_card);
    deck.extend_from_slice(tail);
    deck
}

fn fixed_round(dealer: usize, hands: &[Vec<Card>], seed_card: Card, tail: &[Card]) -> Round {
    RoundBuilder::new(names(hands.len()), dealer)
        .expect("valid player count")
        .cards_per_player(hands[0].len())
        .with_deck(deck_for(dealer, hands, seed_card, tail))
        .with_shuffler(Box::new(|_: &mut [Card]| {}))
        .build()
        .expect("valid round")
}

/// Three players, dealer 2, so player 0 opens against a Blue 9 discard and
/// can shed down to one card with a single play.
fn accusable_round() -> Round {
    let hands = vec![
        vec![num(Blue, 1), num(Blue, 2)],
        vec![num(Red, 1), num(Red, 2)],
        vec![num(Green, 1), num(Green, 2)],
    ];
    let tail: Vec<Card> = (1..=8).map(|v| num(Yellow, v)).collect();
    fixed_round(2, &hands, num(Blue, 9), &tail)
}

#[test]
fn challenge_succeeds_against_an_undeclared_player() {
    let mut round = accusable_round();
    round.play(0, None).expect("play to one card");
    assert_eq!(round.player_hand(0).unwrap().len(), 1);

    assert!(round.challenge(1, 0).expect("challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 5);
    // The window closed with the successful challenge.
    assert!(!round.challenge(1, 0).expect("second challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 5);
}

#[test]
fn declaring_before_the_play_protects() {
    let mut round = accusable_round();
    round.declare(0).expect("declare");
    round.play(0, None).expect("play to one card");
    assert!(!round.challenge(1, 0).expect("challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 1);
}

#[test]
fn declaring_inside_the_open_window_protects() {
    let mut round = accusable_round();
    round.play(0, None).expect("play to one card");
    round.declare(0).expect("declare");
    assert!(!round.challenge(1, 0).expect("challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 1);
}

#[test]
fn another_players_declaration_does_not_protect() {
    let mut round = accusable_round();
    round.declare(1).expect("declare");
    round.play(0, None).expect("play to one card");
    assert!(round.challenge(1, 0).expect("challenge"));
}

#[test]
fn the_window_closes_once_the_next_player_acts() {
    let mut round = accusable_round();
    round.play(0, None).expect("play to one card");
    assert_eq!(round.player_in_turn(), Some(1));
    round.draw().expect("player 1 draws");
    assert!(!round.challenge(2, 0).expect("challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 1);
}

#[test]
fn declarations_do_not_carry_across_actions() {
    let hands = vec![
        vec![num(Blue, 1), num(Blue, 2), num(Blue, 3)],
        vec![num(Blue, 4), num(Red, 1), num(Red, 2)],
        vec![num(Blue, 5), num(Green, 1), num(Green, 2)],
    ];
    let tail: Vec<Card> = (1..=8).map(|v| num(Yellow, v)).collect();
    let mut round = fixed_round(2, &hands, num(Blue, 9), &tail);

    // Player 0 declares early, then a full trip around the table happens
    // before they reach one card: the stale declaration gives no protection.
    round.declare(0).expect("declare");
    round.play(0, None).expect("player 0 plays");
    round.play(0, None).expect("player 1 plays");
    round.play(0, None).expect("player 2 plays");
    assert_eq!(round.player_in_turn(), Some(0));
    round.play(0, None).expect("player 0 plays to one card");
    assert!(round.challenge(1, 0).expect("challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 5);
}

#[test]
fn forced_draws_do_not_disturb_the_actors_window() {
    // Playing DrawTwo as the next-to-last card: the window opens for the
    // acting player before the forced draws land on the next player.
    let hands = vec![
        vec![Card::DrawTwo(Blue), num(Red, 9)],
        vec![num(Red, 1), num(Red, 2)],
        vec![num(Green, 1), num(Green, 2)],
    ];
    let tail: Vec<Card> = (1..=8).map(|v| num(Yellow, v)).collect();
    let mut round = fixed_round(2, &hands, num(Blue, 9), &tail);

    round.play(0, None).expect("play draw-two");
    assert_eq!(round.player_hand(1).unwrap().len(), 4);
    assert_eq!(round.player_in_turn(), Some(2));
    assert!(round.challenge(2, 0).expect("challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 5);
}

#[test]
fn self_challenge_is_not_forbidden() {
    let mut round = accusable_round();
    round.play(0, None).expect("play to one card");
    assert!(round.challenge(0, 0).expect("challenge"));
    assert_eq!(round.player_hand(0).unwrap().len(), 5);
}

#[test]
fn challenge_without_an_open_window_fails() {
    let mut round = accusable_round();
    assert!(!round.challenge(1, 0).expect("challenge"));
    assert!(!round.challenge(0, 2).expect("challenge"));
}

#[test]
fn out_of_bounds_indices_are_hard_errors() {
    let mut round = accusable_round();
    assert!(matches!(
        round.challenge(0, 9),
        Err(RoundError::InvalidPlayer(9))
    ));
    assert!(matches!(
        round.challenge(9, 0),
        Err(RoundError::InvalidPlayer(9))
    ));
    assert!(matches!(
        round.declare(9),
        Err(RoundError::InvalidPlayer(9))
    ));
}

#[test]
fn declaring_after_the_round_has_ended_fails() {
    let hands = vec![vec![num(Blue, 3)], vec![num(Red, 7)]];
    let mut round = fixed_round(1, &hands, num(Blue, 5), &[num(Green, 1)]);
    round.play(0, None).expect("winning play");
    assert!(matches!(round.declare(1), Err(RoundError::RoundOver)));
}

#[test]
fn winning_play_leaves_no_exploitable_window() {
    // Player 0 sheds to one card, survives unchallenged, and later wins; the
    // old window cannot be used against the winner's empty hand.
    let hands = vec![
        vec![num(Blue, 1), num(Blue, 2)],
        vec![num(Red, 1), num(Red, 2)],
    ];
    let tail: Vec<Card> = (3..=8).map(|v| num(Yellow, v)).collect();
    let mut round = fixed_round(1, &hands, num(Blue, 9), &tail);

    round.play(0, None).expect("player 0 to one card");
    round.draw().expect("player 1 draws");
    assert_eq!(round.player_in_turn(), Some(0));
    round.play(0, None).expect("player 0 wins");
    assert_eq!(round.winner(), Some(0));
    assert!(!round.challenge(1, 0).expect("challenge"));
}
