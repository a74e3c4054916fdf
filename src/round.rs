use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card::{Card, Color, DEFAULT_CARDS_PER_PLAYER, MAX_PLAYERS, MIN_PLAYERS, full_deck};
use crate::error::{IllegalMove, RoundError};
use crate::score;
use crate::state::{Direction, PlayerId, RoundSnapshot};

const DEFAULT_SEED: u64 = 0x0D15_CA2D_0D15_CA2D;

/// Injected shuffling dependency. The engine never calls randomness directly,
/// so a round replays deterministically for a given shuffler.
pub type Shuffler = Box<dyn FnMut(&mut [Card])>;

/// Shuffler backed by a seeded [`StdRng`].
pub fn seeded_shuffler(seed: u64) -> Shuffler {
    let mut rng = StdRng::seed_from_u64(seed);
    Box::new(move |cards: &mut [Card]| cards.shuffle(&mut rng))
}

type EndCallback = Box<dyn FnMut(PlayerId)>;

/// Builder that configures a round and enables deterministic deck injection
/// for tests.
pub struct RoundBuilder {
    players: Vec<String>,
    dealer: PlayerId,
    cards_per_player: usize,
    shuffler: Shuffler,
    deck: Option<Vec<Card>>,
}

impl RoundBuilder {
    pub fn new(players: Vec<String>, dealer: PlayerId) -> Result<Self, RoundError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(RoundError::InvalidConfiguration(
                "a round requires between 2 and 10 players",
            ));
        }
        if dealer >= players.len() {
            return Err(RoundError::InvalidPlayer(dealer));
        }
        Ok(Self {
            players,
            dealer,
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
            shuffler: seeded_shuffler(DEFAULT_SEED),
            deck: None,
        })
    }

    pub fn cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.cards_per_player = cards_per_player;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.shuffler = seeded_shuffler(seed);
        self
    }

    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = shuffler;
        self
    }

    /// Use `deck` as-is instead of a shuffled 108-card deck. Cards are listed
    /// in draw order (first card dealt first). Reshuffles still go through
    /// the configured shuffler.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Round, RoundError> {
        Round::from_builder(self)
    }
}

/// Accusation sub-state: who just reached one card, whether they are covered
/// by a declaration, and who has declared since the last play or draw.
/// Always fully initialized; the window invariants live entirely here.
#[derive(Debug, Default)]
struct AccusationState {
    pending_accused: Option<PlayerId>,
    protected: bool,
    last_declaring: Option<PlayerId>,
    declared_since_action: HashSet<PlayerId>,
}

impl AccusationState {
    /// A play or draw by anyone other than the pending accused closes the
    /// window; a stale declaration by another player does not carry over.
    fn note_actor(&mut self, actor: PlayerId) {
        if self.pending_accused.is_some_and(|p| p != actor) {
            self.close_window();
        }
        if self.last_declaring.is_some_and(|p| p != actor) {
            self.last_declaring = None;
        }
    }

    /// Opens the window for `player`, who has just reached exactly one card.
    /// Protection is decided now, from the declarations made since the last
    /// state-changing action.
    fn open_window(&mut self, player: PlayerId) {
        self.pending_accused = Some(player);
        self.protected = self.declared_since_action.contains(&player);
        self.last_declaring = None;
    }

    fn close_window(&mut self) {
        self.pending_accused = None;
        self.protected = false;
    }

    fn finish_action(&mut self) {
        self.declared_since_action.clear();
    }
}

/// Rules engine for a single round of an UNO-style shedding game.
///
/// Owns the draw and discard piles, every hand, the turn and direction
/// trackers and the accusation window. Every public command runs to
/// completion as one atomic transition; a failed precondition leaves the
/// round untouched.
pub struct Round {
    players: Vec<String>,
    hands: Vec<Vec<Card>>,
    /// Next card to draw is the last element.
    draw_pile: Vec<Card>,
    /// Top of the pile is the last element.
    discard_pile: Vec<Card>,
    current_player: PlayerId,
    direction: Direction,
    active_color: Color,
    dealer: PlayerId,
    accusation: AccusationState,
    shuffler: Shuffler,
    end_callbacks: Vec<EndCallback>,
}

impl Round {
    pub fn builder(players: Vec<String>, dealer: PlayerId) -> Result<RoundBuilder, RoundError> {
        RoundBuilder::new(players, dealer)
    }

    fn from_builder(builder: RoundBuilder) -> Result<Self, RoundError> {
        let RoundBuilder {
            players,
            dealer,
            cards_per_player,
            mut shuffler,
            deck,
        } = builder;
        if cards_per_player == 0 {
            return Err(RoundError::InvalidConfiguration(
                "cards per player must be positive",
            ));
        }

        let mut draw_pile = match deck {
            Some(deck) => deck,
            None => {
                let mut deck = full_deck();
                shuffler(&mut deck);
                deck
            }
        };
        // Builder decks are in draw order; internally the next card is last.
        draw_pile.reverse();

        let player_count = players.len();
        let mut hands: Vec<Vec<Card>> = (0..player_count)
            .map(|_| Vec::with_capacity(cards_per_player))
            .collect();
        for offset in 1..=player_count {
            let player = (dealer + offset) % player_count;
            for _ in 0..cards_per_player {
                let card = draw_pile.pop().ok_or(RoundError::InvalidConfiguration(
                    "deck is too small to deal the initial hands",
                ))?;
                hands[player].push(card);
            }
        }

        if !draw_pile.iter().any(|card| !card.is_wild()) {
            return Err(RoundError::InvalidConfiguration(
                "no non-wild card available to seed the discard pile",
            ));
        }
        // A wild seed goes back to the bottom and the pile is reshuffled;
        // the round never starts without an active color.
        let (seed_card, active_color) = loop {
            match draw_pile.pop() {
                Some(card) => match card.color() {
                    Some(color) => break (card, color),
                    None => {
                        draw_pile.insert(0, card);
                        shuffler(&mut draw_pile);
                    }
                },
                None => {
                    return Err(RoundError::InvalidConfiguration(
                        "no non-wild card available to seed the discard pile",
                    ));
                }
            }
        };

        let mut round = Round {
            players,
            hands,
            draw_pile,
            discard_pile: vec![seed_card],
            current_player: dealer,
            direction: Direction::Clockwise,
            active_color,
            dealer,
            accusation: AccusationState::default(),
            shuffler,
            end_callbacks: Vec::new(),
        };
        round.resolve_start()?;
        Ok(round)
    }

    /// Applies the seed discard card's effect as if the dealer had played it.
    fn resolve_start(&mut self) -> Result<(), RoundError> {
        let dealer = self.dealer;
        match self.discard_top() {
            Card::Numbered { .. } => self.current_player = self.seat(dealer, 1),
            Card::Skip(_) => self.current_player = self.seat(dealer, 2),
            Card::DrawTwo(_) => {
                let target = self.seat(dealer, 1);
                self.draw_to(target, 2)?;
                self.current_player = self.seat(target, 1);
            }
            Card::Reverse(_) => {
                self.direction = self.direction.flipped();
                let steps = if self.players.len() == 2 { 2 } else { 1 };
                self.current_player = self.seat(dealer, steps);
            }
            Card::Wild | Card::WildDrawFour => {
                return Err(RoundError::InvalidConfiguration(
                    "seed discard card cannot be wild",
                ));
            }
        }
        Ok(())
    }

    /// Reconstructs a round from a snapshot. The snapshot is validated in
    /// full; starting effects are not re-applied.
    pub fn from_snapshot(
        snapshot: RoundSnapshot,
        shuffler: Shuffler,
    ) -> Result<Self, RoundError> {
        let RoundSnapshot {
            players,
            hands,
            draw_pile,
            discard_pile,
            active_color,
            direction,
            dealer,
            player_in_turn,
        } = snapshot;

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(RoundError::InvalidSnapshot(
                "a round requires between 2 and 10 players",
            ));
        }
        if hands.len() != players.len() {
            return Err(RoundError::InvalidSnapshot(
                "there must be exactly one hand per player",
            ));
        }
        if hands.iter().filter(|hand| hand.is_empty()).count() > 1 {
            return Err(RoundError::InvalidSnapshot("more than one empty hand"));
        }
        let Some(&top) = discard_pile.first() else {
            return Err(RoundError::InvalidSnapshot("the discard pile is empty"));
        };
        if top.color().is_some_and(|color| color != active_color) {
            return Err(RoundError::InvalidSnapshot(
                "active color contradicts the discard top",
            ));
        }
        if dealer >= players.len() {
            return Err(RoundError::InvalidSnapshot("dealer index out of bounds"));
        }
        let ended = hands.iter().any(|hand| hand.is_empty());
        let current_player = match player_in_turn {
            Some(player) if player < players.len() => player,
            Some(_) => {
                return Err(RoundError::InvalidSnapshot(
                    "player in turn out of bounds",
                ));
            }
            None if ended => 0,
            None => {
                return Err(RoundError::InvalidSnapshot(
                    "player in turn is required while the round is running",
                ));
            }
        };

        // Snapshots list piles outside-in; flip them back to internal order.
        let mut draw_pile = draw_pile;
        draw_pile.reverse();
        let mut discard_pile = discard_pile;
        discard_pile.reverse();

        Ok(Round {
            players,
            hands,
            draw_pile,
            discard_pile,
            current_player,
            direction,
            active_color,
            dealer,
            accusation: AccusationState::default(),
            shuffler,
            end_callbacks: Vec::new(),
        })
    }

    /// Captures the round as a serializable memento that round-trips exactly
    /// through [`Round::from_snapshot`].
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            players: self.players.clone(),
            hands: self.hands.clone(),
            draw_pile: self.draw_pile.iter().rev().copied().collect(),
            discard_pile: self.discard_pile.iter().rev().copied().collect(),
            active_color: self.active_color,
            direction: self.direction,
            dealer: self.dealer,
            player_in_turn: self.player_in_turn(),
        }
    }

    /// Registers a callback invoked exactly once with the winner's index
    /// when the round ends.
    pub fn on_end(&mut self, callback: impl FnMut(PlayerId) + 'static) {
        self.end_callbacks.push(Box::new(callback));
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, player: PlayerId) -> Result<&str, RoundError> {
        self.players
            .get(player)
            .map(String::as_str)
            .ok_or(RoundError::InvalidPlayer(player))
    }

    pub fn player_hand(&self, player: PlayerId) -> Result<&[Card], RoundError> {
        self.hands
            .get(player)
            .map(Vec::as_slice)
            .ok_or(RoundError::InvalidPlayer(player))
    }

    /// The player expected to act, or `None` once the round has ended.
    pub fn player_in_turn(&self) -> Option<PlayerId> {
        if self.has_ended() {
            None
        } else {
            Some(self.current_player)
        }
    }

    pub fn discard_top(&self) -> Card {
        *self
            .discard_pile
            .last()
            .expect("discard pile is never empty")
    }

    pub fn draw_pile_size(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_size(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    pub fn has_ended(&self) -> bool {
        self.hands.iter().any(|hand| hand.is_empty())
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.hands.iter().position(|hand| hand.is_empty())
    }

    /// Sum of the losing hands' point values; `None` until the round ends.
    pub fn score(&self) -> Option<u32> {
        self.winner()
            .map(|winner| score::round_points(&self.hands, winner))
    }

    /// Whether the current player may legally play the card at `card_ix`.
    pub fn can_play(&self, card_ix: usize) -> bool {
        match self.player_in_turn() {
            Some(player) => self.card_playable(player, card_ix),
            None => false,
        }
    }

    /// Whether the current player holds any playable card.
    pub fn can_play_any(&self) -> bool {
        self.player_in_turn().is_some_and(|player| {
            (0..self.hands[player].len()).any(|ix| self.card_playable(player, ix))
        })
    }

    fn card_playable(&self, player: PlayerId, card_ix: usize) -> bool {
        if self.has_ended() {
            return false;
        }
        let hand = &self.hands[player];
        let Some(card) = hand.get(card_ix) else {
            return false;
        };
        let top = self.discard_top();
        let active = self.active_color;
        match *card {
            Card::Numbered { color, value } => {
                color == active
                    || matches!(top, Card::Numbered { value: top_value, .. } if top_value == value)
            }
            Card::Skip(color) => color == active || matches!(top, Card::Skip(_)),
            Card::Reverse(color) => color == active || matches!(top, Card::Reverse(_)),
            Card::DrawTwo(color) => color == active || matches!(top, Card::DrawTwo(_)),
            Card::Wild => true,
            // Only legal when the hand holds no card of the active color.
            Card::WildDrawFour => !hand.iter().any(|c| c.color() == Some(active)),
        }
    }

    /// Plays the current player's card at `card_ix` and resolves its effect.
    /// Wild cards must name `chosen_color`; colored cards must not.
    ///
    /// If this leaves the player with exactly one card, the accusation
    /// window opens for them before any forced draws hit other players.
    pub fn play(&mut self, card_ix: usize, chosen_color: Option<Color>) -> Result<Card, RoundError> {
        if self.has_ended() {
            return Err(RoundError::RoundOver);
        }
        let player = self.current_player;
        let hand_len = self.hands[player].len();
        if card_ix >= hand_len {
            return Err(IllegalMove::HandIndex(card_ix).into());
        }
        let card = self.hands[player][card_ix];
        let next_color = match (card.color(), chosen_color) {
            (Some(color), None) => color,
            (Some(_), Some(_)) => return Err(IllegalMove::ColorOnColoredCard.into()),
            (None, Some(color)) => color,
            (None, None) => return Err(IllegalMove::MissingColor.into()),
        };
        if !self.card_playable(player, card_ix) {
            return Err(IllegalMove::NotPlayable.into());
        }

        // Preconditions hold; the transition below is applied as one unit.
        self.accusation.note_actor(player);
        if hand_len == 2 {
            self.accusation.open_window(player);
        }
        let card = self.hands[player].remove(card_ix);
        self.discard_pile.push(card);
        self.active_color = next_color;

        match card {
            Card::Numbered { .. } | Card::Wild => {
                self.current_player = self.seat(player, 1);
            }
            Card::Skip(_) => {
                self.current_player = self.seat(player, 2);
            }
            Card::DrawTwo(_) => {
                let target = self.seat(player, 1);
                self.draw_to(target, 2)?;
                self.current_player = self.seat(target, 1);
            }
            Card::Reverse(_) => {
                // With two players a reverse behaves as a skip: flipping
                // direction alone would hand the turn straight back.
                self.direction = self.direction.flipped();
                let steps = if self.players.len() == 2 { 2 } else { 1 };
                self.current_player = self.seat(player, steps);
            }
            Card::WildDrawFour => {
                let target = self.seat(player, 1);
                self.draw_to(target, 4)?;
                self.current_player = self.seat(target, 1);
            }
        }

        self.accusation.finish_action();
        if let Some(winner) = self.winner() {
            for callback in &mut self.end_callbacks {
                callback(winner);
            }
        }
        Ok(card)
    }

    /// Draws one card for the current player. The turn passes on unless the
    /// drawn card is immediately playable; playing it remains the player's
    /// choice either way.
    pub fn draw(&mut self) -> Result<(), RoundError> {
        if self.has_ended() {
            return Err(RoundError::RoundOver);
        }
        let player = self.current_player;
        self.accusation.note_actor(player);
        self.draw_to(player, 1)?;
        let drawn_ix = self.hands[player].len() - 1;
        if !self.card_playable(player, drawn_ix) {
            self.current_player = self.seat(player, 1);
        }
        self.accusation.finish_action();
        Ok(())
    }

    /// Records `player`'s public low-card declaration. Declaring while their
    /// accusation window is open, or before it opens, protects them.
    pub fn declare(&mut self, player: PlayerId) -> Result<(), RoundError> {
        if player >= self.players.len() {
            return Err(RoundError::InvalidPlayer(player));
        }
        if self.has_ended() {
            return Err(RoundError::RoundOver);
        }
        self.accusation.last_declaring = Some(player);
        self.accusation.declared_since_action.insert(player);
        if self.accusation.pending_accused == Some(player) {
            self.accusation.protected = true;
        }
        Ok(())
    }

    /// Accuses `accused` of failing to declare. Succeeds only while their
    /// window is open, they are unprotected and still hold exactly one card;
    /// success costs them four penalty cards and closes the window. The
    /// accuser's identity is irrelevant beyond being a valid index.
    pub fn challenge(
        &mut self,
        accuser: PlayerId,
        accused: PlayerId,
    ) -> Result<bool, RoundError> {
        if accuser >= self.players.len() {
            return Err(RoundError::InvalidPlayer(accuser));
        }
        if accused >= self.players.len() {
            return Err(RoundError::InvalidPlayer(accused));
        }
        if self.accusation.pending_accused != Some(accused) {
            return Ok(false);
        }
        if self.accusation.protected {
            return Ok(false);
        }
        if self.hands[accused].len() != 1 {
            return Ok(false);
        }
        self.draw_to(accused, 4)?;
        self.accusation.close_window();
        Ok(true)
    }

    /// Seat `steps` positions away from `from` in the current direction.
    fn seat(&self, from: PlayerId, steps: isize) -> PlayerId {
        let count = self.players.len() as isize;
        let offset = self.direction.step() * steps;
        (((from as isize + offset) % count + count) % count) as PlayerId
    }

    /// Moves `count` cards from the draw pile into `player`'s hand,
    /// rebuilding the draw pile from the discard pile when it runs dry.
    fn draw_to(&mut self, player: PlayerId, count: usize) -> Result<(), RoundError> {
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                self.rebuild_draw_pile()?;
            }
            let card = self.draw_pile.pop().ok_or(RoundError::OutOfCards)?;
            self.hands[player].push(card);
        }
        Ok(())
    }

    /// Shuffles every discard card except the top back into the draw pile.
    fn rebuild_draw_pile(&mut self) -> Result<(), RoundError> {
        if self.discard_pile.len() <= 1 {
            return Err(RoundError::OutOfCards);
        }
        let top = self.discard_pile.pop().ok_or(RoundError::OutOfCards)?;
        let mut under = std::mem::take(&mut self.discard_pile);
        (self.shuffler)(&mut under);
        self.draw_pile = under;
        self.discard_pile.push(top);
        Ok(())
    }
}
