use std::error::Error;
use std::process;

use clap::Parser;
use unoround::{Card, Color, RoundBuilder, format_card, render_round};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    about = "Simulate one UNO round with a naive first-playable policy",
    version
)]
struct Args {
    /// Number of players at the table (2-10).
    #[arg(long, default_value_t = 4)]
    players: usize,
    /// Seed for the injected shuffler.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Cards dealt to each player.
    #[arg(long, default_value_t = 7)]
    cards_per_player: usize,
    /// Print the table and every action while playing.
    #[arg(long)]
    visualize: bool,
    /// Stop the simulation after this many actions.
    #[arg(long, default_value_t = 5000)]
    max_actions: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let names = (1..=args.players)
        .map(|i| format!("Player {i}"))
        .collect::<Vec<_>>();
    let dealer = (args.seed % args.players.max(1) as u64) as usize;
    let mut round = RoundBuilder::new(names, dealer)?
        .with_seed(args.seed)
        .cards_per_player(args.cards_per_player)
        .build()?;

    println!(
        "Starting a {}-player round (dealer: Player {dealer}).\n",
        args.players
    );
    if args.visualize {
        println!("{}", render_round(&round));
    }

    let mut actions = 0usize;
    while let Some(player) = round.player_in_turn() {
        if actions >= args.max_actions {
            println!("Action limit {} reached. Stopping.", args.max_actions);
            break;
        }
        let hand = round.player_hand(player)?;
        let hand_len = hand.len();
        match (0..hand_len).find(|&ix| round.can_play(ix)) {
            Some(ix) => {
                // Declare before shedding to the last card; the policy never
                // walks into a challenge on purpose.
                if hand_len == 2 {
                    round.declare(player)?;
                }
                let card = round.player_hand(player)?[ix];
                let chosen = card.is_wild().then(|| pick_color(round.player_hand(player).unwrap_or(&[])));
                let played = round.play(ix, chosen)?;
                if args.visualize {
                    println!("Player {player} plays {}", format_card(played));
                }
            }
            None => {
                round.draw()?;
                if args.visualize {
                    println!("Player {player} draws");
                }
            }
        }
        if args.visualize {
            println!("{}", render_round(&round));
        }
        actions += 1;
    }

    match round.winner() {
        Some(winner) => println!(
            "Round finished after {actions} actions. Winner: Player {winner}, score {}.",
            round.score().unwrap_or(0)
        ),
        None => println!("Simulation stopped before completion."),
    }
    Ok(())
}

/// Color of the first colored card in hand, or Blue for an all-wild hand.
fn pick_color(hand: &[Card]) -> Color {
    hand.iter()
        .find_map(|card| card.color())
        .unwrap_or(Color::Blue)
}
