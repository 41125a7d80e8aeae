use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mcts_ucb::arena::play_match_with;
use mcts_ucb::boards::tic_tac_toe::TicTacToeBoard;
use mcts_ucb::config::MctsConfig;
use mcts_ucb::mcts::MonteCarloTreeSearch;
use mcts_ucb::player::{MctsPolicy, Player, RandomPolicy};
use mcts_ucb::random::{SeededRandomGenerator, StandardRandomGenerator};

/// Plays a game of tic-tac-toe between a tree-search player (P1) and a random player (P2).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Simulations per move for the search player
    #[arg(short, long, default_value = "100")]
    simulations: u32,

    /// Side length of the board
    #[arg(short, long, default_value = "3")]
    board_size: usize,

    /// Exploration constant used by UCB1
    #[arg(short, long, default_value_t = std::f64::consts::SQRT_2)]
    exploration: f64,

    /// Seed for reproducible games; fresh randomness when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = MctsConfig::default()
        .with_exploration_constant(args.exploration)
        .with_simulations(args.simulations);
    let board = TicTacToeBoard::new(args.board_size).context("invalid board size")?;

    let mut players: [Player<TicTacToeBoard>; 2] = match args.seed {
        Some(seed) => {
            let search = MonteCarloTreeSearch::builder()
                .with_config(config)
                .with_random_generator(SeededRandomGenerator::new(seed))
                .build()?;
            [
                Player::new("P1", MctsPolicy::new(search, args.simulations)),
                Player::new(
                    "P2",
                    RandomPolicy::new(SeededRandomGenerator::new(seed.wrapping_add(1))),
                ),
            ]
        }
        None => {
            let search = MonteCarloTreeSearch::builder()
                .with_config(config)
                .with_random_generator(StandardRandomGenerator)
                .build()?;
            [
                Player::new("P1", MctsPolicy::new(search, args.simulations)),
                Player::new("P2", RandomPolicy::new(StandardRandomGenerator)),
            ]
        }
    };

    info!("Starting {0}x{0} game, {1} simulations per move", args.board_size, args.simulations);
    let report = play_match_with(board, &mut players, |player, action, state| {
        println!("\n{player} played {action}");
        print!("{state}");
    })
    .context("game aborted")?;

    match report.winner {
        Some(name) => println!("\n{name} won in {} turns.", report.turns),
        None => println!("\nDraw after {} turns.", report.turns),
    }
    Ok(())
}
