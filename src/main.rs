use std::process::ExitCode;

#[cfg(feature = "perft")]
use arbiter::game::{perft::PerftConfig, Position};
use arbiter::{
    console,
    game::{Game, GameConfig, PromotionPolicy},
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a game in the terminal (DEFAULT)
    Play {
        /// Starting position as a FEN string.
        #[arg(short, long)]
        fen: Option<String>,
        /// Promotes to a queen instead of asking for a piece
        #[arg(long)]
        auto_queen: bool,
    },
    /// Prints the status and legal moves of a position
    Status {
        /// Position as a FEN string.
        fen: String,
    },
    /// Runs perft (counting all legal move paths up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Starting position as a FEN string.
        #[arg(short, long)]
        position: Option<String>,
        /// Shows move count for each move from the starting position
        #[arg(short)]
        divide: bool,
        /// Runs every depth up to the maximum
        #[arg(short)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,
    },
}

pub fn main() -> ExitCode {
    let args = Arguments::parse();
    env_logger::init();

    let command = args.command.unwrap_or(Command::Play {
        fen: None,
        auto_queen: false,
    });
    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Play { fen, auto_queen } => {
            let mut config = GameConfig::default();
            if let Some(fen) = fen {
                config = config.with_start_fen(fen)
            }
            if auto_queen {
                config = config.with_promotion_policy(PromotionPolicy::AutoQueen)
            }
            let mut game = Game::with_config(config)?;
            console::run(&mut game, std::io::stdin(), std::io::stdout())?
        }
        Command::Status { fen } => {
            let game = Game::with_config(GameConfig::default().with_start_fen(fen))?;
            println!("{}", game.position());
            println!("{}", game.status());
            let moves = game.position().all_legal_moves()?;
            println!(
                "{} legal moves: {}",
                moves.len(),
                moves
                    .iter()
                    .map(|mv| mv.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        #[cfg(feature = "perft")]
        Command::Perft {
            depth,
            position,
            divide,
            iterative,
            bench,
        } => {
            let position = match position {
                Some(fen) => Position::from_fen(&fen)?,
                None => Position::initial(),
            };
            PerftConfig::default()
                .with_depth(depth)
                .divide_moves(divide)
                .iterative_deepening(iterative)
                .benchmark(bench)
                .go(&position, &mut std::io::stdout())?;
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            eprintln!("Arbiter has not been compiled with feature `perft`");
        }
    }
    Ok(())
}
