#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use vier_alphabeta::config::EngineConfig;
use vier_alphabeta::error::GameError;
use vier_alphabeta::{Game, Gameboard, Player};

/// Play Connect Four against the computer.
#[derive(Debug, Parser)]
#[command(name = "vier-alphabeta", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "vier-alphabeta.toml")]
    config: PathBuf,

    /// Override the search depth of the computer
    #[arg(long)]
    depth: Option<usize>,

    /// Let the computer make the first move
    #[arg(long)]
    ai_first: bool,
}

fn print_board(board: &Gameboard) {
    // Print rows reverted to that it appears naturally.
    for row in board.board().iter().rev() {
        for col in row {
            let symbol = match col {
                None => ' ',
                Some(Player::Human) => 'X',
                Some(Player::Ai) => 'O',
            };
            print!("{symbol},");
        }
        println!();
    }

    for _ in 0..board.width() {
        print!("--");
    }
    println!();

    for col_id in (0..board.width()).map(|i| i + 1) {
        print!("{col_id},");
    }
    println!();
}

/// Reads columns until one is accepted by the board.
///
/// Returns whether the move won the game, or `None` at the end of input.
fn human_turn(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    game: &mut Game,
) -> Result<Option<bool>> {
    loop {
        print!("Choose your move (column): ");
        for col in game.board().available_columns_iter().map(|x| x + 1) {
            print!("{col},");
        }
        println!();
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("failed to read from stdin")?;

        let Ok(number) = line.trim().parse::<usize>() else {
            println!("Please enter a column number.");
            continue;
        };
        // adapt to index
        let Some(column) = number.checked_sub(1) else {
            println!("Column {number} does not exist.");
            continue;
        };

        match game.apply_move(column, Player::Human) {
            Ok((_, won)) => return Ok(Some(won)),
            Err(GameError::InvalidColumn(_)) => println!("Column {number} does not exist."),
            Err(GameError::ColumnFull(_)) => println!("Column {number} is full."),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search_depth = depth;
    }
    if cli.ai_first {
        config.ai_starts = true;
    }
    config.validate().context("invalid configuration")?;
    info!(
        "search depth {}, {} starts",
        config.search_depth,
        if config.ai_starts { "computer" } else { "human" }
    );

    let mut game = Game::<7, 6>::new();
    let mut current_player = if config.ai_starts {
        Player::Ai
    } else {
        Player::Human
    };
    let mut lines = io::stdin().lock().lines();

    println!("Let's play viergewinnt against the computer.");
    loop {
        println!("----------------");
        print_board(game.board());
        println!();

        if game.board().gameover() {
            println!("Gameover: draw");
            break;
        }

        // Human player
        if current_player == Player::Human {
            match human_turn(&mut lines, &mut game)? {
                None => {
                    println!("Bye.");
                    return Ok(());
                }
                Some(true) => {
                    println!("You won!");
                    break;
                }
                Some(false) => {}
            }
        }
        // Computer player
        else {
            println!("Computer is thinking...");
            let best_move = game
                .request_move(config.search_depth)
                .context("no legal move left for the computer")?;
            println!("Computer chose column {}", best_move + 1);

            let (_, won) = game.apply_move(best_move, Player::Ai)?;
            if won {
                println!("Computer won!");
                break;
            }
        }

        current_player = current_player.opponent();
    }

    println!("----------------");
    print_board(game.board());
    Ok(())
}
