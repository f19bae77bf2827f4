//! Play CLI
//!
//! Human against the minimax engine on a text board.

use std::env;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use chess_play::{Game, PlayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Play chess against a fixed-depth minimax engine");
    println!();
    println!("Usage:");
    println!("  play [--config FILE] [--depth D] [--color w|b] [--fen FEN] [--record FILE]");
    println!();
    println!("Without --config, play.toml in the current directory is read if present.");
    println!("Set RUST_LOG=debug to see search statistics.");
}

fn print_help() {
    println!("Commands:");
    println!("  e2e4, e7e8q   play a move (long algebraic, promotion letter required)");
    println!("  undo          take back your last move and the engine's reply");
    println!("  moves         list legal moves");
    println!("  fen           print the position as FEN");
    println!("  quit          leave the game");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    let config = PlayConfig::from_args(&args)?;
    let mut game = Game::new(&config)?;
    info!(depth = config.depth, human = ?config.human, "new game");

    println!("You play {:?} against {} at depth {}.", game.human(), game.engine_name(), game.depth());
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    while !game.is_over() {
        if !game.is_human_turn() {
            let result = game.play_engine()?;
            if let Some(mv) = result.best_move {
                println!("Engine plays {} (score {})", mv, result.score);
            }
            continue;
        }

        println!();
        println!("{}", game.position());
        if let Some(reason) = game.claimable_draw() {
            println!("A draw could be claimed ({reason}).");
        }
        print!("{:?} to move> ", game.position().side_to_move);
        stdout.flush().ok();

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "help" => print_help(),
            "fen" => println!("{}", game.position().to_fen()),
            "moves" => println!("{}", game.legal_move_texts().join(" ")),
            "undo" => match game.take_back() {
                Ok(undone) => {
                    let texts: Vec<String> = undone.iter().map(|m| m.to_string()).collect();
                    println!("Took back {}", texts.join(" "));
                }
                Err(e) => println!("{e}"),
            },
            text => {
                if let Err(e) = game.play_human(text) {
                    println!("{e}");
                }
            }
        }
    }

    println!();
    println!("{}", game.position());
    if game.is_over() {
        println!("Game Over: {}", game.result());
    }

    if let Some(path) = &config.record {
        game.record().save(path)?;
        info!(path = %path.display(), "saved game record");
    }

    Ok(())
}
