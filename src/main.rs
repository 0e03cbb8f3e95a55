use anyhow::Context;
use bimaru::{init_logging, is_complete, solve, Board, Puzzle};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one puzzle from a file and print the resulting board.
    Solve {
        /// Puzzle file to read.
        file: PathBuf,
        #[arg(long, help = "Puzzle identifier; defaults to the first puzzle in the file")]
        id: Option<String>,
        #[arg(long, help = "Print the audit journal after solving")]
        journal: bool,
    },
    /// Solve every puzzle in a file and print a one-line verdict each.
    Check {
        /// Puzzle file to read.
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { file, id, journal } => {
            let puzzles = load(&file)?;
            let puzzle = match &id {
                Some(id) => puzzles
                    .iter()
                    .find(|p| p.name == *id)
                    .with_context(|| format!("no puzzle {:?} in {}", id, file.display()))?,
                None => puzzles
                    .first()
                    .with_context(|| format!("no puzzles in {}", file.display()))?,
            };
            let mut board = puzzle.to_board()?;
            match solve(&mut board) {
                Ok(level) => report(&board, level),
                Err(err) => println!("Puzzle {}: unsolvable as given: {err}", puzzle.name),
            }
            if journal {
                print!("{}", board.journal());
            }
        }
        Commands::Check { file } => {
            for puzzle in load(&file)? {
                let mut board = match puzzle.to_board() {
                    Ok(board) => board,
                    Err(err) => {
                        println!("Puzzle {}: invalid clues: {err}", puzzle.name);
                        continue;
                    }
                };
                match solve(&mut board) {
                    Ok(level) if is_complete(&board) => {
                        println!("Puzzle {}: solved (difficulty {level})", puzzle.name);
                    }
                    Ok(level) => {
                        println!("Puzzle {}: stalled at difficulty {level}", puzzle.name);
                    }
                    Err(err) => println!("Puzzle {}: failed: {err}", puzzle.name),
                }
            }
        }
    }
    Ok(())
}

fn load(file: &PathBuf) -> anyhow::Result<Vec<Puzzle>> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    Puzzle::parse_all(&text).with_context(|| format!("parsing {}", file.display()))
}

fn report(board: &Board, level: u32) {
    println!("{board}");
    println!();
    let fleet = board.fleet();
    for size in (1..=board.max_ship_size()).rev() {
        for ship in fleet.confirmed(size) {
            println!("{ship} (confirmed)");
        }
        for ship in fleet.potential(size) {
            println!("{ship} (potential)");
        }
    }
    if is_complete(board) {
        println!("Solved (difficulty {level})");
    } else {
        println!("Stalled at difficulty {level}; board incomplete");
    }
}
