pub mod board;
pub mod card;
pub mod display;
pub mod heuristic;
pub mod layouts;
pub mod moves;
pub mod rules;
pub mod search;
pub mod state;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::board::BoardError;
use crate::display::print_board;
use crate::state::GameState;

/// Command-line surface for the `freecell_solver` binary.
#[derive(Parser, Debug)]
#[command(about = "Best-first FreeCell solver")]
pub struct Args {
    /// Board file to solve instead of dealing from a seed.
    #[arg(long)]
    board: Option<PathBuf>,

    /// Seed for a pseudo-random deal.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum number of node expansions before giving up.
    #[arg(long, default_value_t = 1_000_000)]
    max_nodes: u64,

    /// Wall-clock budget in seconds.
    #[arg(long, default_value_t = 120)]
    max_seconds: u64,

    /// Print per-node search progress.
    #[arg(long)]
    trace: bool,

    /// Write the starting board to this file before solving.
    #[arg(long)]
    save: Option<PathBuf>,
}

/// Entry point for the `freecell_solver` binary: load or deal a board,
/// run the bounded best-first search, and report the outcome.
pub fn run() -> Result<(), BoardError> {
    let args = Args::parse();

    let state = match &args.board {
        Some(path) => board::load_board(path)?,
        None => GameState::deal_seeded(args.seed),
    };

    if let Some(path) = &args.save {
        board::save_board(&state, path)?;
    }

    match &args.board {
        Some(path) => println!("Board: {}", path.display()),
        None => println!("Deal seed: {}", args.seed),
    }
    println!();
    print_board(&state);

    let cfg = search::SearchConfig {
        limits: search::SearchLimits {
            max_nodes: args.max_nodes,
            max_time: Duration::from_secs(args.max_seconds),
        },
        detail: if args.trace {
            search::DetailLevel::Trace
        } else {
            search::DetailLevel::Summary
        },
        weights: heuristic::Weights::default(),
    };

    let outcome = search::solve_with_config(&state, &cfg);

    println!("Nodes expanded: {}", outcome.nodes_expanded);
    println!("Frontier peak: {}", outcome.frontier_peak);
    println!("Elapsed: {:.2}s", outcome.elapsed.as_secs_f64());
    println!("Termination: {:?}", outcome.termination);

    match &outcome.solution {
        Some(steps) if steps.is_empty() => {
            println!("Board is already solved.");
        }
        Some(steps) => {
            println!("Solved in {} moves:", steps.len());
            for (i, step) in steps.iter().enumerate() {
                print!("  {:3}. [{}] {}", i + 1, step.notation, step.description);
                if !step.auto_moves.is_empty() {
                    let autos: Vec<String> =
                        step.auto_moves.iter().map(|c| c.short_str()).collect();
                    print!("  (auto home: {})", autos.join(" "));
                }
                println!();
            }
        }
        None => {
            println!("No solution found under the current limits.");
        }
    }

    Ok(())
}
