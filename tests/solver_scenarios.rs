//! End-to-end solver scenarios on full 52-card boards.

use std::time::Duration;

use freecell_solver::board::{load_board, save_board};
use freecell_solver::heuristic::Weights;
use freecell_solver::layouts;
use freecell_solver::search::{
    solve, solve_with_config, DetailLevel, SearchConfig, SearchLimits, Termination,
};
use freecell_solver::state::GameState;

#[test]
fn ten_built_board_solves_in_two_moves() {
    let outcome = solve(&layouts::ten_built());
    assert_eq!(outcome.termination, Termination::GoalFound);
    let steps = outcome.solution.expect("ten-built board is solvable");

    // Each King move onto an empty pile releases a cascade of safe
    // moves home; two such moves clear the whole board.
    assert_eq!(steps.len(), 2);
    let auto_total: usize = steps.iter().map(|s| s.auto_moves.len()).sum();
    assert_eq!(auto_total, 12);
}

#[test]
fn dead_board_terminates_exhausted() {
    let outcome = solve(&layouts::no_move());
    assert_eq!(outcome.termination, Termination::Exhausted);
    assert!(outcome.solution.is_none());
    assert_eq!(outcome.nodes_expanded, 1);
}

#[test]
fn fresh_deal_respects_the_node_bound() {
    let cfg = SearchConfig {
        limits: SearchLimits {
            max_nodes: 2_000,
            max_time: Duration::from_secs(30),
        },
        detail: DetailLevel::Summary,
        weights: Weights::default(),
    };
    let outcome = solve_with_config(&GameState::deal_seeded(1), &cfg);
    assert!(outcome.nodes_expanded <= 2_000);
    match outcome.termination {
        Termination::GoalFound => assert!(outcome.solution.is_some()),
        Termination::Exhausted | Termination::BoundExceeded => {
            assert!(outcome.solution.is_none())
        }
    }
}

#[test]
fn solved_and_reloaded_boards_agree() {
    let state = layouts::ten_built();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ten_built.txt");
    save_board(&state, &path).unwrap();
    let reloaded = load_board(&path).unwrap();
    assert_eq!(reloaded, state);

    // Solving the reloaded board finds the same solution.
    let a = solve(&state);
    let b = solve(&reloaded);
    assert_eq!(a.termination, b.termination);
    let (a, b) = (a.solution.unwrap(), b.solution.unwrap());
    let na: Vec<&str> = a.iter().map(|s| s.notation.as_str()).collect();
    let nb: Vec<&str> = b.iter().map(|s| s.notation.as_str()).collect();
    assert_eq!(na, nb);
}
