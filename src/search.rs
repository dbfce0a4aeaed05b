//! Best-first search over the FreeCell game tree.
//!
//! The driver keeps a min-priority frontier of unexpanded nodes keyed by
//! `f = path cost + heuristic`, a closed set of already-expanded states
//! for transposition detection, and an open-membership set to avoid
//! re-inserting a state that is already pending. The search is
//! deliberately bounded (node count and wall time) so that it cannot run
//! away forever on hard or unsolvable deals; hitting a bound is a normal
//! "no solution found under these limits" outcome, not a fault.
//!
//! After every primary move the successor state is folded through *safe
//! autoplay*: cards that are certain never to be needed again in the
//! tableau are sent home automatically and recorded as side effects of
//! the triggering move.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::card::Card;
use crate::heuristic::{Heuristic, Weights};
use crate::moves::generate_legal_moves;
use crate::rules;
use crate::state::{GameState, FREE_CELLS, TABLEAU_PILES};

/// One entry of a reconstructed solution: a primary move plus the cards
/// that autoplay carried home right after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolutionStep {
    /// Short token such as `"3h"`, `"a5"`, `"27"`.
    pub notation: String,
    /// Human-readable description of the primary move.
    pub description: String,
    /// Cards sent home automatically as a consequence of this move, in
    /// the order autoplay moved them.
    pub auto_moves: Vec<Card>,
}

/// A point in the search tree: a state plus the edge that produced it.
///
/// Nodes form a tree through `parent` links; reconstructing a solution
/// walks from the goal node back to the root. Identity for transposition
/// purposes is the *state* alone — the closed set recognizes a board no
/// matter which move sequence reached it.
#[derive(Debug)]
pub struct Node {
    /// Owning back-reference; `None` for the root.
    pub parent: Option<Rc<Node>>,
    /// The board at this node. Never mutated once the node exists.
    pub state: GameState,
    /// The edge from `parent`: `None` for the root.
    pub step: Option<SolutionStep>,
    /// Primary moves from the root (uniform cost 1 each).
    pub depth: u32,
}

/// Why the search stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Termination {
    /// A goal state was reached; the outcome carries a solution path.
    GoalFound,
    /// The frontier emptied before a goal was found. All states
    /// reachable under the generated move set were seen.
    Exhausted,
    /// A node or wall-time bound was hit. Says nothing about whether
    /// the deal is solvable.
    BoundExceeded,
}

/// Limits for a search run. These keep hard or unsolvable deals from
/// exploring forever and give a knob to control runtime.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    /// Hard cap on the number of nodes popped from the frontier.
    pub max_nodes: u64,
    /// Hard cap on elapsed wall time.
    pub max_time: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_nodes: 1_000_000,
            max_time: Duration::from_secs(120),
        }
    }
}

/// How much progress output the search prints while running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailLevel {
    /// No output from inside the search loop.
    Summary,
    /// A progress line every 1000 expansions.
    Trace,
}

/// Full configuration for a search run.
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    pub limits: SearchLimits,
    pub detail: DetailLevel,
    pub weights: Weights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            limits: SearchLimits::default(),
            detail: DetailLevel::Summary,
            weights: Weights::default(),
        }
    }
}

/// Outcome of solving a single deal.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// Why the search stopped.
    pub termination: Termination,
    /// The solution path, in chronological order. `Some(vec![])` means
    /// the input was already solved; `None` means no solution was found
    /// (see `termination` for whether the search was cut short).
    pub solution: Option<Vec<SolutionStep>>,
    /// Number of nodes popped from the frontier.
    pub nodes_expanded: u64,
    /// Largest frontier size observed.
    pub frontier_peak: usize,
    /// Wall time spent searching.
    pub elapsed: Duration,
}

impl SolveOutcome {
    /// Whether a solution path is available.
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Frontier entry: a node plus its score and an insertion sequence
/// number. `BinaryHeap` is a max-heap, so the ordering is reversed to
/// pop the lowest score first; ties break toward the earlier insertion,
/// which makes runs deterministic.
struct OpenEntry {
    score: i32,
    seq: u64,
    node: Rc<Node>,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Repeatedly send every safely-home-movable card home, until a full
/// pass over the tableau tops and free cells moves nothing.
///
/// Returns the moved cards in order. Invoking this on an already-stable
/// state returns an empty vector and leaves the state untouched.
pub fn autoplay(state: &mut GameState) -> Vec<Card> {
    let mut moved = Vec::new();

    loop {
        let mut progress = false;

        for pile in 0..TABLEAU_PILES {
            while let Some(&card) = state.tableau[pile].last() {
                if rules::can_move_to_home(state, card) && rules::is_safe_autoplay(state, card) {
                    state.tableau[pile].pop();
                    state.homes[card.suit() as usize].push(card);
                    moved.push(card);
                    progress = true;
                } else {
                    break;
                }
            }
        }

        for cell in 0..FREE_CELLS {
            if let Some(card) = state.free_cells[cell] {
                if rules::can_move_to_home(state, card) && rules::is_safe_autoplay(state, card) {
                    state.free_cells[cell] = None;
                    state.homes[card.suit() as usize].push(card);
                    moved.push(card);
                    progress = true;
                }
            }
        }

        if !progress {
            break;
        }
    }

    moved
}

/// Solve a deal with default limits, weights, and no tracing.
pub fn solve(initial: &GameState) -> SolveOutcome {
    solve_with_config(initial, &SearchConfig::default())
}

/// Bounded best-first search for a single deal.
///
/// Each iteration: check the bounds, pop the lowest-score node, discard
/// it if its state was already expanded (stale frontier entry), close
/// it, test for the goal, and otherwise expand it. Expansion generates
/// legal moves in a fixed order (home moves first), applies each to a
/// fresh copy of the state, folds the result through `autoplay`, and
/// inserts it unless the state is already closed or pending.
pub fn solve_with_config(initial: &GameState, cfg: &SearchConfig) -> SolveOutcome {
    let heuristic = Heuristic::new(cfg.weights);
    let start = Instant::now();

    let root = Rc::new(Node {
        parent: None,
        state: initial.clone(),
        step: None,
        depth: 0,
    });

    let mut frontier: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut open_states: HashSet<GameState> = HashSet::new();
    let mut closed: HashSet<GameState> = HashSet::new();

    let mut seq: u64 = 0;
    frontier.push(OpenEntry {
        score: heuristic.evaluate(&root.state),
        seq,
        node: Rc::clone(&root),
    });
    open_states.insert(initial.clone());

    let mut nodes_expanded: u64 = 0;
    let mut frontier_peak: usize = 1;

    while let Some(entry) = frontier.pop() {
        if nodes_expanded >= cfg.limits.max_nodes || start.elapsed() > cfg.limits.max_time {
            return SolveOutcome {
                termination: Termination::BoundExceeded,
                solution: None,
                nodes_expanded,
                frontier_peak,
                elapsed: start.elapsed(),
            };
        }

        let node = entry.node;
        open_states.remove(&node.state);
        nodes_expanded += 1;

        if cfg.detail == DetailLevel::Trace && nodes_expanded % 1000 == 0 {
            println!(
                "expanded {} nodes, frontier {}, depth {}, f {}",
                nodes_expanded,
                frontier.len(),
                node.depth,
                entry.score
            );
        }

        // Stale frontier entry: the state was reached again through a
        // cheaper-looking path after this entry was queued.
        if closed.contains(&node.state) {
            continue;
        }
        closed.insert(node.state.clone());

        if node.state.is_solved() {
            return SolveOutcome {
                termination: Termination::GoalFound,
                solution: Some(reconstruct_path(&node)),
                nodes_expanded,
                frontier_peak,
                elapsed: start.elapsed(),
            };
        }

        for mv in generate_legal_moves(&node.state) {
            let description = mv.describe(&node.state);
            let mut next = node.state.clone();
            mv.apply(&mut next);
            let auto_moves = autoplay(&mut next);

            if closed.contains(&next) || open_states.contains(&next) {
                continue;
            }

            let depth = node.depth + 1;
            let score = depth as i32 + heuristic.evaluate(&next);
            open_states.insert(next.clone());
            seq += 1;
            frontier.push(OpenEntry {
                score,
                seq,
                node: Rc::new(Node {
                    parent: Some(Rc::clone(&node)),
                    state: next,
                    step: Some(SolutionStep {
                        notation: mv.notation(),
                        description,
                        auto_moves,
                    }),
                    depth,
                }),
            });
        }

        frontier_peak = frontier_peak.max(frontier.len());
    }

    SolveOutcome {
        termination: Termination::Exhausted,
        solution: None,
        nodes_expanded,
        frontier_peak,
        elapsed: start.elapsed(),
    }
}

/// Walk parent links from the goal back to the root, then reverse into
/// chronological order.
fn reconstruct_path(goal: &Rc<Node>) -> Vec<SolutionStep> {
    let mut steps = Vec::new();
    let mut current = Some(Rc::clone(goal));
    while let Some(node) = current {
        if let Some(step) = &node.step {
            steps.push(step.clone());
        }
        current = node.parent.clone();
    }
    steps.reverse();
    steps
}
