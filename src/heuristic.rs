//! Heuristic cost estimator for ordering the search.
//!
//! The estimate is a weighted sum of board features. It is not
//! admissible — the search is a weighted best-first search, not an
//! optimality-preserving A* — but in practice it pulls the frontier
//! hard toward states with more cards home, fewer buried next-needed
//! cards, and more open piles.

use crate::card::{Card, CARDS_PER_DECK};
use crate::state::GameState;

/// Weights for the individual heuristic terms.
///
/// The defaults reproduce the solver's tuned behavior; tests and
/// experiments may override individual terms.
#[derive(Clone, Copy, Debug)]
pub struct Weights {
    /// Per card not yet home. The dominant term.
    pub home: i32,
    /// Per card stacked on top of a next-needed card.
    pub blocked: i32,
    /// Per occupied free cell.
    pub free_cell_penalty: i32,
    /// Bonus per empty tableau pile (empty piles enable supermoves).
    pub empty_pile_bonus: i32,
    /// Bonus per card in an ordered run counted from a pile's bottom.
    pub sequence_bonus: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            home: 10,
            blocked: 1,
            free_cell_penalty: 2,
            empty_pile_bonus: 20,
            sequence_bonus: 10,
        }
    }
}

/// The estimator itself: currently just a weight set, but kept as a
/// struct so a driver can carry one configured instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Heuristic {
    pub weights: Weights,
}

impl Heuristic {
    pub fn new(weights: Weights) -> Self {
        Heuristic { weights }
    }

    /// Estimated remaining cost of `state`. Lower is better; the value
    /// can go negative once the bonuses dominate.
    pub fn evaluate(&self, state: &GameState) -> i32 {
        let w = &self.weights;

        let not_home = CARDS_PER_DECK as i32 - state.cards_in_home() as i32;
        let used_cells = (state.free_cells.len() - state.empty_free_cell_count()) as i32;
        let empty_piles = state.empty_tableau_count() as i32;

        not_home * w.home
            + blocked_cards(state) * w.blocked
            + used_cells * w.free_cell_penalty
            - empty_piles * w.empty_pile_bonus
            - sequence_bonus(state) * w.sequence_bonus
    }
}

/// Count buried next-needed cards.
///
/// For each tableau pile, scanning bottom-to-top, a card whose rank is
/// exactly what its suit's home pile needs next contributes the number
/// of cards sitting on top of it. An occupied free cell holding a
/// next-needed card contributes 1: it is out of play until spent.
pub fn blocked_cards(state: &GameState) -> i32 {
    let mut blockers = 0i32;

    for pile in &state.tableau {
        for (idx, card) in pile.iter().enumerate() {
            if is_next_needed(state, *card) {
                blockers += (pile.len() - 1 - idx) as i32;
            }
        }
    }

    for cell in &state.free_cells {
        if let Some(card) = cell {
            if is_next_needed(state, *card) {
                blockers += 1;
            }
        }
    }

    blockers
}

#[inline]
fn is_next_needed(state: &GameState, card: Card) -> bool {
    let next = state.next_home_rank(card.suit());
    next != 0 && card.rank_number() == next
}

/// Sum of ordered-run lengths counted from each pile's bottom.
///
/// A run extends while each successive card is one rank lower and the
/// opposite color of the card beneath it. Runs of length 1 contribute
/// nothing — a lone card is not progress worth rewarding.
pub fn sequence_bonus(state: &GameState) -> i32 {
    let mut bonus = 0i32;

    for pile in &state.tableau {
        if pile.len() <= 1 {
            continue;
        }
        let mut run = 1usize;
        for pair in pile.windows(2) {
            if crate::card::is_one_lower_opposite_color(pair[1], pair[0]) {
                run += 1;
            } else {
                break;
            }
        }
        if run > 1 {
            bonus += run as i32;
        }
    }

    bonus
}
