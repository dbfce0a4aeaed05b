//! Move legality for FreeCell.
//!
//! Every function here is a pure predicate (or derived query) over a
//! `&GameState`; nothing mutates its input. Move generation and the
//! search both lean on these, so only legal successors are ever built —
//! an illegal move is never an error, it simply is not produced.

use crate::card::{is_one_lower_opposite_color, Card, Suit};
use crate::state::{GameState, FREE_CELLS, TABLEAU_PILES};

/// Tableau pile non-empty, target cell unoccupied.
pub fn can_tableau_to_free_cell(state: &GameState, pile: usize, cell: usize) -> bool {
    if pile >= TABLEAU_PILES || cell >= FREE_CELLS {
        return false;
    }
    !state.tableau[pile].is_empty() && state.free_cells[cell].is_none()
}

/// Cell occupied, and its card may land on the pile: any card on an
/// empty pile, otherwise one rank lower and opposite color to the top.
pub fn can_free_cell_to_tableau(state: &GameState, cell: usize, pile: usize) -> bool {
    if cell >= FREE_CELLS || pile >= TABLEAU_PILES {
        return false;
    }
    let Some(card) = state.free_cells[cell] else {
        return false;
    };
    match state.tableau[pile].last() {
        None => true,
        Some(&top) => is_one_lower_opposite_color(card, top),
    }
}

/// The pile's top card is the next card its suit's home pile needs.
pub fn can_tableau_to_home(state: &GameState, pile: usize) -> bool {
    if pile >= TABLEAU_PILES {
        return false;
    }
    match state.tableau[pile].last() {
        Some(&card) => can_move_to_home(state, card),
        None => false,
    }
}

/// The cell's card is the next card its suit's home pile needs.
pub fn can_free_cell_to_home(state: &GameState, cell: usize) -> bool {
    if cell >= FREE_CELLS {
        return false;
    }
    match state.free_cells[cell] {
        Some(card) => can_move_to_home(state, card),
        None => false,
    }
}

/// Shared home-pile rule: an Ace on an empty pile, or exactly one rank
/// above the suit's current home top. Home piles are bound to suits at
/// construction, so there is never a choice of destination.
pub fn can_move_to_home(state: &GameState, card: Card) -> bool {
    let next = state.next_home_rank(card.suit());
    next != 0 && card.rank_number() == next
}

/// Single-card tableau move: same landing rule as from a free cell.
pub fn can_tableau_to_tableau(state: &GameState, from: usize, to: usize) -> bool {
    if from >= TABLEAU_PILES || to >= TABLEAU_PILES || from == to {
        return false;
    }
    let Some(&card) = state.tableau[from].last() else {
        return false;
    };
    match state.tableau[to].last() {
        None => true,
        Some(&top) => is_one_lower_opposite_color(card, top),
    }
}

/// The classic supermove capacity: `(empty cells + 1) * 2^(empty piles)`.
pub fn max_movable_cards(state: &GameState) -> usize {
    let free = state.empty_free_cell_count();
    let empties = state.empty_tableau_count();
    (free + 1) << empties
}

/// Supermove capacity toward a specific destination pile.
///
/// An empty destination is consumed by the move itself and cannot stage
/// cards, so it is excluded from the `2^(empty piles)` factor.
pub fn supermove_capacity(state: &GameState, to: usize) -> usize {
    let free = state.empty_free_cell_count();
    let mut empties = state.empty_tableau_count();
    if to < TABLEAU_PILES && state.tableau[to].is_empty() && empties > 0 {
        empties -= 1;
    }
    (free + 1) << empties
}

/// True if the slice of cards (bottom-to-top) forms a valid descending,
/// alternating-color run suitable for moving as a block.
pub fn is_ordered_run(cards: &[Card]) -> bool {
    if cards.is_empty() {
        return false;
    }
    cards
        .windows(2)
        .all(|pair| is_one_lower_opposite_color(pair[1], pair[0]))
}

/// Can the top `n` cards of `from` move to `to` as one supermove?
///
/// Requires: the cards form a valid ordered run, `n` is within the
/// capacity toward `to`, and the run's bottom card may land on `to` by
/// the single-card rule. The run is inspected in place; the source pile
/// is never touched.
pub fn can_move_sequence(state: &GameState, from: usize, to: usize, n: usize) -> bool {
    if from >= TABLEAU_PILES || to >= TABLEAU_PILES || from == to || n == 0 {
        return false;
    }
    let source = &state.tableau[from];
    if source.len() < n || n > supermove_capacity(state, to) {
        return false;
    }

    let run = &source[source.len() - n..];
    if !is_ordered_run(run) {
        return false;
    }

    match state.tableau[to].last() {
        None => true,
        Some(&top) => is_one_lower_opposite_color(run[0], top),
    }
}

/// Is `card` safe to send home automatically?
///
/// Ranks 1 and 2 are always safe. A higher rank is safe only once both
/// opposite-color home piles have reached at least `rank - 2`; otherwise
/// the card might still be needed in the tableau to hold an
/// opposite-color card one rank below it.
pub fn is_safe_autoplay(state: &GameState, card: Card) -> bool {
    let rank = card.rank_number();
    if rank <= 2 {
        return true;
    }
    let needed = rank - 2;
    Suit::ALL
        .iter()
        .filter(|suit| suit.is_red() != card.is_red())
        .all(|&suit| state.home_top_rank(suit) >= needed)
}
