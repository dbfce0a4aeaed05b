//! Move representation and move generation for FreeCell.
//!
//! This module defines a compact `Move` type plus helpers to generate all
//! legal moves from a given `GameState`, plus an `apply` method that
//! mutates a state in-place according to a chosen move. The search
//! driver combines these to explore the game tree, always working on a
//! fresh clone of the parent state.

use crate::card::Card;
use crate::rules;
use crate::state::{GameState, FREE_CELLS, TABLEAU_PILES};

/// Representation of the different primary move types in FreeCell.
///
/// Pile and cell indices are 0-based internally but printed 1-based (or
/// as the letters a-d for free cells) when shown to a human.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Send the top card of a tableau pile to its suit's home pile.
    TableauToHome { pile: u8 },

    /// Send the card held in a free cell to its suit's home pile.
    FreeCellToHome { cell: u8 },

    /// Bring the card held in a free cell down onto a tableau pile.
    FreeCellToTableau { cell: u8, pile: u8 },

    /// Move the top `count` cards of one tableau pile to another.
    ///
    /// `count == 1` is an ordinary single-card move; `count >= 2` is a
    /// supermove of an ordered run, capacity-limited by free cells and
    /// empty piles.
    TableauToTableau { from: u8, to: u8, count: u8 },

    /// Park the top card of a tableau pile in a free cell.
    TableauToFreeCell { pile: u8, cell: u8 },
}

/// Free cells are lettered a-d in move notation.
#[inline]
pub fn free_cell_char(cell: usize) -> char {
    (b'a' + cell as u8) as char
}

/// Generate all legal moves from the given state, in the driver's
/// expansion order:
///
///   1. tableau -> home, then free cell -> home (these only ever help,
///      so they are expanded first)
///   2. free cell -> tableau
///   3. tableau -> tableau, single cards and one largest supermove per
///      pile pair
///   4. tableau -> free cell (first empty cell only; cells are
///      interchangeable, so more targets would only add transpositions)
///
/// This does **not** apply or score moves; it just lists everything that
/// is legal in the current state, in a deterministic order.
pub fn generate_legal_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::new();

    // Tableau -> Home
    for pile in 0..TABLEAU_PILES {
        if rules::can_tableau_to_home(state, pile) {
            moves.push(Move::TableauToHome { pile: pile as u8 });
        }
    }

    // FreeCell -> Home
    for cell in 0..FREE_CELLS {
        if rules::can_free_cell_to_home(state, cell) {
            moves.push(Move::FreeCellToHome { cell: cell as u8 });
        }
    }

    // FreeCell -> Tableau
    for cell in 0..FREE_CELLS {
        if state.free_cells[cell].is_none() {
            continue;
        }
        for pile in 0..TABLEAU_PILES {
            if rules::can_free_cell_to_tableau(state, cell, pile) {
                moves.push(Move::FreeCellToTableau {
                    cell: cell as u8,
                    pile: pile as u8,
                });
            }
        }
    }

    // Tableau -> Tableau: single cards, plus at most one supermove per
    // (from, to) pair, preferring the longest legal run.
    let capacity = rules::max_movable_cards(state);
    for from in 0..TABLEAU_PILES {
        let source_len = state.tableau[from].len();
        if source_len == 0 {
            continue;
        }
        for to in 0..TABLEAU_PILES {
            if from == to {
                continue;
            }
            if rules::can_tableau_to_tableau(state, from, to) {
                moves.push(Move::TableauToTableau {
                    from: from as u8,
                    to: to as u8,
                    count: 1,
                });
            }
            let upper = capacity.min(source_len);
            for count in (2..=upper).rev() {
                if rules::can_move_sequence(state, from, to, count) {
                    moves.push(Move::TableauToTableau {
                        from: from as u8,
                        to: to as u8,
                        count: count as u8,
                    });
                    break;
                }
            }
        }
    }

    // Tableau -> FreeCell
    if let Some(cell) = state.first_empty_free_cell() {
        for pile in 0..TABLEAU_PILES {
            if rules::can_tableau_to_free_cell(state, pile, cell) {
                moves.push(Move::TableauToFreeCell {
                    pile: pile as u8,
                    cell: cell as u8,
                });
            }
        }
    }

    moves
}

impl Move {
    /// Apply this move to the given state, mutating it in-place.
    ///
    /// This function assumes the move is legal in the given state. It
    /// does not re-check legality; callers should rely on
    /// `generate_legal_moves` to produce only valid moves.
    pub fn apply(&self, state: &mut GameState) {
        match *self {
            Move::TableauToHome { pile } => {
                if let Some(card) = state.tableau[pile as usize].pop() {
                    state.homes[card.suit() as usize].push(card);
                }
            }

            Move::FreeCellToHome { cell } => {
                if let Some(card) = state.free_cells[cell as usize].take() {
                    state.homes[card.suit() as usize].push(card);
                }
            }

            Move::FreeCellToTableau { cell, pile } => {
                if let Some(card) = state.free_cells[cell as usize].take() {
                    state.tableau[pile as usize].push(card);
                }
            }

            Move::TableauToTableau { from, to, count } => {
                let (from, to) = (from as usize, to as usize);
                if from == to {
                    return;
                }
                let source_len = state.tableau[from].len();
                let count = count as usize;
                if count == 0 || count > source_len {
                    return;
                }
                let run = state.tableau[from].split_off(source_len - count);
                state.tableau[to].extend(run);
            }

            Move::TableauToFreeCell { pile, cell } => {
                if let Some(card) = state.tableau[pile as usize].pop() {
                    state.free_cells[cell as usize] = Some(card);
                }
            }
        }
    }

    /// Short notation token: tableau piles 1-8, free cells a-d, home `h`.
    ///
    /// Examples: `"3h"` (tableau 3 home), `"ah"` (cell a home), `"a3"`,
    /// `"35"`, `"3a"`.
    pub fn notation(&self) -> String {
        match *self {
            Move::TableauToHome { pile } => format!("{}h", pile + 1),
            Move::FreeCellToHome { cell } => {
                format!("{}h", free_cell_char(cell as usize))
            }
            Move::FreeCellToTableau { cell, pile } => {
                format!("{}{}", free_cell_char(cell as usize), pile + 1)
            }
            Move::TableauToTableau { from, to, .. } => format!("{}{}", from + 1, to + 1),
            Move::TableauToFreeCell { pile, cell } => {
                format!("{}{}", pile + 1, free_cell_char(cell as usize))
            }
        }
    }

    /// Render a move as a human-readable string, using the *pre-move*
    /// state to name the cards involved.
    pub fn describe(&self, state: &GameState) -> String {
        match *self {
            Move::TableauToHome { pile } => {
                let p = pile as usize;
                match state.tableau[p].last() {
                    Some(card) => {
                        format!("Move {} from Tableau {} to Home", card.short_str(), p + 1)
                    }
                    None => format!("Tableau {} (empty) -> Home", p + 1),
                }
            }

            Move::FreeCellToHome { cell } => {
                let c = cell as usize;
                match state.free_cells[c] {
                    Some(card) => format!(
                        "Move {} from FreeCell {} to Home",
                        card.short_str(),
                        free_cell_char(c)
                    ),
                    None => format!("FreeCell {} (empty) -> Home", free_cell_char(c)),
                }
            }

            Move::FreeCellToTableau { cell, pile } => {
                let c = cell as usize;
                match state.free_cells[c] {
                    Some(card) => format!(
                        "Move {} from FreeCell {} to Tableau {}",
                        card.short_str(),
                        free_cell_char(c),
                        pile + 1
                    ),
                    None => {
                        format!("FreeCell {} (empty) -> Tableau {}", free_cell_char(c), pile + 1)
                    }
                }
            }

            Move::TableauToTableau { from, to, count } => {
                let f = from as usize;
                let source = &state.tableau[f];
                let count = count as usize;
                if count <= 1 || source.len() < count {
                    match source.last() {
                        Some(card) => format!(
                            "Move {} from Tableau {} to Tableau {}",
                            card.short_str(),
                            f + 1,
                            to + 1
                        ),
                        None => format!("Tableau {} (empty) -> Tableau {}", f + 1, to + 1),
                    }
                } else {
                    let run = &source[source.len() - count..];
                    format!(
                        "Move {}..{} from Tableau {} to Tableau {}",
                        run[0].short_str(),
                        run[count - 1].short_str(),
                        f + 1,
                        to + 1
                    )
                }
            }

            Move::TableauToFreeCell { pile, cell } => {
                let p = pile as usize;
                match state.tableau[p].last() {
                    Some(card) => format!(
                        "Move {} from Tableau {} to FreeCell {}",
                        card.short_str(),
                        p + 1,
                        free_cell_char(cell as usize)
                    ),
                    None => format!(
                        "Tableau {} (empty) -> FreeCell {}",
                        p + 1,
                        free_cell_char(cell as usize)
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{standard_deck, Card, Rank, Suit, CARDS_PER_DECK};

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    /// Applying every legal move from a dealt position must conserve the
    /// full deck: 52 distinct cards, nothing duplicated, nothing lost.
    #[test]
    fn legal_moves_conserve_all_cards() {
        for seed in [1u64, 99, 4040] {
            let state = GameState::deal_seeded(seed);
            let moves = generate_legal_moves(&state);
            assert!(!moves.is_empty(), "fresh deals always have moves");

            for mv in moves {
                let mut next = state.clone();
                mv.apply(&mut next);

                let cards = next.flatten_cards();
                assert_eq!(cards.len(), CARDS_PER_DECK as usize, "{mv:?}");
                let mut seen = [false; CARDS_PER_DECK as usize];
                for c in cards {
                    assert!(!seen[c.index() as usize], "{mv:?} duplicated {c}");
                    seen[c.index() as usize] = true;
                }
            }
        }
    }

    /// Home moves come first in the generated order.
    #[test]
    fn home_moves_are_generated_first() {
        let mut state = GameState::empty();
        state.tableau[0].push(card(Suit::Hearts, Rank::Ace));
        state.tableau[1].push(card(Suit::Spades, Rank::Five));
        state.free_cells[0] = Some(card(Suit::Clubs, Rank::Ace));

        let moves = generate_legal_moves(&state);
        assert_eq!(moves[0], Move::TableauToHome { pile: 0 });
        assert_eq!(moves[1], Move::FreeCellToHome { cell: 0 });
        assert!(moves.len() > 2, "other move kinds follow");
    }

    /// Only one supermove is offered per pile pair: the longest run that
    /// fits, in addition to the plain single-card move.
    #[test]
    fn one_supermove_per_pile_pair() {
        let mut state = GameState::empty();
        // Pile 0: 9H 8S 7H; pile 1: TS.
        state.tableau[0].push(card(Suit::Hearts, Rank::Nine));
        state.tableau[0].push(card(Suit::Spades, Rank::Eight));
        state.tableau[0].push(card(Suit::Hearts, Rank::Seven));
        state.tableau[1].push(card(Suit::Spades, Rank::Ten));
        // Occupy remaining piles so no empty-pile targets muddy the list.
        for pile in 2..TABLEAU_PILES {
            state.tableau[pile].push(card(Suit::Diamonds, Rank::King));
        }

        let moves = generate_legal_moves(&state);
        let supermoves: Vec<_> = moves
            .iter()
            .filter(|m| matches!(m, Move::TableauToTableau { count, .. } if *count >= 2))
            .collect();
        assert_eq!(
            supermoves,
            vec![&Move::TableauToTableau { from: 0, to: 1, count: 3 }]
        );
    }

    #[test]
    fn supermove_apply_preserves_run_order() {
        let mut state = GameState::empty();
        state.tableau[0].push(card(Suit::Clubs, Rank::King));
        state.tableau[0].push(card(Suit::Hearts, Rank::Nine));
        state.tableau[0].push(card(Suit::Spades, Rank::Eight));
        state.tableau[0].push(card(Suit::Hearts, Rank::Seven));
        state.tableau[1].push(card(Suit::Spades, Rank::Ten));

        let mv = Move::TableauToTableau { from: 0, to: 1, count: 3 };
        mv.apply(&mut state);

        assert_eq!(state.tableau[0], vec![card(Suit::Clubs, Rank::King)]);
        assert_eq!(
            state.tableau[1],
            vec![
                card(Suit::Spades, Rank::Ten),
                card(Suit::Hearts, Rank::Nine),
                card(Suit::Spades, Rank::Eight),
                card(Suit::Hearts, Rank::Seven),
            ]
        );
    }

    #[test]
    fn home_and_cell_moves_apply() {
        let mut state = GameState::empty();
        state.tableau[0].push(card(Suit::Hearts, Rank::Ace));
        Move::TableauToHome { pile: 0 }.apply(&mut state);
        assert!(state.tableau[0].is_empty());
        assert_eq!(state.home_top_rank(Suit::Hearts), 1);

        state.free_cells[2] = Some(card(Suit::Hearts, Rank::Two));
        Move::FreeCellToHome { cell: 2 }.apply(&mut state);
        assert_eq!(state.free_cells[2], None);
        assert_eq!(state.home_top_rank(Suit::Hearts), 2);

        state.tableau[3].push(card(Suit::Spades, Rank::Nine));
        Move::TableauToFreeCell { pile: 3, cell: 0 }.apply(&mut state);
        assert_eq!(state.free_cells[0], Some(card(Suit::Spades, Rank::Nine)));

        Move::FreeCellToTableau { cell: 0, pile: 5 }.apply(&mut state);
        assert_eq!(state.free_cells[0], None);
        assert_eq!(state.tableau[5], vec![card(Suit::Spades, Rank::Nine)]);
    }

    #[test]
    fn notation_tokens() {
        assert_eq!(Move::TableauToHome { pile: 2 }.notation(), "3h");
        assert_eq!(Move::FreeCellToHome { cell: 0 }.notation(), "ah");
        assert_eq!(Move::FreeCellToTableau { cell: 1, pile: 4 }.notation(), "b5");
        assert_eq!(
            Move::TableauToTableau { from: 0, to: 7, count: 3 }.notation(),
            "18"
        );
        assert_eq!(Move::TableauToFreeCell { pile: 6, cell: 3 }.notation(), "7d");
    }

    #[test]
    fn describe_names_the_moving_cards() {
        let mut state = GameState::empty();
        state.tableau[0].push(card(Suit::Hearts, Rank::Nine));
        state.tableau[0].push(card(Suit::Spades, Rank::Eight));
        state.tableau[1].push(card(Suit::Spades, Rank::Ten));

        let single = Move::TableauToTableau { from: 0, to: 1, count: 1 };
        assert_eq!(single.describe(&state), "Move 8S from Tableau 1 to Tableau 2");

        let run = Move::TableauToTableau { from: 0, to: 1, count: 2 };
        assert_eq!(run.describe(&state), "Move 9H..8S from Tableau 1 to Tableau 2");

        state.free_cells[0] = Some(card(Suit::Clubs, Rank::Ace));
        let from_cell = Move::FreeCellToHome { cell: 0 };
        assert_eq!(from_cell.describe(&state), "Move AC from FreeCell a to Home");
    }

    /// A fully dealt deck always has the parking moves available.
    #[test]
    fn standard_deal_generation_sanity() {
        let state = GameState::deal(&standard_deck());
        let moves = generate_legal_moves(&state);
        assert!(moves
            .iter()
            .any(|m| matches!(m, Move::TableauToFreeCell { .. })));
    }
}
