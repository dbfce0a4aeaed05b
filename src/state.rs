//! The FreeCell board: 8 tableau piles, 4 free cells, 4 home piles.
//!
//! `GameState` is a plain value type. Equality and hashing are derived,
//! so they are structural: two states with identical pile contents in
//! identical positions compare equal no matter how they were reached.
//! The search's closed and open sets depend on that, which is also why
//! a state is never mutated once it has been handed to the search —
//! every transition works on a fresh `clone()`.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::card::{standard_deck, Card, Suit, CARDS_PER_DECK, NUM_RANKS};

/// Number of tableau piles on a FreeCell board.
pub const TABLEAU_PILES: usize = 8;
/// Number of free cells.
pub const FREE_CELLS: usize = 4;
/// Number of home piles (one per suit).
pub const HOME_PILES: usize = 4;

/// A full FreeCell board position.
///
/// Home piles are indexed by suit (`Suit as usize`), fixed at
/// construction: the Ace of Clubs always starts pile 0, and so on. Each
/// pile stores cards bottom-to-top, so the last element is the top card.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub tableau: [Vec<Card>; TABLEAU_PILES],
    pub free_cells: [Option<Card>; FREE_CELLS],
    pub homes: [Vec<Card>; HOME_PILES],
}

impl GameState {
    /// An entirely empty board. Mostly useful as a base for tests and
    /// for the board-file loader.
    pub fn empty() -> Self {
        GameState {
            tableau: std::array::from_fn(|_| Vec::new()),
            free_cells: [None; FREE_CELLS],
            homes: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Deal a 52-card deck into the initial FreeCell layout.
    ///
    /// The first four piles receive 7 cards each and the last four
    /// receive 6, taken from the deck in order.
    pub fn deal(deck: &[Card; CARDS_PER_DECK as usize]) -> Self {
        let mut state = GameState::empty();
        let mut next = 0usize;
        for (pile, column) in state.tableau.iter_mut().enumerate() {
            let count = if pile < 4 { 7 } else { 6 };
            for _ in 0..count {
                column.push(deck[next]);
                next += 1;
            }
        }
        state
    }

    /// Deal a pseudo-random game reproducible from a 64-bit seed.
    pub fn deal_seeded(seed: u64) -> Self {
        let mut deck = standard_deck();
        let mut rng = SmallRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);
        GameState::deal(&deck)
    }

    /// Total number of cards across all four home piles.
    pub fn cards_in_home(&self) -> usize {
        self.homes.iter().map(|pile| pile.len()).sum()
    }

    /// The goal test: every card is home.
    pub fn is_solved(&self) -> bool {
        self.cards_in_home() == CARDS_PER_DECK as usize
    }

    /// Number of unoccupied free cells.
    pub fn empty_free_cell_count(&self) -> usize {
        self.free_cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Index of the first unoccupied free cell, if any.
    pub fn first_empty_free_cell(&self) -> Option<usize> {
        self.free_cells.iter().position(|cell| cell.is_none())
    }

    /// Number of empty tableau piles.
    pub fn empty_tableau_count(&self) -> usize {
        self.tableau.iter().filter(|pile| pile.is_empty()).count()
    }

    /// Rank number (1..=13) currently on top of a suit's home pile, or 0
    /// when the pile is empty.
    ///
    /// Home piles are strictly Ace-upward by construction, so the top
    /// rank equals the pile length.
    pub fn home_top_rank(&self, suit: Suit) -> u8 {
        self.homes[suit as usize].len() as u8
    }

    /// The rank a suit's home pile needs next: home top + 1, 1 when the
    /// pile is empty, or 0 when the suit is complete.
    pub fn next_home_rank(&self, suit: Suit) -> u8 {
        let top = self.home_top_rank(suit);
        if top >= NUM_RANKS { 0 } else { top + 1 }
    }

    /// All cards on the board in a deterministic traversal order
    /// (tableau piles, then free cells, then home piles).
    ///
    /// For any state reachable from a valid deal this returns 52
    /// distinct cards; the conservation tests lean on that.
    pub fn flatten_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(CARDS_PER_DECK as usize);
        for pile in &self.tableau {
            cards.extend(pile.iter().copied());
        }
        for cell in &self.free_cells {
            if let Some(card) = cell {
                cards.push(*card);
            }
        }
        for pile in &self.homes {
            cards.extend(pile.iter().copied());
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, CARDS_PER_DECK};

    #[test]
    fn deal_distributes_seven_then_six() {
        let state = GameState::deal(&standard_deck());
        for pile in 0..TABLEAU_PILES {
            let expected = if pile < 4 { 7 } else { 6 };
            assert_eq!(state.tableau[pile].len(), expected, "pile {pile}");
        }
        assert_eq!(state.empty_free_cell_count(), FREE_CELLS);
        assert_eq!(state.cards_in_home(), 0);
        assert!(!state.is_solved());
    }

    #[test]
    fn deal_conserves_all_52_cards() {
        let state = GameState::deal_seeded(7);
        let cards = state.flatten_cards();
        assert_eq!(cards.len(), CARDS_PER_DECK as usize);

        let mut seen = [false; CARDS_PER_DECK as usize];
        for card in cards {
            let idx = card.index() as usize;
            assert!(!seen[idx], "duplicate card {card}");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&b| b));
    }

    #[test]
    fn deal_seeded_is_reproducible() {
        assert_eq!(GameState::deal_seeded(42), GameState::deal_seeded(42));
        assert_ne!(GameState::deal_seeded(42), GameState::deal_seeded(43));
    }

    #[test]
    fn equality_is_structural() {
        // Two states built through different code paths but with the
        // same layout must compare and hash equal.
        let a = GameState::deal(&standard_deck());
        let mut b = GameState::empty();
        let deck = standard_deck();
        let mut next = 0usize;
        for pile in 0..TABLEAU_PILES {
            let count = if pile < 4 { 7 } else { 6 };
            for _ in 0..count {
                b.tableau[pile].push(deck[next]);
                next += 1;
            }
        }
        assert_eq!(a, b);

        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn home_rank_queries() {
        let mut state = GameState::empty();
        assert_eq!(state.home_top_rank(Suit::Hearts), 0);
        assert_eq!(state.next_home_rank(Suit::Hearts), 1);

        for rank in [Rank::Ace, Rank::Two, Rank::Three] {
            state.homes[Suit::Hearts as usize].push(Card::new(Suit::Hearts, rank));
        }
        assert_eq!(state.home_top_rank(Suit::Hearts), 3);
        assert_eq!(state.next_home_rank(Suit::Hearts), 4);

        for &rank in Rank::ALL.iter() {
            state.homes[Suit::Spades as usize].push(Card::new(Suit::Spades, rank));
        }
        assert_eq!(state.home_top_rank(Suit::Spades), 13);
        assert_eq!(state.next_home_rank(Suit::Spades), 0);
    }

    #[test]
    fn solved_detection() {
        let mut state = GameState::empty();
        for &suit in Suit::ALL.iter() {
            for &rank in Rank::ALL.iter() {
                state.homes[suit as usize].push(Card::new(suit, rank));
            }
        }
        assert!(state.is_solved());
        assert_eq!(state.cards_in_home(), 52);
    }
}
