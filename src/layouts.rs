//! Fixed board layouts with known properties, used by tests and demos.

use crate::card::{Card, Rank, Suit};
use crate::state::GameState;

/// A nearly finished game: every home is built Ace through 10, the four
/// Queens sit under the wrong-color Kings, and the Jacks fill the free
/// cells. Two King moves onto empty piles unblock everything.
pub fn ten_built() -> GameState {
    let mut state = GameState::empty();
    for suit in Suit::ALL {
        state.homes[suit as usize] = Rank::ALL[..10]
            .iter()
            .map(|&rank| Card::new(suit, rank))
            .collect();
    }
    let pairs = [
        (Suit::Clubs, Suit::Diamonds),
        (Suit::Diamonds, Suit::Clubs),
        (Suit::Hearts, Suit::Spades),
        (Suit::Spades, Suit::Hearts),
    ];
    for (pile, (queen_suit, king_suit)) in pairs.into_iter().enumerate() {
        state.tableau[pile] = vec![
            Card::new(queen_suit, Rank::Queen),
            Card::new(king_suit, Rank::King),
        ];
    }
    for (cell, suit) in Suit::ALL.into_iter().enumerate() {
        state.free_cells[cell] = Some(Card::new(suit, Rank::Jack));
    }
    state
}

/// A dead position: all four free cells hold Kings, every tableau top
/// is a 9 or a 5 with nothing one rank below it exposed, and the homes
/// are empty. No move is legal, so a search terminates exhausted after
/// expanding the root.
pub fn no_move() -> GameState {
    let mut state = GameState::empty();
    for (cell, suit) in Suit::ALL.into_iter().enumerate() {
        state.free_cells[cell] = Some(Card::new(suit, Rank::King));
    }

    // Everything that is neither a King, a 9, nor a 5 gets buried five
    // to a pile, in deck order.
    let buried: Vec<Card> = crate::card::standard_deck()
        .into_iter()
        .filter(|c| !matches!(c.rank(), Rank::King | Rank::Nine | Rank::Five))
        .collect();
    debug_assert_eq!(buried.len(), 40);
    for (pile, chunk) in buried.chunks(5).enumerate() {
        state.tableau[pile] = chunk.to_vec();
    }

    // Tops: four 9s on piles 1-4, four 5s on piles 5-8. No 9 can land
    // on another 9, no 5 on a 9 or 5, no King can leave its cell, and
    // no pile or cell is empty.
    for (pile, suit) in Suit::ALL.into_iter().enumerate() {
        state.tableau[pile].push(Card::new(suit, Rank::Nine));
    }
    for (pile, suit) in Suit::ALL.into_iter().enumerate() {
        state.tableau[pile + 4].push(Card::new(suit, Rank::Five));
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CARDS_PER_DECK;
    use crate::moves::generate_legal_moves;
    use std::collections::HashSet;

    fn distinct_card_count(state: &GameState) -> usize {
        state.flatten_cards().into_iter().collect::<HashSet<_>>().len()
    }

    #[test]
    fn ten_built_is_a_full_distinct_deck() {
        let state = ten_built();
        assert_eq!(distinct_card_count(&state), CARDS_PER_DECK as usize);
        assert_eq!(state.cards_in_home(), 40);
        assert_eq!(state.empty_tableau_count(), 4);
        assert_eq!(state.empty_free_cell_count(), 0);
    }

    #[test]
    fn no_move_is_a_full_distinct_deck_with_no_legal_move() {
        let state = no_move();
        assert_eq!(distinct_card_count(&state), CARDS_PER_DECK as usize);
        assert!(generate_legal_moves(&state).is_empty());
    }
}
