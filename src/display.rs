//! Human-readable rendering of FreeCell boards.
//!
//! This module renders a `GameState` as multi-line text using the compact
//! `Card` representation, giving a stable, readable CLI view that is
//! useful for debugging and for logging winning lines of play.

use crate::card::{Card, Rank, Suit};
use crate::state::{GameState, TABLEAU_PILES};

/// Render only the home row.
///
/// Homes are shown in suit order (Clubs, Diamonds, Hearts, Spades) as
/// the top card of each pile:
///   - Empty home: `[  ]`
///   - Non-empty: e.g. `[AC]`, `[7D]`, `[KS]`
pub fn render_homes(state: &GameState) -> String {
    let mut s = String::new();
    s.push_str("Homes: ");
    for suit in Suit::ALL {
        match state.home_top_rank(suit) {
            0 => s.push_str("[  ] "),
            n => {
                let card = Card::new(suit, Rank::from_u8(n - 1));
                s.push('[');
                s.push_str(&card.short_str());
                s.push_str("] ");
            }
        }
    }
    s.trim_end().to_string()
}

/// Render the free-cell row, labelling the cells `a` through `d`.
///
/// Example: `Cells: a:[JH] b:[  ] c:[  ] d:[4S]`
pub fn render_free_cells(state: &GameState) -> String {
    let mut s = String::new();
    s.push_str("Cells: ");
    for (i, cell) in state.free_cells.iter().enumerate() {
        let label = (b'a' + i as u8) as char;
        match cell {
            Some(card) => s.push_str(&format!("{}:[{}] ", label, card.short_str())),
            None => s.push_str(&format!("{label}:[  ] ")),
        }
    }
    s.trim_end().to_string()
}

/// Render all tableau piles as a multi-line string.
///
/// Piles are arranged in 8 vertical stacks, each cell three characters
/// wide. The piles are **bottom-justified**: the bottom cards of all
/// piles share the last row, and the top card of each pile is the
/// highest printed entry in its column (the card you would pick up).
pub fn render_piles(state: &GameState) -> String {
    let mut s = String::new();

    s.push_str("Piles:\n");
    s.push_str("      ");
    for pile_idx in 0..TABLEAU_PILES {
        s.push_str(&format!(" P{} ", pile_idx + 1));
    }
    s.push('\n');

    let max_height: usize = state.tableau.iter().map(|p| p.len()).max().unwrap_or(0);
    if max_height == 0 {
        return s;
    }

    // Row 0 is the top of the tallest pile; shorter piles are blank
    // until their own top comes into range.
    for row in 0..max_height {
        s.push_str("      ");
        for pile in &state.tableau {
            let h = pile.len();
            if row < max_height - h {
                s.push_str("    ");
            } else {
                let idx = h - 1 - (row - (max_height - h));
                s.push_str(&format!("{:>3} ", pile[idx].short_str()));
            }
        }
        s.push('\n');
    }

    s
}

/// Render a full board (homes, free cells, and piles) as a multi-line
/// string.
pub fn render_board(state: &GameState) -> String {
    let mut s = String::new();
    s.push_str(&render_homes(state));
    s.push('\n');
    s.push_str(&render_free_cells(state));
    s.push('\n');
    s.push('\n');
    s.push_str(&render_piles(state));
    s
}

/// Print a board to stdout using `render_board`.
pub fn print_board(state: &GameState) {
    println!("{}", render_board(state));
}
