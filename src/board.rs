//! Text board loader and saver.
//!
//! A board file is line oriented. Blank lines and lines starting with
//! `#` are ignored. The first 8 payload lines are the tableau piles,
//! each a comma-separated list of `"<Rank> of <Suit>"` tokens in
//! bottom-to-top order, or the literal `empty`. The next line lists the
//! four free cells the same way, and the final four lines are the home
//! piles in suit order (Clubs, Diamonds, Hearts, Spades).
//!
//! `load_board` is strict: the first bad token aborts the load, and the
//! finished state must hold exactly 52 distinct cards with well-formed
//! homes. `load_board_lenient` skips bad tokens, reporting them as
//! warnings, and drops only the full-deck count check so partial boards
//! can still be inspected.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::card::{Card, Rank, Suit, CARDS_PER_DECK};
use crate::state::{GameState, FREE_CELLS, TABLEAU_PILES};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("io error reading board: {0}")]
    Io(#[from] std::io::Error),
    #[error("unrecognized card token {token:?} on line {line}")]
    BadCardToken { token: String, line: usize },
    #[error("invalid board: {0}")]
    Invalid(String),
}

/// A skipped token from a lenient load, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub token: String,
    pub line: usize,
}

/// Parses a single `"<Rank> of <Suit>"` token, e.g. `"10 of Hearts"`.
pub fn parse_card(token: &str) -> Option<Card> {
    let (rank_name, suit_name) = token.trim().split_once(" of ")?;
    let rank = Rank::ALL
        .into_iter()
        .find(|r| r.name() == rank_name.trim())?;
    let suit = Suit::ALL
        .into_iter()
        .find(|s| s.name() == suit_name.trim())?;
    Some(Card::new(suit, rank))
}

/// Loads a board file, aborting on the first bad token.
pub fn load_board(path: &Path) -> Result<GameState, BoardError> {
    let text = fs::read_to_string(path)?;
    parse_board(&text)
}

/// Strict parse of board-file text. See [`load_board`].
pub fn parse_board(text: &str) -> Result<GameState, BoardError> {
    let (state, warnings) = parse_board_inner(text)?;
    if let Some(w) = warnings.into_iter().next() {
        return Err(BoardError::BadCardToken {
            token: w.token,
            line: w.line,
        });
    }
    validate(&state, true)?;
    Ok(state)
}

/// Loads a board file, skipping bad tokens and returning them as
/// warnings alongside the state. The 52-card count check is skipped;
/// home ordering and duplicate detection still apply.
pub fn load_board_lenient(path: &Path) -> Result<(GameState, Vec<ParseWarning>), BoardError> {
    let text = fs::read_to_string(path)?;
    let (state, warnings) = parse_board_inner(&text)?;
    validate(&state, false)?;
    Ok((state, warnings))
}

fn parse_board_inner(text: &str) -> Result<(GameState, Vec<ParseWarning>), BoardError> {
    let mut payload = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let mut state = GameState::empty();
    let mut warnings = Vec::new();

    let mut next_line = |what: &str| {
        payload
            .next()
            .ok_or_else(|| BoardError::Invalid(format!("missing {what} line")))
    };

    for pile in 0..TABLEAU_PILES {
        let (lineno, line) = next_line(&format!("tableau pile {}", pile + 1))?;
        state.tableau[pile] = parse_card_list(line, lineno, &mut warnings);
    }

    let (lineno, line) = next_line("free cell")?;
    let cells = parse_cell_list(line, lineno, &mut warnings);
    if cells.len() != FREE_CELLS {
        return Err(BoardError::Invalid(format!(
            "free cell line {} lists {} entries, expected {}",
            lineno,
            cells.len(),
            FREE_CELLS
        )));
    }
    state.free_cells.copy_from_slice(&cells);

    for suit in Suit::ALL {
        let (lineno, line) = next_line(&format!("{} home", suit.name()))?;
        state.homes[suit as usize] = parse_card_list(line, lineno, &mut warnings);
    }

    if let Some((lineno, _)) = payload.next() {
        return Err(BoardError::Invalid(format!(
            "unexpected trailing content on line {lineno}"
        )));
    }
    Ok((state, warnings))
}

/// A comma-separated card list, or the literal `empty`.
fn parse_card_list(line: &str, lineno: usize, warnings: &mut Vec<ParseWarning>) -> Vec<Card> {
    if line.eq_ignore_ascii_case("empty") {
        return Vec::new();
    }
    let mut cards = Vec::new();
    for token in line.split(',') {
        match parse_card(token) {
            Some(card) => cards.push(card),
            None => warnings.push(ParseWarning {
                token: token.trim().to_owned(),
                line: lineno,
            }),
        }
    }
    cards
}

/// The free-cell line, where each entry may individually be `empty`.
fn parse_cell_list(
    line: &str,
    lineno: usize,
    warnings: &mut Vec<ParseWarning>,
) -> Vec<Option<Card>> {
    line.split(',')
        .filter_map(|token| {
            let token = token.trim();
            if token.eq_ignore_ascii_case("empty") {
                return Some(None);
            }
            match parse_card(token) {
                Some(card) => Some(Some(card)),
                None => {
                    warnings.push(ParseWarning {
                        token: token.to_owned(),
                        line: lineno,
                    });
                    Some(None)
                }
            }
        })
        .collect()
}

/// Structural checks on a loaded state. Duplicate cards and malformed
/// homes are always errors; the exact-52 count applies only to strict
/// loads.
fn validate(state: &GameState, require_full_deck: bool) -> Result<(), BoardError> {
    let cards = state.flatten_cards();
    let mut seen = HashSet::with_capacity(cards.len());
    for card in &cards {
        if !seen.insert(*card) {
            return Err(BoardError::Invalid(format!("duplicate card {}", card.name())));
        }
    }
    if require_full_deck && cards.len() != CARDS_PER_DECK as usize {
        return Err(BoardError::Invalid(format!(
            "{} cards present, expected {}",
            cards.len(),
            CARDS_PER_DECK
        )));
    }
    for suit in Suit::ALL {
        let home = &state.homes[suit as usize];
        for (i, card) in home.iter().enumerate() {
            if card.suit() != suit || card.rank() as usize != i {
                return Err(BoardError::Invalid(format!(
                    "{} home holds {} at position {}",
                    suit.name(),
                    card.name(),
                    i + 1
                )));
            }
        }
    }
    Ok(())
}

/// Writes `state` to `path` in the board-file grammar.
pub fn save_board(state: &GameState, path: &Path) -> Result<(), BoardError> {
    fs::write(path, format_board(state))?;
    Ok(())
}

/// Renders `state` as board-file text. `parse_board` round-trips it.
pub fn format_board(state: &GameState) -> String {
    let mut out = String::new();
    out.push_str("# Tableau piles, bottom to top\n");
    for pile in &state.tableau {
        out.push_str(&card_list(pile));
        out.push('\n');
    }
    out.push_str("# Free cells\n");
    let cells: Vec<String> = state
        .free_cells
        .iter()
        .map(|cell| match cell {
            Some(card) => card.name(),
            None => "empty".to_owned(),
        })
        .collect();
    out.push_str(&cells.join(", "));
    out.push('\n');
    out.push_str("# Homes: Clubs, Diamonds, Hearts, Spades\n");
    for home in &state.homes {
        out.push_str(&card_list(home));
        out.push('\n');
    }
    out
}

fn card_list(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "empty".to_owned();
    }
    let names: Vec<String> = cards.iter().map(|c| c.name()).collect();
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit::*;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn parses_card_tokens() {
        assert_eq!(parse_card("Ace of Spades"), Some(card(Spades, Rank::Ace)));
        assert_eq!(parse_card("10 of Hearts"), Some(card(Hearts, Rank::Ten)));
        assert_eq!(parse_card(" Queen of Diamonds "), Some(card(Diamonds, Rank::Queen)));
        assert_eq!(parse_card("Eleven of Hearts"), None);
        assert_eq!(parse_card("Ace of Stars"), None);
        assert_eq!(parse_card("Ace"), None);
    }

    #[test]
    fn full_deal_round_trips() {
        let state = GameState::deal_seeded(7);
        let text = format_board(&state);
        let loaded = parse_board(&text).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let state = GameState::deal_seeded(3);
        let text = format_board(&state);
        let noisy: String = text
            .lines()
            .flat_map(|line| ["# noise", "", line])
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_board(&noisy).unwrap(), state);
    }

    #[test]
    fn strict_parse_names_the_bad_token() {
        let state = GameState::deal_seeded(5);
        let text = format_board(&state).replace("Ace of Spades", "Ace of Spuds");
        match parse_board(&text) {
            Err(BoardError::BadCardToken { token, .. }) => assert_eq!(token, "Ace of Spuds"),
            other => panic!("expected BadCardToken, got {other:?}"),
        }
    }

    #[test]
    fn strict_parse_rejects_missing_cards() {
        let mut state = GameState::deal_seeded(5);
        state.tableau[0].pop();
        let err = parse_board(&format_board(&state)).unwrap_err();
        assert!(matches!(err, BoardError::Invalid(_)));
    }

    #[test]
    fn strict_parse_rejects_out_of_order_home() {
        let mut state = GameState::empty();
        state.homes[Hearts as usize] = vec![card(Hearts, Rank::Two)];
        let err = parse_board(&format_board(&state)).unwrap_err();
        assert!(matches!(err, BoardError::Invalid(_)));
    }

    #[test]
    fn lenient_parse_skips_bad_tokens() {
        use std::io::Write as _;
        let state = GameState::deal_seeded(9);
        let text = format_board(&state).replace("Ace of Spades", "Ace of Spuds");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        let (loaded, warnings) = load_board_lenient(file.path()).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].token, "Ace of Spuds");
        assert_eq!(loaded.flatten_cards().len(), CARDS_PER_DECK as usize - 1);
    }

    #[test]
    fn save_and_load_round_trip_through_a_file() {
        let state = GameState::deal_seeded(11);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.txt");
        save_board(&state, &path).unwrap();
        assert_eq!(load_board(&path).unwrap(), state);
    }
}
