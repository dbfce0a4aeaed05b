//! Card, Suit, and Rank types for a standard 52-card deck.
//!
//! - `Card` is a compact 1-byte representation (0..=51).
//! - `Suit` and `Rank` give human-readable structure on top of that.

use core::fmt;

/// Number of suits in a standard deck.
pub const NUM_SUITS: u8 = 4;
/// Number of ranks in a standard deck.
pub const NUM_RANKS: u8 = 13;
/// Number of cards in a standard deck.
pub const CARDS_PER_DECK: u8 = NUM_SUITS * NUM_RANKS;

/// A playing card represented compactly as an index in 0..=51.
///
/// The mapping is:
/// ```text
/// index = suit as u8 * 13 + rank as u8
/// ```
/// where `rank` is 0=Ace, 1=Two, ..., 12=King.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Card(pub u8);

/// The four suits in a standard deck.
///
/// The ordering matches the board-file grammar, which lists home piles
/// in Clubs, Diamonds, Hearts, Spades order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

/// The thirteen ranks in a standard deck.
///
/// Note: Ace is treated as the lowest rank here (0), and you can use
/// `rank_number()` on `Card` to get 1..=13 as a convenience.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King, // 12
}

impl Card {
    /// Create a new card from a suit and rank.
    ///
    /// This uses the mapping:
    /// ```text
    /// index = suit as u8 * 13 + rank as u8
    /// ```
    #[inline]
    pub fn new(suit: Suit, rank: Rank) -> Self {
        let s = suit as u8;
        let r = rank as u8;
        debug_assert!(s < NUM_SUITS && r < NUM_RANKS);
        Card(s * NUM_RANKS + r)
    }

    /// Create a card from a raw index in 0..=51.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `index >= 52`.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < CARDS_PER_DECK);
        Card(index)
    }

    /// Return the raw 0..=51 index of this card.
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Return the suit of this card.
    #[inline]
    pub fn suit(self) -> Suit {
        Suit::from_u8(self.0 / NUM_RANKS)
    }

    /// Return the rank of this card.
    #[inline]
    pub fn rank(self) -> Rank {
        Rank::from_u8(self.0 % NUM_RANKS)
    }

    /// Rank number in 1..=13 (Ace=1, King=13).
    #[inline]
    pub fn rank_number(self) -> u8 {
        self.rank() as u8 + 1
    }

    /// True for hearts and diamonds.
    #[inline]
    pub fn is_red(self) -> bool {
        self.suit().is_red()
    }

    /// Short string like "AH", "7C", "TD", "KS".
    pub fn short_str(self) -> String {
        let r = match self.rank() {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };
        let s = self.suit().short_char();
        format!("{r}{s}")
    }

    /// Long name like "Ace of Spades" or "10 of Hearts".
    ///
    /// This is the token format of the board-file grammar; see
    /// `crate::board` for parsing.
    pub fn name(self) -> String {
        format!("{} of {}", self.rank().name(), self.suit().name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_str())
    }
}

impl Suit {
    /// All suits in a fixed, reproducible order.
    pub const ALL: [Suit; NUM_SUITS as usize] = [
        Suit::Clubs,
        Suit::Diamonds,
        Suit::Hearts,
        Suit::Spades,
    ];

    /// Construct a suit from a small integer 0..=3.
    ///
    /// # Panics
    ///
    /// Panics if `v >= 4`.
    #[inline]
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            3 => Suit::Spades,
            _ => panic!("invalid suit: {v}"),
        }
    }

    /// True for hearts and diamonds.
    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    /// Single-character representation: 'C', 'D', 'H', or 'S'.
    #[inline]
    pub fn short_char(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    /// Full English name, as used in board files.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

impl Rank {
    /// All ranks in a fixed, reproducible order (Ace..King).
    pub const ALL: [Rank; NUM_RANKS as usize] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Construct a rank from a small integer 0..=12.
    ///
    /// # Panics
    ///
    /// Panics if `v >= 13`.
    #[inline]
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Rank::Ace,
            1 => Rank::Two,
            2 => Rank::Three,
            3 => Rank::Four,
            4 => Rank::Five,
            5 => Rank::Six,
            6 => Rank::Seven,
            7 => Rank::Eight,
            8 => Rank::Nine,
            9 => Rank::Ten,
            10 => Rank::Jack,
            11 => Rank::Queen,
            12 => Rank::King,
            _ => panic!("invalid rank: {v}"),
        }
    }

    /// Rank number in 1..=13 (Ace=1, King=13).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Board-file name: "Ace", "2".."10", "Jack", "Queen", "King".
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

/// Helper for tableau rules: can `upper` be placed on `lower`?
///
/// In FreeCell, this is true if:
/// - `upper` is exactly one rank lower than `lower`, and
/// - `upper` is opposite color from `lower`.
#[inline]
pub fn is_one_lower_opposite_color(upper: Card, lower: Card) -> bool {
    upper.rank_number() + 1 == lower.rank_number()
        && upper.is_red() != lower.is_red()
}

/// Generate a standard 52-card deck in a fixed order.
///
/// Suits follow `Suit::ALL` order, and ranks follow `Rank::ALL` order.
pub fn standard_deck() -> [Card; CARDS_PER_DECK as usize] {
    let mut cards = [Card(0); CARDS_PER_DECK as usize];
    let mut i = 0usize;
    for &suit in Suit::ALL.iter() {
        for &rank in Rank::ALL.iter() {
            cards[i] = Card::new(suit, rank);
            i += 1;
        }
    }
    cards
}
