use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Card number, always within `1..=MAX_NUMBER` once validated.
pub type Number = u8;

/// Index of a player in turn order.
pub type PlayerIndex = usize;

/// Zero-based slot index inside a hand.
pub type Position = usize;

/// Round counter; the first round is 1, the initial deal happens in round 0.
pub type Round = u16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Blue,
    Green,
    Red,
    White,
    Yellow,
}

impl Color {
    pub const ALL: [Color; COLOR_COUNT] = [
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::White,
        Color::Yellow,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Red => "Red",
            Color::White => "White",
            Color::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const fn is_valid_number(number: Number) -> bool {
    number >= MIN_NUMBER && number <= MAX_NUMBER
}

/// A card of publicly known identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    color: Color,
    number: Number,
}

impl Card {
    pub fn new(color: Color, number: Number) -> Result<Self> {
        if is_valid_number(number) {
            Ok(Self { color, number })
        } else {
            Err(GameError::InvalidNumber { number })
        }
    }

    pub(crate) const fn new_unchecked(color: Color, number: Number) -> Self {
        Self { color, number }
    }

    pub const fn color(self) -> Color {
        self.color
    }

    pub const fn number(self) -> Number {
        self.number
    }

    /// Copies of this identity in a full deck.
    pub const fn frequency(self) -> u8 {
        frequency(self.number)
    }

    /// Every distinct identity, ordered by color then number.
    pub fn all() -> impl Iterator<Item = Card> {
        Color::ALL.into_iter().flat_map(|color| {
            (MIN_NUMBER..=MAX_NUMBER).map(move |number| Card::new_unchecked(color, number))
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.number)
    }
}

pub const fn frequency(number: Number) -> u8 {
    if is_valid_number(number) {
        CARD_FREQUENCIES[(number - MIN_NUMBER) as usize]
    } else {
        0
    }
}

/// The single attribute carried by a hint or a guess.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintValue {
    Color(Color),
    Number(Number),
}

impl HintValue {
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Number(number) if !is_valid_number(number) => {
                Err(GameError::InvalidNumber { number })
            }
            _ => Ok(self),
        }
    }
}

impl From<Color> for HintValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl fmt::Display for HintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => fmt::Display::fmt(color, f),
            Self::Number(number) => fmt::Display::fmt(number, f),
        }
    }
}

/// When a knowledge cell was drawn or last revised, and by whose action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub round: Round,
    pub player: Option<PlayerIndex>,
}

impl Stamp {
    /// Stamp carried by cards of the initial deal.
    pub const DEAL: Stamp = Stamp {
        round: 0,
        player: None,
    };

    pub const fn new(round: Round, player: PlayerIndex) -> Self {
        Self {
            round,
            player: Some(player),
        }
    }
}
