use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

bitflags! {
    /// Colors a card may still have.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ColorSet: u8 {
        const BLUE = 1 << 0;
        const GREEN = 1 << 1;
        const RED = 1 << 2;
        const WHITE = 1 << 3;
        const YELLOW = 1 << 4;
    }
}

impl ColorSet {
    pub const fn of(color: Color) -> Self {
        Self::from_bits_retain(1 << color.index())
    }

    pub const fn has(self, color: Color) -> bool {
        self.contains(Self::of(color))
    }

    /// Remaining colors in `Color::ALL` order.
    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |&color| self.has(color))
    }

    pub fn only(self) -> Option<Color> {
        let mut colors = self.colors();
        match (colors.next(), colors.next()) {
            (Some(color), None) => Some(color),
            _ => None,
        }
    }

    pub const fn len(self) -> u32 {
        self.bits().count_ones()
    }
}

bitflags! {
    /// Numbers a card may still have.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct NumberSet: u8 {
        const ONE = 1 << 0;
        const TWO = 1 << 1;
        const THREE = 1 << 2;
        const FOUR = 1 << 3;
        const FIVE = 1 << 4;
    }
}

impl NumberSet {
    /// Empty for numbers outside the deck.
    pub const fn of(number: Number) -> Self {
        match number {
            1 => Self::ONE,
            2 => Self::TWO,
            3 => Self::THREE,
            4 => Self::FOUR,
            5 => Self::FIVE,
            _ => Self::empty(),
        }
    }

    pub const fn has(self, number: Number) -> bool {
        let flag = Self::of(number);
        !flag.is_empty() && self.contains(flag)
    }

    /// Remaining numbers in ascending order.
    pub fn numbers(self) -> impl Iterator<Item = Number> {
        (MIN_NUMBER..=MAX_NUMBER).filter(move |&number| self.has(number))
    }

    pub fn only(self) -> Option<Number> {
        let mut numbers = self.numbers();
        match (numbers.next(), numbers.next()) {
            (Some(number), None) => Some(number),
            _ => None,
        }
    }

    pub const fn len(self) -> u32 {
        self.bits().count_ones()
    }
}
