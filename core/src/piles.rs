use serde::{Deserialize, Serialize};

use crate::*;

type CountTable = [[u8; NUMBER_COUNT]; COLOR_COUNT];

const fn slot(card: Card) -> (usize, usize) {
    (card.color().index(), (card.number() - MIN_NUMBER) as usize)
}

/// Highest number successfully played per color, 0 when the stack is empty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCards {
    stacks: [Number; COLOR_COUNT],
}

impl PlayedCards {
    pub const fn top(&self, color: Color) -> Number {
        self.stacks[color.index()]
    }

    /// Whether `card` is exactly the next number on its color's stack.
    pub const fn accepts(&self, card: Card) -> bool {
        self.top(card.color()) + 1 == card.number()
    }

    pub fn with_played(&self, card: Card) -> Option<Self> {
        if !self.accepts(card) {
            return None;
        }
        let mut next = *self;
        next.stacks[card.color().index()] = card.number();
        Some(next)
    }

    pub fn total(&self) -> u32 {
        self.stacks.iter().map(|&n| u32::from(n)).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.stacks.iter().all(|&n| n == MAX_NUMBER)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, Number)> + '_ {
        Color::ALL.into_iter().map(move |color| (color, self.top(color)))
    }
}

/// Discarded cards, kept per color in ascending order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedCards {
    counts: CountTable,
}

impl DiscardedCards {
    pub fn with_discarded(&self, card: Card) -> Self {
        let (c, n) = slot(card);
        let mut next = *self;
        next.counts[c][n] += 1;
        next
    }

    pub const fn count(&self, card: Card) -> u8 {
        let (c, n) = slot(card);
        self.counts[c][n]
    }

    /// Ascending numbers in the discard pile of `color`.
    pub fn pile(&self, color: Color) -> impl Iterator<Item = Number> + '_ {
        let row = &self.counts[color.index()];
        (MIN_NUMBER..=MAX_NUMBER).flat_map(move |number| {
            core::iter::repeat_n(number, row[(number - MIN_NUMBER) as usize].into())
        })
    }

    pub fn len(&self) -> usize {
        self.counts.iter().flatten().map(|&n| usize::from(n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every card not yet publicly resolved by a play or discard, including
/// cards sitting unrevealed in hands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingCards {
    counts: CountTable,
}

impl OutstandingCards {
    pub fn full() -> Self {
        let mut counts = [[0; NUMBER_COUNT]; COLOR_COUNT];
        for row in &mut counts {
            for (n, count) in row.iter_mut().enumerate() {
                *count = CARD_FREQUENCIES[n];
            }
        }
        Self { counts }
    }

    pub fn without(&self, card: Card) -> Result<Self> {
        let (c, n) = slot(card);
        let mut next = *self;
        match next.counts[c][n].checked_sub(1) {
            Some(left) => next.counts[c][n] = left,
            None => return Err(GameError::ExhaustedCard { card }),
        }
        Ok(next)
    }

    pub const fn count(&self, card: Card) -> u8 {
        let (c, n) = slot(card);
        self.counts[c][n]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.count(card) > 0
    }

    pub fn len(&self) -> usize {
        self.counts.iter().flatten().map(|&n| usize::from(n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Outstanding cards with multiplicity, ordered by color then number.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        Card::all().flat_map(move |card| core::iter::repeat_n(card, self.count(card).into()))
    }
}

impl Default for OutstandingCards {
    fn default() -> Self {
        Self::full()
    }
}
