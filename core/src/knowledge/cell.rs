use alloc::sync::Arc;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Belief state of one unrevealed card.
///
/// Cells are values: every revision returns a new cell whose history links
/// back to the revision it replaced. The link is shared, so cloning a cell
/// never copies its history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeCell {
    colors: ColorSet,
    numbers: NumberSet,
    color_guess: Option<Color>,
    number_guess: Option<Number>,
    drawn: Stamp,
    updated: Stamp,
    previous: Option<Arc<KnowledgeCell>>,
}

impl KnowledgeCell {
    /// An unconstrained cell for a card drawn at `drawn`.
    pub fn drawn(drawn: Stamp) -> Self {
        Self {
            colors: ColorSet::all(),
            numbers: NumberSet::all(),
            color_guess: None,
            number_guess: None,
            drawn,
            updated: drawn,
            previous: None,
        }
    }

    pub fn dealt() -> Self {
        Self::drawn(Stamp::DEAL)
    }

    pub fn colors(&self) -> ColorSet {
        self.colors
    }

    pub fn numbers(&self) -> NumberSet {
        self.numbers
    }

    pub fn color_guess(&self) -> Option<Color> {
        self.color_guess
    }

    pub fn number_guess(&self) -> Option<Number> {
        self.number_guess
    }

    pub fn drawn_at(&self) -> Stamp {
        self.drawn
    }

    pub fn updated_at(&self) -> Stamp {
        self.updated
    }

    /// Whether prior hints allow the card to be `card`.
    pub fn admits(&self, card: Card) -> bool {
        self.colors.has(card.color()) && self.numbers.has(card.number())
    }

    /// The identity hints pin down, if they pin down exactly one.
    pub fn known(&self) -> Option<Card> {
        let color = self.colors.only()?;
        let number = self.numbers.only()?;
        Some(Card::new_unchecked(color, number))
    }

    pub fn apply_color_hint(
        &self,
        color: Color,
        positive: bool,
        stamp: Stamp,
    ) -> core::result::Result<Self, Conflict> {
        let colors = if positive {
            if !self.colors.has(color) {
                return Err(Conflict::ColorRuledOut(color));
            }
            ColorSet::of(color)
        } else {
            let colors = self.colors.difference(ColorSet::of(color));
            if colors.is_empty() {
                return Err(Conflict::LastColor(color));
            }
            colors
        };

        Ok(if colors == self.colors {
            self.clone()
        } else {
            log::trace!("colors {:?} -> {:?}", self.colors, colors);
            Self {
                colors,
                ..self.revise(stamp)
            }
        })
    }

    pub fn apply_number_hint(
        &self,
        number: Number,
        positive: bool,
        stamp: Stamp,
    ) -> core::result::Result<Self, Conflict> {
        let numbers = if positive {
            if !self.numbers.has(number) {
                return Err(Conflict::NumberRuledOut(number));
            }
            NumberSet::of(number)
        } else {
            let numbers = self.numbers.difference(NumberSet::of(number));
            if numbers.is_empty() {
                return Err(Conflict::LastNumber(number));
            }
            numbers
        };

        Ok(if numbers == self.numbers {
            self.clone()
        } else {
            log::trace!("numbers {:?} -> {:?}", self.numbers, numbers);
            Self {
                numbers,
                ..self.revise(stamp)
            }
        })
    }

    pub fn apply_hint(
        &self,
        value: HintValue,
        positive: bool,
        stamp: Stamp,
    ) -> core::result::Result<Self, Conflict> {
        match value {
            HintValue::Color(color) => self.apply_color_hint(color, positive, stamp),
            HintValue::Number(number) => self.apply_number_hint(number, positive, stamp),
        }
    }

    pub fn set_color_guess(
        &self,
        color: Color,
        stamp: Stamp,
    ) -> core::result::Result<Self, Conflict> {
        if !self.colors.has(color) {
            return Err(Conflict::BadColorGuess(color));
        }
        Ok(if self.color_guess == Some(color) {
            self.clone()
        } else {
            Self {
                color_guess: Some(color),
                ..self.revise(stamp)
            }
        })
    }

    pub fn set_number_guess(
        &self,
        number: Number,
        stamp: Stamp,
    ) -> core::result::Result<Self, Conflict> {
        if !self.numbers.has(number) {
            return Err(Conflict::BadNumberGuess(number));
        }
        Ok(if self.number_guess == Some(number) {
            self.clone()
        } else {
            Self {
                number_guess: Some(number),
                ..self.revise(stamp)
            }
        })
    }

    pub fn set_guess(&self, value: HintValue, stamp: Stamp) -> core::result::Result<Self, Conflict> {
        match value {
            HintValue::Color(color) => self.set_color_guess(color, stamp),
            HintValue::Number(number) => self.set_number_guess(number, stamp),
        }
    }

    /// Prior revisions, newest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &KnowledgeCell> {
        core::iter::successors(self.previous.as_deref(), |cell| cell.previous.as_deref())
    }

    /// Prior revisions, oldest first.
    pub fn history(&self) -> Vec<&KnowledgeCell> {
        let mut history: Vec<_> = self.ancestors().collect();
        history.reverse();
        history
    }

    /// Every revision including this one, oldest first.
    pub fn revisions(&self) -> Vec<&KnowledgeCell> {
        let mut revisions = self.history();
        revisions.push(self);
        revisions
    }

    /// Copy of `self` stamped at `stamp` whose history ends with `self`.
    fn revise(&self, stamp: Stamp) -> Self {
        Self {
            updated: stamp,
            previous: Some(Arc::new(self.clone())),
            ..self.clone()
        }
    }
}

impl Default for KnowledgeCell {
    fn default() -> Self {
        Self::dealt()
    }
}
