use core::ops::Index;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// How a player renumbers their hand after a card leaves it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// The new card takes the vacated position.
    InPlace,
    /// Later cards shift down one position, the new card goes last.
    LeftShift,
    /// Earlier cards shift up one position, the new card goes first.
    RightShift,
}

impl Default for Protocol {
    fn default() -> Self {
        Self::InPlace
    }
}

/// Knowledge about a player's cards, position by position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cells: SmallVec<[KnowledgeCell; MAX_HAND_SIZE]>,
}

impl Hand {
    pub fn dealt(size: usize) -> Self {
        Self {
            cells: (0..size).map(|_| KnowledgeCell::dealt()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KnowledgeCell> {
        self.cells.iter()
    }

    pub fn get(&self, position: Position) -> Result<&KnowledgeCell> {
        self.cells.get(position).ok_or(GameError::IndexOutOfRange {
            index: position,
            len: self.len(),
        })
    }

    pub fn check_position(&self, position: Position) -> Result<Position> {
        self.get(position).map(|_| position)
    }

    /// Revises every cell for a hint naming `positions`: those cells learn
    /// they match `value`, all others learn they do not.
    pub fn apply_hint(&self, positions: &[Position], value: HintValue, stamp: Stamp) -> Result<Self> {
        for &position in positions {
            self.check_position(position)?;
        }

        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(position, cell)| {
                cell.apply_hint(value, positions.contains(&position), stamp)
                    .map_err(|conflict| GameError::InconsistentClaim { position, conflict })
            })
            .collect::<Result<_>>()?;

        Ok(Self { cells })
    }

    pub fn apply_guess(&self, position: Position, value: HintValue, stamp: Stamp) -> Result<Self> {
        let cell = self
            .get(position)?
            .set_guess(value, stamp)
            .map_err(|conflict| GameError::InconsistentClaim { position, conflict })?;

        let mut next = self.clone();
        next.cells[position] = cell;
        Ok(next)
    }

    pub fn swap(&self, first: Position, second: Position) -> Result<Self> {
        self.check_position(first)?;
        self.check_position(second)?;
        if first == second {
            return Err(RuleViolation::NothingToSwap.into());
        }

        let mut next = self.clone();
        next.cells.swap(first, second);
        Ok(next)
    }

    /// Removes the cell at `position` and, when a card was drawn, inserts a
    /// fresh cell where `protocol` puts it. Without a draw the hand shrinks.
    pub fn replace_slot(
        &self,
        position: Position,
        protocol: Protocol,
        drawn: Option<Stamp>,
    ) -> Result<Self> {
        self.check_position(position)?;

        let mut next = self.clone();
        let Some(stamp) = drawn else {
            next.cells.remove(position);
            return Ok(next);
        };

        let fresh = KnowledgeCell::drawn(stamp);
        match protocol {
            Protocol::InPlace => next.cells[position] = fresh,
            Protocol::LeftShift => {
                next.cells.remove(position);
                next.cells.push(fresh);
            }
            Protocol::RightShift => {
                next.cells.remove(position);
                next.cells.insert(0, fresh);
            }
        }
        Ok(next)
    }
}

impl Index<Position> for Hand {
    type Output = KnowledgeCell;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[position]
    }
}
