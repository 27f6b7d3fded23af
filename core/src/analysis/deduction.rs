use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::Observation;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Possibility {
    pub card: Card,
    /// Unresolved copies not already pinned to another slot.
    pub copies: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDeduction {
    pub position: Position,
    pub possible: Vec<Possibility>,
    pub known: Option<Card>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contradiction {
    /// Hints and the outstanding pool leave the slot no identity.
    NoIdentityLeft { position: Position },
    /// More slots are pinned to `card` than copies remain.
    OverPinned { card: Card, slots: usize, copies: u8 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionStats {
    pub slot_count: usize,
    pub known_count: usize,
    pub possibility_count: usize,
    pub passes: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub slots: Vec<SlotDeduction>,
    pub contradictions: Vec<Contradiction>,
    pub stats: DeductionStats,
}

/// Every identity each slot can still have.
///
/// Starts from the hint constraints intersected with the outstanding pool,
/// then repeatedly removes identities whose remaining copies are all pinned
/// to slots that can only be that card.
pub fn deduce(obs: &Observation) -> Deduction {
    let mut possible: Vec<Vec<Card>> = obs
        .slots
        .iter()
        .map(|slot| {
            Card::all()
                .filter(|card| {
                    slot.colors.has(card.color())
                        && slot.numbers.has(card.number())
                        && obs.pool.contains(*card)
                })
                .collect()
        })
        .collect();

    let mut passes = 0;
    let pinned = loop {
        passes += 1;
        let pinned = pinned_counts(&possible);

        let mut changed = false;
        for (&card, &count) in &pinned {
            if count < usize::from(obs.pool.count(card)) {
                continue;
            }
            for cards in possible.iter_mut().filter(|cards| cards.len() > 1) {
                let before = cards.len();
                cards.retain(|&candidate| candidate != card);
                changed |= cards.len() != before;
            }
        }

        if !changed {
            break pinned;
        }
        log::trace!("deduction pass {} narrowed candidates", passes);
    };

    let mut contradictions = Vec::new();
    for (position, cards) in possible.iter().enumerate() {
        if cards.is_empty() {
            contradictions.push(Contradiction::NoIdentityLeft { position });
        }
    }
    for (&card, &slots) in &pinned {
        let copies = obs.pool.count(card);
        if slots > usize::from(copies) {
            contradictions.push(Contradiction::OverPinned {
                card,
                slots,
                copies,
            });
        }
    }

    let slots: Vec<SlotDeduction> = possible
        .into_iter()
        .enumerate()
        .map(|(position, cards)| {
            let known = match cards.as_slice() {
                [card] => Some(*card),
                _ => None,
            };
            let possible = cards
                .iter()
                .map(|&card| {
                    let mut elsewhere = pinned.get(&card).copied().unwrap_or(0);
                    if known == Some(card) {
                        elsewhere -= 1;
                    }
                    let elsewhere = u8::try_from(elsewhere).unwrap_or(u8::MAX);
                    Possibility {
                        card,
                        copies: obs.pool.count(card).saturating_sub(elsewhere),
                    }
                })
                .collect();
            SlotDeduction {
                position,
                possible,
                known,
            }
        })
        .collect();

    let stats = DeductionStats {
        slot_count: slots.len(),
        known_count: slots.iter().filter(|slot| slot.known.is_some()).count(),
        possibility_count: slots.iter().map(|slot| slot.possible.len()).sum(),
        passes,
    };

    Deduction {
        slots,
        contradictions,
        stats,
    }
}

fn pinned_counts(possible: &[Vec<Card>]) -> BTreeMap<Card, usize> {
    let mut pinned = BTreeMap::new();
    for cards in possible {
        if let [card] = cards.as_slice() {
            *pinned.entry(*card).or_insert(0) += 1;
        }
    }
    pinned
}
