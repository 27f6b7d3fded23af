use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotObservation {
    pub colors: ColorSet,
    pub numbers: NumberSet,
}

/// What a player can know about their own hand: the hint constraints on
/// each slot and the cards nobody has seen resolved yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub slots: Vec<SlotObservation>,
    pub pool: OutstandingCards,
}

impl Observation {
    pub fn new(slots: Vec<SlotObservation>, pool: OutstandingCards) -> Self {
        Self { slots, pool }
    }

    pub fn of_hand(state: &GameState, player: PlayerIndex) -> Result<Self> {
        let hand = state.player(player)?.hand();
        Ok(Self {
            slots: hand
                .iter()
                .map(|cell| SlotObservation {
                    colors: cell.colors(),
                    numbers: cell.numbers(),
                })
                .collect(),
            pool: *state.outstanding(),
        })
    }
}
