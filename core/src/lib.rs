#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use action::*;
pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use hand::*;
pub use knowledge::*;
pub use ledger::*;
pub use piles::*;
pub use transcript::*;
pub use types::*;
pub use validate::*;

mod action;
mod analysis;
mod engine;
mod error;
mod hand;
mod knowledge;
mod ledger;
mod piles;
mod transcript;
mod types;
mod validate;

pub const COLOR_COUNT: usize = 5;
pub const NUMBER_COUNT: usize = 5;
pub const MIN_NUMBER: Number = 1;
pub const MAX_NUMBER: Number = 5;
/// Copies of each number 1 to 5 in every color.
pub const CARD_FREQUENCIES: [u8; NUMBER_COUNT] = [3, 2, 2, 2, 1];
pub const DECK_SIZE: usize = 50;

pub const MAX_HINTS: u8 = 8;
/// Misfires a team survives; one more loses the game.
pub const MAX_MISFIRES: u8 = 2;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
pub const MAX_HAND_SIZE: usize = 5;

/// Cards dealt to each player at a table of `players`.
pub const fn hand_size(players: usize) -> usize {
    if players <= 3 { 5 } else { 4 }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub protocol: Protocol,
}

impl PlayerSetup {
    pub fn new(name: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            name: name.into(),
            protocol,
        }
    }
}

/// Seating and hand organization chosen before the first turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: Vec<PlayerSetup>,
}

impl GameConfig {
    pub fn new(players: Vec<PlayerSetup>) -> Result<Self> {
        let config = Self { players };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ConfigError::PlayerCount(count).into());
        }
        for (index, player) in self.players.iter().enumerate() {
            let name = player.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName(index).into());
            }
            let taken = self.players[..index]
                .iter()
                .any(|earlier| earlier.name.trim().to_lowercase() == name.to_lowercase());
            if taken {
                return Err(ConfigError::DuplicateName(index).into());
            }
        }
        Ok(())
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn hand_size(&self) -> usize {
        hand_size(self.player_count())
    }

    /// Cards left to draw after the deal.
    pub fn initial_deck_size(&self) -> usize {
        DECK_SIZE - self.player_count() * self.hand_size()
    }
}
