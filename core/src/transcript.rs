use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub actor: PlayerIndex,
    pub action: Action,
}

/// A recorded session: the setup and every action in the order it was
/// accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub config: GameConfig,
    pub steps: Vec<Step>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("cannot start game: {0}")]
    Setup(GameError),
    #[error("step {step}: {source}")]
    Step { step: usize, source: GameError },
}

impl Transcript {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, actor: PlayerIndex, action: Action) {
        self.steps.push(Step { actor, action });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Plays every step from a fresh game and returns the final state.
    pub fn replay(&self) -> core::result::Result<GameState, ReplayError> {
        let mut state = GameState::new(&self.config).map_err(ReplayError::Setup)?;
        for (step, Step { actor, action }) in self.steps.iter().enumerate() {
            state = match state.apply(*actor, action) {
                Ok(applied) => applied.state,
                Err(source) => {
                    log::warn!("replay aborted at step {}: {}", step, source);
                    return Err(ReplayError::Step { step, source });
                }
            };
        }
        Ok(state)
    }
}
