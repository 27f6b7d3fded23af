use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Hand positions named by a hint.
pub type Positions = SmallVec<[Position; MAX_HAND_SIZE]>;

/// A structured player action, as produced by a command parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Play {
        position: Position,
        card: Card,
    },
    Discard {
        position: Position,
        card: Card,
    },
    Hint {
        target: PlayerIndex,
        positions: Positions,
        value: HintValue,
    },
    Guess {
        position: Position,
        value: HintValue,
    },
    Swap {
        first: Position,
        second: Position,
    },
    Undo,
}

impl Action {
    /// Whether a committed action passes the turn to the next player.
    pub const fn takes_turn(&self) -> bool {
        matches!(self, Self::Play { .. } | Self::Discard { .. } | Self::Hint { .. })
    }
}

/// What a committed action did, for display to the players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Played(Card),
    Misfired(Card),
    Discarded(Card),
    Hinted {
        target: PlayerIndex,
        value: HintValue,
        count: usize,
    },
    Guessed {
        player: PlayerIndex,
        position: Position,
        value: HintValue,
    },
    Swapped {
        player: PlayerIndex,
        first: Position,
        second: Position,
    },
    Reverted {
        round: Round,
        player_up: PlayerIndex,
    },
}

impl Status {
    /// Whether the action behind this outcome passed the turn on.
    pub const fn takes_turn(&self) -> bool {
        matches!(
            self,
            Self::Played(_) | Self::Misfired(_) | Self::Discarded(_) | Self::Hinted { .. }
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Played(card) => write!(f, "played {card}"),
            Self::Misfired(card) => write!(f, "misfired {card}"),
            Self::Discarded(card) => write!(f, "discarded {card}"),
            Self::Hinted {
                target,
                value,
                count,
            } => write!(f, "hinted player {target} about {value} on {count} card(s)"),
            Self::Guessed {
                player,
                position,
                value,
            } => write!(f, "player {player} guessed {value} at position {position}"),
            Self::Swapped {
                player,
                first,
                second,
            } => write!(f, "player {player} swapped positions {first} and {second}"),
            Self::Reverted { round, player_up } => write!(
                f,
                "reverted to prior state; round {round}, player up {player_up}"
            ),
        }
    }
}

/// A committed transition: the new state and what happened.
#[derive(Clone, Debug, PartialEq)]
pub struct Applied {
    pub state: GameState,
    pub status: Status,
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        match self.state.state() {
            EngineState::Won => write!(f, "; every stack is complete, game won"),
            EngineState::Lost => write!(f, "; too many misfires, game lost"),
            EngineState::Finished => write!(
                f,
                "; final round over, game ends with score {}",
                self.state.score()
            ),
            EngineState::InProgress if self.status.takes_turn() => {
                write!(f, "; advancing turn")
            }
            EngineState::InProgress => Ok(()),
        }
    }
}
