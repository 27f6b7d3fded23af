use alloc::string::String;
use alloc::vec::Vec;
use thiserror::Error;

use crate::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{0}")]
    Rule(#[from] RuleViolation),
    #[error("position {position}: {conflict}")]
    InconsistentClaim { position: Position, conflict: Conflict },
    #[error("{card} is exhausted by prior plays and discards")]
    ExhaustedCard { card: Card },
    #[error("index {index} is out of range, expected below {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no player matches {specifier:?}")]
    UnknownPlayer { specifier: String },
    #[error("{specifier:?} matches several players: {}", .matches.join(", "))]
    AmbiguousPlayer {
        specifier: String,
        matches: Vec<String>,
    },
    #[error("invalid game configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("invalid card number {number}, expected {min} to {max}", min = MIN_NUMBER, max = MAX_NUMBER)]
    InvalidNumber { number: Number },
    #[error("no earlier state to revert to")]
    NothingToUndo,
    #[error("game already ended, no new moves are accepted")]
    AlreadyEnded,
}

/// Actions that are well formed but forbidden by the rules of the game.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("one cannot give a hint to oneself")]
    SelfHint,
    #[error("cannot give a hint while no hints remain")]
    NoHintsRemaining,
    #[error("cannot discard while hints are at maximum")]
    DiscardAtMaxHints,
    #[error("it is player {player_up}'s turn")]
    NotYourTurn { player_up: PlayerIndex },
    #[error("a hint must name at least one position")]
    EmptyHint,
    #[error("position {0} was given more than once")]
    DuplicatePosition(Position),
    #[error("identical positions given, no swap to make")]
    NothingToSwap,
}

/// Contradictions between a knowledge cell and a new piece of information.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Conflict {
    #[error("color {0} was previously ruled out for a hinted card")]
    ColorRuledOut(Color),
    #[error("color {0} was the only possible color for a non-hinted card")]
    LastColor(Color),
    #[error("number {0} was previously ruled out for a hinted card")]
    NumberRuledOut(Number),
    #[error("number {0} was the only possible number for a non-hinted card")]
    LastNumber(Number),
    #[error("bad guess, color {0} was previously ruled out")]
    BadColorGuess(Color),
    #[error("bad guess, number {0} was previously ruled out")]
    BadNumberGuess(Number),
    #[error("{0} is not possible given prior hints")]
    ClaimRuledOut(Card),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} players given, {min} to {max} allowed", min = MIN_PLAYERS, max = MAX_PLAYERS)]
    PlayerCount(usize),
    #[error("player {0} has an empty name")]
    EmptyName(PlayerIndex),
    #[error("player {0} has the same name as an earlier player")]
    DuplicateName(PlayerIndex),
}

pub type Result<T> = core::result::Result<T, GameError>;
