use alloc::sync::Arc;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Play,
    Misfire,
    Discard,
    Hint,
}

/// A realized action. Card entries keep the knowledge the slot held right
/// before the card left the hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Play {
        card: Card,
        knowledge: KnowledgeCell,
    },
    Misfire {
        card: Card,
        knowledge: KnowledgeCell,
    },
    Discard {
        card: Card,
        knowledge: KnowledgeCell,
    },
    Hint {
        target: PlayerIndex,
        value: HintValue,
        positions: Positions,
    },
}

impl Entry {
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Play { .. } => EntryKind::Play,
            Self::Misfire { .. } => EntryKind::Misfire,
            Self::Discard { .. } => EntryKind::Discard,
            Self::Hint { .. } => EntryKind::Hint,
        }
    }

    pub const fn card(&self) -> Option<Card> {
        match self {
            Self::Play { card, .. } | Self::Misfire { card, .. } | Self::Discard { card, .. } => {
                Some(*card)
            }
            Self::Hint { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAction {
    pub round: Round,
    pub player: PlayerIndex,
    pub entry: Entry,
}

/// Orderings for reviewing the log. Sorting is stable, so entries that tie
/// keep their chronological order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOrder {
    Round,
    Player,
    /// By card identity; hints last.
    Card,
    /// By hint receiver; card entries last.
    Receiver,
    /// By how many positions a hint named; card entries first.
    PositionCount,
    /// By hinted value, numbers before colors; card entries last.
    Hint,
}

/// Append-only persistent list of realized actions.
///
/// Appending shares the existing entries with the log it was appended to,
/// so every game state can own its log without copying it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LoggedAction>", into = "Vec<LoggedAction>")]
pub struct ActionLog {
    head: Option<Arc<Node>>,
    len: usize,
}

#[derive(Debug, PartialEq, Eq)]
struct Node {
    action: LoggedAction,
    next: Option<Arc<Node>>,
}

impl ActionLog {
    pub fn with(&self, action: LoggedAction) -> Self {
        Self {
            head: Some(Arc::new(Node {
                action,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn latest(&self) -> Option<&LoggedAction> {
        self.head.as_deref().map(|node| &node.action)
    }

    /// Entries newest first.
    pub fn iter_rev(&self) -> impl Iterator<Item = &LoggedAction> {
        core::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
            .map(|node| &node.action)
    }

    /// Entries oldest first.
    pub fn to_vec(&self) -> Vec<&LoggedAction> {
        let mut entries: Vec<_> = self.iter_rev().collect();
        entries.reverse();
        entries
    }

    pub fn of_kind(&self, kind: EntryKind) -> Vec<&LoggedAction> {
        self.filtered(|action| action.entry.kind() == kind)
    }

    pub fn by_player(&self, player: PlayerIndex) -> Vec<&LoggedAction> {
        self.filtered(|action| action.player == player)
    }

    pub fn sorted_by(&self, order: LogOrder) -> Vec<&LoggedAction> {
        let mut entries = self.to_vec();
        match order {
            LogOrder::Round => {}
            LogOrder::Player => entries.sort_by_key(|action| action.player),
            LogOrder::Card => entries.sort_by_key(|action| {
                let card = action.entry.card();
                (card.is_none(), card)
            }),
            LogOrder::Receiver => entries.sort_by_key(|action| match &action.entry {
                Entry::Hint { target, .. } => (false, *target),
                _ => (true, 0),
            }),
            LogOrder::PositionCount => entries.sort_by_key(|action| match &action.entry {
                Entry::Hint { positions, .. } => positions.len(),
                _ => 0,
            }),
            LogOrder::Hint => entries.sort_by_key(|action| match &action.entry {
                Entry::Hint {
                    value: HintValue::Number(number),
                    ..
                } => (0, *number),
                Entry::Hint {
                    value: HintValue::Color(color),
                    ..
                } => (1, color.index() as u8),
                _ => (2, 0),
            }),
        }
        entries
    }

    fn filtered(&self, keep: impl Fn(&LoggedAction) -> bool) -> Vec<&LoggedAction> {
        self.to_vec().into_iter().filter(|action| keep(action)).collect()
    }
}

impl From<Vec<LoggedAction>> for ActionLog {
    fn from(actions: Vec<LoggedAction>) -> Self {
        actions
            .into_iter()
            .fold(Self::default(), |log, action| log.with(action))
    }
}

impl From<ActionLog> for Vec<LoggedAction> {
    fn from(log: ActionLog) -> Self {
        log.to_vec().into_iter().cloned().collect()
    }
}
