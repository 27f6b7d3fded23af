use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    InProgress,
    /// Every color stack reached 5.
    Won,
    /// Misfires exceeded `MAX_MISFIRES`.
    Lost,
    /// The deck ran out and every player took their final turn.
    Finished,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    protocol: Protocol,
    hand: Hand,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }
}

/// A player chosen by turn order or by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRef {
    Index(PlayerIndex),
    /// Case-insensitive name or unambiguous name prefix.
    Name(String),
}

/// Everything publicly known at one point of a game.
///
/// States are never modified once built. Every transition returns a new
/// state that links back to the one it was derived from, which is what
/// `undo` walks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    played: PlayedCards,
    discarded: DiscardedCards,
    outstanding: OutstandingCards,
    hints: u8,
    misfires: u8,
    player_up: PlayerIndex,
    round: Round,
    players: Vec<Player>,
    deck: usize,
    final_turns: Option<usize>,
    state: EngineState,
    log: ActionLog,
    #[serde(skip)]
    previous: Option<Arc<GameState>>,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let hand_size = config.hand_size();
        let players = config
            .players
            .iter()
            .map(|setup| Player {
                name: String::from(setup.name.trim()),
                protocol: setup.protocol,
                hand: Hand::dealt(hand_size),
            })
            .collect();

        Ok(Self {
            played: PlayedCards::default(),
            discarded: DiscardedCards::default(),
            outstanding: OutstandingCards::full(),
            hints: MAX_HINTS,
            misfires: 0,
            player_up: 0,
            round: 1,
            players,
            deck: config.initial_deck_size(),
            final_turns: None,
            state: EngineState::default(),
            log: ActionLog::default(),
            previous: None,
        })
    }

    pub fn played(&self) -> &PlayedCards {
        &self.played
    }

    pub fn discarded(&self) -> &DiscardedCards {
        &self.discarded
    }

    pub fn outstanding(&self) -> &OutstandingCards {
        &self.outstanding
    }

    pub fn hints(&self) -> u8 {
        self.hints
    }

    pub fn misfires(&self) -> u8 {
        self.misfires
    }

    pub fn player_up(&self) -> PlayerIndex {
        self.player_up
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: PlayerIndex) -> Result<&Player> {
        self.players.get(index).ok_or(GameError::IndexOutOfRange {
            index,
            len: self.players.len(),
        })
    }

    /// Cards not yet drawn.
    pub fn deck_size(&self) -> usize {
        self.deck
    }

    /// Turns left once the deck ran out, `None` while cards remain.
    pub fn final_turns(&self) -> Option<usize> {
        self.final_turns
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn score(&self) -> u32 {
        self.played.total()
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn previous(&self) -> Option<&GameState> {
        self.previous.as_deref()
    }

    pub fn find_player(&self, specifier: &PlayerRef) -> Result<PlayerIndex> {
        let name = match specifier {
            PlayerRef::Index(index) => return Validator::new(self).check_player(*index),
            PlayerRef::Name(name) => name.trim().to_lowercase(),
        };

        let unknown = || GameError::UnknownPlayer {
            specifier: name.clone(),
        };
        if name.is_empty() {
            return Err(unknown());
        }

        let lowered: Vec<String> = self.players.iter().map(|p| p.name.to_lowercase()).collect();
        let matching = |exact: bool| -> Vec<PlayerIndex> {
            lowered
                .iter()
                .enumerate()
                .filter(|(_, candidate)| {
                    if exact {
                        **candidate == name
                    } else {
                        candidate.starts_with(name.as_str())
                    }
                })
                .map(|(index, _)| index)
                .collect()
        };

        // an exact name wins over longer names it is a prefix of
        let exact = matching(true);
        let matches = if exact.is_empty() { matching(false) } else { exact };
        match matches.as_slice() {
            [] => Err(unknown()),
            [index] => Ok(*index),
            _ => Err(GameError::AmbiguousPlayer {
                specifier: name.clone(),
                matches: matches
                    .iter()
                    .map(|&index| self.players[index].name.clone())
                    .collect(),
            }),
        }
    }

    /// Applies `action` on behalf of `actor`.
    ///
    /// Either the whole transition commits and a new state is returned, or
    /// an error is returned and nothing else happened.
    pub fn apply(&self, actor: PlayerIndex, action: &Action) -> Result<Applied> {
        Validator::new(self).check(actor, action)?;

        let applied = match action {
            Action::Play { position, card } => self.play(actor, *position, *card)?,
            Action::Discard { position, card } => self.discard(actor, *position, *card)?,
            Action::Hint {
                target,
                positions,
                value,
            } => self.hint(actor, *target, positions, *value)?,
            Action::Guess { position, value } => self.guess(actor, *position, *value)?,
            Action::Swap { first, second } => self.swap(actor, *first, *second)?,
            Action::Undo => {
                let state = self.undo()?;
                let status = Status::Reverted {
                    round: state.round,
                    player_up: state.player_up,
                };
                Applied { state, status }
            }
        };

        log::debug!(
            "player {}: {} (hints {}, misfires {}, deck {})",
            actor,
            applied,
            applied.state.hints,
            applied.state.misfires,
            applied.state.deck
        );
        if applied.state.is_finished() && !self.is_finished() {
            log::info!(
                "game over: {:?} with score {}",
                applied.state.state,
                applied.state.score()
            );
        }
        Ok(applied)
    }

    /// Applies `action` on behalf of the player whose turn it is.
    pub fn apply_current(&self, action: &Action) -> Result<Applied> {
        self.apply(self.player_up, action)
    }

    /// The state this one was derived from.
    pub fn undo(&self) -> Result<GameState> {
        match self.previous.as_deref() {
            Some(previous) => Ok(previous.clone()),
            None => {
                log::warn!("undo requested without an earlier state");
                Err(GameError::NothingToUndo)
            }
        }
    }

    fn play(&self, actor: PlayerIndex, position: Position, card: Card) -> Result<Applied> {
        let knowledge = self.players[actor].hand.get(position)?.clone();
        let mut next = self.successor();
        next.outstanding = self.outstanding.without(card)?;

        let (entry, status) = match self.played.with_played(card) {
            Some(played) => {
                next.played = played;
                if card.number() == MAX_NUMBER {
                    next.gain_hint();
                }
                (Entry::Play { card, knowledge }, Status::Played(card))
            }
            None => {
                next.discarded = self.discarded.with_discarded(card);
                next.misfires += 1;
                next.gain_hint();
                (Entry::Misfire { card, knowledge }, Status::Misfired(card))
            }
        };

        if next.played.is_complete() {
            next.state = EngineState::Won;
        } else if next.misfires > MAX_MISFIRES {
            next.state = EngineState::Lost;
        }

        let drew_last = next.retire_card(actor, position)?;
        next.record(actor, entry);
        next.end_turn(drew_last);
        Ok(Applied { state: next, status })
    }

    fn discard(&self, actor: PlayerIndex, position: Position, card: Card) -> Result<Applied> {
        let knowledge = self.players[actor].hand.get(position)?.clone();
        let mut next = self.successor();
        next.outstanding = self.outstanding.without(card)?;
        next.discarded = self.discarded.with_discarded(card);
        next.gain_hint();

        let drew_last = next.retire_card(actor, position)?;
        next.record(actor, Entry::Discard { card, knowledge });
        next.end_turn(drew_last);
        Ok(Applied {
            state: next,
            status: Status::Discarded(card),
        })
    }

    fn hint(
        &self,
        giver: PlayerIndex,
        target: PlayerIndex,
        positions: &Positions,
        value: HintValue,
    ) -> Result<Applied> {
        let stamp = Stamp::new(self.round, giver);
        let hand = self.player(target)?.hand.apply_hint(positions, value, stamp)?;

        let mut next = self.successor();
        next.hints -= 1;
        next.players[target].hand = hand;
        next.record(
            giver,
            Entry::Hint {
                target,
                value,
                positions: positions.clone(),
            },
        );
        next.end_turn(false);
        Ok(Applied {
            state: next,
            status: Status::Hinted {
                target,
                value,
                count: positions.len(),
            },
        })
    }

    fn guess(&self, player: PlayerIndex, position: Position, value: HintValue) -> Result<Applied> {
        let stamp = Stamp::new(self.round, player);
        let hand = self.player(player)?.hand.apply_guess(position, value, stamp)?;

        let mut next = self.successor();
        next.players[player].hand = hand;
        Ok(Applied {
            state: next,
            status: Status::Guessed {
                player,
                position,
                value,
            },
        })
    }

    fn swap(&self, player: PlayerIndex, first: Position, second: Position) -> Result<Applied> {
        let hand = self.player(player)?.hand.swap(first, second)?;

        let mut next = self.successor();
        next.players[player].hand = hand;
        Ok(Applied {
            state: next,
            status: Status::Swapped {
                player,
                first,
                second,
            },
        })
    }

    /// Copy of `self` whose undo link points at `self`.
    fn successor(&self) -> Self {
        Self {
            previous: Some(Arc::new(self.clone())),
            ..self.clone()
        }
    }

    fn gain_hint(&mut self) {
        if self.hints < MAX_HINTS {
            self.hints += 1;
        }
    }

    /// Removes the card at `position` from `player`'s hand and draws a
    /// replacement if the deck allows. Returns whether the last card was drawn.
    fn retire_card(&mut self, player: PlayerIndex, position: Position) -> Result<bool> {
        let drawn = match self.deck.checked_sub(1) {
            Some(left) => {
                self.deck = left;
                Some(Stamp::new(self.round, player))
            }
            None => None,
        };

        let player = &mut self.players[player];
        player.hand = player.hand.replace_slot(position, player.protocol, drawn)?;
        Ok(drawn.is_some() && self.deck == 0)
    }

    fn record(&mut self, player: PlayerIndex, entry: Entry) {
        self.log = self.log.with(LoggedAction {
            round: self.round,
            player,
            entry,
        });
    }

    fn end_turn(&mut self, drew_last: bool) {
        if let Some(left) = self.final_turns {
            let left = left.saturating_sub(1);
            self.final_turns = Some(left);
            if left == 0 && !self.state.is_finished() {
                self.state = EngineState::Finished;
            }
        } else if drew_last {
            self.final_turns = Some(self.players.len());
        }

        self.player_up += 1;
        if self.player_up == self.players.len() {
            self.player_up = 0;
            self.round += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use smallvec::smallvec;

    fn config(protocols: &[Protocol]) -> GameConfig {
        let names = ["Alice", "Bob", "Carol", "Dave", "Erin"];
        GameConfig::new(
            protocols
                .iter()
                .zip(names)
                .map(|(&protocol, name)| PlayerSetup::new(name, protocol))
                .collect(),
        )
        .unwrap()
    }

    fn two_players() -> GameState {
        GameState::new(&config(&[Protocol::InPlace, Protocol::LeftShift])).unwrap()
    }

    fn card(color: Color, number: Number) -> Card {
        Card::new(color, number).unwrap()
    }

    fn step(state: &GameState, action: Action) -> GameState {
        state.apply_current(&action).unwrap().state
    }

    fn play(position: Position, color: Color, number: Number) -> Action {
        Action::Play {
            position,
            card: card(color, number),
        }
    }

    fn discard(position: Position, color: Color, number: Number) -> Action {
        Action::Discard {
            position,
            card: card(color, number),
        }
    }

    fn hint(target: PlayerIndex, positions: Positions, value: HintValue) -> Action {
        Action::Hint {
            target,
            positions,
            value,
        }
    }

    fn accounted(state: &GameState) -> usize {
        let played: usize = state.played().iter().map(|(_, n)| usize::from(n)).sum();
        state.outstanding().len() + played + state.discarded().len()
    }

    #[test]
    fn new_game_matches_configuration() {
        let state = two_players();

        assert_eq!(state.hints(), MAX_HINTS);
        assert_eq!(state.misfires(), 0);
        assert_eq!(state.round(), 1);
        assert_eq!(state.player_up(), 0);
        assert_eq!(state.deck_size(), 40);
        assert_eq!(state.players()[1].hand().len(), 5);
        assert_eq!(state.state(), EngineState::InProgress);
        assert_eq!(accounted(&state), DECK_SIZE);
        assert!(state.previous().is_none());
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = GameConfig {
            players: vec![PlayerSetup::new("Solo", Protocol::InPlace)],
        };
        assert_eq!(
            GameState::new(&config),
            Err(GameError::Configuration(ConfigError::PlayerCount(1)))
        );
    }

    #[test]
    fn playing_next_number_advances_stack() {
        let state = two_players();
        let applied = state.apply(0, &play(0, Color::Yellow, 1)).unwrap();
        let next = applied.state;

        assert_eq!(applied.status, Status::Played(card(Color::Yellow, 1)));
        assert_eq!(next.played().top(Color::Yellow), 1);
        assert_eq!(next.misfires(), 0);
        assert_eq!(next.hints(), MAX_HINTS);
        assert_eq!(next.player_up(), 1);
        assert_eq!(next.deck_size(), 39);
        assert_eq!(next.outstanding().count(card(Color::Yellow, 1)), 2);
        assert_eq!(next.players()[0].hand()[0].drawn_at(), Stamp::new(1, 0));
        assert_eq!(accounted(&next), DECK_SIZE);
    }

    #[test]
    fn playing_out_of_order_is_a_misfire() {
        let state = step(&two_players(), hint(1, smallvec![0], HintValue::Number(3)));
        assert_eq!(state.hints(), MAX_HINTS - 1);

        let applied = state.apply(1, &play(0, Color::Yellow, 3)).unwrap();
        let next = applied.state;

        assert_eq!(applied.status, Status::Misfired(card(Color::Yellow, 3)));
        assert_eq!(next.misfires(), 1);
        assert_eq!(next.played().top(Color::Yellow), 0);
        assert_eq!(next.discarded().pile(Color::Yellow).collect::<Vec<_>>(), [3]);
        assert_eq!(next.hints(), MAX_HINTS);
        assert_eq!(next.round(), 2);
        assert_eq!(accounted(&next), DECK_SIZE);
        assert_eq!(next.log().latest().map(|a| a.entry.kind()), Some(EntryKind::Misfire));
    }

    #[test]
    fn claim_must_agree_with_hints() {
        let state = step(&two_players(), hint(1, smallvec![2], HintValue::Color(Color::Red)));

        assert_eq!(
            state.apply(1, &play(2, Color::Blue, 1)),
            Err(GameError::InconsistentClaim {
                position: 2,
                conflict: Conflict::ClaimRuledOut(card(Color::Blue, 1)),
            })
        );
        assert_eq!(
            state.apply(1, &play(7, Color::Red, 1)),
            Err(GameError::IndexOutOfRange { index: 7, len: 5 })
        );
        assert!(state.apply(1, &play(2, Color::Red, 1)).is_ok());
    }

    #[test]
    fn exhausted_card_cannot_be_claimed() {
        let mut state = two_players();
        state = step(&state, play(0, Color::White, 5));
        assert_eq!(state.misfires(), 1);
        assert_eq!(state.hints(), MAX_HINTS);

        assert_eq!(
            state.apply(1, &play(0, Color::White, 5)),
            Err(GameError::ExhaustedCard {
                card: card(Color::White, 5)
            })
        );
    }

    #[test]
    fn discard_requires_a_spent_hint() {
        let state = two_players();
        assert_eq!(
            state.apply(0, &discard(0, Color::Green, 2)),
            Err(GameError::Rule(RuleViolation::DiscardAtMaxHints))
        );

        let state = step(&state, hint(1, smallvec![1, 3], HintValue::Number(2)));
        let state = step(&state, discard(1, Color::Green, 2));
        assert_eq!(state.hints(), MAX_HINTS);
        assert_eq!(state.discarded().pile(Color::Green).collect::<Vec<_>>(), [2]);
        // left shift: the second hinted card moved from position 3 to 2
        assert_eq!(state.players()[1].hand()[2].numbers(), NumberSet::of(2));
        assert_eq!(state.players()[1].hand()[4].numbers(), NumberSet::all());
        assert_eq!(accounted(&state), DECK_SIZE);
    }

    #[test]
    fn hint_rules() {
        let state = two_players();
        assert_eq!(
            state.apply(0, &hint(0, smallvec![0], HintValue::Number(1))),
            Err(GameError::Rule(RuleViolation::SelfHint))
        );
        assert_eq!(
            state.apply(1, &hint(0, smallvec![0], HintValue::Number(1))),
            Err(GameError::Rule(RuleViolation::NotYourTurn { player_up: 0 }))
        );
        assert_eq!(
            state.apply(0, &hint(1, smallvec![], HintValue::Number(1))),
            Err(GameError::Rule(RuleViolation::EmptyHint))
        );
        assert_eq!(
            state.apply(0, &hint(1, smallvec![2, 2], HintValue::Number(1))),
            Err(GameError::Rule(RuleViolation::DuplicatePosition(2)))
        );
        assert_eq!(
            state.apply(0, &hint(1, smallvec![5], HintValue::Number(1))),
            Err(GameError::IndexOutOfRange { index: 5, len: 5 })
        );
        assert_eq!(
            state.apply(0, &hint(1, smallvec![0], HintValue::Number(9))),
            Err(GameError::InvalidNumber { number: 9 })
        );
        assert_eq!(
            state.apply(0, &hint(4, smallvec![0], HintValue::Number(1))),
            Err(GameError::IndexOutOfRange { index: 4, len: 2 })
        );
    }

    #[test]
    fn hint_with_no_tokens_changes_nothing() {
        let mut state = two_players();
        for turn in 0..usize::from(MAX_HINTS) {
            let target = 1 - turn % 2;
            state = step(&state, hint(target, smallvec![0], HintValue::Color(Color::Blue)));
        }
        assert_eq!(state.hints(), 0);

        let before = state.clone();
        assert_eq!(
            state.apply_current(&hint(1, smallvec![1], HintValue::Number(4))),
            Err(GameError::Rule(RuleViolation::NoHintsRemaining))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn contradicting_hint_is_rejected_atomically() {
        let state = step(&two_players(), hint(1, smallvec![0], HintValue::Color(Color::Red)));
        let state = step(&state, hint(0, smallvec![4], HintValue::Number(1)));

        let err = state
            .apply_current(&hint(1, smallvec![0, 1, 2], HintValue::Color(Color::Red)))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InconsistentClaim {
                position: 1,
                conflict: Conflict::ColorRuledOut(Color::Red),
            }
        );

        let err = state
            .apply_current(&hint(1, smallvec![3], HintValue::Color(Color::Red)))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InconsistentClaim {
                position: 0,
                conflict: Conflict::LastColor(Color::Red),
            }
        );
        assert_eq!(state.hints(), MAX_HINTS - 2);
    }

    #[test]
    fn hint_is_logged_with_giver_receiver_and_positions() {
        let state = step(&two_players(), hint(1, smallvec![0, 3], HintValue::Number(4)));
        let logged = state.log().latest().unwrap();

        assert_eq!(logged.round, 1);
        assert_eq!(logged.player, 0);
        assert_eq!(
            logged.entry,
            Entry::Hint {
                target: 1,
                value: HintValue::Number(4),
                positions: smallvec![0, 3],
            }
        );
        assert_eq!(state.players()[1].hand()[3].updated_at(), Stamp::new(1, 0));
    }

    #[test]
    fn guess_and_swap_do_not_take_a_turn() {
        let state = two_players();
        let guessed = state
            .apply(1, &Action::Guess {
                position: 2,
                value: HintValue::Color(Color::Green),
            })
            .unwrap()
            .state;
        assert_eq!(guessed.player_up(), 0);
        assert_eq!(guessed.hints(), MAX_HINTS);
        assert_eq!(guessed.players()[1].hand()[2].color_guess(), Some(Color::Green));

        let swapped = guessed
            .apply(1, &Action::Swap { first: 2, second: 0 })
            .unwrap()
            .state;
        assert_eq!(swapped.player_up(), 0);
        assert_eq!(swapped.players()[1].hand()[0].color_guess(), Some(Color::Green));
        assert_eq!(swapped.log().len(), 0);

        assert_eq!(swapped.undo().unwrap(), guessed);
        assert_eq!(
            guessed.apply(1, &Action::Swap { first: 1, second: 1 }),
            Err(GameError::Rule(RuleViolation::NothingToSwap))
        );
    }

    #[test]
    fn guess_must_respect_hints() {
        let state = step(&two_players(), hint(1, smallvec![0], HintValue::Number(5)));
        assert_eq!(
            state.apply(1, &Action::Guess {
                position: 1,
                value: HintValue::Number(5),
            }),
            Err(GameError::InconsistentClaim {
                position: 1,
                conflict: Conflict::BadNumberGuess(5),
            })
        );
    }

    #[test]
    fn undo_is_a_left_inverse() {
        let start = two_players();
        let actions = [
            hint(1, smallvec![0, 1], HintValue::Color(Color::White)),
            play(0, Color::White, 1),
            discard(4, Color::Blue, 3),
            play(2, Color::Green, 4),
        ];

        let mut state = start.clone();
        for action in actions {
            let next = state.apply_current(&action).unwrap().state;
            assert_eq!(next.undo().unwrap(), state);
            let reverted = next.apply(0, &Action::Undo).unwrap();
            assert_eq!(reverted.state, state);
            assert!(matches!(reverted.status, Status::Reverted { .. }));
            state = next;
        }

        assert_eq!(state.log().len(), 4);
        assert_eq!(start.undo(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn completing_a_color_awards_a_hint() {
        let mut state = step(&two_players(), hint(1, smallvec![0], HintValue::Number(1)));
        for number in 1..=MAX_NUMBER {
            state = step(&state, play(0, Color::Blue, number));
        }
        assert_eq!(state.played().top(Color::Blue), MAX_NUMBER);
        assert_eq!(state.hints(), MAX_HINTS);
    }

    #[test]
    fn all_stacks_complete_wins() {
        let mut state = two_players();
        for color in Color::ALL {
            for number in 1..=MAX_NUMBER {
                state = step(&state, play(0, color, number));
            }
        }

        assert_eq!(state.state(), EngineState::Won);
        assert_eq!(state.score(), 25);
        assert_eq!(state.hints(), MAX_HINTS);
        assert!(state.deck_size() > 0);
        assert_eq!(
            state.apply_current(&discard(0, Color::Red, 1)),
            Err(GameError::AlreadyEnded)
        );
        assert_eq!(state.undo().unwrap().state(), EngineState::InProgress);
    }

    #[test]
    fn third_misfire_loses() {
        let mut state = two_players();
        for number in [2, 3, 4] {
            state = step(&state, play(0, Color::Red, number));
        }
        assert_eq!(state.misfires(), 3);
        assert_eq!(state.hints(), MAX_HINTS);
        assert_eq!(state.state(), EngineState::Lost);
        assert!(state.is_finished());
    }

    #[test]
    fn empty_deck_starts_final_round() {
        let mut state = two_players();
        state.deck = 1;

        let state = step(&state, play(3, Color::Red, 1));
        assert_eq!(state.deck_size(), 0);
        assert_eq!(state.final_turns(), Some(2));
        assert_eq!(state.players()[0].hand().len(), 5);

        let state = step(&state, play(0, Color::Red, 2));
        assert_eq!(state.players()[1].hand().len(), 4);
        assert_eq!(state.final_turns(), Some(1));
        assert_eq!(state.state(), EngineState::InProgress);

        let state = step(&state, hint(1, smallvec![0], HintValue::Number(3)));
        assert_eq!(state.state(), EngineState::Finished);
        assert_eq!(state.score(), 2);
    }

    #[test]
    fn round_advances_when_turn_order_wraps() {
        let config = config(&[Protocol::InPlace, Protocol::InPlace, Protocol::RightShift]);
        let mut state = GameState::new(&config).unwrap();
        for target in [1, 2, 0] {
            state = step(&state, hint(target, smallvec![0], HintValue::Number(1)));
        }
        assert_eq!(state.round(), 2);
        assert_eq!(state.player_up(), 0);
    }

    #[test]
    fn outstanding_accounting_holds_through_a_game() {
        let mut state = two_players();
        let script = [
            hint(1, smallvec![0], HintValue::Color(Color::Green)),
            play(0, Color::Green, 1),
            play(4, Color::Green, 2),
            discard(1, Color::Yellow, 5),
            play(2, Color::White, 3),
            hint(0, smallvec![0, 1], HintValue::Number(3)),
        ];
        for action in script {
            state = step(&state, action);
            assert_eq!(accounted(&state), DECK_SIZE);
        }
        assert_eq!(state.log().len(), 6);
        assert_eq!(state.log().of_kind(EntryKind::Misfire).len(), 1);
    }

    #[test]
    fn finds_players_by_name_prefix() {
        let config = config(&[Protocol::InPlace, Protocol::InPlace, Protocol::InPlace]);
        let mut config = config;
        config.players[2].name = String::from("Alicia");
        let state = GameState::new(&config).unwrap();

        let by_name = |name: &str| state.find_player(&PlayerRef::Name(String::from(name)));
        assert_eq!(by_name("bo"), Ok(1));
        assert_eq!(by_name("ALICE"), Ok(0));
        assert_eq!(by_name("alici"), Ok(2));
        assert!(matches!(by_name("ali"), Err(GameError::AmbiguousPlayer { .. })));
        assert!(matches!(by_name("zed"), Err(GameError::UnknownPlayer { .. })));
        assert_eq!(state.find_player(&PlayerRef::Index(2)), Ok(2));
        assert_eq!(
            state.find_player(&PlayerRef::Index(3)),
            Err(GameError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn shared_exact_name_is_ambiguous() {
        // configs refuse such names, deserialized states are not revalidated
        let mut state = two_players();
        state.players[1].name = String::from("alice");

        assert_eq!(
            state.find_player(&PlayerRef::Name(String::from("Alice"))),
            Err(GameError::AmbiguousPlayer {
                specifier: String::from("alice"),
                matches: vec![String::from("Alice"), String::from("alice")],
            })
        );
        assert_eq!(
            GameConfig::new(vec![
                PlayerSetup::new("Bob", Protocol::InPlace),
                PlayerSetup::new("bob", Protocol::InPlace),
            ]),
            Err(GameError::Configuration(ConfigError::DuplicateName(1)))
        );
    }
}
