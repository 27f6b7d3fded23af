use crate::*;

/// Precondition checks for every action kind.
///
/// The validator only reads the state. A successful check means the engine
/// may start the transition; conflicts that only show up while revising
/// knowledge cells are still reported by the transition itself.
#[derive(Copy, Clone, Debug)]
pub struct Validator<'a> {
    state: &'a GameState,
}

impl<'a> Validator<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    pub fn check(&self, actor: PlayerIndex, action: &Action) -> Result<()> {
        if let Action::Undo = action {
            self.check_player(actor)?;
            return self.check_undo();
        }

        self.check_active(actor)?;
        if action.takes_turn() {
            self.check_turn(actor)?;
        }
        match action {
            Action::Play { position, card } => self.check_claim(actor, *position, *card),
            Action::Discard { position, card } => {
                if self.state.hints() >= MAX_HINTS {
                    return Err(RuleViolation::DiscardAtMaxHints.into());
                }
                self.check_claim(actor, *position, *card)
            }
            Action::Hint {
                target,
                positions,
                value,
            } => self.check_hint(actor, *target, positions, *value),
            Action::Guess { position, value } => {
                value.validate()?;
                self.hand(actor)?.check_position(*position).map(|_| ())
            }
            Action::Swap { first, second } => {
                let hand = self.hand(actor)?;
                hand.check_position(*first)?;
                hand.check_position(*second)?;
                if first == second {
                    return Err(RuleViolation::NothingToSwap.into());
                }
                Ok(())
            }
            Action::Undo => self.check_undo(),
        }
    }

    pub fn check_undo(&self) -> Result<()> {
        if self.state.previous().is_some() {
            Ok(())
        } else {
            Err(GameError::NothingToUndo)
        }
    }

    pub fn check_player(&self, player: PlayerIndex) -> Result<PlayerIndex> {
        let len = self.state.players().len();
        if player < len {
            Ok(player)
        } else {
            Err(GameError::IndexOutOfRange { index: player, len })
        }
    }

    /// `actor` exists and the game still accepts moves.
    pub fn check_active(&self, actor: PlayerIndex) -> Result<()> {
        self.check_player(actor)?;
        self.check_not_finished()
    }

    pub fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    pub fn check_turn(&self, actor: PlayerIndex) -> Result<()> {
        let player_up = self.state.player_up();
        if actor == player_up {
            Ok(())
        } else {
            Err(RuleViolation::NotYourTurn { player_up }.into())
        }
    }

    /// `card` must be a real identity that the slot's hints allow and that
    /// still has an unresolved copy.
    pub fn check_claim(&self, actor: PlayerIndex, position: Position, card: Card) -> Result<()> {
        Card::new(card.color(), card.number())?;
        let cell = self.hand(actor)?.get(position)?;
        if !cell.admits(card) {
            return Err(GameError::InconsistentClaim {
                position,
                conflict: Conflict::ClaimRuledOut(card),
            });
        }
        if !self.state.outstanding().contains(card) {
            return Err(GameError::ExhaustedCard { card });
        }
        Ok(())
    }

    pub fn check_hint(
        &self,
        giver: PlayerIndex,
        target: PlayerIndex,
        positions: &[Position],
        value: HintValue,
    ) -> Result<()> {
        if self.state.hints() == 0 {
            return Err(RuleViolation::NoHintsRemaining.into());
        }
        self.check_player(target)?;
        if giver == target {
            return Err(RuleViolation::SelfHint.into());
        }
        value.validate()?;
        if positions.is_empty() {
            return Err(RuleViolation::EmptyHint.into());
        }

        let hand = self.hand(target)?;
        for (i, &position) in positions.iter().enumerate() {
            hand.check_position(position)?;
            if positions[..i].contains(&position) {
                return Err(RuleViolation::DuplicatePosition(position).into());
            }
        }
        Ok(())
    }

    fn hand(&self, player: PlayerIndex) -> Result<&'a Hand> {
        self.check_player(player)?;
        Ok(self.state.players()[player].hand())
    }
}
