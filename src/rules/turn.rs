//! Turn state machine.
//!
//! ```text
//! Rolling --(confirm | last roll)--> Actions --(end turn)--> Rolling (next seat)
//! ```
//!
//! Leaving `Rolling` resolves the dice exactly once: steps become the
//! movement budget, water goes into the player's ledger, and the flame
//! total is fed to fire spread. There is no terminal state other than an
//! uncontained fire, after which every intent is refused.

use tracing::{debug, info};

use super::engine::{RulesEngine, Transition};
use crate::board::{FireSpreadEngine, RoomGraph, RoomId, SpreadEvent};
use crate::core::config::GameConfig;
use crate::core::error::{ConfigError, IntentError};
use crate::core::intent::Intent;
use crate::core::player::{Character, CharacterId, PlayerId, SeatMap};
use crate::core::rng::FaceSource;
use crate::core::state::{BoardState, GameOutcome, GameState, Phase, PlayerState, TurnState};
use crate::dice::{DiceResolver, DICE_COUNT};
use crate::events::LogEvent;
use crate::ledger::ResourceLedger;
use crate::movement::MovementValidator;
use crate::store::{store_offer, UpgradeCard};

/// The game rules, bound to one validated configuration.
#[derive(Clone, Debug)]
pub struct TurnStateMachine {
    config: GameConfig,
    graph: RoomGraph,
    /// Character per seat, in turn order.
    seats: SeatMap<CharacterId>,
}

impl TurnStateMachine {
    /// Validate the configuration and build the rules.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] found by [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let graph = config.validate()?;
        let seats = config
            .turn_order
            .iter()
            .map(|name| {
                config
                    .character_by_name(name)
                    .map(|(id, _)| id)
                    .ok_or_else(|| ConfigError::UnknownCharacter(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let seats = SeatMap::from_vec(seats).ok_or(ConfigError::NoPlayers)?;

        Ok(Self {
            config,
            graph,
            seats,
        })
    }

    /// The symmetric room graph.
    #[must_use]
    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    /// Movement rules.
    #[must_use]
    pub fn movement(&self) -> MovementValidator<'_> {
        MovementValidator::new(&self.graph)
    }

    /// Token rules.
    #[must_use]
    pub fn ledger(&self) -> ResourceLedger<'_> {
        ResourceLedger::new(&self.graph, self.config.rules.extinguish_requires_presence)
    }

    /// Fire spread.
    #[must_use]
    pub fn fire(&self) -> FireSpreadEngine<'_> {
        FireSpreadEngine::new(&self.graph)
    }

    /// Upgrade cards currently on offer.
    #[must_use]
    pub fn store_offer(&self) -> &[UpgradeCard] {
        store_offer(&self.config)
    }

    /// Initial state on a custom board.
    #[must_use]
    pub fn initial_state_with_board(&self, board: BoardState) -> GameState {
        let players = self
            .seats
            .map(|_, &id| PlayerState::new(id, self.character(id).start_room));
        GameState::new(board, players, self.config.rules.rolls_per_turn)
    }

    /// Profile of a character in this configuration.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> &Character {
        &self.config.characters[id.index()]
    }

    /// Profile of the character sitting in a seat.
    #[must_use]
    pub fn character_of(&self, state: &GameState, player: PlayerId) -> &Character {
        self.character(state.players[player].character)
    }

    /// Rooms the current player may move to right now.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState) -> Vec<RoomId> {
        if state.is_over() {
            return Vec::new();
        }
        self.movement().legal_moves(state)
    }

    /// Whether the current player may put out a flame in `room`.
    #[must_use]
    pub fn can_extinguish(&self, state: &GameState, room: RoomId) -> bool {
        self.is_legal(state, &Intent::Extinguish { room })
    }

    fn name(&self, state: &GameState) -> &str {
        &self.character_of(state, state.current_player).name
    }

    fn reject(&self, state: &GameState, intent: &Intent, err: IntentError) -> Transition {
        debug!(player = %state.current_player, %intent, error = %err, "intent rejected");
        Transition {
            state: state.clone(),
            events: vec![LogEvent::warning(format!(
                "{} cannot {}: {}",
                self.name(state),
                intent,
                err
            ))],
            rejected: Some(err),
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        intent: &Intent,
        source: &mut dyn FaceSource,
        events: &mut Vec<LogEvent>,
    ) -> Result<(), IntentError> {
        match *intent {
            Intent::Roll => {
                DiceResolver::roll(&mut state.turn, source)?;
                events.push(LogEvent::roll(format!(
                    "{} rolls {} ({} roll(s) left)",
                    self.name(state),
                    describe_dice(&state.turn),
                    state.turn.rolls_remaining
                )));
                if state.turn.rolls_remaining == 0 {
                    self.resolve_roll(state, events);
                }
            }
            Intent::ToggleKeep { slot } => {
                let kept = DiceResolver::toggle_keep(&mut state.turn, slot)?;
                let face = state.turn.dice[slot].map(|face| face.to_string()).unwrap_or_default();
                events.push(LogEvent::roll(format!(
                    "{} {} die {} ({})",
                    self.name(state),
                    if kept { "keeps" } else { "releases" },
                    slot + 1,
                    face
                )));
            }
            Intent::ConfirmRoll => {
                check_confirm(&state.turn)?;
                self.resolve_roll(state, events);
            }
            Intent::Move { room } => {
                let from = self.movement().apply_move(state, room)?;
                events.push(LogEvent::movement(format!(
                    "{} moves from the {} to the {} ({} movement left)",
                    self.name(state),
                    self.graph.name(from),
                    self.graph.name(room),
                    state.turn.movement_budget
                )));
            }
            Intent::Extinguish { room } => {
                let character = self.character_of(state, state.current_player);
                let done = self.ledger().extinguish(state, character, room)?;
                events.push(LogEvent::action(format!(
                    "{} puts out a flame in the {} ({} left, {} water left)",
                    character.name,
                    self.graph.name(room),
                    done.remaining_fire,
                    state.current().water_tokens
                )));
                if !done.banked {
                    events.push(LogEvent::warning(format!(
                        "{} cannot carry more fire tokens",
                        character.name
                    )));
                }
            }
            Intent::EndTurn => {
                if state.turn.phase != Phase::Actions {
                    return Err(IntentError::WrongPhase {
                        actual: state.turn.phase,
                    });
                }
                state.advance_turn(self.config.rules.rolls_per_turn);
                let next = self.character_of(state, state.current_player);
                info!(player = %state.current_player, turn = state.turn_number, "turn started");
                events.push(LogEvent::turn(format!(
                    "Turn {}: {}'s turn",
                    state.turn_number, next
                )));
            }
            Intent::BuyCard { index } => {
                let card = self
                    .store_offer()
                    .get(index)
                    .ok_or(IntentError::UnknownCard(index))?;
                let affordable = card.can_afford(state.current());
                events.push(LogEvent::action(format!(
                    "{} wants to buy {} for {} ({})",
                    self.name(state),
                    card.name,
                    card.buy_cost,
                    if affordable { "affordable" } else { "cannot afford" }
                )));
            }
        }
        Ok(())
    }

    /// Leave the rolling phase and apply the dice. Runs once per turn.
    fn resolve_roll(&self, state: &mut GameState, events: &mut Vec<LogEvent>) {
        let tally = DiceResolver::tally(&state.turn.dice);

        state.turn.phase = Phase::Actions;
        state.turn.rolls_remaining = 0;
        state.turn.movement_budget = tally.steps;
        state.turn.water_collected = tally.water;
        state.turn.flames_rolled = tally.flames;

        let character = self.character_of(state, state.current_player);
        let gained = ResourceLedger::collect_water(state.current_mut(), character, tally.water);

        info!(
            player = %state.current_player,
            steps = tally.steps,
            water = gained,
            flames = tally.flames,
            "dice resolved"
        );
        events.push(LogEvent::phase(format!(
            "{} gets {} movement and {} water, and rolled {} flame(s)",
            character.name, tally.steps, gained, tally.flames
        )));
        if u32::from(gained) < tally.water {
            events.push(LogEvent::warning(format!(
                "{}'s water tank is full, {} water lost",
                character.name,
                tally.water - u32::from(gained)
            )));
        }

        let outcome = self.fire().spread(&mut state.board, tally.flames);
        if tally.flames > 0 && outcome.events.is_empty() {
            events.push(LogEvent::fire(format!(
                "{} flame(s) fizzle out: there is no room {}",
                tally.flames, tally.flames
            )));
        }
        events.extend(
            outcome
                .events
                .iter()
                .map(|event| LogEvent::from_spread(event, &self.graph)),
        );

        let lost_in = outcome.events.iter().find_map(|event| match *event {
            SpreadEvent::Uncontained { room, .. } => Some(room),
            _ => None,
        });
        if let Some(room) = lost_in {
            state.outcome = GameOutcome::Uncontained { room };
        }
    }
}

impl RulesEngine for TurnStateMachine {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn initial_state(&self) -> GameState {
        self.initial_state_with_board(BoardState::new(&self.graph))
    }

    fn candidate_intents(&self, state: &GameState) -> Vec<Intent> {
        if state.is_over() {
            return Vec::new();
        }

        let mut intents = Vec::new();
        match state.turn.phase {
            Phase::Rolling => {
                intents.push(Intent::Roll);
                intents.extend((0..DICE_COUNT).map(|slot| Intent::ToggleKeep { slot }));
                intents.push(Intent::ConfirmRoll);
            }
            Phase::Actions => {
                intents.extend(
                    self.graph
                        .neighbors(state.current_room())
                        .iter()
                        .map(|&room| Intent::Move { room }),
                );
                intents.extend(state.board.burning().map(|room| Intent::Extinguish { room }));
                intents.push(Intent::EndTurn);
            }
        }
        intents.extend((0..self.store_offer().len()).map(|index| Intent::BuyCard { index }));
        intents
    }

    fn validate(&self, state: &GameState, intent: &Intent) -> Result<(), IntentError> {
        if state.is_over() {
            return Err(IntentError::GameOver);
        }

        match *intent {
            Intent::Roll => DiceResolver::check_roll(&state.turn),
            Intent::ToggleKeep { slot } => DiceResolver::check_toggle(&state.turn, slot),
            Intent::ConfirmRoll => check_confirm(&state.turn),
            Intent::Move { room } => Ok(self.movement().check_move(state, room)?),
            Intent::Extinguish { room } => Ok(self.ledger().check_extinguish(state, room)?),
            Intent::EndTurn => match state.turn.phase {
                Phase::Actions => Ok(()),
                actual => Err(IntentError::WrongPhase { actual }),
            },
            Intent::BuyCard { index } => {
                if index < self.store_offer().len() {
                    Ok(())
                } else {
                    Err(IntentError::UnknownCard(index))
                }
            }
        }
    }

    fn reduce(&self, state: &GameState, intent: &Intent, source: &mut dyn FaceSource) -> Transition {
        debug!(player = %state.current_player, %intent, "intent received");
        if let Err(err) = self.validate(state, intent) {
            return self.reject(state, intent, err);
        }

        let mut next = state.clone();
        let record = next.next_record(*intent);
        let mut events = Vec::new();
        if let Err(err) = self.apply(&mut next, intent, source, &mut events) {
            return self.reject(state, intent, err);
        }
        next.history.push_back(record);

        Transition {
            state: next,
            events,
            rejected: None,
        }
    }
}

fn check_confirm(turn: &TurnState) -> Result<(), IntentError> {
    match turn.phase {
        Phase::Rolling => Ok(()),
        actual => Err(IntentError::WrongPhase { actual }),
    }
}

fn describe_dice(turn: &TurnState) -> String {
    turn.dice
        .iter()
        .zip(turn.kept)
        .map(|(face, kept)| match (face, kept) {
            (Some(face), true) => format!("[{face}]"),
            (Some(face), false) => face.to_string(),
            (None, _) => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
