use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Chasers take a single step per turn.
pub const CHASER_MOVES: u8 = 1;

/// Deferred actions of an escape round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscapeTimer {
    EndTurn,
}

/// Hex-disk round: the player walks towards the door while chasers close in.
#[derive(Clone, Debug)]
pub struct EscapeGame {
    config: EscapeConfig,
    seeds: SmallRng,
    board: HexBoard,
    player: Actor<Hex>,
    chasers: Actors<Hex>,
    turn: u32,
    phase: Phase,
    caught_by: Option<ActorId>,
    timers: Scheduler<EscapeTimer>,
    pending_end: Option<TimerToken>,
}

impl EscapeGame {
    pub fn new(config: EscapeConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Game whose successive rounds are all derived from `seed`.
    ///
    /// A first layout is generated right away so the menu has a board to show.
    pub fn with_seed(config: EscapeConfig, seed: u64) -> Self {
        let config = config.clamped();
        let mut seeds = SmallRng::seed_from_u64(seed);
        let layout = RandomEscapeGenerator::new(seeds.random()).generate(&config);
        let (player, chasers) = spawn(&config, &layout);

        Self {
            config,
            seeds,
            board: layout.board,
            player,
            chasers,
            turn: 1,
            phase: Phase::Menu,
            caught_by: None,
            timers: Scheduler::new(),
            pending_end: None,
        }
    }

    /// Discards the current round, whatever its phase, and plays a fresh layout.
    pub fn start_game(&mut self) {
        let seed = self.seeds.random();
        let layout = RandomEscapeGenerator::new(seed).generate(&self.config);
        self.start_with_layout(layout);
    }

    pub fn start_with_layout(&mut self, layout: EscapeLayout) {
        self.timers.clear();
        self.pending_end = None;

        let (player, chasers) = spawn(&self.config, &layout);
        self.board = layout.board;
        self.player = player;
        self.chasers = chasers;
        self.turn = 1;
        self.caught_by = None;
        self.phase = Phase::Playing;

        log::debug!(
            "Escape round started, goal: {:?}, chasers: {}",
            self.board.goal(),
            self.chasers.len()
        );
    }

    pub fn return_to_menu(&mut self) -> Result<()> {
        if !self.phase.is_finished() {
            return Err(GameError::NotFinished);
        }
        self.phase = Phase::Menu;
        log::debug!("Escape returned to menu");
        Ok(())
    }

    pub fn config(&self) -> &EscapeConfig {
        &self.config
    }

    pub fn board(&self) -> &HexBoard {
        &self.board
    }

    pub fn player(&self) -> &Actor<Hex> {
        &self.player
    }

    pub fn chasers(&self) -> &Actors<Hex> {
        &self.chasers
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Chaser that ended the round, if it was lost that way.
    pub fn caught_by(&self) -> Option<ActorId> {
        self.caught_by
    }

    pub fn is_blocked(&self, hex: Hex) -> bool {
        self.board.is_blocked(hex)
    }

    pub fn can_player_move_to(&self, hex: Hex) -> bool {
        self.phase.is_playing() && can_step(&self.board, &self.player, hex)
    }

    /// Whether the player could end the turn now.
    pub fn can_end_turn(&self) -> bool {
        self.phase.is_playing() && !(self.player.has_moves() && self.player_has_step())
    }

    pub fn snapshot(&self) -> EscapeSnapshot {
        EscapeSnapshot::from_game(self)
    }

    /// Moves the player one cell. Walking into a chaser loses on the spot.
    pub fn move_player_to(&mut self, target: Hex) -> Result<TurnOutcome> {
        self.check_playing()?;
        let target = validate_step(&self.board, &self.player, target)?;

        self.player.step_to(target);
        log::debug!(
            "Player moved to {:?}, moves left: {}",
            target,
            self.player.moves_left
        );

        if let Some(id) = self.chasers.occupant(target) {
            self.caught_by = Some(id);
            self.end_round(Phase::Lost);
            return Ok(TurnOutcome::Lost);
        }

        if self.player.moves_left == 0 {
            if let TurnEnd::Auto { delay } = self.config.turn_end {
                if delay.is_zero() {
                    return Ok(self.resolve_turn());
                }
                let token = self
                    .timers
                    .schedule(Instant::now() + delay, EscapeTimer::EndTurn);
                self.pending_end = Some(token);
            }
        }

        Ok(TurnOutcome::Moved)
    }

    /// Hands the turn over to the chasers.
    ///
    /// Refused while the player still has budget and somewhere to go.
    pub fn end_turn(&mut self) -> Result<TurnOutcome> {
        self.check_playing()?;
        if self.player.has_moves() && self.player_has_step() {
            return Err(GameError::MovesRemaining);
        }

        if let Some(token) = self.pending_end.take() {
            self.timers.cancel(token);
        }
        Ok(self.resolve_turn())
    }

    /// Runs every timer due at `now` and returns the ones that took effect.
    pub fn tick(&mut self, now: Instant) -> Vec<EscapeTimer> {
        let mut fired = Vec::new();
        for entry in self.timers.drain_due(now) {
            match entry.action {
                EscapeTimer::EndTurn => {
                    if !self.phase.is_playing() || self.pending_end != Some(entry.token) {
                        log::trace!("Dropping stale end of turn {:?}", entry.token);
                        continue;
                    }
                    self.pending_end = None;
                    self.resolve_turn();
                    fired.push(entry.action);
                }
            }
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Chasers move one after another, each seeing where the earlier ones went.
    fn resolve_turn(&mut self) -> TurnOutcome {
        let target = self.player.position;

        for id in self.chasers.ids() {
            let chaser = self.chasers[id];
            if !chaser.has_moves() {
                continue;
            }

            let chasers = &self.chasers;
            let step = pursue_step(&self.board, chaser.position, target, |hex| {
                chasers.occupant(hex).is_some_and(|other| other != id)
            });
            let Some(step) = step else {
                log::trace!("Chaser {:?} is stuck at {:?}", id, chaser.position);
                continue;
            };

            self.chasers[id].step_to(step);
            log::trace!("Chaser {:?} moved {:?} -> {:?}", id, chaser.position, step);

            if step == target {
                self.caught_by = Some(id);
                self.end_round(Phase::Lost);
                return TurnOutcome::Lost;
            }
        }

        if let Some(id) = self.chasers.occupant(target) {
            self.caught_by = Some(id);
            self.end_round(Phase::Lost);
            return TurnOutcome::Lost;
        }

        if self.board.is_goal(target) {
            self.end_round(Phase::Won);
            return TurnOutcome::Won;
        }

        self.player.reset_moves(self.config.moves_per_turn);
        self.chasers.reset_moves(CHASER_MOVES);
        self.turn += 1;
        log::debug!("Escape turn {} begins", self.turn);

        TurnOutcome::TurnEnded
    }

    fn end_round(&mut self, phase: Phase) {
        self.phase = phase;
        self.timers.clear();
        self.pending_end = None;
        log::debug!("Escape round over at turn {}: {:?}", self.turn, phase);
    }

    fn player_has_step(&self) -> bool {
        open_neighbors(&self.board, self.player.position)
            .next()
            .is_some()
    }

    fn check_playing(&self) -> Result<()> {
        if self.phase.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }
}

fn spawn(config: &EscapeConfig, layout: &EscapeLayout) -> (Actor<Hex>, Actors<Hex>) {
    let player = Actor::new(layout.player_start, config.moves_per_turn);
    let chasers = layout
        .chasers
        .iter()
        .map(|&hex| Actor::new(hex, CHASER_MOVES))
        .collect();
    (player, chasers)
}
