use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

pub const PLAYER_MOVES: u8 = 1;
pub const EVADER_MOVES: u8 = 1;

/// Deferred actions of a hunt round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HuntTimer {
    HideEvader,
}

/// Grid round: the player hunts a mostly invisible thief before it slips out.
///
/// Every accepted player step is a whole turn: the thief answers right away
/// and every `reveal_every` turns shows itself for `reveal_duration`.
#[derive(Clone, Debug)]
pub struct HuntGame {
    config: HuntConfig,
    seeds: SmallRng,
    board: GridBoard,
    player: Actor<GridPos>,
    evaders: Actors<GridPos>,
    turn: u32,
    phase: Phase,
    reveal_counter: u8,
    timers: Scheduler<HuntTimer>,
    pending_hide: Option<TimerToken>,
}

impl HuntGame {
    pub fn new(config: HuntConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: HuntConfig, seed: u64) -> Self {
        let config = config.clamped();
        let mut seeds = SmallRng::seed_from_u64(seed);
        let layout = RandomHuntGenerator::new(seeds.random()).generate(&config);
        let (player, evaders) = spawn(&layout);

        Self {
            config,
            seeds,
            board: layout.board,
            player,
            evaders,
            turn: 1,
            phase: Phase::Menu,
            reveal_counter: 0,
            timers: Scheduler::new(),
            pending_hide: None,
        }
    }

    /// Discards the current round, whatever its phase, and plays a fresh layout.
    pub fn start_game(&mut self) {
        let seed = self.seeds.random();
        let layout = RandomHuntGenerator::new(seed).generate(&self.config);
        self.start_with_layout(layout);
    }

    pub fn start_with_layout(&mut self, layout: HuntLayout) {
        self.timers.clear();
        self.pending_hide = None;

        let (player, evaders) = spawn(&layout);
        self.board = layout.board;
        self.player = player;
        self.evaders = evaders;
        self.turn = 1;
        self.reveal_counter = 0;
        self.phase = Phase::Playing;

        log::debug!(
            "Hunt round started, exit: {:?}, thief: {:?}",
            self.board.goal(),
            layout.evader
        );
    }

    pub fn return_to_menu(&mut self) -> Result<()> {
        if !self.phase.is_finished() {
            return Err(GameError::NotFinished);
        }
        self.phase = Phase::Menu;
        log::debug!("Hunt returned to menu");
        Ok(())
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    pub fn board(&self) -> &GridBoard {
        &self.board
    }

    pub fn exit(&self) -> GridPos {
        self.board.goal()
    }

    pub fn player(&self) -> &Actor<GridPos> {
        &self.player
    }

    /// The thief, absent when the layout had no room for it.
    pub fn evader(&self) -> Option<&Actor<GridPos>> {
        self.evaders.get(ActorId(0))
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turns since the thief last showed itself.
    pub fn reveal_counter(&self) -> u8 {
        self.reveal_counter
    }

    pub fn is_blocked(&self, pos: GridPos) -> bool {
        self.board.is_blocked(pos)
    }

    pub fn can_player_move_to(&self, pos: GridPos) -> bool {
        self.phase.is_playing() && can_step(&self.board, &self.player, pos)
    }

    /// Full state, thief included even while hidden.
    pub fn snapshot(&self) -> HuntSnapshot {
        HuntSnapshot::from_game(self)
    }

    /// What the player is allowed to see.
    pub fn player_view(&self) -> HuntSnapshot {
        HuntSnapshot::masked(self)
    }

    pub fn move_player(&mut self, direction: Direction) -> Result<TurnOutcome> {
        self.move_player_to(self.player.position.step(direction))
    }

    /// Moves the player one cell, then lets the thief answer.
    pub fn move_player_to(&mut self, target: GridPos) -> Result<TurnOutcome> {
        self.check_playing()?;
        let target = validate_step(&self.board, &self.player, target)?;

        self.player.step_to(target);
        log::debug!("Player moved to {:?}", target);

        if self.evaders.occupant(target).is_some() {
            self.end_round(Phase::Won);
            return Ok(TurnOutcome::Won);
        }

        self.evader_turn();

        let exit = self.board.goal();
        if self.evaders.positions().any(|pos| pos == exit) {
            self.end_round(Phase::Lost);
            return Ok(TurnOutcome::Lost);
        }

        self.player.reset_moves(PLAYER_MOVES);
        self.evaders.reset_moves(EVADER_MOVES);
        self.turn += 1;
        log::debug!("Hunt turn {} begins", self.turn);

        Ok(TurnOutcome::TurnEnded)
    }

    /// Runs every timer due at `now` and returns the ones that took effect.
    pub fn tick(&mut self, now: Instant) -> Vec<HuntTimer> {
        let mut fired = Vec::new();
        for entry in self.timers.drain_due(now) {
            match entry.action {
                HuntTimer::HideEvader => {
                    if !self.phase.is_playing() || self.pending_hide != Some(entry.token) {
                        log::trace!("Dropping stale hide {:?}", entry.token);
                        continue;
                    }
                    self.pending_hide = None;
                    self.set_evaders_visible(false);
                    fired.push(entry.action);
                }
            }
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn evader_turn(&mut self) {
        // a reveal never outlasts the thief's next move
        if let Some(token) = self.pending_hide.take() {
            self.timers.cancel(token);
            self.set_evaders_visible(false);
        }

        let player = self.player.position;
        let exit = self.board.goal();
        for id in self.evaders.ids() {
            let evader = self.evaders[id];
            if !evader.has_moves() {
                continue;
            }
            match evade_step(&self.board, evader.position, player, exit) {
                Some(step) => {
                    self.evaders[id].step_to(step);
                    log::trace!("Thief {:?} moved {:?} -> {:?}", id, evader.position, step);
                }
                None => log::trace!("Thief {:?} is cornered at {:?}", id, evader.position),
            }
        }

        self.reveal_counter = self.reveal_counter.saturating_add(1);
        if self.reveal_counter >= self.config.reveal_every {
            self.reveal_counter = 0;
            self.set_evaders_visible(true);
            let token = self.timers.schedule(
                Instant::now() + self.config.reveal_duration,
                HuntTimer::HideEvader,
            );
            self.pending_hide = Some(token);
            log::debug!("Thief revealed at turn {}", self.turn);
        }
    }

    fn set_evaders_visible(&mut self, visible: bool) {
        for id in self.evaders.ids() {
            self.evaders[id].visible = visible;
        }
    }

    fn end_round(&mut self, phase: Phase) {
        self.phase = phase;
        self.timers.clear();
        self.pending_hide = None;
        log::debug!("Hunt round over at turn {}: {:?}", self.turn, phase);
    }

    fn check_playing(&self) -> Result<()> {
        if self.phase.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }
}

fn spawn(layout: &HuntLayout) -> (Actor<GridPos>, Actors<GridPos>) {
    let player = Actor::new(layout.player_start, PLAYER_MOVES);
    let evaders = layout
        .evader
        .iter()
        .map(|&pos| Actor::hidden(pos, EVADER_MOVES))
        .collect();
    (player, evaders)
}
