//! Scripted players driving a round from start to finish.

use pursuit_core::*;
use web_time::Instant;

#[derive(Copy, Clone, Debug)]
pub struct Pace {
    /// Sleep until each deadline instead of jumping straight to it.
    pub realtime: bool,
    pub max_turns: u32,
}

impl Pace {
    fn wait_until(self, deadline: Instant) -> Instant {
        if self.realtime {
            std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        }
        deadline
    }
}

/// Plays one escape round and returns the phase it stopped in.
///
/// The round is abandoned in `Playing` once `max_turns` is exceeded.
pub fn play_escape(game: &mut EscapeGame, pace: Pace) -> Result<Phase> {
    game.start_game();

    while game.phase().is_playing() && game.turn() <= pace.max_turns {
        let outcome = match escape_step(game) {
            Some(target) => game.move_player_to(target),
            None => game.end_turn(),
        };
        let outcome = match outcome {
            // every way out is held by a chaser
            Err(GameError::MovesRemaining) => {
                let target = open_neighbors(game.board(), game.player().position)
                    .next()
                    .ok_or(GameError::MovesRemaining)?;
                game.move_player_to(target)
            }
            other => other,
        }?;
        log::trace!("Escape turn {}: {:?}", game.turn(), outcome);
        if outcome.is_final() {
            break;
        }

        if let Some(deadline) = game.next_deadline() {
            game.tick(pace.wait_until(deadline));
        }
    }

    Ok(game.phase())
}

/// Next step towards the door, avoiding chasers.
///
/// Next to the door the player shuffles so that the budget runs out while
/// standing on it.
fn escape_step(game: &EscapeGame) -> Option<Hex> {
    let player = game.player();
    if !player.has_moves() {
        return None;
    }

    let board = game.board();
    let disk = board.topology();
    let goal = board.goal();
    let chasers = game.chasers();
    let is_free = |hex: Hex| chasers.occupant(hex).is_none();
    let mut free_neighbors = open_neighbors(board, player.position).filter(|&hex| is_free(hex));

    if player.position == goal {
        return free_neighbors.next();
    }
    if disk.is_adjacent(player.position, goal) {
        let sidestep = free_neighbors.find(|&hex| hex != goal && disk.is_adjacent(hex, goal));
        if player.moves_left % 2 == 0 {
            if let Some(hex) = sidestep {
                return Some(hex);
            }
        }
        if is_free(goal) {
            return Some(goal);
        }
    }

    pursue_step(board, player.position, goal, |hex| !is_free(hex))
}

/// Plays one hunt round and returns the phase it stopped in.
///
/// The player chases the last place the thief was seen, or guards the exit
/// while it has never been spotted.
pub fn play_hunt(game: &mut HuntGame, pace: Pace) -> Result<Phase> {
    game.start_game();
    let mut last_seen = None;

    while game.phase().is_playing() && game.turn() <= pace.max_turns {
        let player = game.player().position;
        if last_seen == Some(player) {
            last_seen = None;
        }

        let target = last_seen.unwrap_or(game.exit());
        let Some(step) = pursue_step(game.board(), player, target, |_| false) else {
            log::warn!("Player is walled in at {:?}", player);
            break;
        };
        let outcome = game.move_player_to(step)?;
        log::trace!("Hunt turn {}: {:?}", game.turn(), outcome);
        if outcome.is_final() {
            break;
        }

        if let Some(evader) = game.player_view().evader {
            log::debug!("Thief spotted at {:?}", evader.position);
            last_seen = Some(evader.position);
        }

        if let Some(deadline) = game.next_deadline() {
            game.tick(pace.wait_until(deadline));
        }
    }

    Ok(game.phase())
}
