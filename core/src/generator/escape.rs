use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::*;
use crate::*;

/// Everything `start_game` regenerates for an escape round.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeLayout {
    pub board: HexBoard,
    pub player_start: Hex,
    pub chasers: Vec<Hex>,
}

impl EscapeLayout {
    /// Builds a hand-made layout, checking that every actor stands on its own walkable cell.
    pub fn from_parts(board: HexBoard, player_start: Hex, chasers: Vec<Hex>) -> Result<Self> {
        check_standing(&board, player_start)?;
        if board.goal() == player_start {
            return Err(GameError::GoalOnStart);
        }

        for (i, &chaser) in chasers.iter().enumerate() {
            check_standing(&board, chaser)?;
            if chaser == player_start || chasers[..i].contains(&chaser) {
                return Err(GameError::Occupied);
            }
        }

        Ok(Self {
            board,
            player_start,
            chasers,
        })
    }
}

/// Random escape layout: door on the rim, walls anywhere else, chasers away from the player.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomEscapeGenerator {
    seed: u64,
}

impl RandomEscapeGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomEscapeGenerator {
    type Config = EscapeConfig;
    type Layout = EscapeLayout;

    fn generate(self, config: &EscapeConfig) -> EscapeLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let config = config.clamped();
        let disk = config.disk();
        let start = Hex::ORIGIN;
        let cells = disk.cells();

        let rim: Vec<Hex> = cells
            .iter()
            .copied()
            .filter(|&hex| hex != start && disk.is_edge(hex))
            .collect();
        // the rim is never empty for radius >= 1
        let goal = rim
            .choose(&mut rng)
            .copied()
            .unwrap_or(Hex::new(config.radius, 0));

        let candidates: Vec<Hex> = cells
            .iter()
            .copied()
            .filter(|&hex| hex != start && hex != goal)
            .collect();
        let blocked = sample_blocked(&mut rng, &candidates, blocked_target(cells.len() - 1));

        let board = HexBoard::new(disk, goal, blocked.iter().copied())
            .expect("generated cells should lie within the disk");

        let pool: Vec<Hex> = cells
            .iter()
            .copied()
            .filter(|&hex| !board.is_blocked(hex) && hex.distance_to(start) > 1)
            .collect();
        let chasers = place_actors(&mut rng, pool, config.chasers.into());

        log::debug!(
            "Generated escape layout, seed: {}, goal: {:?}, blocked: {}, chasers: {:?}",
            self.seed,
            goal,
            blocked.len(),
            chasers
        );

        EscapeLayout {
            board,
            player_start: start,
            chasers,
        }
    }
}
