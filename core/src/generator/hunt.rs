use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::*;

/// Everything `start_game` regenerates for a hunt round.
#[derive(Clone, Debug, PartialEq)]
pub struct HuntLayout {
    pub board: GridBoard,
    pub player_start: GridPos,
    /// `None` when no cell was left for the thief.
    pub evader: Option<GridPos>,
}

impl HuntLayout {
    pub fn from_parts(board: GridBoard, player_start: GridPos, evader: Option<GridPos>) -> Result<Self> {
        check_standing(&board, player_start)?;
        if board.goal() == player_start {
            return Err(GameError::GoalOnStart);
        }

        if let Some(evader) = evader {
            check_standing(&board, evader)?;
            if evader == player_start {
                return Err(GameError::Occupied);
            }
        }

        Ok(Self {
            board,
            player_start,
            evader,
        })
    }
}

/// Random hunt layout: exit in a corner, walls anywhere else, the thief out of reach.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomHuntGenerator {
    seed: u64,
}

impl RandomHuntGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomHuntGenerator {
    type Config = HuntConfig;
    type Layout = HuntLayout;

    fn generate(self, config: &HuntConfig) -> HuntLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let config = config.clamped();
        let grid = config.grid();
        let start = config.start();
        let cells = grid.cells();

        let corners: Vec<GridPos> = grid
            .corners()
            .into_iter()
            .filter(|&corner| corner != start)
            .collect();
        // at most one corner can hold the start
        let exit = corners
            .choose(&mut rng)
            .copied()
            .unwrap_or(GridPos::new(0, 0));

        let candidates: Vec<GridPos> = cells
            .iter()
            .copied()
            .filter(|&pos| pos != start && pos != exit)
            .collect();
        let blocked = sample_blocked(&mut rng, &candidates, blocked_target(cells.len() - 1));

        let board = GridBoard::new(grid, exit, blocked.iter().copied())
            .expect("generated cells should lie within the grid");

        let pool: Vec<GridPos> = cells
            .iter()
            .copied()
            .filter(|&pos| pos != exit && !board.is_blocked(pos) && grid.distance(pos, start) > 1)
            .collect();
        let evader = place_actors(&mut rng, pool, 1).into_iter().next();

        log::debug!(
            "Generated hunt layout, seed: {}, exit: {:?}, blocked: {}, evader: {:?}",
            self.seed,
            exit,
            blocked.len(),
            evader
        );

        HuntLayout {
            board,
            player_start: start,
            evader,
        }
    }
}
