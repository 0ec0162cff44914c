use alloc::vec::Vec;
use core::hash::Hash;
use hashbrown::HashSet;
use rand::Rng;

use crate::*;

pub use escape::*;
pub use hunt::*;

mod escape;
mod hunt;

pub trait LayoutGenerator {
    type Config;
    type Layout;

    fn generate(self, config: &Self::Config) -> Self::Layout;
}

pub const MIN_BLOCKED: usize = 3;

/// How many cells a board of `open_count` open cells tries to block.
pub const fn blocked_target(open_count: usize) -> usize {
    let target = open_count / 6;
    if target > MIN_BLOCKED { target } else { MIN_BLOCKED }
}

/// Checks that an actor can stand on `coord`.
fn check_standing<B: Board>(board: &B, coord: BoardCoord<B>) -> Result<()> {
    match board.cell_at(coord) {
        None => Err(GameError::OutOfBounds),
        Some(Cell::Blocked) => Err(GameError::Blocked),
        Some(_) => Ok(()),
    }
}

/// Samples up to `target` distinct cells, fewer when the candidates run out.
fn sample_blocked<C, R>(rng: &mut R, candidates: &[C], target: usize) -> Vec<C>
where
    C: Copy + Eq + Hash,
    R: Rng,
{
    let mut seen = HashSet::with_capacity(target);
    let mut blocked = Vec::with_capacity(target);

    while blocked.len() < target && seen.len() < candidates.len() {
        let pick = candidates[rng.random_range(0..candidates.len())];
        if seen.insert(pick) {
            blocked.push(pick);
        }
    }

    if blocked.len() < target {
        log::warn!(
            "Not enough free cells to block, requested {} but only placed {}",
            target,
            blocked.len()
        );
    }
    blocked
}

/// Draws `count` distinct cells from `pool`, skipping placements once it is empty.
fn place_actors<C, R>(rng: &mut R, mut pool: Vec<C>, count: usize) -> Vec<C>
where
    R: Rng,
{
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        if pool.is_empty() {
            log::warn!(
                "No free cell left for actor placement, requested {} but only placed {}",
                count,
                placed.len()
            );
            break;
        }
        let index = rng.random_range(0..pool.len());
        placed.push(pool.swap_remove(index));
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn blocked_target_has_a_floor() {
        assert_eq!(blocked_target(0), 3);
        assert_eq!(blocked_target(18), 3);
        assert_eq!(blocked_target(60), 10);
    }

    #[test]
    fn sampling_stops_when_candidates_exhaust() {
        let mut rng = SmallRng::seed_from_u64(7);

        let blocked = sample_blocked(&mut rng, &[1, 2], 5);
        assert_eq!(blocked.len(), 2);

        let blocked = sample_blocked::<i32, _>(&mut rng, &[], 5);
        assert!(blocked.is_empty());
    }

    #[test]
    fn sampling_yields_distinct_cells() {
        let mut rng = SmallRng::seed_from_u64(11);
        let candidates: Vec<i32> = (0..50).collect();

        let mut blocked = sample_blocked(&mut rng, &candidates, 20);
        assert_eq!(blocked.len(), 20);

        blocked.sort_unstable();
        blocked.dedup();
        assert_eq!(blocked.len(), 20);
    }

    #[test]
    fn placement_accepts_shortfall() {
        let mut rng = SmallRng::seed_from_u64(3);

        let placed = place_actors(&mut rng, alloc::vec![10, 20], 4);

        assert_eq!(placed.len(), 2);
        assert!(placed.contains(&10) && placed.contains(&20));
    }
}
