use crate::*;

/// Neighbor of `from` closest to `target`, skipping cells for which `is_occupied` holds.
///
/// The target cell itself is a valid candidate, which is how a chaser catches
/// the player. Returns `None` when every neighbor is walled, off the board or
/// taken.
pub fn pursue_step<B, F>(board: &B, from: BoardCoord<B>, target: BoardCoord<B>, is_occupied: F) -> Option<BoardCoord<B>>
where
    B: Board,
    F: Fn(BoardCoord<B>) -> bool,
{
    let topology = board.topology();
    let best = open_neighbors(board, from)
        .filter(|&coord| !is_occupied(coord))
        .min_by_key(|&coord| topology.distance(coord, target));

    log::trace!("Pursuit from {:?} towards {:?} picked {:?}", from, target, best);
    best
}
