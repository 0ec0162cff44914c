//! Movement legality shared by both games.
//!
//! Occupancy is left to the callers: escape lets the player walk into a
//! chaser (that is the catch), hunt treats stepping onto the thief as the win,
//! and the AI filters cells held by other actors itself.

use crate::*;

/// Checks a single step of `actor` to `target`, returning the target when legal.
pub fn validate_step<B: Board>(
    board: &B,
    actor: &Actor<BoardCoord<B>>,
    target: BoardCoord<B>,
) -> Result<BoardCoord<B>> {
    if !actor.has_moves() {
        return Err(GameError::NoMovesLeft);
    }
    if !board.in_bounds(target) {
        return Err(GameError::OutOfBounds);
    }
    if !board.topology().is_adjacent(actor.position, target) {
        return Err(GameError::NotAdjacent);
    }
    if board.is_blocked(target) {
        return Err(GameError::Blocked);
    }
    Ok(target)
}

pub fn can_step<B: Board>(board: &B, actor: &Actor<BoardCoord<B>>, target: BoardCoord<B>) -> bool {
    validate_step(board, actor, target).is_ok()
}

/// In-bounds, unblocked neighbors of `from` in the topology's fixed order.
pub fn open_neighbors<B: Board>(board: &B, from: BoardCoord<B>) -> impl Iterator<Item = BoardCoord<B>> + '_ {
    board
        .topology()
        .neighbors(from)
        .into_iter()
        .filter(move |&coord| board.cell_at(coord).is_some_and(Cell::is_walkable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn hex_board() -> HexBoard {
        HexBoard::new(HexDisk::new(2), Hex::new(2, 0), [Hex::new(0, 1)]).unwrap()
    }

    #[test]
    fn legal_step() {
        let board = hex_board();
        let player = Actor::new(Hex::ORIGIN, 3);

        assert_eq!(validate_step(&board, &player, Hex::new(1, 0)), Ok(Hex::new(1, 0)));
        assert!(can_step(&board, &player, Hex::new(-1, 1)));
    }

    #[test]
    fn rejection_reasons() {
        let board = hex_board();
        let player = Actor::new(Hex::new(2, -1), 3);

        assert_eq!(validate_step(&board, &player, Hex::new(3, -1)), Err(GameError::OutOfBounds));
        assert_eq!(validate_step(&board, &player, Hex::new(0, 0)), Err(GameError::NotAdjacent));

        let player = Actor::new(Hex::ORIGIN, 3);
        assert_eq!(validate_step(&board, &player, Hex::new(0, 1)), Err(GameError::Blocked));

        let tired = Actor::new(Hex::ORIGIN, 0);
        assert_eq!(validate_step(&board, &tired, Hex::new(1, 0)), Err(GameError::NoMovesLeft));
    }

    #[test]
    fn diagonal_needs_eight_way() {
        let exit = GridPos::new(0, 0);
        let four = GridBoard::new(SquareGrid::new(5, Adjacency::Four), exit, []).unwrap();
        let eight = GridBoard::new(SquareGrid::new(5, Adjacency::Eight), exit, []).unwrap();
        let player = Actor::new(GridPos::new(1, 1), 1);

        assert_eq!(validate_step(&four, &player, GridPos::new(2, 2)), Err(GameError::NotAdjacent));
        assert!(can_step(&eight, &player, GridPos::new(2, 2)));
        assert!(can_step(&four, &player, GridPos::new(1, 0)));
    }

    #[test]
    fn open_neighbors_skip_walls_and_rim() {
        let board = hex_board();

        let around_origin: Vec<Hex> = open_neighbors(&board, Hex::ORIGIN).collect();
        assert_eq!(around_origin.len(), 5);
        assert!(!around_origin.contains(&Hex::new(0, 1)));

        let on_rim: Vec<Hex> = open_neighbors(&board, Hex::new(2, 0)).collect();
        assert_eq!(on_rim, [Hex::new(1, 0), Hex::new(2, -1), Hex::new(1, 1)]);
    }
}
