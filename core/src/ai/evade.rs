use crate::*;

/// Within this distance of the player the thief stops heading for the exit and runs.
pub const DANGER_RADIUS: u32 = 3;
pub const FLEE_WEIGHT: i32 = 100;
pub const EXIT_WEIGHT: i32 = 10;

/// Score of moving from distances `(dp, de)` to `(new_dp, new_de)`, higher is better.
///
/// `dp` is the distance to the player and `de` the distance to the exit. The
/// exit gain is always added once more so that equally safe cells lean
/// towards the exit.
pub const fn evasion_score(dp: u32, de: u32, new_dp: u32, new_de: u32) -> i32 {
    let exit_gain = de as i32 - new_de as i32;
    let base = if dp <= DANGER_RADIUS {
        FLEE_WEIGHT * (new_dp as i32 - dp as i32)
    } else {
        EXIT_WEIGHT * exit_gain
    };
    base + exit_gain
}

/// Best neighbor for a thief at `from`, or `None` when it cannot move.
///
/// The player's own cell is never a candidate. Ties keep the first neighbor
/// found.
pub fn evade_step<B: Board>(
    board: &B,
    from: BoardCoord<B>,
    player: BoardCoord<B>,
    exit: BoardCoord<B>,
) -> Option<BoardCoord<B>> {
    let topology = board.topology();
    let dp = topology.distance(from, player);
    let de = topology.distance(from, exit);

    let mut best: Option<(BoardCoord<B>, i32)> = None;
    for coord in open_neighbors(board, from).filter(|&coord| coord != player) {
        let score = evasion_score(dp, de, topology.distance(coord, player), topology.distance(coord, exit));
        log::trace!("Evasion candidate {:?} scored {}", coord, score);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((coord, score));
        }
    }

    best.map(|(coord, _)| coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: i32, adjacency: Adjacency, exit: GridPos, blocked: &[GridPos]) -> GridBoard {
        GridBoard::new(SquareGrid::new(size, adjacency), exit, blocked.iter().copied()).unwrap()
    }

    #[test]
    fn score_branches() {
        // in danger: distance to the player dominates
        assert_eq!(evasion_score(2, 4, 3, 5), 99);
        assert_eq!(evasion_score(2, 4, 1, 3), -99);
        // safe: only the exit matters
        assert_eq!(evasion_score(5, 4, 4, 3), 11);
        assert_eq!(evasion_score(5, 4, 6, 5), -11);
    }

    #[test]
    fn heads_for_exit_when_safe() {
        let board = grid(9, Adjacency::Eight, GridPos::new(0, 0), &[]);

        let step = evade_step(&board, GridPos::new(4, 4), GridPos::new(8, 8), GridPos::new(0, 0));
        assert_eq!(step, Some(GridPos::new(3, 3)));

        let step = evade_step(&board, GridPos::new(1, 1), GridPos::new(8, 8), GridPos::new(0, 0));
        assert_eq!(step, Some(GridPos::new(0, 0)));
    }

    #[test]
    fn flees_when_player_is_near() {
        let exit = GridPos::new(0, 0);
        let board = grid(5, Adjacency::Four, exit, &[]);

        let step = evade_step(&board, GridPos::new(2, 2), GridPos::new(1, 1), exit);

        assert_eq!(step, Some(GridPos::new(2, 3)));
    }

    #[test]
    fn flight_leans_towards_exit() {
        let exit = GridPos::new(0, 0);
        let board = grid(7, Adjacency::Eight, exit, &[]);

        let step = evade_step(&board, GridPos::new(3, 3), GridPos::new(3, 5), exit);

        assert_eq!(step, Some(GridPos::new(2, 2)));
    }

    #[test]
    fn cornered_thief_takes_the_only_step() {
        let exit = GridPos::new(4, 0);
        let player = GridPos::new(0, 2);

        let board = grid(5, Adjacency::Four, exit, &[]);
        assert_eq!(evade_step(&board, GridPos::new(0, 4), player, exit), Some(GridPos::new(1, 4)));

        let board = grid(5, Adjacency::Four, exit, &[GridPos::new(1, 4)]);
        assert_eq!(evade_step(&board, GridPos::new(0, 4), player, exit), Some(GridPos::new(0, 3)));
    }

    #[test]
    fn never_steps_onto_player() {
        let exit = GridPos::new(4, 0);
        let board = grid(5, Adjacency::Four, exit, &[GridPos::new(1, 4)]);

        assert_eq!(evade_step(&board, GridPos::new(0, 4), GridPos::new(0, 3), exit), None);
    }

    #[test]
    fn never_closes_in_while_in_danger() {
        let exit = GridPos::new(0, 0);
        for adjacency in [Adjacency::Four, Adjacency::Eight] {
            let board = grid(7, adjacency, exit, &[GridPos::new(2, 4)]);
            let topology = board.topology();
            for player in topology.cells() {
                for from in topology.cells() {
                    if from == player || board.is_blocked(from) || board.is_blocked(player) {
                        continue;
                    }
                    let dp = topology.distance(from, player);
                    if dp > DANGER_RADIUS {
                        continue;
                    }
                    let Some(step) = evade_step(&board, from, player, exit) else {
                        continue;
                    };
                    let has_alternative = open_neighbors(&board, from)
                        .any(|coord| coord != player && topology.distance(coord, player) >= dp);
                    if has_alternative {
                        assert!(topology.distance(step, player) >= dp, "{from:?} -> {step:?} vs {player:?}");
                    }
                }
            }
        }
    }
}
