use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorView<C> {
    pub position: C,
    pub moves_left: u8,
    pub visible: bool,
}

impl<C: Copy> From<&Actor<C>> for ActorView<C> {
    fn from(actor: &Actor<C>) -> Self {
        Self {
            position: actor.position,
            moves_left: actor.moves_left,
            visible: actor.visible,
        }
    }
}

/// Render-ready copy of an escape round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscapeSnapshot {
    pub phase: Phase,
    pub turn: u32,
    pub radius: i32,
    pub goal: Hex,
    pub blocked: Vec<Hex>,
    pub player: ActorView<Hex>,
    /// Indexed by [`ActorId`].
    pub chasers: Vec<ActorView<Hex>>,
    pub caught_by: Option<ActorId>,
}

impl EscapeSnapshot {
    pub fn from_game(game: &EscapeGame) -> Self {
        let board = game.board();
        let blocked = board
            .iter_cells()
            .into_iter()
            .filter(|(_, cell)| cell.is_blocked())
            .map(|(hex, _)| hex)
            .collect();

        Self {
            phase: game.phase(),
            turn: game.turn(),
            radius: board.radius(),
            goal: board.goal(),
            blocked,
            player: game.player().into(),
            chasers: game.chasers().iter().map(|(_, chaser)| chaser.into()).collect(),
            caught_by: game.caught_by(),
        }
    }
}

/// Render-ready copy of a hunt round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HuntSnapshot {
    pub phase: Phase,
    pub turn: u32,
    pub size: i32,
    pub adjacency: Adjacency,
    pub exit: GridPos,
    pub cells: Array2<Cell>,
    pub player: ActorView<GridPos>,
    pub evader: Option<ActorView<GridPos>>,
    pub reveal_counter: u8,
}

impl HuntSnapshot {
    pub fn from_game(game: &HuntGame) -> Self {
        let board = game.board();
        Self {
            phase: game.phase(),
            turn: game.turn(),
            size: board.size(),
            adjacency: board.adjacency(),
            exit: board.goal(),
            cells: board.cells().clone(),
            player: game.player().into(),
            evader: game.evader().map(ActorView::from),
            reveal_counter: game.reveal_counter(),
        }
    }

    /// Like [`HuntSnapshot::from_game`] but drops the thief while it is hidden.
    ///
    /// Once the round is over the thief is always shown.
    pub fn masked(game: &HuntGame) -> Self {
        let mut snapshot = Self::from_game(game);
        if !game.phase().is_finished() {
            snapshot.evader = snapshot.evader.filter(|evader| evader.visible);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn escape_snapshot_lists_walls_and_chasers() {
        let config = EscapeConfig::new(2, 2, 3);
        let board = HexBoard::new(config.disk(), Hex::new(2, 0), [Hex::new(0, 1), Hex::new(-1, 0)]).unwrap();
        let layout = EscapeLayout::from_parts(board, Hex::ORIGIN, vec![Hex::new(-2, 2), Hex::new(0, -2)]).unwrap();
        let mut game = EscapeGame::with_seed(config, 0);
        game.start_with_layout(layout);

        let snapshot = game.snapshot();

        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.radius, 2);
        assert_eq!(snapshot.blocked.len(), 2);
        assert!(snapshot.blocked.contains(&Hex::new(-1, 0)));
        assert_eq!(snapshot.chasers[1].position, Hex::new(0, -2));
        assert_eq!(snapshot.player.moves_left, 3);
        assert_eq!(snapshot.caught_by, None);
    }

    #[test]
    fn masked_view_hides_the_thief() {
        let config = HuntConfig::new(5, Adjacency::Eight);
        let board = GridBoard::new(config.grid(), GridPos::new(0, 0), []).unwrap();
        let layout = HuntLayout::from_parts(board, GridPos::new(4, 4), Some(GridPos::new(1, 1))).unwrap();
        let mut game = HuntGame::with_seed(config, 0);
        game.start_with_layout(layout);

        assert!(game.player_view().evader.is_none());
        assert_eq!(game.snapshot().evader.unwrap().position, GridPos::new(1, 1));
        assert_eq!(game.snapshot().cells[[0, 0]], Cell::Goal);

        // the thief walks out and is shown on the final board
        game.move_player_to(GridPos::new(3, 3)).unwrap();
        assert_eq!(game.phase(), Phase::Lost);
        assert_eq!(game.player_view().evader.unwrap().position, GridPos::new(0, 0));
    }

    #[test]
    fn snapshot_serde() {
        let mut game = EscapeGame::with_seed(EscapeConfig::default(), 5);
        game.start_game();
        let snapshot = game.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: EscapeSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, restored);
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}
