use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::*;

/// How an escape turn ends once the player has spent the move budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEnd {
    /// The host calls `end_turn`.
    Manual,
    /// The turn ends by itself `delay` after the last step, immediately when zero.
    Auto { delay: Duration },
}

impl Default for TurnEnd {
    fn default() -> Self {
        Self::Manual
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscapeConfig {
    pub radius: i32,
    pub chasers: u8,
    pub moves_per_turn: u8,
    pub turn_end: TurnEnd,
}

impl EscapeConfig {
    pub const MIN_RADIUS: i32 = 2;
    pub const MAX_RADIUS: i32 = 32;
    pub const MAX_CHASERS: u8 = 32;

    pub const fn new_unchecked(radius: i32, chasers: u8, moves_per_turn: u8) -> Self {
        Self {
            radius,
            chasers,
            moves_per_turn,
            turn_end: TurnEnd::Manual,
        }
    }

    pub fn new(radius: i32, chasers: u8, moves_per_turn: u8) -> Self {
        let radius = radius.clamp(Self::MIN_RADIUS, Self::MAX_RADIUS);
        let chasers = chasers.min(Self::MAX_CHASERS);
        let moves_per_turn = moves_per_turn.max(1);
        Self::new_unchecked(radius, chasers, moves_per_turn)
    }

    #[must_use]
    pub const fn with_turn_end(mut self, turn_end: TurnEnd) -> Self {
        self.turn_end = turn_end;
        self
    }

    /// Same settings pulled into the supported ranges.
    ///
    /// Fields are public and deserializable, so consumers call this instead of
    /// trusting that the config came from [`EscapeConfig::new`].
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self::new(self.radius, self.chasers, self.moves_per_turn).with_turn_end(self.turn_end)
    }

    pub const fn disk(&self) -> HexDisk {
        HexDisk::new(self.radius)
    }
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self::new_unchecked(4, 3, 3)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HuntConfig {
    pub size: i32,
    pub adjacency: Adjacency,
    /// Defaults to the center of the grid.
    pub player_start: Option<GridPos>,
    pub reveal_every: u8,
    pub reveal_duration: Duration,
}

impl HuntConfig {
    pub const MIN_SIZE: i32 = 4;
    pub const MAX_SIZE: i32 = 64;
    pub const REVEAL_EVERY: u8 = 3;
    pub const REVEAL_DURATION: Duration = Duration::from_secs(1);

    pub const fn new_unchecked(size: i32, adjacency: Adjacency) -> Self {
        Self {
            size,
            adjacency,
            player_start: None,
            reveal_every: Self::REVEAL_EVERY,
            reveal_duration: Self::REVEAL_DURATION,
        }
    }

    pub fn new(size: i32, adjacency: Adjacency) -> Self {
        Self::new_unchecked(size.clamp(Self::MIN_SIZE, Self::MAX_SIZE), adjacency)
    }

    /// Out-of-range starts are pulled onto the board.
    #[must_use]
    pub fn with_player_start(mut self, start: GridPos) -> Self {
        let last = self.size - 1;
        self.player_start = Some(GridPos::new(start.row.clamp(0, last), start.col.clamp(0, last)));
        self
    }

    #[must_use]
    pub fn with_reveal(mut self, every: u8, duration: Duration) -> Self {
        self.reveal_every = every.max(1);
        self.reveal_duration = duration;
        self
    }

    /// Same settings pulled into the supported ranges, start included.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let config = Self::new(self.size, self.adjacency).with_reveal(self.reveal_every, self.reveal_duration);
        match self.player_start {
            Some(start) => config.with_player_start(start),
            None => config,
        }
    }

    pub const fn grid(&self) -> SquareGrid {
        SquareGrid::new(self.size, self.adjacency)
    }

    pub fn start(&self) -> GridPos {
        self.player_start.unwrap_or_else(|| self.grid().center())
    }
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self::new_unchecked(7, Adjacency::Eight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_config_clamps() {
        let config = EscapeConfig::new(0, 200, 0);

        assert_eq!(config.radius, EscapeConfig::MIN_RADIUS);
        assert_eq!(config.chasers, EscapeConfig::MAX_CHASERS);
        assert_eq!(config.moves_per_turn, 1);
        assert_eq!(config.turn_end, TurnEnd::Manual);
        assert_eq!(EscapeConfig::new(99, 1, 3).radius, EscapeConfig::MAX_RADIUS);
    }

    #[test]
    fn hunt_config_defaults_to_center_start() {
        let config = HuntConfig::new(5, Adjacency::Four);

        assert_eq!(config.start(), GridPos::new(2, 2));
        assert_eq!(config.reveal_every, 3);
        assert_eq!(HuntConfig::new(1, Adjacency::Eight).size, HuntConfig::MIN_SIZE);
        assert_eq!(HuntConfig::default().size, 7);
        assert_eq!(HuntConfig::default().start(), GridPos::new(3, 3));
    }

    #[test]
    fn hunt_config_pulls_start_onto_board() {
        let config = HuntConfig::new(5, Adjacency::Eight)
            .with_player_start(GridPos::new(-3, 9))
            .with_reveal(0, Duration::from_millis(250));

        assert_eq!(config.start(), GridPos::new(0, 4));
        assert_eq!(config.reveal_every, 1);
        assert_eq!(config.reveal_duration, Duration::from_millis(250));
    }

    #[test]
    fn clamped_repairs_raw_fields() {
        let escape = EscapeConfig::new_unchecked(0, 99, 0).with_turn_end(TurnEnd::Auto {
            delay: Duration::ZERO,
        });
        let clamped = escape.clamped();
        assert_eq!(clamped.radius, EscapeConfig::MIN_RADIUS);
        assert_eq!(clamped.chasers, EscapeConfig::MAX_CHASERS);
        assert_eq!(clamped.moves_per_turn, 1);
        assert_eq!(clamped.turn_end, escape.turn_end);
        assert_eq!(EscapeConfig::default().clamped(), EscapeConfig::default());

        let mut hunt = HuntConfig::new_unchecked(0, Adjacency::Four);
        hunt.player_start = Some(GridPos::new(10, -1));
        hunt.reveal_every = 0;
        let clamped = hunt.clamped();
        assert_eq!(clamped.size, HuntConfig::MIN_SIZE);
        assert_eq!(clamped.adjacency, Adjacency::Four);
        assert_eq!(clamped.start(), GridPos::new(3, 0));
        assert_eq!(clamped.reveal_every, 1);
        assert_eq!(HuntConfig::default().clamped(), HuntConfig::default());
    }

    #[test]
    fn config_serde() {
        let config = EscapeConfig::default().with_turn_end(TurnEnd::Auto {
            delay: Duration::from_millis(300),
        });

        let json = serde_json::to_string(&config).unwrap();
        let restored: EscapeConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
