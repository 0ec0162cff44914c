use serde::{Deserialize, Serialize};

/// Classification of a single board cell, fixed for the lifetime of a round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Open,
    Blocked,
    /// The door in escape, the exit in hunt.
    Goal,
}

impl Cell {
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    pub const fn is_goal(self) -> bool {
        matches!(self, Self::Goal)
    }

    pub const fn is_walkable(self) -> bool {
        !self.is_blocked()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Open
    }
}
