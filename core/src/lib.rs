#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use actor::*;
pub use ai::*;
pub use board::*;
pub use config::*;
pub use error::*;
pub use escape::*;
pub use generator::*;
pub use hunt::*;
pub use observation::*;
pub use rules::*;
pub use schedule::*;
pub use tile::*;
pub use types::*;

mod actor;
mod ai;
mod board;
mod config;
mod error;
mod escape;
mod generator;
mod hunt;
mod observation;
mod rules;
mod schedule;
mod tile;
mod types;

/// Valid transitions:
/// - Menu -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - Won/Lost -> Menu
///
/// `start_game` enters Playing from any phase, discarding the previous round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Menu
    }
}

/// Result of an accepted player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The player moved and the turn goes on.
    Moved,
    /// Every actor moved and a new turn began.
    TurnEnded,
    Won,
    Lost,
}

impl TurnOutcome {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn phase(self) -> Phase {
        match self {
            Self::Moved | Self::TurnEnded => Phase::Playing,
            Self::Won => Phase::Won,
            Self::Lost => Phase::Lost,
        }
    }
}
