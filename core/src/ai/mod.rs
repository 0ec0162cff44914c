//! Greedy move choice for non-player actors.
//!
//! Both strategies score every open neighbor once and keep the first best one
//! in neighbor enumeration order, so the outcome is fully deterministic.

pub use chase::*;
pub use evade::*;

mod chase;
mod evade;
