use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

/// Stable handle of a non-player actor within one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u16);

impl ActorId {
    /// Most actors one arena can address.
    pub const CAPACITY: usize = u16::MAX as usize + 1;

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor<C> {
    pub position: C,
    pub moves_left: u8,
    pub visible: bool,
    pub active: bool,
}

impl<C: Copy> Actor<C> {
    pub const fn new(position: C, moves: u8) -> Self {
        Self {
            position,
            moves_left: moves,
            visible: true,
            active: true,
        }
    }

    pub const fn hidden(position: C, moves: u8) -> Self {
        Self {
            visible: false,
            ..Self::new(position, moves)
        }
    }

    pub const fn has_moves(&self) -> bool {
        self.active && self.moves_left > 0
    }

    /// Moves to `target` and spends one step of the budget.
    pub fn step_to(&mut self, target: C) {
        self.position = target;
        self.moves_left = self.moves_left.saturating_sub(1);
    }

    pub fn reset_moves(&mut self, moves: u8) {
        self.moves_left = moves;
    }
}

/// Arena of non-player actors, addressed by [`ActorId`] in insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actors<C> {
    actors: Vec<Actor<C>>,
}

impl<C: Copy + PartialEq> Actors<C> {
    pub const fn new() -> Self {
        Self { actors: Vec::new() }
    }

    /// Appends `actor` and returns its id.
    ///
    /// Holding more than [`ActorId::CAPACITY`] actors is a logic error.
    pub fn push(&mut self, actor: Actor<C>) -> ActorId {
        debug_assert!(
            self.actors.len() < ActorId::CAPACITY,
            "actor arena is full at {} actors",
            ActorId::CAPACITY
        );
        let id = ActorId(self.actors.len() as u16);
        self.actors.push(actor);
        id
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor<C>> {
        self.actors.get(id.index())
    }

    /// Ids in processing order.
    pub fn ids(&self) -> impl Iterator<Item = ActorId> + use<C> {
        (0..self.actors.len()).map(|i| ActorId(i as u16))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor<C>)> {
        self.actors
            .iter()
            .enumerate()
            .map(|(i, actor)| (ActorId(i as u16), actor))
    }

    pub fn positions(&self) -> impl Iterator<Item = C> + '_ {
        self.actors
            .iter()
            .filter(|actor| actor.active)
            .map(|actor| actor.position)
    }

    /// First active actor standing on `coord`.
    pub fn occupant(&self, coord: C) -> Option<ActorId> {
        self.iter()
            .find(|(_, actor)| actor.active && actor.position == coord)
            .map(|(id, _)| id)
    }

    pub fn reset_moves(&mut self, moves: u8) {
        for actor in &mut self.actors {
            actor.reset_moves(moves);
        }
    }
}

impl<C: Copy + PartialEq> Default for Actors<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Copy + PartialEq> FromIterator<Actor<C>> for Actors<C> {
    fn from_iter<I: IntoIterator<Item = Actor<C>>>(iter: I) -> Self {
        let mut actors = Self::new();
        for actor in iter {
            actors.push(actor);
        }
        actors
    }
}

impl<C> Index<ActorId> for Actors<C> {
    type Output = Actor<C>;

    fn index(&self, id: ActorId) -> &Self::Output {
        &self.actors[id.index()]
    }
}

impl<C> IndexMut<ActorId> for Actors<C> {
    fn index_mut(&mut self, id: ActorId) -> &mut Self::Output {
        &mut self.actors[id.index()]
    }
}
