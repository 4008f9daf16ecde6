/// Bookkeeping store for every live actor.
///
/// The registry is the only owner of actor data.  The formation keeps
/// `ActorId`s into it, so removing an actor here is the single point of
/// truth; any id left behind elsewhere just fails to resolve.

use std::collections::BTreeMap;

use crate::entities::{Actor, ActorId, RenderItem};

#[derive(Clone, Debug, Default)]
pub struct ActorRegistry {
    next_id: u64,
    // BTreeMap keeps spawn order, which is also render order.
    slots: BTreeMap<ActorId, Actor>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, actor);
        id
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slots.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slots.get_mut(&id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        self.slots.remove(&id)
    }

    /// Put back an actor previously taken out with `remove` under its old id.
    pub fn restore(&mut self, id: ActorId, actor: Actor) {
        self.slots.insert(id, actor);
    }

    /// Snapshot of the current ids in spawn order.
    pub fn ids(&self) -> Vec<ActorId> {
        self.slots.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.slots.iter().map(|(id, a)| (*id, a))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every actor.  Ids keep counting so old handles stay invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Visible actors with a frame, in spawn order.
    pub fn render(&self) -> Vec<RenderItem<'_>> {
        self.slots
            .values()
            .filter(|a| a.sprite.visible)
            .filter_map(|a| {
                a.sprite.frame().map(|frame| RenderItem {
                    x: a.sprite.x,
                    y: a.sprite.y,
                    frame,
                    tint: a.tint(),
                })
            })
            .collect()
    }
}
