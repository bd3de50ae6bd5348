//! Entity arena
//!
//! The single allocator for interchange records. Identifiers start at 1 and
//! increase strictly in allocation order; a record may only reference
//! identifiers allocated before it, so the emitted stream never contains a
//! forward reference.

use crate::entity::Entity;
use std::fmt;

/// Identifier of an allocated record (`#n` in the output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(usize);

impl EntityId {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only record store.
#[derive(Debug, Default)]
pub struct EntityArena {
    entities: Vec<Entity>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier and append `entity` under it.
    ///
    /// # Panics
    /// If `entity` references an identifier not yet allocated by this arena.
    pub fn alloc(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() + 1);
        for reference in entity.references() {
            assert!(
                reference < id,
                "entity {} references {} which has not been allocated",
                id,
                reference
            );
        }
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        id.0.checked_sub(1).and_then(|index| self.entities.get(index))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Records in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (EntityId(index + 1), entity))
    }

    /// Count records whose rendered keyword matches `keyword` exactly
    pub fn count(&self, keyword: &str) -> usize {
        self.entities
            .iter()
            .filter(|entity| {
                let body = entity.render();
                body.strip_prefix(keyword)
                    .is_some_and(|rest| rest.starts_with('('))
            })
            .count()
    }
}
