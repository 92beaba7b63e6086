//! Identity-indexed entity/component store.
//!
//! A [`Registry`] maps arena-local [`Entity`] handles to a fixed set of
//! optional component records, one sparse-set column per component type.
//! Each entity additionally carries a stable UUID — the only identity
//! persisted across sessions — with a reverse UUID → handle index for
//! lookups from scene documents and script entity references.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use uuid::Uuid;

use crate::components::{Name, Transform};
use crate::entity::{Entity, EntityAllocator};
use crate::sparse_set::SparseSet;

/// Marker trait for types storable as component columns.
///
/// Implemented for the engine's fixed component schema in
/// [`components`](crate::components); the registry is not a
/// general-purpose storage layer.
pub trait Component: 'static {}

/// Type-erased view of a component column, enough for entity destruction
/// and scene clearing without knowing the concrete component type.
trait ErasedColumn {
    fn remove_index(&mut self, entity_index: u32);
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedColumn for SparseSet<T> {
    fn remove_index(&mut self, entity_index: u32) {
        self.remove(entity_index);
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The entity/component store.
///
/// Every entity carries a mandatory [`Name`] and [`Transform`] from the
/// moment it is created; all other components are optional. The registry
/// assumes exclusive ownership by the calling thread — there is no
/// internal locking.
#[derive(Default)]
pub struct Registry {
    allocator: EntityAllocator,
    /// Per-slot UUID, parallel to the allocator slots.
    uuids: Vec<Uuid>,
    by_uuid: HashMap<Uuid, Entity>,
    columns: HashMap<TypeId, Box<dyn ErasedColumn>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // --- entity lifecycle ---

    /// Creates an entity with a freshly generated UUID and the mandatory
    /// default [`Name`] and [`Transform`] components.
    pub fn create_entity(&mut self) -> Entity {
        self.create_entity_with_uuid(Uuid::new_v4())
    }

    /// Creates an entity at a caller-supplied UUID (deserialization path).
    ///
    /// If another live entity already owns `uuid`, the new entity wins
    /// the UUID index; the older one keeps its components but is no
    /// longer reachable through [`Registry::entity_by_uuid`].
    pub fn create_entity_with_uuid(&mut self, uuid: Uuid) -> Entity {
        let entity = self.allocator.allocate();
        let idx = entity.index() as usize;
        if idx >= self.uuids.len() {
            self.uuids.resize(idx + 1, Uuid::nil());
        }
        self.uuids[idx] = uuid;
        if let Some(previous) = self.by_uuid.insert(uuid, entity) {
            log::debug!("uuid {uuid} reassigned from {previous} to {entity}");
        }

        self.insert(entity, Name::default());
        self.insert(entity, Transform::default());
        entity
    }

    /// Destroys an entity and all of its components. Returns false if the
    /// handle is stale.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.allocator.is_alive(entity) {
            return false;
        }
        for column in self.columns.values_mut() {
            column.remove_index(entity.index());
        }
        let uuid = self.uuids[entity.index() as usize];
        // Only drop the index entry if this entity still owns the UUID
        if self.by_uuid.get(&uuid) == Some(&entity) {
            self.by_uuid.remove(&uuid);
        }
        self.allocator.deallocate(entity)
    }

    /// Destroys all entities and components. Handles issued before the
    /// clear stay invalid.
    pub fn clear(&mut self) {
        for column in self.columns.values_mut() {
            column.clear();
        }
        self.by_uuid.clear();
        self.allocator.clear();
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.allocator.count()
    }

    /// Iterates over all currently alive entities.
    pub fn iter_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.allocator.iter_alive()
    }

    // --- identity ---

    /// The stable UUID of an entity, or `None` for a stale handle.
    pub fn uuid(&self, entity: Entity) -> Option<Uuid> {
        if self.allocator.is_alive(entity) {
            Some(self.uuids[entity.index() as usize])
        } else {
            None
        }
    }

    /// Looks up a live entity by its UUID.
    pub fn entity_by_uuid(&self, uuid: &Uuid) -> Option<Entity> {
        self.by_uuid.get(uuid).copied()
    }

    // --- components ---

    /// Inserts a component value, replacing any existing one.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) {
        if !self.allocator.is_alive(entity) {
            log::warn!("insert on stale handle {entity}, ignored");
            return;
        }
        self.column_mut::<T>().insert(entity.index(), value);
    }

    /// Adds a default-constructed component and returns a mutable
    /// reference to it. If the entity already has the component, it is
    /// replaced by the default.
    pub fn add<T: Component + Default>(&mut self, entity: Entity) -> &mut T {
        self.insert(entity, T::default());
        self.column_mut::<T>()
            .get_mut(entity.index())
            .unwrap_or_else(|| unreachable!("component just inserted"))
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
            && self
                .column::<T>()
                .is_some_and(|column| column.contains(entity.index()))
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.column::<T>()?.get(entity.index())
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        let column = self.columns.get_mut(&TypeId::of::<T>())?;
        column
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()?
            .get_mut(entity.index())
    }

    /// Removes a component from an entity, returning it.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        let column = self.columns.get_mut(&TypeId::of::<T>())?;
        column
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()?
            .remove(entity.index())
    }

    /// All live entities carrying component `T`, in column order.
    ///
    /// The serializer enumerates scenes through the mandatory [`Name`]
    /// column.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        let Some(column) = self.column::<T>() else {
            return Vec::new();
        };
        column
            .entity_indices()
            .iter()
            .filter_map(|&index| self.allocator.entity_at_index(index))
            .collect()
    }

    fn column<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.columns
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<SparseSet<T>>()
    }

    fn column_mut<T: Component>(&mut self) -> &mut SparseSet<T> {
        self.columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()))
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .unwrap_or_else(|| unreachable!("column type fixed by TypeId key"))
    }
}
