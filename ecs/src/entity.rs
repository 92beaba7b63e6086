use std::hash::{Hash, Hasher};

/// An arena-local entity handle: slot index + generation.
///
/// The handle is only meaningful inside the [`Registry`](crate::Registry)
/// that issued it and is **not** persisted — cross-session identity is the
/// entity's UUID, stored in the registry. When a slot is reused the
/// generation is bumped, so handles from a previous life of the slot
/// compare unequal and fail aliveness checks.
#[derive(Clone, Copy)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index of this entity in its allocator.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot at the time this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}:{})", self.index, self.generation)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}:{})", self.index, self.generation)
    }
}

/// Allocates and recycles entity slots with generation tracking.
///
/// Despawned slots go onto a LIFO free list; reusing a slot bumps its
/// generation so stale handles are detectable.
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
    count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            count: 0,
        }
    }

    /// Allocates a new entity, reusing a recycled slot if available.
    pub fn allocate(&mut self) -> Entity {
        self.count += 1;

        if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            self.alive[idx] = true;
            Entity::new(index, self.generations[idx])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            Entity::new(index, 0)
        }
    }

    /// Deallocates an entity. Returns false if the handle is stale or the
    /// slot is already dead.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        let idx = entity.index() as usize;
        if !self.is_alive(entity) {
            return false;
        }

        self.alive[idx] = false;
        // Bump the generation so old handles are invalidated on reuse
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free_list.push(entity.index());
        self.count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index() as usize;
        idx < self.alive.len() && self.alive[idx] && self.generations[idx] == entity.generation()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Drops every slot. Generations are bumped, not reset, so handles
    /// issued before the clear stay invalid.
    pub fn clear(&mut self) {
        for (idx, alive) in self.alive.iter_mut().enumerate() {
            if *alive {
                *alive = false;
                self.generations[idx] = self.generations[idx].wrapping_add(1);
                self.free_list.push(idx as u32);
            }
        }
        self.count = 0;
    }

    /// The alive entity at the given slot, or `None` if the slot is empty.
    pub fn entity_at_index(&self, index: u32) -> Option<Entity> {
        let idx = index as usize;
        if idx < self.alive.len() && self.alive[idx] {
            Some(Entity::new(index, self.generations[idx]))
        } else {
            None
        }
    }

    /// Iterates over all currently alive entities.
    pub fn iter_alive(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(idx, _)| Entity::new(idx as u32, self.generations[idx]))
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
