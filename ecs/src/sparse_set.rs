/// Typed sparse set storing one component column.
///
/// Uses a sparse array (entity index → dense index) and a dense array
/// (contiguous component data + entity mapping) for O(1)
/// insert/remove/get and cache-friendly iteration.
pub struct SparseSet<T: 'static> {
    /// `entity_index -> dense_index`. `None` means the entity does not
    /// have this component.
    sparse: Vec<Option<u32>>,
    /// Contiguous component values.
    dense: Vec<T>,
    /// Entity indices corresponding to each dense element.
    entities: Vec<u32>,
}

impl<T: 'static> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Inserts a component for the given entity index, replacing any
    /// existing value.
    pub fn insert(&mut self, entity_index: u32, value: T) {
        let idx = entity_index as usize;

        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, None);
        }

        if let Some(dense_idx) = self.sparse[idx] {
            self.dense[dense_idx as usize] = value;
        } else {
            self.sparse[idx] = Some(self.dense.len() as u32);
            self.dense.push(value);
            self.entities.push(entity_index);
        }
    }

    /// Removes the component for the given entity index, returning it.
    pub fn remove(&mut self, entity_index: u32) -> Option<T> {
        let idx = entity_index as usize;
        if idx >= self.sparse.len() {
            return None;
        }

        let dense_idx = self.sparse[idx].take()? as usize;
        let last_dense = self.dense.len() - 1;

        if dense_idx != last_dense {
            // Swap-remove: move the last element into the freed slot
            let swapped_entity = self.entities[last_dense];
            self.sparse[swapped_entity as usize] = Some(dense_idx as u32);
            self.entities[dense_idx] = swapped_entity;
        }

        self.entities.pop();
        Some(self.dense.swap_remove(dense_idx))
    }

    pub fn get(&self, entity_index: u32) -> Option<&T> {
        let dense_idx = (*self.sparse.get(entity_index as usize)?)?;
        Some(&self.dense[dense_idx as usize])
    }

    pub fn get_mut(&mut self, entity_index: u32) -> Option<&mut T> {
        let dense_idx = (*self.sparse.get(entity_index as usize)?)?;
        Some(&mut self.dense[dense_idx as usize])
    }

    pub fn contains(&self, entity_index: u32) -> bool {
        matches!(self.sparse.get(entity_index as usize), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.entities.clear();
    }

    /// Entity indices that have this component, in dense (insertion,
    /// modulo swap-removes) order.
    pub fn entity_indices(&self) -> &[u32] {
        &self.entities
    }
}

impl<T: 'static> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut set = SparseSet::new();
        set.insert(3, "three");
        set.insert(0, "zero");

        assert_eq!(set.get(3), Some(&"three"));
        assert_eq!(set.get(0), Some(&"zero"));
        assert_eq!(set.get(1), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_replaces() {
        let mut set = SparseSet::new();
        set.insert(5, 1);
        set.insert(5, 2);

        assert_eq!(set.get(5), Some(&2));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_swaps_last() {
        let mut set = SparseSet::new();
        set.insert(0, "a");
        set.insert(1, "b");
        set.insert(2, "c");

        assert_eq!(set.remove(0), Some("a"));
        assert!(!set.contains(0));
        // Swapped entries are still reachable
        assert_eq!(set.get(1), Some(&"b"));
        assert_eq!(set.get(2), Some(&"c"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut set: SparseSet<i32> = SparseSet::new();
        assert_eq!(set.remove(7), None);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut set = SparseSet::new();
        set.insert(1, 10);
        *set.get_mut(1).unwrap() += 5;
        assert_eq!(set.get(1), Some(&15));
    }

    #[test]
    fn clear_empties_everything() {
        let mut set = SparseSet::new();
        set.insert(0, 1);
        set.insert(1, 2);
        set.clear();

        assert!(set.is_empty());
        assert!(!set.contains(0));
        assert!(set.entity_indices().is_empty());
    }

    #[test]
    fn entity_indices_track_membership() {
        let mut set = SparseSet::new();
        set.insert(4, ());
        set.insert(9, ());
        set.remove(4);

        assert_eq!(set.entity_indices(), &[9]);
    }
}
