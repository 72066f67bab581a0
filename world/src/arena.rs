//! Fixed-capacity slot storage backed by a free list.

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slots are allocated once; inserting into a full arena fails instead of growing.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let capacity = u32::try_from(capacity).unwrap_or(u32::MAX);
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                value: None,
            })
            .collect();
        // Lowest slot index is handed out first.
        let free = (0..capacity).rev().collect();
        Self { slots, free }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Stores the value, returning its slot and generation, or `None` when full.
    pub(crate) fn insert(&mut self, value: T) -> Option<(u32, u32)> {
        let index = self.free.pop()?;
        let slot = self.slots.get_mut(index as usize)?;
        slot.value = Some(value);
        Some((index, slot.generation))
    }

    pub(crate) fn remove(&mut self, index: u32, generation: u32) -> Option<T> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        Some(value)
    }

    /// Live values with their slot and generation, in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((index, slot.generation, value))
        })
    }

    /// Updates every live value and releases those for which `keep` returns false.
    pub(crate) fn retain_mut(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(value) = slot.value.as_mut() else {
                continue;
            };
            if keep(value) {
                continue;
            }
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
            if let Ok(index) = u32::try_from(index) {
                self.free.push(index);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.retain_mut(|_| false);
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn full_arena_rejects_inserts() {
        let mut arena = Arena::with_capacity(2);
        assert_eq!(arena.insert('a'), Some((0, 0)));
        assert_eq!(arena.insert('b'), Some((1, 0)));
        assert!(arena.is_full());
        assert_eq!(arena.insert('c'), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn recycled_slot_invalidates_stale_handle() {
        let mut arena = Arena::with_capacity(1);
        let (slot, generation) = arena.insert(10).expect("free slot");
        assert_eq!(arena.remove(slot, generation), Some(10));

        let (reused, next_generation) = arena.insert(20).expect("recycled slot");
        assert_eq!(reused, slot);
        assert_ne!(next_generation, generation);
        assert_eq!(arena.remove(slot, generation), None);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.remove(slot, next_generation), Some(20));
        assert_eq!(arena.remove(slot, next_generation), None);
    }

    #[test]
    fn retain_releases_rejected_values() {
        let mut arena = Arena::with_capacity(4);
        for value in 0..4 {
            let _ = arena.insert(value);
        }
        arena.retain_mut(|value| *value % 2 == 0);
        assert_eq!(arena.len(), 2);
        let kept: Vec<i32> = arena.iter().map(|(_, _, value)| *value).collect();
        assert_eq!(kept, vec![0, 2]);

        arena.clear();
        assert_eq!(arena.len(), 0);
        assert!(!arena.is_full());
    }
}
