/// Key into a [`Pool`]. Stale keys (slot freed or reused) resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolKey {
    index: u32,
    generation: u32,
}

struct Slot<T> {
    generation: u32,
    item: Option<T>,
}

/// Simple object pool for reusable allocations. Grows on demand; freed
/// slots are recycled with a bumped generation.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Pool<T> {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
            free: Vec::with_capacity(cap),
            len: 0,
        }
    }

    pub fn alloc(&mut self, item: T) -> PoolKey {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.item = Some(item);
            return PoolKey {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            item: Some(item),
        });
        PoolKey {
            index,
            generation: 0,
        }
    }

    /// Release a slot, returning its item. No-op on a stale key.
    pub fn free(&mut self, key: PoolKey) -> Option<T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        let item = slot.item.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);
        self.len -= 1;
        Some(item)
    }

    pub fn get(&self, key: PoolKey) -> Option<&T> {
        let slot = self.slots.get(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        slot.item.as_ref()
    }

    pub fn get_mut(&mut self, key: PoolKey) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        slot.item.as_mut()
    }

    /// Keys of all live entries, in slot order.
    pub fn keys(&self) -> Vec<PoolKey> {
        self.iter().map(|(key, _)| key).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live entries with their keys.
    pub fn iter(&self) -> impl Iterator<Item = (PoolKey, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.item.as_ref().map(|item| {
                (
                    PoolKey {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    item,
                )
            })
        })
    }

    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.item.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
            }
        }
        self.len = 0;
    }
}
