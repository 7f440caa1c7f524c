use crate::{StoreError, chain::Chain};

/// A slot array with a fixed logical capacity.
///
/// Each slot holds either nothing or one [`Chain`]. Access is bounds-checked
/// against `limit`; a bad index is a caller bug and surfaces as a
/// [`StoreError`] instead of being handled here. The store never resizes
/// itself.
#[derive(Debug)]
pub struct BoundedStore {
    slots: Vec<Option<Chain>>,
    limit: usize,
}

impl BoundedStore {
    /// Creates a store with `limit` empty slots.
    pub fn new(limit: usize) -> Self {
        let mut slots = Vec::with_capacity(limit);
        for _ in 0..limit {
            slots.push(None);
        }

        Self { slots, limit }
    }

    /// Number of materialized slots, i.e. slots currently holding a chain.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed slot capacity.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn get<I>(&self, index: I) -> Result<Option<&Chain>, StoreError>
    where
        I: TryInto<usize>,
    {
        let index = self.check_limit(index)?;
        Ok(self.slots[index].as_ref())
    }

    pub fn get_mut<I>(&mut self, index: I) -> Result<Option<&mut Chain>, StoreError>
    where
        I: TryInto<usize>,
    {
        let index = self.check_limit(index)?;
        Ok(self.slots[index].as_mut())
    }

    /// Overwrites the slot at `index`; `None` clears it.
    pub fn set<I>(&mut self, index: I, slot: Option<Chain>) -> Result<(), StoreError>
    where
        I: TryInto<usize>,
    {
        let index = self.check_limit(index)?;
        self.slots[index] = slot;
        Ok(())
    }

    /// Moves the chain out of the slot at `index`, leaving it empty.
    pub fn take<I>(&mut self, index: I) -> Result<Option<Chain>, StoreError>
    where
        I: TryInto<usize>,
    {
        let index = self.check_limit(index)?;
        Ok(self.slots[index].take())
    }

    // [adapters]

    /// Iterates over every materialized chain, in slot order.
    pub fn chains(&self) -> impl Iterator<Item = &Chain> {
        self.slots.iter().flatten()
    }

    // [private]

    fn check_limit<I>(&self, index: I) -> Result<usize, StoreError>
    where
        I: TryInto<usize>,
    {
        let index = index.try_into().map_err(|_| StoreError::InvalidIndexType)?;
        if self.limit <= index {
            return Err(StoreError::IndexOutOfBounds {
                index,
                limit: self.limit,
            });
        }
        Ok(index)
    }
}

impl IntoIterator for BoundedStore {
    type Item = Chain;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<Chain>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().flatten()
    }
}
