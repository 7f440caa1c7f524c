use log::{debug, trace};

use crate::{
    StoreError,
    chain::{Chain, Entry},
    hash,
    store::BoundedStore,
};

/// Separate-chaining hash table over a [`BoundedStore`].
///
/// Keys are used through their string form, so anything string-coercible
/// works as a key. A key never occupies more than one entry across the
/// table: inserting under an existing key overwrites its value in place.
///
/// Store errors bubble out of every operation untouched; they indicate an
/// index bug, not a missing key. Key absence is always reported as a value
/// (`None` from [`retrieve`](Self::retrieve)), never as an error.
#[derive(Debug)]
pub struct HashTable {
    limit: usize,
    store: BoundedStore,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable {
    pub const DEFAULT_LIMIT: usize = 8;

    /// Occupied-slot ratio at which the table grows.
    pub const LOAD_FACTOR: f32 = 0.75;

    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    /// Creates a table with `limit` slots.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero, since no key could ever be placed.
    pub fn with_limit(limit: usize) -> Self {
        assert!(limit > 0, "table limit must be positive");

        Self {
            limit,
            store: BoundedStore::new(limit),
        }
    }

    /// The current slot capacity.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Total number of entries across every chain.
    pub fn len(&self) -> usize {
        self.store.chains().map(Chain::len).sum()
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a key/value pair, overwriting the value in place when the
    /// key is already present.
    ///
    /// Grows the table as soon as the occupied-slot ratio reaches
    /// [`LOAD_FACTOR`](Self::LOAD_FACTOR). Returns the chain the key now
    /// lives in, which may have moved to a different slot if a grow ran.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<&Chain, StoreError>
    where
        K: ToString,
        V: Into<String>,
    {
        let key = key.to_string();
        self.insert_pair(key.clone(), value.into())?;

        // the trigger fires right after the insert that crossed the threshold
        if self.capacity_is_full() {
            self.resize()?;
        }

        let index = hash::index_below(&key, self.limit);
        match self.store.get(index)? {
            Some(chain) => Ok(chain),
            None => unreachable!("slot {index} holds the key inserted above"),
        }
    }

    /// Removes the entry stored under `key`. Absent keys are a silent no-op.
    pub fn remove<K: ToString>(&mut self, key: K) -> Result<(), StoreError> {
        let key = key.to_string();
        let index = hash::index_below(&key, self.limit);

        let Some(chain) = self.store.take(index)? else {
            return Ok(());
        };

        // Keys are unique, so this drops at most one entry. An emptied
        // chain stays out of the store so the slot reads as unoccupied.
        let kept = chain.filter(|k| k != key.as_str());
        if !kept.is_empty() {
            self.store.set(index, Some(kept))?;
        }

        Ok(())
    }

    /// Looks up the value stored under `key`; `None` means not found.
    pub fn retrieve<K: ToString>(&self, key: K) -> Result<Option<&str>, StoreError> {
        let key = key.to_string();
        let index = hash::index_below(&key, self.limit);

        match self.store.get(index)? {
            Some(chain) => Ok(chain.find(&key).map(Entry::value)),
            None => Ok(None),
        }
    }

    /// Whether the occupied-slot ratio has reached the grow threshold.
    pub fn capacity_is_full(&self) -> bool {
        self.load_factor() >= Self::LOAD_FACTOR
    }

    /// Ratio of occupied slots to `limit`.
    pub fn load_factor(&self) -> f32 {
        self.store.len() as f32 / self.limit as f32
    }

    /// Doubles the capacity and rehashes every entry against it.
    ///
    /// Externally invisible: every key retrievable before the call stays
    /// retrievable after it, with the same value.
    pub fn resize(&mut self) -> Result<(), StoreError> {
        let old_limit = self.limit;
        self.limit *= 2;
        debug!("resizing table: {old_limit} -> {} slots", self.limit);

        let old = std::mem::replace(&mut self.store, BoundedStore::new(self.limit));
        for chain in old {
            for entry in chain {
                self.insert_pair(entry.key, entry.value)?;
            }
        }

        Ok(())
    }

    // [private]

    /// The insert path shared with `resize`; never triggers a grow itself.
    fn insert_pair(&mut self, key: String, value: String) -> Result<(), StoreError> {
        let index = hash::index_below(&key, self.limit);

        match self.store.get_mut(index)? {
            Some(chain) => match chain.find_mut(&key) {
                Some(entry) => {
                    entry.value = value;
                }
                None => chain.push(key, value),
            },
            None => {
                trace!("materializing chain at slot {index}");
                let mut chain = Chain::new();
                chain.push(key, value);
                self.store.set(index, Some(chain))?;
            }
        }

        Ok(())
    }
}
