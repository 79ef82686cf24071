//! Persistent Record Store
//!
//! The host's key-value store, seen through typed keys. Records are encoded
//! with bincode; an absent key reads back as the record's `Default`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::keys::{RoundId, StorageKey};
use crate::escrow::error::EscrowResult;

/// Raw byte store provided by the host.
///
/// There is no delete: records are retained for the lifetime of the instance.
pub trait RecordStore {
    /// Read the bytes stored under `key`, if any.
    fn get_raw(&self, key: &StorageKey) -> Option<Vec<u8>>;

    /// Overwrite the bytes stored under `key`.
    fn set_raw(&mut self, key: StorageKey, value: Vec<u8>);
}

/// Typed access on top of any [`RecordStore`].
pub trait RecordStoreExt: RecordStore {
    /// Load a record, or its default when absent.
    fn load<T: DeserializeOwned + Default>(&self, key: &StorageKey) -> EscrowResult<T> {
        match self.get_raw(key) {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Ok(T::default()),
        }
    }

    /// Encode and store a record.
    fn save<T: Serialize>(&mut self, key: StorageKey, value: &T) -> EscrowResult<()> {
        let bytes = bincode::serialize(value)?;
        self.set_raw(key, bytes);
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// BTreeMap-backed store (deterministic iteration).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<StorageKey, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is the store empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Has anything been written under `key`?
    pub fn contains(&self, key: &StorageKey) -> bool {
        self.records.contains_key(key)
    }

    /// All keys belonging to one round, in key order.
    pub fn keys_for_round(&self, round_id: RoundId) -> Vec<StorageKey> {
        self.records
            .keys()
            .filter(|k| k.round_id() == Some(round_id))
            .copied()
            .collect()
    }
}

impl RecordStore for MemoryStore {
    fn get_raw(&self, key: &StorageKey) -> Option<Vec<u8>> {
        self.records.get(key).cloned()
    }

    fn set_raw(&mut self, key: StorageKey, value: Vec<u8>) {
        self.records.insert(key, value);
    }
}
