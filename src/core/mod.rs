//! Core deterministic primitives.
//!
//! Addresses, storage keys and audit hashing. Nothing in here touches the
//! host; every type is plain data with a stable byte representation.

pub mod address;
pub mod keys;
pub mod hash;

// Re-export core types
pub use address::{Address, ADDRESS_LEN};
pub use keys::{RoundId, StorageKey};
pub use hash::{AuditHash, AuditHasher};
