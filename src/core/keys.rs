//! Storage Keys
//!
//! Typed, namespaced keys for the persistent record store. Every record the
//! escrow reads or writes is addressed through one of these variants; the
//! `Display` form is the logical key string a host would use.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::address::Address;

/// Round identifier.
pub type RoundId = u64;

/// Key of one logical record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StorageKey {
    /// Current administrator.
    Owner,
    /// Nominated but unconfirmed administrator.
    PendingOwner,
    /// Id the next created round will receive.
    NextRoundId,
    /// Round record.
    Round(RoundId),
    /// Participant score record for (round, address).
    Score(RoundId, Address),
    /// Highest scorer record for a round.
    Scorer(RoundId),
    /// Admission counter for a round.
    Admitted(RoundId),
    /// Submission counter for a round.
    SubmittedCount(RoundId),
}

impl StorageKey {
    /// Round this key belongs to, if any.
    pub fn round_id(&self) -> Option<RoundId> {
        match *self {
            StorageKey::Owner | StorageKey::PendingOwner | StorageKey::NextRoundId => None,
            StorageKey::Round(id)
            | StorageKey::Score(id, _)
            | StorageKey::Scorer(id)
            | StorageKey::Admitted(id)
            | StorageKey::SubmittedCount(id) => Some(id),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKey::Owner => write!(f, "owner"),
            StorageKey::PendingOwner => write!(f, "pendingOwner"),
            StorageKey::NextRoundId => write!(f, "nextRoundId"),
            StorageKey::Round(id) => write!(f, "round:{}", id),
            StorageKey::Score(id, addr) => write!(f, "score:{}-{}", id, addr),
            StorageKey::Scorer(id) => write!(f, "scorer:{}", id),
            StorageKey::Admitted(id) => write!(f, "admitted:{}", id),
            StorageKey::SubmittedCount(id) => write!(f, "submitted-count:{}", id),
        }
    }
}
