//! Ownership Manager
//!
//! Two-step administrator handoff. The owner nominates, the nominee accepts;
//! until acceptance the old owner keeps every privilege.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::address::Address;
use crate::core::keys::StorageKey;
use crate::escrow::error::{EscrowError, EscrowResult};
use crate::escrow::events::EscrowEvent;
use crate::escrow::state::FIRST_ROUND_ID;
use crate::host::context::CallEnv;
use crate::host::store::{RecordStore, RecordStoreExt};

/// Process-wide administrative state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ownership {
    /// Current administrator
    pub owner: Address,
    /// Nominee awaiting acceptance (zero when none)
    pub pending_owner: Address,
}

impl Ownership {
    /// Load both ownership records.
    pub fn load(store: &dyn RecordStore) -> EscrowResult<Self> {
        Ok(Self {
            owner: store.load(&StorageKey::Owner)?,
            pending_owner: store.load(&StorageKey::PendingOwner)?,
        })
    }
}

/// Construction. Runs once per instance; the deployer becomes owner.
pub fn initialize(env: &mut CallEnv<'_>) -> EscrowResult<()> {
    let current: Address = env.load(&StorageKey::Owner)?;
    if !current.is_zero() {
        return Err(EscrowError::AlreadyInitialized);
    }

    let deployer = env.caller();
    env.save(StorageKey::Owner, &deployer)?;
    env.save(StorageKey::PendingOwner, &Address::ZERO)?;
    env.save(StorageKey::NextRoundId, &FIRST_ROUND_ID)?;

    info!("Escrow deployed by {}", deployer.short());
    Ok(())
}

/// Fail with `Unauthorized` unless the caller is the owner.
pub fn require_owner(env: &CallEnv<'_>) -> EscrowResult<Address> {
    let owner: Address = env.load(&StorageKey::Owner)?;
    if owner.is_zero() || env.caller() != owner {
        return Err(EscrowError::Unauthorized);
    }
    Ok(owner)
}

/// Nominate a successor. A zero candidate retracts the nomination.
pub fn nominate_successor(env: &mut CallEnv<'_>, candidate: Address) -> EscrowResult<()> {
    let owner = require_owner(env)?;
    env.save(StorageKey::PendingOwner, &candidate)?;
    env.emit(EscrowEvent::OwnershipNominated { from: owner, to: candidate });

    info!("Owner {} nominated {}", owner.short(), candidate.short());
    Ok(())
}

/// Accept a pending nomination.
pub fn accept_ownership(env: &mut CallEnv<'_>) -> EscrowResult<()> {
    let state = Ownership::load(env.store())?;
    if state.pending_owner.is_zero() || env.caller() != state.pending_owner {
        return Err(EscrowError::Unauthorized);
    }

    env.save(StorageKey::Owner, &state.pending_owner)?;
    env.save(StorageKey::PendingOwner, &Address::ZERO)?;
    env.emit(EscrowEvent::OwnershipTransferred {
        from: state.owner,
        to: state.pending_owner,
    });

    info!("Ownership moved {} -> {}", state.owner.short(), state.pending_owner.short());
    Ok(())
}
