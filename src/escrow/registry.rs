//! Round Registry
//!
//! Creates rounds, hands out ids and serves round reads.

use tracing::info;

use crate::core::address::Address;
use crate::core::hash::{AuditHash, AuditHasher};
use crate::core::keys::{RoundId, StorageKey};
use crate::escrow::error::{EscrowError, EscrowResult};
use crate::escrow::events::EscrowEvent;
use crate::escrow::ownership::require_owner;
use crate::escrow::state::{HighestScorer, Round, RoundStatus, FIRST_ROUND_ID, MAX_FEE};
use crate::host::context::CallEnv;
use crate::host::store::{RecordStore, RecordStoreExt};

/// Open a new round with the given entry fee. Owner only.
///
/// Rejects `fee >= u64::MAX / 4` so that `fee * 4` always fits.
pub fn start_round(env: &mut CallEnv<'_>, fee: u64) -> EscrowResult<RoundId> {
    require_owner(env)?;
    if fee >= MAX_FEE {
        return Err(EscrowError::InvalidFee(fee));
    }

    let id = next_round_id(env.store())?;
    env.save(StorageKey::NextRoundId, &(id + 1))?;
    env.save(StorageKey::Round(id), &Round::new(id, fee))?;

    let caller = env.caller();
    env.emit(EscrowEvent::start(id, caller));

    info!("Round {} started by {} (fee {})", id, caller.short(), fee);
    Ok(id)
}

/// Id the next round will receive.
pub fn next_round_id(store: &dyn RecordStore) -> EscrowResult<RoundId> {
    let stored: RoundId = store.load(&StorageKey::NextRoundId)?;
    Ok(stored.max(FIRST_ROUND_ID))
}

/// Read a round. Unknown ids return the default record (`id == 0`).
pub fn get_round(store: &dyn RecordStore, id: RoundId) -> EscrowResult<Round> {
    store.load(&StorageKey::Round(id))
}

/// Winner of a round, zero while undecided or after cancellation.
pub fn get_winner(store: &dyn RecordStore, id: RoundId) -> EscrowResult<Address> {
    Ok(get_round(store, id)?.winner)
}

/// Load a round that may still accept joins and scores.
///
/// Fails with `NotFound` if the round was never created or already has a
/// winner. A cancelled round passes this check; its full counters stop
/// further joins and scores instead.
pub fn load_undecided(store: &dyn RecordStore, id: RoundId) -> EscrowResult<Round> {
    let round = get_round(store, id)?;
    if !round.exists() || round.is_decided() {
        return Err(EscrowError::NotFound);
    }
    Ok(round)
}

/// Lifecycle view of a round.
pub fn round_status(store: &dyn RecordStore, id: RoundId) -> EscrowResult<RoundStatus> {
    let round = get_round(store, id)?;
    let admitted: u32 = store.load(&StorageKey::Admitted(id))?;
    Ok(RoundStatus::of(&round, admitted))
}

/// Audit digest over a round, its counters and its highest-scorer record.
pub fn round_digest(store: &dyn RecordStore, id: RoundId) -> EscrowResult<AuditHash> {
    let round = get_round(store, id)?;
    let admitted: u32 = store.load(&StorageKey::Admitted(id))?;
    let submitted: u32 = store.load(&StorageKey::SubmittedCount(id))?;
    let scorer: HighestScorer = store.load(&StorageKey::Scorer(id))?;

    let mut hasher = AuditHasher::for_round();
    round.hash_into(&mut hasher);
    hasher.update_u32(admitted);
    hasher.update_u32(submitted);
    scorer.hash_into(&mut hasher);
    Ok(hasher.finalize())
}
