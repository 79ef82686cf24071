//! Admission Controller
//!
//! Admits paying participants into open rounds. The attached value must match
//! the round fee exactly; slots fill in admission order.

use tracing::info;

use crate::core::keys::{RoundId, StorageKey};
use crate::escrow::error::{EscrowError, EscrowResult};
use crate::escrow::events::EscrowEvent;
use crate::escrow::registry::load_undecided;
use crate::escrow::state::{ScoreRecord, PARTICIPANTS_PER_ROUND};
use crate::host::context::CallEnv;
use crate::host::store::{RecordStore, RecordStoreExt};

/// Join a round as the caller, paying the attached value.
///
/// Returns the slot index the caller now occupies.
pub fn join(env: &mut CallEnv<'_>, round_id: RoundId) -> EscrowResult<usize> {
    let mut round = load_undecided(env.store(), round_id)?;

    let attached = env.attached_value();
    if attached != round.fee {
        return Err(EscrowError::FeeMismatch { expected: round.fee, attached });
    }

    let caller = env.caller();
    let score_key = StorageKey::Score(round_id, caller);
    let record: ScoreRecord = env.load(&score_key)?;
    if record.submitted || round.has_participant(&caller) {
        return Err(EscrowError::AlreadySubmitted);
    }
    // Initializes the caller's score record; contents are unchanged.
    env.save(score_key, &record)?;

    let admitted = admitted_count(env.store(), round_id)?;
    let slot = admitted as usize;
    if slot >= PARTICIPANTS_PER_ROUND {
        return Err(EscrowError::RoundFull);
    }

    round.participants[slot] = caller;
    env.save(StorageKey::Admitted(round_id), &(admitted + 1))?;
    env.save(StorageKey::Round(round_id), &round)?;
    env.emit(EscrowEvent::enter(round_id, caller));

    info!(
        "Round {}: {} entered slot {} ({}/{})",
        round_id,
        caller.short(),
        slot,
        admitted + 1,
        PARTICIPANTS_PER_ROUND
    );
    Ok(slot)
}

/// Participants admitted so far.
pub fn admitted_count(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<u32> {
    store.load(&StorageKey::Admitted(round_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::address::Address;
    use crate::escrow::state::RoundStatus;
    use crate::host::memory::InMemoryHost;
    use proptest::prelude::*;

    const FEE: u64 = 1_000;

    fn setup() -> (InMemoryHost, Address, RoundId) {
        let owner = Address::derive("owner");
        let mut host = InMemoryHost::new();
        host.deploy(owner).unwrap();
        let id = host.start_round(owner, FEE).unwrap();
        (host, owner, id)
    }

    fn funded(host: &mut InMemoryHost, label: &str) -> Address {
        let addr = Address::derive(label);
        host.ledger.fund(addr, 10 * FEE);
        addr
    }

    #[test]
    fn test_join_fills_slots_in_order() {
        let (mut host, _, id) = setup();
        let players: Vec<_> = ["a", "b", "c", "d"].iter().map(|l| funded(&mut host, l)).collect();

        for (i, p) in players.iter().enumerate() {
            assert_eq!(host.join(*p, id, FEE), Ok(i));
        }

        let round = host.round(id).unwrap();
        assert_eq!(round.participants.to_vec(), players);
        assert_eq!(host.admitted_count(id).unwrap(), 4);
        assert_eq!(host.round_status(id).unwrap(), RoundStatus::Full);
        assert_eq!(host.ledger.escrow_balance(), 4 * FEE);
    }

    #[test]
    fn test_fifth_join_is_full() {
        let (mut host, _, id) = setup();
        for label in ["a", "b", "c", "d"] {
            let p = funded(&mut host, label);
            host.join(p, id, FEE).unwrap();
        }
        let late = funded(&mut host, "e");
        assert_eq!(host.join(late, id, FEE), Err(EscrowError::RoundFull));
        assert_eq!(host.ledger.balance(&late), 10 * FEE);
        assert_eq!(host.ledger.escrow_balance(), 4 * FEE);
    }

    #[test]
    fn test_exact_fee_required() {
        let (mut host, _, id) = setup();
        let p = funded(&mut host, "a");
        assert_eq!(
            host.join(p, id, FEE - 1),
            Err(EscrowError::FeeMismatch { expected: FEE, attached: FEE - 1 })
        );
        assert_eq!(
            host.join(p, id, FEE + 1),
            Err(EscrowError::FeeMismatch { expected: FEE, attached: FEE + 1 })
        );
        assert_eq!(host.ledger.balance(&p), 10 * FEE);
        assert_eq!(host.admitted_count(id).unwrap(), 0);
    }

    #[test]
    fn test_cannot_join_twice() {
        let (mut host, _, id) = setup();
        let p = funded(&mut host, "a");
        host.join(p, id, FEE).unwrap();
        assert_eq!(host.join(p, id, FEE), Err(EscrowError::AlreadySubmitted));
        assert_eq!(host.admitted_count(id).unwrap(), 1);
    }

    #[test]
    fn test_unknown_round() {
        let (mut host, _, _) = setup();
        let p = funded(&mut host, "a");
        assert_eq!(host.join(p, 77, 0), Err(EscrowError::NotFound));
        assert_eq!(host.join(p, 77, FEE), Err(EscrowError::NotFound));
    }

    #[test]
    fn test_join_initializes_score_record() {
        let (mut host, _, id) = setup();
        let p = funded(&mut host, "a");
        assert!(!host.store.contains(&StorageKey::Score(id, p)));
        host.join(p, id, FEE).unwrap();
        assert!(host.store.contains(&StorageKey::Score(id, p)));
        assert_eq!(host.score_of(id, p).unwrap(), ScoreRecord::default());
    }

    #[test]
    fn test_enter_event() {
        let (mut host, owner, id) = setup();
        let p = funded(&mut host, "a");
        host.join(p, id, FEE).unwrap();
        assert_eq!(
            host.log.entries(),
            &[EscrowEvent::start(id, owner), EscrowEvent::enter(id, p)]
        );
    }

    #[test]
    fn test_free_round() {
        let (mut host, owner, _) = setup();
        let id = host.start_round(owner, 0).unwrap();
        let p = Address::derive("broke");
        assert_eq!(host.join(p, id, 0), Ok(0));
    }

    proptest! {
        #[test]
        fn prop_wrong_fee_always_rejected(attached in 0u64..10 * FEE) {
            prop_assume!(attached != FEE);
            let (mut host, _, id) = setup();
            let p = funded(&mut host, "a");
            prop_assert_eq!(
                host.join(p, id, attached),
                Err(EscrowError::FeeMismatch { expected: FEE, attached })
            );
        }
    }
}
