//! Public Operation Surface
//!
//! One entry point per externally callable operation. Mutating entry points
//! take the per-call environment; reads only need the store.

use crate::core::address::Address;
use crate::core::hash::AuditHash;
use crate::core::keys::RoundId;
use crate::escrow::error::EscrowResult;
use crate::escrow::ownership::{self, Ownership};
use crate::escrow::scoring::ScoreOutcome;
use crate::escrow::state::{HighestScorer, Round, RoundStatus, ScoreRecord};
use crate::escrow::{admission, registry, scoring};
use crate::host::context::CallEnv;
use crate::host::store::RecordStore;

/// The battle escrow.
///
/// Holds no state of its own: everything lives in the host's record store,
/// so the same instance can serve any number of calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct BattleEscrow;

impl BattleEscrow {
    /// Construction: the caller becomes owner.
    pub fn deploy(env: &mut CallEnv<'_>) -> EscrowResult<()> {
        ownership::initialize(env)
    }

    /// Nominate a successor owner.
    pub fn nominate_successor(env: &mut CallEnv<'_>, candidate: Address) -> EscrowResult<()> {
        ownership::nominate_successor(env, candidate)
    }

    /// Accept a pending nomination.
    pub fn accept_ownership(env: &mut CallEnv<'_>) -> EscrowResult<()> {
        ownership::accept_ownership(env)
    }

    /// Open a round.
    pub fn start_round(env: &mut CallEnv<'_>, fee: u64) -> EscrowResult<RoundId> {
        registry::start_round(env, fee)
    }

    /// Join a round (payable).
    pub fn join_round(env: &mut CallEnv<'_>, round_id: RoundId) -> EscrowResult<usize> {
        admission::join(env, round_id)
    }

    /// Report a participant's score.
    pub fn end_round(
        env: &mut CallEnv<'_>,
        participant: Address,
        round_id: RoundId,
        score: u32,
    ) -> EscrowResult<ScoreOutcome> {
        scoring::end_round(env, participant, round_id, score)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Round record (default when unknown).
    pub fn get_round(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<Round> {
        registry::get_round(store, round_id)
    }

    /// Round winner (zero when undecided or cancelled).
    pub fn get_winner(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<Address> {
        registry::get_winner(store, round_id)
    }

    /// Owner and pending owner.
    pub fn ownership(store: &dyn RecordStore) -> EscrowResult<Ownership> {
        Ownership::load(store)
    }

    /// Id the next round will receive.
    pub fn next_round_id(store: &dyn RecordStore) -> EscrowResult<RoundId> {
        registry::next_round_id(store)
    }

    /// Score record for (round, participant).
    pub fn score_of(
        store: &dyn RecordStore,
        round_id: RoundId,
        participant: Address,
    ) -> EscrowResult<ScoreRecord> {
        scoring::score_of(store, round_id, participant)
    }

    /// Highest-scorer record.
    pub fn highest_scorer(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<HighestScorer> {
        scoring::highest_scorer(store, round_id)
    }

    /// Participants admitted.
    pub fn admitted_count(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<u32> {
        admission::admitted_count(store, round_id)
    }

    /// Scores submitted.
    pub fn submitted_count(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<u32> {
        scoring::submitted_count(store, round_id)
    }

    /// Lifecycle view.
    pub fn round_status(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<RoundStatus> {
        registry::round_status(store, round_id)
    }

    /// Audit digest.
    pub fn round_digest(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<AuditHash> {
        registry::round_digest(store, round_id)
    }
}
