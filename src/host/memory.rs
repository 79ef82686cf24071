//! In-Memory Host
//!
//! Reference host for running the escrow outside a chain: owns the record
//! store, the ledger and the event log, and executes each call atomically.
//! A failed call leaves no writes, no transfers and no events behind.

use tracing::warn;

use crate::core::address::Address;
use crate::core::hash::AuditHash;
use crate::core::keys::RoundId;
use crate::escrow::contract::BattleEscrow;
use crate::escrow::error::EscrowResult;
use crate::escrow::ownership::Ownership;
use crate::escrow::scoring::ScoreOutcome;
use crate::escrow::state::{HighestScorer, Round, RoundStatus, ScoreRecord};
use crate::host::context::{CallContext, CallEnv};
use crate::host::events::EventLog;
use crate::host::ledger::MemoryLedger;
use crate::host::store::MemoryStore;

/// Store, ledger and log with all-or-nothing call execution.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHost {
    /// Persistent records
    pub store: MemoryStore,
    /// Account balances and escrow holdings
    pub ledger: MemoryLedger,
    /// Emitted events
    pub log: EventLog,
}

impl InMemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one call atomically.
    ///
    /// The attached value moves from the caller into escrow before the call
    /// body runs. On `Err`, store, ledger and log are restored to their state
    /// before the call.
    pub fn execute<T, F>(&mut self, ctx: CallContext, call: F) -> EscrowResult<T>
    where
        F: FnOnce(&mut CallEnv<'_>) -> EscrowResult<T>,
    {
        let store_snapshot = self.store.clone();
        let ledger_snapshot = self.ledger.clone();
        let log_len = self.log.len();

        let result = match self.ledger.deposit(ctx.caller, ctx.attached_value) {
            Ok(()) => {
                let mut env = CallEnv::new(ctx, &mut self.store, &mut self.ledger, &mut self.log);
                call(&mut env)
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            warn!("Call from {} rolled back: {}", ctx.caller.short(), e);
            self.store = store_snapshot;
            self.ledger = ledger_snapshot;
            self.log.truncate(log_len);
        }
        result
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Deploy with `owner` as the deployer.
    pub fn deploy(&mut self, owner: Address) -> EscrowResult<()> {
        self.execute(CallContext::new(owner), BattleEscrow::deploy)
    }

    /// Nominate a successor owner.
    pub fn nominate_successor(&mut self, caller: Address, candidate: Address) -> EscrowResult<()> {
        self.execute(CallContext::new(caller), |env| {
            BattleEscrow::nominate_successor(env, candidate)
        })
    }

    /// Accept a pending nomination.
    pub fn accept_ownership(&mut self, caller: Address) -> EscrowResult<()> {
        self.execute(CallContext::new(caller), BattleEscrow::accept_ownership)
    }

    /// Open a round.
    pub fn start_round(&mut self, caller: Address, fee: u64) -> EscrowResult<RoundId> {
        self.execute(CallContext::new(caller), |env| BattleEscrow::start_round(env, fee))
    }

    /// Join a round, attaching `value`.
    pub fn join(&mut self, caller: Address, round_id: RoundId, value: u64) -> EscrowResult<usize> {
        self.execute(CallContext::with_value(caller, value), |env| {
            BattleEscrow::join_round(env, round_id)
        })
    }

    /// Report a participant's score.
    pub fn end_round(
        &mut self,
        caller: Address,
        participant: Address,
        round_id: RoundId,
        score: u32,
    ) -> EscrowResult<ScoreOutcome> {
        self.execute(CallContext::new(caller), |env| {
            BattleEscrow::end_round(env, participant, round_id, score)
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Owner and pending owner.
    pub fn ownership(&self) -> EscrowResult<Ownership> {
        BattleEscrow::ownership(&self.store)
    }

    /// Round record.
    pub fn round(&self, round_id: RoundId) -> EscrowResult<Round> {
        BattleEscrow::get_round(&self.store, round_id)
    }

    /// Round winner.
    pub fn winner(&self, round_id: RoundId) -> EscrowResult<Address> {
        BattleEscrow::get_winner(&self.store, round_id)
    }

    /// Id the next round will receive.
    pub fn next_round_id(&self) -> EscrowResult<RoundId> {
        BattleEscrow::next_round_id(&self.store)
    }

    /// Lifecycle view.
    pub fn round_status(&self, round_id: RoundId) -> EscrowResult<RoundStatus> {
        BattleEscrow::round_status(&self.store, round_id)
    }

    /// Participants admitted.
    pub fn admitted_count(&self, round_id: RoundId) -> EscrowResult<u32> {
        BattleEscrow::admitted_count(&self.store, round_id)
    }

    /// Scores submitted.
    pub fn submitted_count(&self, round_id: RoundId) -> EscrowResult<u32> {
        BattleEscrow::submitted_count(&self.store, round_id)
    }

    /// Score record for (round, participant).
    pub fn score_of(&self, round_id: RoundId, participant: Address) -> EscrowResult<ScoreRecord> {
        BattleEscrow::score_of(&self.store, round_id, participant)
    }

    /// Highest-scorer record.
    pub fn highest_scorer(&self, round_id: RoundId) -> EscrowResult<HighestScorer> {
        BattleEscrow::highest_scorer(&self.store, round_id)
    }

    /// Audit digest.
    pub fn round_digest(&self, round_id: RoundId) -> EscrowResult<AuditHash> {
        BattleEscrow::round_digest(&self.store, round_id)
    }
}
