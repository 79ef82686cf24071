//! Score & Tie Resolver
//!
//! Records one score per participant, keeps the running maximum with every
//! address tied at it, and settles the round on the fourth submission.
//!
//! Tie policy: a strictly higher score replaces the holders, an equal score
//! joins them. If more than one holder remains after all four scores the
//! round is cancelled; the first to reach the maximum gets no preference.

use tracing::{debug, info};

use crate::core::address::Address;
use crate::core::keys::{RoundId, StorageKey};
use crate::escrow::error::{EscrowError, EscrowResult};
use crate::escrow::events::EscrowEvent;
use crate::escrow::ownership::require_owner;
use crate::escrow::registry::load_undecided;
use crate::escrow::settlement::{cancel_battle, process_winner, Settlement};
use crate::escrow::state::{HighestScorer, ScoreRecord, PARTICIPANTS_PER_ROUND};
use crate::host::context::CallEnv;
use crate::host::store::{RecordStore, RecordStoreExt};

/// Result of one score submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Waiting for more scores.
    Recorded {
        /// Scores submitted so far
        submitted: u32,
    },
    /// Fourth score in; round settled.
    Settled(Settlement),
}

/// Report `participant`'s score for a round. Owner only.
pub fn end_round(
    env: &mut CallEnv<'_>,
    participant: Address,
    round_id: RoundId,
    score: u32,
) -> EscrowResult<ScoreOutcome> {
    require_owner(env)?;
    let mut round = load_undecided(env.store(), round_id)?;
    if !round.has_participant(&participant) {
        return Err(EscrowError::NotParticipant);
    }

    let score_key = StorageKey::Score(round_id, participant);
    let mut record: ScoreRecord = env.load(&score_key)?;
    if record.submitted {
        return Err(EscrowError::AlreadySubmitted);
    }
    record.score = score;
    record.submitted = true;
    env.save(score_key, &record)?;

    let submitted = submitted_count(env.store(), round_id)? + 1;
    env.save(StorageKey::SubmittedCount(round_id), &submitted)?;

    let scorer_key = StorageKey::Scorer(round_id);
    let mut highest: HighestScorer = env.load(&scorer_key)?;
    if highest.observe(participant, score) {
        env.save(scorer_key, &highest)?;
        if highest.is_tied() {
            debug!("Round {}: {} tied at {}", round_id, highest.holders.len(), highest.score);
        } else {
            debug!("Round {}: new maximum {} by {}", round_id, score, participant.short());
        }
    }
    debug!(
        "Round {}: score {} for {} ({}/{})",
        round_id,
        score,
        participant.short(),
        submitted,
        PARTICIPANTS_PER_ROUND
    );

    let outcome = if submitted as usize == PARTICIPANTS_PER_ROUND {
        let highest: HighestScorer = env.load(&scorer_key)?;
        let settlement = match highest.sole_holder() {
            Some(winner) => process_winner(env, &mut round, winner)?,
            None => cancel_battle(env, &mut round)?,
        };
        ScoreOutcome::Settled(settlement)
    } else {
        ScoreOutcome::Recorded { submitted }
    };

    let caller = env.caller();
    env.emit(EscrowEvent::end(round_id, caller));
    if let ScoreOutcome::Settled(_) = outcome {
        info!("Round {} settled", round_id);
    }
    Ok(outcome)
}

/// Scores submitted so far.
pub fn submitted_count(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<u32> {
    store.load(&StorageKey::SubmittedCount(round_id))
}

/// Score record of one participant.
pub fn score_of(
    store: &dyn RecordStore,
    round_id: RoundId,
    participant: Address,
) -> EscrowResult<ScoreRecord> {
    store.load(&StorageKey::Score(round_id, participant))
}

/// Highest-scorer record of a round.
pub fn highest_scorer(store: &dyn RecordStore, round_id: RoundId) -> EscrowResult<HighestScorer> {
    store.load(&StorageKey::Scorer(round_id))
}
