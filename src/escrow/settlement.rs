//! Settlement Engine
//!
//! Terminal resolution of a round: pay the sole highest scorer and the owner,
//! or refund all four participants on a tie.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::address::Address;
use crate::core::keys::StorageKey;
use crate::escrow::error::{EscrowError, EscrowResult};
use crate::escrow::state::{Round, OWNER_SHARE, PARTICIPANTS_PER_ROUND, WINNER_SHARE};
use crate::host::context::CallEnv;

/// Outcome of settling a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// Sole highest scorer paid.
    Paid {
        /// Winning participant
        winner: Address,
        /// Amount sent to the winner
        prize: u64,
        /// Owner receiving the commission
        owner: Address,
        /// Amount sent to the owner
        commission: u64,
    },
    /// Tie at the highest score; everyone refunded.
    Cancelled {
        /// Refunded participants, in admission order
        refunded: [Address; PARTICIPANTS_PER_ROUND],
        /// Amount refunded to each
        refund: u64,
    },
}

impl Settlement {
    /// Total paid out (always the full pot).
    pub fn total(&self) -> u64 {
        match self {
            Settlement::Paid { prize, commission, .. } => prize + commission,
            Settlement::Cancelled { refund, .. } => refund * PARTICIPANTS_PER_ROUND as u64,
        }
    }
}

/// Record the winner, then pay out the prize.
pub fn process_winner(
    env: &mut CallEnv<'_>,
    round: &mut Round,
    winner: Address,
) -> EscrowResult<Settlement> {
    round.winner = winner;
    env.save(StorageKey::Round(round.id), &*round)?;
    process_prize(env, round, winner)
}

/// Pay `WINNER_SHARE * fee` to the winner and `OWNER_SHARE * fee` to the owner.
fn process_prize(env: &mut CallEnv<'_>, round: &Round, winner: Address) -> EscrowResult<Settlement> {
    let prize = round
        .fee
        .checked_mul(WINNER_SHARE)
        .ok_or(EscrowError::InvalidFee(round.fee))?;
    let commission = round
        .fee
        .checked_mul(OWNER_SHARE)
        .ok_or(EscrowError::InvalidFee(round.fee))?;
    let owner: Address = env.load(&StorageKey::Owner)?;

    env.transfer(winner, prize)?;
    env.transfer(owner, commission)?;

    info!(
        "Round {} won by {}: prize {}, commission {} to {}",
        round.id,
        winner.short(),
        prize,
        commission,
        owner.short()
    );
    Ok(Settlement::Paid { winner, prize, owner, commission })
}

/// Mark the round cancelled and refund every participant its fee.
pub fn cancel_battle(env: &mut CallEnv<'_>, round: &mut Round) -> EscrowResult<Settlement> {
    round.cancelled = true;
    env.save(StorageKey::Round(round.id), &*round)?;

    for participant in round.participants {
        env.transfer(participant, round.fee)?;
    }

    info!("Round {} cancelled on a tie, refunded {} each", round.id, round.fee);
    Ok(Settlement::Cancelled { refunded: round.participants, refund: round.fee })
}
