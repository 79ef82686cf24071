//! Escrow Record Definitions
//!
//! All persistent record shapes for the battle escrow. Every record has a
//! `Default` that equals what the store returns for an absent key.

use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::hash::AuditHasher;
use crate::core::keys::RoundId;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Exactly four participants per round.
pub const PARTICIPANTS_PER_ROUND: usize = 4;

/// Id of the first round created.
pub const FIRST_ROUND_ID: RoundId = 1;

/// Fees must be strictly below this to keep payout arithmetic in range.
pub const MAX_FEE: u64 = u64::MAX / 4;

/// Fee multiples paid to the winner.
pub const WINNER_SHARE: u64 = (PARTICIPANTS_PER_ROUND as u64) - 1;

/// Fee multiples paid to the owner.
pub const OWNER_SHARE: u64 = 1;

// =============================================================================
// ROUND
// =============================================================================

/// One battle.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Round {
    /// Round id (0 = never created)
    pub id: RoundId,

    /// Winner, or zero while undecided / after cancellation
    pub winner: Address,

    /// Participant slots, filled in admission order
    pub participants: [Address; PARTICIPANTS_PER_ROUND],

    /// Entry fee paid by every participant
    pub fee: u64,

    /// Set when the round ends in a tie at the highest score
    pub cancelled: bool,
}

impl Round {
    /// Create a fresh round.
    pub fn new(id: RoundId, fee: u64) -> Self {
        Self {
            id,
            winner: Address::ZERO,
            participants: [Address::ZERO; PARTICIPANTS_PER_ROUND],
            fee,
            cancelled: false,
        }
    }

    /// Was this record ever written by round creation?
    #[inline]
    pub fn exists(&self) -> bool {
        self.id != 0
    }

    /// Has a winner been paid out?
    #[inline]
    pub fn is_decided(&self) -> bool {
        !self.winner.is_zero()
    }

    /// Does this address occupy a participant slot?
    pub fn has_participant(&self, address: &Address) -> bool {
        !address.is_zero() && self.participants.contains(address)
    }

    /// Total escrowed once all slots are filled.
    pub fn pot(&self) -> u64 {
        self.fee.saturating_mul(PARTICIPANTS_PER_ROUND as u64)
    }

    /// Hash this round's record for auditing.
    pub fn hash_into(&self, hasher: &mut AuditHasher) {
        hasher.update_u64(self.id);
        hasher.update_address(&self.winner);
        for slot in &self.participants {
            hasher.update_address(slot);
        }
        hasher.update_u64(self.fee);
        hasher.update_bool(self.cancelled);
    }
}

// =============================================================================
// SCORE RECORDS
// =============================================================================

/// Score of one participant in one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Reported score
    pub score: u32,

    /// Once true, never changes for this (round, address)
    pub submitted: bool,
}

/// Running maximum and every address tied at it.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighestScorer {
    /// Highest score seen so far (0 before any submission)
    pub score: u32,

    /// Addresses currently tied at `score`, in submission order
    pub holders: Vec<Address>,
}

impl HighestScorer {
    /// Fold one submission into the running maximum.
    ///
    /// Strictly greater replaces the holders, equal appends, lower is ignored.
    /// Returns true if the record changed.
    pub fn observe(&mut self, participant: Address, score: u32) -> bool {
        if score > self.score {
            self.score = score;
            self.holders = vec![participant];
            true
        } else if score == self.score {
            self.holders.push(participant);
            true
        } else {
            false
        }
    }

    /// Is more than one address tied at the maximum?
    #[inline]
    pub fn is_tied(&self) -> bool {
        self.holders.len() > 1
    }

    /// Sole holder, if exactly one.
    pub fn sole_holder(&self) -> Option<Address> {
        match self.holders.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Hash this record for auditing.
    pub fn hash_into(&self, hasher: &mut AuditHasher) {
        hasher.update_u32(self.score);
        hasher.update_u32(self.holders.len() as u32);
        for holder in &self.holders {
            hasher.update_address(holder);
        }
    }
}

// =============================================================================
// ROUND STATUS
// =============================================================================

/// Derived lifecycle view of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No round with this id was ever created
    Unknown,
    /// Accepting participants
    Open,
    /// All slots taken, awaiting scores
    Full,
    /// Winner paid
    Decided,
    /// Tie at the highest score, everyone refunded
    Cancelled,
}

impl RoundStatus {
    /// Derive status from a round and its admission counter.
    pub fn of(round: &Round, admitted: u32) -> Self {
        if !round.exists() {
            RoundStatus::Unknown
        } else if round.is_decided() {
            RoundStatus::Decided
        } else if round.cancelled {
            RoundStatus::Cancelled
        } else if admitted as usize >= PARTICIPANTS_PER_ROUND {
            RoundStatus::Full
        } else {
            RoundStatus::Open
        }
    }

    /// Is the round settled?
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundStatus::Decided | RoundStatus::Cancelled)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(label: &str) -> Address {
        Address::derive(label)
    }

    #[test]
    fn test_default_round_does_not_exist() {
        let round = Round::default();
        assert!(!round.exists());
        assert!(!round.is_decided());
        assert_eq!(RoundStatus::of(&round, 0), RoundStatus::Unknown);
    }

    #[test]
    fn test_new_round_is_open() {
        let round = Round::new(1, 100);
        assert!(round.exists());
        assert_eq!(round.participants, [Address::ZERO; PARTICIPANTS_PER_ROUND]);
        assert_eq!(round.pot(), 400);
        assert_eq!(RoundStatus::of(&round, 3), RoundStatus::Open);
        assert_eq!(RoundStatus::of(&round, 4), RoundStatus::Full);
        assert!(!RoundStatus::Full.is_terminal());
        assert!(RoundStatus::Decided.is_terminal());
        assert!(RoundStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_zero_address_is_never_a_participant() {
        let round = Round::new(1, 100);
        assert!(!round.has_participant(&Address::ZERO));
    }

    #[test]
    fn test_highest_scorer_replace_and_append() {
        let mut hs = HighestScorer::default();
        assert!(hs.observe(addr("a"), 10));
        assert!(hs.observe(addr("b"), 20));
        assert_eq!(hs.holders, vec![addr("b")]);
        assert!(hs.observe(addr("c"), 20));
        assert_eq!(hs.holders, vec![addr("b"), addr("c")]);
        assert!(!hs.observe(addr("d"), 5));
        assert_eq!(hs.score, 20);
        assert!(hs.is_tied());
        assert_eq!(hs.sole_holder(), None);
    }

    #[test]
    fn test_all_zero_scores_tie() {
        let mut hs = HighestScorer::default();
        for label in ["a", "b", "c", "d"] {
            hs.observe(addr(label), 0);
        }
        assert_eq!(hs.holders.len(), 4);
        assert!(hs.is_tied());
    }

    #[test]
    fn test_sole_holder() {
        let mut hs = HighestScorer::default();
        hs.observe(addr("a"), 3);
        hs.observe(addr("b"), 1);
        assert_eq!(hs.sole_holder(), Some(addr("a")));
    }

    #[test]
    fn test_shares_cover_pot() {
        assert_eq!(WINNER_SHARE + OWNER_SHARE, PARTICIPANTS_PER_ROUND as u64);
        let fee = MAX_FEE - 1;
        assert!(fee.checked_mul(PARTICIPANTS_PER_ROUND as u64).is_some());
    }
}
