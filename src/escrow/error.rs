//! Escrow Errors
//!
//! Every failure aborts the call. The host discards all writes, transfers and
//! events made during a failed call.

use crate::host::ledger::TransferError;

/// Escrow errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscrowError {
    /// Caller lacks the required privilege.
    #[error("Unauthorized")]
    Unauthorized,

    /// Fee too large for safe payout arithmetic.
    #[error("Invalid fee: {0}")]
    InvalidFee(u64),

    /// Round does not exist or is already decided.
    #[error("Round not found")]
    NotFound,

    /// Attached payment differs from the round fee.
    #[error("Fee mismatch: expected {expected}, attached {attached}")]
    FeeMismatch {
        /// Round fee.
        expected: u64,
        /// Value sent with the call.
        attached: u64,
    },

    /// Duplicate join or duplicate score for the same address and round.
    #[error("Already submitted")]
    AlreadySubmitted,

    /// All participant slots are taken.
    #[error("Round is full")]
    RoundFull,

    /// Score reported for an address that never joined the round.
    #[error("Not a participant")]
    NotParticipant,

    /// Construction already ran.
    #[error("Already initialized")]
    AlreadyInitialized,

    /// Value transfer failed.
    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// A record could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(String),
}

impl From<bincode::Error> for EscrowError {
    fn from(e: bincode::Error) -> Self {
        EscrowError::Codec(e.to_string())
    }
}

/// Result alias for escrow operations.
pub type EscrowResult<T> = Result<T, EscrowError>;
