//! Escrow Logic Module
//!
//! The battle lifecycle state machine. 100% deterministic: no clocks, no
//! randomness, every record read and written through the host store.
//!
//! ## Module Structure
//!
//! - `state`: Record shapes and constants
//! - `ownership`: Two-step administrator handoff
//! - `registry`: Round creation and reads
//! - `admission`: Participant entry and fee escrow
//! - `scoring`: Score intake and tie resolution
//! - `settlement`: Payout or refund
//! - `events`: Externally observable log entries
//! - `contract`: Public operation surface

pub mod error;
pub mod state;
pub mod events;
pub mod ownership;
pub mod registry;
pub mod admission;
pub mod scoring;
pub mod settlement;
pub mod contract;

// Re-export key types
pub use contract::BattleEscrow;
pub use error::{EscrowError, EscrowResult};
pub use events::{BattleEventKind, EscrowEvent};
pub use ownership::Ownership;
pub use scoring::ScoreOutcome;
pub use settlement::Settlement;
pub use state::{HighestScorer, Round, RoundStatus, ScoreRecord, PARTICIPANTS_PER_ROUND, MAX_FEE};
