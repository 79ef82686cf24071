//! # Battle Escrow
//!
//! Deterministic escrow and arbitration for four-party wagering battles.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      BATTLE ESCROW                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── address.rs  - 20-byte account address                   │
//! │  ├── keys.rs     - Typed storage keys                        │
//! │  └── hash.rs     - Audit hashing                             │
//! │                                                              │
//! │  escrow/         - Battle state machine (deterministic)      │
//! │  ├── ownership.rs  - Two-step owner handoff                  │
//! │  ├── registry.rs   - Round creation and reads                │
//! │  ├── admission.rs  - Entry and fee escrow                    │
//! │  ├── scoring.rs    - Score intake and tie resolution         │
//! │  ├── settlement.rs - Payout / refund                         │
//! │  └── contract.rs   - Public operation surface                │
//! │                                                              │
//! │  host/           - Execution environment                     │
//! │  ├── store.rs    - Record store                              │
//! │  ├── ledger.rs   - Value transfer                            │
//! │  ├── events.rs   - Event sink                                │
//! │  ├── context.rs  - Caller and attached value                 │
//! │  └── memory.rs   - Atomic in-memory host                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! The owner opens a round with a fee. Four participants join, each attaching
//! exactly that fee. The owner reports one score per participant; on the
//! fourth score the sole highest scorer receives three fees and the owner one,
//! or, on a tie at the highest score, every participant is refunded.
//!
//! ## Determinism Guarantee
//!
//! Given the same sequence of calls the escrow produces the same records,
//! transfers and events on any host. Records are stored in BTreeMaps and
//! encoded with bincode; there are no clocks and no randomness.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod escrow;
pub mod host;

// Re-export commonly used types
pub use crate::core::address::Address;
pub use crate::core::keys::{RoundId, StorageKey};
pub use escrow::{
    BattleEscrow, EscrowError, EscrowEvent, EscrowResult, Round, RoundStatus, ScoreOutcome,
    Settlement,
};
pub use host::{CallContext, CallEnv, InMemoryHost};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
