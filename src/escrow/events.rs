//! Escrow Events
//!
//! Externally observable log entries. Emitted in call order; never read back
//! by the escrow itself.

use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::keys::RoundId;

/// Battle lifecycle step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEventKind {
    /// Round created
    Start,
    /// Participant admitted
    Enter,
    /// Score recorded (and round settled, on the fourth)
    End,
}

impl BattleEventKind {
    /// Name as it appears in the log.
    pub fn as_str(self) -> &'static str {
        match self {
            BattleEventKind::Start => "Start",
            BattleEventKind::Enter => "Enter",
            BattleEventKind::End => "End",
        }
    }
}

/// Escrow event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EscrowEvent {
    /// Owner nominated a successor
    OwnershipNominated {
        from: Address,
        to: Address,
    },

    /// Nominee accepted ownership
    OwnershipTransferred {
        from: Address,
        to: Address,
    },

    /// Battle lifecycle step
    Battle {
        kind: BattleEventKind,
        round_id: RoundId,
        account: Address,
    },
}

impl EscrowEvent {
    /// Create round started event.
    pub fn start(round_id: RoundId, account: Address) -> Self {
        Self::Battle { kind: BattleEventKind::Start, round_id, account }
    }

    /// Create participant entered event.
    pub fn enter(round_id: RoundId, account: Address) -> Self {
        Self::Battle { kind: BattleEventKind::Enter, round_id, account }
    }

    /// Create score recorded event.
    pub fn end(round_id: RoundId, account: Address) -> Self {
        Self::Battle { kind: BattleEventKind::End, round_id, account }
    }

    /// Round this event refers to, if any.
    pub fn round_id(&self) -> Option<RoundId> {
        match self {
            EscrowEvent::Battle { round_id, .. } => Some(*round_id),
            _ => None,
        }
    }
}
