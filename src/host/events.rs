//! Event Emission
//!
//! Append-only event sink provided by the host.

use crate::core::keys::RoundId;
use crate::escrow::events::EscrowEvent;

/// Fire-and-forget event sink.
pub trait EventSink {
    /// Append an event.
    fn emit(&mut self, event: EscrowEvent);
}

/// In-memory event log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    entries: Vec<EscrowEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in emission order.
    pub fn entries(&self) -> &[EscrowEvent] {
        &self.entries
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the log empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events referring to one round.
    pub fn for_round(&self, round_id: RoundId) -> Vec<&EscrowEvent> {
        self.entries
            .iter()
            .filter(|e| e.round_id() == Some(round_id))
            .collect()
    }

    /// Drop everything past `len` (used when a call is rolled back).
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Serialize the log to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: EscrowEvent) {
        self.entries.push(event);
    }
}
