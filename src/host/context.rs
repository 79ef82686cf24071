//! Execution Context
//!
//! Everything one call can see: who is calling, what they attached, and the
//! host services the escrow writes through.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::address::Address;
use crate::core::keys::StorageKey;
use crate::escrow::error::EscrowResult;
use crate::escrow::events::EscrowEvent;
use crate::host::events::EventSink;
use crate::host::ledger::ValueTransfer;
use crate::host::store::{RecordStore, RecordStoreExt};

/// Read-only facts about the current call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Address initiating the call.
    pub caller: Address,
    /// Amount sent with the call.
    pub attached_value: u64,
}

impl CallContext {
    /// Call with no attached value.
    pub fn new(caller: Address) -> Self {
        Self { caller, attached_value: 0 }
    }

    /// Payable call.
    pub fn with_value(caller: Address, attached_value: u64) -> Self {
        Self { caller, attached_value }
    }
}

/// Per-call environment handed to every escrow operation.
pub struct CallEnv<'a> {
    ctx: CallContext,
    store: &'a mut dyn RecordStore,
    ledger: &'a mut dyn ValueTransfer,
    events: &'a mut dyn EventSink,
}

impl<'a> CallEnv<'a> {
    /// Bundle a call context with the host services.
    pub fn new(
        ctx: CallContext,
        store: &'a mut dyn RecordStore,
        ledger: &'a mut dyn ValueTransfer,
        events: &'a mut dyn EventSink,
    ) -> Self {
        Self { ctx, store, ledger, events }
    }

    /// Caller of the current call.
    #[inline]
    pub fn caller(&self) -> Address {
        self.ctx.caller
    }

    /// Value attached to the current call.
    #[inline]
    pub fn attached_value(&self) -> u64 {
        self.ctx.attached_value
    }

    /// Read-only view of the store.
    pub fn store(&self) -> &dyn RecordStore {
        &*self.store
    }

    /// Load a record (default when absent).
    pub fn load<T: DeserializeOwned + Default>(&self, key: &StorageKey) -> EscrowResult<T> {
        self.store.load(key)
    }

    /// Persist a record.
    pub fn save<T: Serialize>(&mut self, key: StorageKey, value: &T) -> EscrowResult<()> {
        self.store.save(key, value)
    }

    /// Pay out of escrow. Failure aborts the call.
    pub fn transfer(&mut self, to: Address, amount: u64) -> EscrowResult<()> {
        self.ledger.transfer(to, amount)?;
        Ok(())
    }

    /// Emit an event.
    pub fn emit(&mut self, event: EscrowEvent) {
        self.events.emit(event);
    }
}
