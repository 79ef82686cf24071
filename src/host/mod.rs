//! Host Module
//!
//! The execution environment the escrow runs inside. The traits are the
//! boundary a real host implements; the in-memory types are a reference host
//! used by the binary and the tests.
//!
//! - `store`: Persistent record store
//! - `ledger`: Value transfer primitive
//! - `events`: Event emission
//! - `context`: Caller identity and attached value
//! - `memory`: Atomic in-memory host

pub mod store;
pub mod ledger;
pub mod events;
pub mod context;
pub mod memory;

pub use context::{CallContext, CallEnv};
pub use events::{EventLog, EventSink};
pub use ledger::{MemoryLedger, TransferError, ValueTransfer};
pub use memory::InMemoryHost;
pub use store::{MemoryStore, RecordStore, RecordStoreExt};
