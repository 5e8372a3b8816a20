//! # hostsync-inventory
//!
//! Slot allocation in the CSV "database": row 0 is the header, every data
//! row's first column is a hostname-or-empty slot. [`ensure_host`] is the
//! single mutating entrypoint — idempotent lookup, first-empty-slot
//! allocation, guarded by a sidecar lock file and persisted with an atomic
//! tmp + rename.

pub mod error;
pub mod store;
pub mod table;

pub use error::InventoryError;
pub use store::{ensure_host, SlotOutcome};
pub use table::SlotTable;
