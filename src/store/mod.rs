//! Persisted record shapes and an in-memory store for them.

pub mod memory;
pub mod records;

pub use memory::{MemoryStore, RecordStore};
pub use records::{GeneratedCodeRecord, Record, ScanRecord};
