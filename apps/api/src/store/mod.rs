//! Record store: key-based reads and writes for the four persisted entities.
//! Each function runs a single statement against the pool, so every write is its own
//! transaction.

pub mod applications;
pub mod content;
pub mod jobs;
pub mod profile;
