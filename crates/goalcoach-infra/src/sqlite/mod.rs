//! SQLite storage layer.
//!
//! Backs the per-user credential store with WAL-mode SQLite and split
//! read/write connection pools.

pub mod credential;
pub mod pool;
