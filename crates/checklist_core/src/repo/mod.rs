//! Storage adapters for the persisted snapshot slot.
//!
//! # Responsibility
//! - Hide the platform key-value primitive behind one small trait.
//! - Keep SQLite details out of the sync and service layers.

pub mod kv_repo;
