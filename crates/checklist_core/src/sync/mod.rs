//! Snapshot persistence.
//!
//! # Responsibility
//! - Encode collections for the key-value slot.
//! - Hydrate once at startup and persist after every store commit.
//!
//! # Invariants
//! - Each write carries the whole collection, never a diff.
//! - The durable slot converges to the most recent committed snapshot.

pub mod codec;
pub mod persistence;
pub mod writer;
