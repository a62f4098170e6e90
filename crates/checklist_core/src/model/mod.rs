//! Checklist data model.
//!
//! # Responsibility
//! - Define the list/item/collection shapes persisted as one snapshot.
//!
//! # Invariants
//! - List ids are unique within a collection; item ids within a list.
//! - An item belongs to exactly one list; there are no cross-list references.

pub mod checklist;
