//! Use-case layer for presentation callers.
//!
//! # Responsibility
//! - Own the store and its persistence as one top-level controller.
//! - Track which screen is showing.
//!
//! # Invariants
//! - No mutation is accepted before hydration has finished.

pub mod checklist_service;
pub mod navigation;
