//! Domain model for application records under review.
//!
//! # Responsibility
//! - Define the persisted application record shape.
//! - Derive the review state (uncategorized/categorized/flagged) from it.
//!
//! # Invariants
//! - Every record is identified by a stable `applicantAddress`.
//! - Descriptive payload is never mutated by core and survives rewrites.

pub mod application;
