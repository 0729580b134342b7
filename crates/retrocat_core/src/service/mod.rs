//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory record collection and its mutation API.
//! - Keep the interaction layer decoupled from storage details.

pub mod record_store;
