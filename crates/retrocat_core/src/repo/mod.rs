//! Repository layer over the storage adapter.
//!
//! # Responsibility
//! - Map application records to one storage entry each.
//! - Keep encoding and file naming out of the record store.
//!
//! # Invariants
//! - Entry name is `<applicantAddress>.json`.
//! - Reads reject entries whose stem disagrees with the record address.

pub mod application_repo;
