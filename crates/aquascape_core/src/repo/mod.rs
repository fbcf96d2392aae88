//! Repository layer for tank records.
//!
//! # Responsibility
//! - Define the storage contract the store writes through.
//! - Provide the process-local in-memory implementation.

pub mod tank_repo;
