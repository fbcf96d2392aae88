//! Tank domain model.
//!
//! # Responsibility
//! - Define the data structures shared by the store and presentation layers.
//!
//! # Invariants
//! - Every tank is identified by a stable `TankId`.
//! - Stored tanks are only produced by the store's add path.

pub mod tank;
