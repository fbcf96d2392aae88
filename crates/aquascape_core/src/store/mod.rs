//! Tank store: the single owner of tank state.
//!
//! # Responsibility
//! - Centralize every tank mutation behind one explicitly constructed object.
//! - Fan out change notifications to presentation subscribers.

pub mod tank_store;
