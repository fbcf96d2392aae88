//! Core domain logic for Aquascape Planner.
//! This crate is the single source of truth for tank invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::tank::{
    CreateTankInput, Tank, TankId, TankUpdate, TankValidationError, MAX_LIGHTING_HOURS,
};
pub use repo::tank_repo::{InMemoryTankRepository, TankRepository};
pub use store::tank_store::{StoreError, StoreResult, SubscriptionId, TankStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
