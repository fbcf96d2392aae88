//! Presentation layer and command shell for Aquascape Planner.
//!
//! # Responsibility
//! - Compose core store state into pages.
//! - Keep UI-level validation and rendering out of `aquascape_core`.

pub mod config;
pub mod routes;
pub mod shell;
pub mod ui;

pub use config::{AppConfig, ConfigError};
pub use routes::{Route, RouteError};
pub use shell::{Shell, ShellError, ShellOutcome};
pub use ui::form::{FormError, FormField, TankForm};
pub use ui::list::TankList;
