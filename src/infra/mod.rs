//! Infrastructure layer: config, logging, errors, and in-memory adapters.

pub mod config;
pub mod error;
pub mod logging;
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
