//! Use case layer: navigation workflows and message-state synchronization.

pub mod contracts;
pub mod message_sync;
pub mod navigation_queue;
pub mod resolve_navigation;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
