//! Domain layer: core entities and business rules.

pub mod album;
pub mod conversation;
pub mod message;
pub mod message_record;
pub mod navigation;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
