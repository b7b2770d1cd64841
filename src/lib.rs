//! Chat navigation resolution and message-state synchronization core for a
//! Telegram-style client.
//!
//! Two cooperating pieces: [`usecases::resolve_navigation`] decides what to
//! do with a navigation request (reuse the displayed view, replace it, open
//! a secondary window, deny, or nothing), with
//! [`usecases::navigation_queue::NavigationCoordinator`] serializing commits
//! against the displayed-view slot; [`usecases::message_sync::MessageStore`]
//! owns the live message records and merges incoming metadata and content
//! deltas while keeping derived caches coherent. Rendering, transport, and
//! persistence stay behind the contracts in [`usecases::contracts`].

pub mod domain;
pub mod infra;
pub mod usecases;

#[cfg(test)]
mod test_support;
