use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{
    conversation::{ConversationRef, SupergroupRef, UserRef},
    message_record::MessageRecord,
    navigation::{CurrentViewSnapshot, MessageAnchor, NavigationDecision},
};

/// Read-only directory lookups used for access gating. Lookups may be cached
/// by the implementation and must not block indefinitely; only
/// `resolve_conversation` is allowed to go remote.
#[async_trait]
pub trait ConversationDirectory: Send + Sync {
    fn get_user(&self, user_id: i64) -> Option<UserRef>;
    fn get_supergroup(&self, supergroup_id: i64) -> Option<SupergroupRef>;
    fn is_conversation_accessible(&self, conversation: &ConversationRef) -> bool;
    fn my_id(&self) -> i64;
    fn anti_spam_bot_user_id(&self) -> i64;

    /// Local lookup with a remote fetch fallback; `None` after an explicit
    /// fetch attempt means the conversation does not exist.
    async fn resolve_conversation(&self, chat_id: i64) -> Option<ConversationRef>;
}

/// Loads message slices for the in-place refresh path.
#[async_trait]
pub trait MessageSliceLoader: Send + Sync {
    async fn load_around_message(
        &self,
        chat_id: i64,
        message_id: i64,
    ) -> Result<Vec<MessageRecord>>;

    async fn load_most_recent(&self, chat_id: i64) -> Result<Vec<MessageRecord>>;
}

/// External payload waiting for the next view that opens for a chat,
/// e.g. files dropped onto a chat entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingPayload {
    DroppedFiles(Vec<String>),
    Text(String),
}

/// Holds at most one pending payload per chat, consumed exactly once.
pub trait PendingPayloadStore: Send + Sync {
    fn take(&self, chat_id: i64) -> Option<PendingPayload>;
}

/// The mutable displayed-view slot the coordinator commits decisions into.
/// Snapshot reads may observe changes made outside the coordinator.
#[async_trait]
pub trait ViewPort: Send {
    fn snapshot(&self) -> CurrentViewSnapshot;

    /// Refreshes the currently displayed chat view without tearing it down.
    async fn refresh_in_place(
        &mut self,
        anchor: &MessageAnchor,
        slice: Vec<MessageRecord>,
        payload: Option<PendingPayload>,
    ) -> Result<()>;

    /// Applies a view-changing decision (`Replace` or `OpenSecondary`).
    fn apply(&mut self, decision: &NavigationDecision) -> Result<()>;
}
