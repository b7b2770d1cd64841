//! In-memory collaborator implementations for tests and embedding hosts
//! that don't bring their own directory or payload storage.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    domain::{
        conversation::{ConversationRef, SupergroupRef, UserRef},
        message_record::MessageDirectory,
    },
    usecases::contracts::{ConversationDirectory, PendingPayload, PendingPayloadStore},
};

/// Directory backed by in-memory maps; remote resolution falls back to the
/// same local map.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    my_id: i64,
    anti_spam_bot_user_id: i64,
    users: HashMap<i64, UserRef>,
    supergroups: HashMap<i64, SupergroupRef>,
    conversations: HashMap<i64, ConversationRef>,
    accessible: HashSet<i64>,
}

impl InMemoryDirectory {
    pub fn new(my_id: i64) -> Self {
        Self {
            my_id,
            ..Self::default()
        }
    }

    pub fn set_anti_spam_bot(&mut self, user_id: i64) {
        self.anti_spam_bot_user_id = user_id;
    }

    pub fn insert_user(&mut self, user: UserRef) {
        self.users.insert(user.id, user);
    }

    pub fn insert_supergroup(&mut self, supergroup: SupergroupRef) {
        self.supergroups.insert(supergroup.id, supergroup);
    }

    pub fn insert_conversation(&mut self, conversation: ConversationRef) {
        self.conversations.insert(conversation.id, conversation);
    }

    pub fn mark_accessible(&mut self, chat_id: i64) {
        self.accessible.insert(chat_id);
    }
}

#[async_trait]
impl ConversationDirectory for InMemoryDirectory {
    fn get_user(&self, user_id: i64) -> Option<UserRef> {
        self.users.get(&user_id).cloned()
    }

    fn get_supergroup(&self, supergroup_id: i64) -> Option<SupergroupRef> {
        self.supergroups.get(&supergroup_id).cloned()
    }

    fn is_conversation_accessible(&self, conversation: &ConversationRef) -> bool {
        self.accessible.contains(&conversation.id)
    }

    fn my_id(&self) -> i64 {
        self.my_id
    }

    fn anti_spam_bot_user_id(&self) -> i64 {
        self.anti_spam_bot_user_id
    }

    async fn resolve_conversation(&self, chat_id: i64) -> Option<ConversationRef> {
        self.conversations.get(&chat_id).cloned()
    }
}

impl MessageDirectory for InMemoryDirectory {
    fn my_id(&self) -> i64 {
        self.my_id
    }

    fn is_bot_user(&self, user_id: i64) -> bool {
        self.users.get(&user_id).is_some_and(|user| user.is_bot)
    }

    fn get_supergroup(&self, supergroup_id: i64) -> Option<SupergroupRef> {
        self.supergroups.get(&supergroup_id).cloned()
    }
}

/// At most one pending payload per chat; `take` consumes it.
#[derive(Debug, Default)]
pub struct InMemoryPayloadStore {
    payloads: Mutex<HashMap<i64, PendingPayload>>,
}

impl InMemoryPayloadStore {
    pub fn put(&self, chat_id: i64, payload: PendingPayload) {
        self.payloads
            .lock()
            .expect("payload lock")
            .insert(chat_id, payload);
    }
}

impl PendingPayloadStore for InMemoryPayloadStore {
    fn take(&self, chat_id: i64) -> Option<PendingPayload> {
        self.payloads.lock().expect("payload lock").remove(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_consumed_exactly_once() {
        let store = InMemoryPayloadStore::default();
        store.put(1, PendingPayload::Text("x".to_owned()));

        assert_eq!(store.take(1), Some(PendingPayload::Text("x".to_owned())));
        assert_eq!(store.take(1), None);
    }

    #[test]
    fn latest_payload_replaces_the_pending_one() {
        let store = InMemoryPayloadStore::default();
        store.put(1, PendingPayload::Text("first".to_owned()));
        store.put(1, PendingPayload::Text("second".to_owned()));

        assert_eq!(
            store.take(1),
            Some(PendingPayload::Text("second".to_owned()))
        );
    }

    #[test]
    fn directory_lookups_miss_for_unknown_entities() {
        let directory = InMemoryDirectory::new(1);

        assert_eq!(ConversationDirectory::get_user(&directory, 9), None);
        assert_eq!(
            ConversationDirectory::get_supergroup(&directory, 9),
            None
        );
        assert!(!directory.is_bot_user(9));
    }
}
