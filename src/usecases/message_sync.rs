use std::collections::HashMap;
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::domain::{
    conversation::ConversationRef,
    message::{Message, MessageContent},
    message_record::{MessageKey, MessageRecord},
};

/// External party interested in updates to one message, notified without
/// having its lifetime extended by the store.
pub trait MessageObserver: Send + Sync {
    fn message_updated(&self, key: MessageKey);
}

/// Weak back-references from record identity to an optional observer.
/// Dead entries are pruned on notify.
#[derive(Default)]
pub struct MessageObserverRegistry {
    observers: HashMap<MessageKey, Weak<dyn MessageObserver>>,
}

impl MessageObserverRegistry {
    pub fn register(&mut self, key: MessageKey, observer: &Arc<dyn MessageObserver>) {
        self.observers.insert(key, Arc::downgrade(observer));
    }

    pub fn remove(&mut self, key: MessageKey) {
        self.observers.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notifies the observer registered for `key`, if it is still alive.
    pub fn notify(&mut self, key: MessageKey) -> bool {
        let Some(weak) = self.observers.get(&key) else {
            return false;
        };

        match weak.upgrade() {
            Some(observer) => {
                observer.message_updated(key);
                true
            }
            None => {
                self.observers.remove(&key);
                false
            }
        }
    }
}

/// One incoming change to a message. Metadata and content travel on
/// separate channels; a content delta never carries metadata and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDelta {
    Metadata(Message),
    Content {
        chat_id: i64,
        message_id: i64,
        content: MessageContent,
    },
}

impl MessageDelta {
    pub fn key(&self) -> MessageKey {
        match self {
            MessageDelta::Metadata(message) => MessageKey::of(message),
            MessageDelta::Content {
                chat_id,
                message_id,
                ..
            } => MessageKey::new(*chat_id, *message_id),
        }
    }
}

/// Owner of the live in-memory message records for the displayed views.
///
/// Records enter on slice loads or realtime updates and leave via `evict`;
/// the eviction policy itself belongs to the view layer.
#[derive(Default)]
pub struct MessageStore {
    records: HashMap<MessageKey, MessageRecord>,
    observers: MessageObserverRegistry,
}

impl MessageStore {
    pub fn insert(&mut self, chat: &ConversationRef, message: Message) -> MessageKey {
        let key = MessageKey::of(&message);
        self.records
            .insert(key, MessageRecord::new(chat.clone(), message, true));
        key
    }

    pub fn record(&self, key: MessageKey) -> Option<&MessageRecord> {
        self.records.get(&key)
    }

    pub fn record_mut(&mut self, key: MessageKey) -> Option<&mut MessageRecord> {
        self.records.get_mut(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn register_observer(&mut self, key: MessageKey, observer: &Arc<dyn MessageObserver>) {
        self.observers.register(key, observer);
    }

    /// Routes a delta to the owning record. Deltas for messages not in
    /// memory are ignored; the next slice load will carry current state.
    pub fn apply(&mut self, delta: MessageDelta) -> bool {
        let key = delta.key();

        let Some(record) = self.records.get_mut(&key) else {
            debug!(
                chat_id = key.chat_id,
                message_id = key.message_id,
                "delta for unknown record ignored"
            );
            return false;
        };

        match delta {
            MessageDelta::Metadata(incoming) => record.merge_update(&incoming),
            MessageDelta::Content { content, .. } => record.replace_content(content),
        }

        self.observers.notify(key);
        true
    }

    pub fn evict(&mut self, key: MessageKey) -> Option<MessageRecord> {
        self.observers.remove(key);
        self.records.remove(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{message, message_with_content};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingObserver {
        notified: AtomicUsize,
    }

    impl MessageObserver for CountingObserver {
        fn message_updated(&self, _key: MessageKey) {
            self.notified.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn store_with_message(chat_id: i64, message_id: i64) -> (MessageStore, MessageKey) {
        let mut store = MessageStore::default();
        let chat = ConversationRef::private_user(chat_id, 100);
        let key = store.insert(&chat, message(chat_id, message_id));
        (store, key)
    }

    #[test]
    fn metadata_delta_merges_into_existing_record() {
        let (mut store, key) = store_with_message(1, 10);
        let mut incoming = message(1, 10);
        incoming.is_pinned = true;

        assert!(store.apply(MessageDelta::Metadata(incoming)));

        let record = store.record(key).expect("record must exist");
        assert!(record.message().is_pinned);
    }

    #[test]
    fn content_delta_replaces_content_and_display_text() {
        let (mut store, key) = store_with_message(1, 10);

        assert!(store.apply(MessageDelta::Content {
            chat_id: 1,
            message_id: 10,
            content: MessageContent::Photo {
                caption: "edited".to_owned(),
            },
        }));

        let record = store.record(key).expect("record must exist");
        assert!(matches!(record.content(), MessageContent::Photo { .. }));
        assert_eq!(record.display_text(), Some("edited"));
    }

    #[test]
    fn delta_for_unknown_record_is_ignored() {
        let mut store = MessageStore::default();

        assert!(!store.apply(MessageDelta::Metadata(message(1, 10))));
        assert!(store.is_empty());
    }

    #[test]
    fn observer_is_notified_per_applied_delta() {
        let (mut store, key) = store_with_message(1, 10);
        let counting = Arc::new(CountingObserver::default());
        let observer: Arc<dyn MessageObserver> = counting.clone();
        store.register_observer(key, &observer);

        store.apply(MessageDelta::Metadata(message(1, 10)));
        store.apply(MessageDelta::Content {
            chat_id: 1,
            message_id: 10,
            content: MessageContent::Sticker,
        });

        assert_eq!(counting.notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropped_observer_is_pruned_on_notify() {
        let mut registry = MessageObserverRegistry::default();
        let key = MessageKey::new(1, 10);
        {
            let counting = Arc::new(CountingObserver::default());
            let observer: Arc<dyn MessageObserver> = counting;
            registry.register(key, &observer);
        }

        assert!(!registry.notify(key));
        assert!(registry.is_empty());
    }

    #[test]
    fn live_observer_survives_notification() {
        let mut registry = MessageObserverRegistry::default();
        let key = MessageKey::new(1, 10);
        let counting = Arc::new(CountingObserver::default());
        let observer: Arc<dyn MessageObserver> = counting.clone();
        registry.register(key, &observer);

        assert!(registry.notify(key));
        assert!(registry.notify(key));
        assert_eq!(registry.len(), 1);
        assert_eq!(counting.notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn evict_removes_record_and_observer_entry() {
        let (mut store, key) = store_with_message(1, 10);
        let counting = Arc::new(CountingObserver::default());
        let observer: Arc<dyn MessageObserver> = counting.clone();
        store.register_observer(key, &observer);

        let evicted = store.evict(key);

        assert!(evicted.is_some());
        assert!(store.is_empty());
        assert!(!store.apply(MessageDelta::Metadata(message(1, 10))));
        assert_eq!(counting.notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn album_metadata_delta_refreshes_aggregate_caption() {
        let mut store = MessageStore::default();
        let chat = ConversationRef::private_user(1, 100);
        let children = vec![
            message_with_content(
                1,
                11,
                MessageContent::Photo {
                    caption: "A".to_owned(),
                },
            ),
            message_with_content(
                1,
                12,
                MessageContent::Photo {
                    caption: "B".to_owned(),
                },
            ),
        ];
        let album = message_with_content(
            1,
            10,
            MessageContent::Album(crate::domain::message::Album {
                messages: children,
                is_media: true,
            }),
        );
        let key = store.insert(&chat, album);

        store.apply(MessageDelta::Metadata(message_with_content(
            1,
            10,
            MessageContent::Sticker,
        )));

        // Two distinct captions: ambiguous, aggregate cleared.
        let record = store.record(key).expect("record must exist");
        assert_eq!(record.display_text(), None);
    }
}
