use crate::domain::{
    album,
    conversation::{ConversationKind, ConversationRef, SupergroupRef},
    message::{ForwardOrigin, Message, MessageContent, SenderId},
};

/// Globally unique identity of a message, immutable for a record's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub chat_id: i64,
    pub message_id: i64,
}

impl MessageKey {
    pub fn new(chat_id: i64, message_id: i64) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }

    pub fn of(message: &Message) -> Self {
        Self::new(message.chat_id, message.id)
    }
}

/// Read-only directory lookups needed by the derived-flag predicates.
pub trait MessageDirectory {
    fn my_id(&self) -> i64;
    fn is_bot_user(&self, user_id: i64) -> bool;
    fn get_supergroup(&self, supergroup_id: i64) -> Option<SupergroupRef>;
}

impl<T> MessageDirectory for &T
where
    T: MessageDirectory + ?Sized,
{
    fn my_id(&self) -> i64 {
        (*self).my_id()
    }

    fn is_bot_user(&self, user_id: i64) -> bool {
        (*self).is_bot_user(user_id)
    }

    fn get_supergroup(&self, supergroup_id: i64) -> Option<SupergroupRef> {
        (*self).get_supergroup(supergroup_id)
    }
}

/// Lazily computed predicates, each invalidated independently.
/// `None` means "unknown, recompute on next read".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DerivedCache {
    is_service: Option<bool>,
    is_saved: Option<bool>,
    has_sender_photo: Option<bool>,
    can_be_shared: Option<bool>,
    can_be_added_to_downloads: Option<bool>,
}

impl DerivedCache {
    fn invalidate_content_dependent(&mut self) {
        self.is_service = None;
        self.has_sender_photo = None;
        self.can_be_shared = None;
        self.can_be_added_to_downloads = None;
    }
}

/// One live in-memory message: immutable identity, owning-conversation
/// snapshot, mutable wire fields, derived display text, and the flag cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    key: MessageKey,
    chat: ConversationRef,
    message: Message,
    display_text: Option<String>,
    cache: DerivedCache,
}

impl MessageRecord {
    pub fn new(chat: ConversationRef, message: Message, extract_text: bool) -> Self {
        let display_text = if extract_text {
            Message::display_text_of(&message.content)
        } else {
            None
        };

        Self {
            key: MessageKey::of(&message),
            chat,
            message,
            display_text,
            cache: DerivedCache::default(),
        }
    }

    pub fn key(&self) -> MessageKey {
        self.key
    }

    pub fn chat_id(&self) -> i64 {
        self.key.chat_id
    }

    pub fn id(&self) -> i64 {
        self.key.message_id
    }

    pub fn chat(&self) -> &ConversationRef {
        &self.chat
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn content(&self) -> &MessageContent {
        &self.message.content
    }

    pub fn display_text(&self) -> Option<&str> {
        self.display_text.as_deref()
    }

    /// Overwrites the mutable metadata field set from an incoming update.
    ///
    /// `Content` and `Date` are deliberately excluded: the update channel
    /// carries metadata-only deltas separately from content deltas (see
    /// [`MessageRecord::replace_content`]). Identity is never reassigned.
    pub fn merge_update(&mut self, incoming: &Message) {
        debug_assert_eq!(self.key, MessageKey::of(incoming));

        self.message.author_signature = incoming.author_signature.clone();
        self.message.can_be_deleted_for_all_users = incoming.can_be_deleted_for_all_users;
        self.message.can_be_deleted_only_for_self = incoming.can_be_deleted_only_for_self;
        self.message.can_be_edited = incoming.can_be_edited;
        self.message.can_be_saved = incoming.can_be_saved;
        self.message.can_be_forwarded = incoming.can_be_forwarded;
        self.message.can_get_message_thread = incoming.can_get_message_thread;
        self.message.can_get_viewers = incoming.can_get_viewers;
        self.message.can_get_read_date = incoming.can_get_read_date;
        self.message.contains_unread_mention = incoming.contains_unread_mention;
        self.message.edit_date = incoming.edit_date;
        self.message.forward_info = incoming.forward_info.clone();
        self.message.is_channel_post = incoming.is_channel_post;
        self.message.is_outgoing = incoming.is_outgoing;
        self.message.is_pinned = incoming.is_pinned;
        self.message.is_topic_message = incoming.is_topic_message;
        self.message.message_thread_id = incoming.message_thread_id;
        self.message.media_album_id = incoming.media_album_id;
        self.message.reply_to = incoming.reply_to;
        self.message.sender_id = incoming.sender_id;
        self.message.sending_state = incoming.sending_state.clone();
        self.message.scheduling_state = incoming.scheduling_state;
        self.message.via_bot_user_id = incoming.via_bot_user_id;
        self.message.interaction_info = incoming.interaction_info;
        self.message.restriction_reason = incoming.restriction_reason.clone();

        // Sender- and self-identity-dependent inputs may have changed.
        self.cache.is_saved = None;

        if let MessageContent::Album(group) = &self.message.content {
            self.display_text = album::aggregate_caption(&group.messages, group.is_media);
        }
    }

    /// Swaps the content payload and re-derives the display text.
    ///
    /// Every content-dependent cache entry is invalidated here; leaving them
    /// stale across a content swap is a correctness bug.
    pub fn replace_content(&mut self, content: MessageContent) {
        self.display_text = Message::display_text_of(&content);
        self.message.content = content;
        self.cache.invalidate_content_dependent();
    }

    /// Clears the service-message cache entry; used when the owning
    /// conversation context changes.
    pub fn reset(&mut self) {
        self.cache.is_service = None;
    }

    pub fn is_service(&mut self) -> bool {
        if let Some(value) = self.cache.is_service {
            return value;
        }

        let value = matches!(self.message.content, MessageContent::Service);
        self.cache.is_service = Some(value);
        value
    }

    /// True iff this record lives in the local account's saved-messages chat.
    pub fn is_saved(&mut self, directory: &dyn MessageDirectory) -> bool {
        if let Some(value) = self.cache.is_saved {
            return value;
        }

        let value = self.key.chat_id == directory.my_id();
        self.cache.is_saved = Some(value);
        value
    }

    pub fn can_be_shared(&mut self, directory: &dyn MessageDirectory) -> bool {
        if let Some(value) = self.cache.can_be_shared {
            return value;
        }

        let saved = self.is_saved(directory);
        let value = self.compute_can_be_shared(saved, directory);
        self.cache.can_be_shared = Some(value);
        value
    }

    fn compute_can_be_shared(&self, saved: bool, directory: &dyn MessageDirectory) -> bool {
        let message = &self.message;

        if message.scheduling_state.is_some() || !message.can_be_saved {
            return false;
        }

        if saved {
            return true;
        }

        if matches!(
            message.content,
            MessageContent::Sticker | MessageContent::Dice
        ) {
            return false;
        }

        let forwarded_from_channel = message
            .forward_info
            .as_ref()
            .is_some_and(|info| matches!(info.origin, ForwardOrigin::Channel { .. }));
        if forwarded_from_channel && !message.is_outgoing {
            return true;
        }

        if let SenderId::User(sender_user_id) = message.sender_id {
            if matches!(
                message.content,
                MessageContent::Text {
                    has_link_preview: false,
                    ..
                }
            ) {
                return false;
            }

            if !message.is_outgoing {
                if directory.is_bot_user(sender_user_id) {
                    return true;
                }

                if matches!(
                    message.content,
                    MessageContent::Game | MessageContent::Invoice { .. }
                ) {
                    return true;
                }

                if let ConversationKind::Supergroup { supergroup_id } = self.chat.kind {
                    return directory
                        .get_supergroup(supergroup_id)
                        .is_some_and(|group| group.is_public)
                        && !matches!(
                            message.content,
                            MessageContent::Contact | MessageContent::Location
                        );
                }
            }
        } else if message.is_channel_post {
            if message.via_bot_user_id == 0 && message.reply_to.is_none()
                || !matches!(message.content, MessageContent::Sticker)
            {
                return true;
            }
        }

        false
    }

    pub fn has_sender_photo(&mut self, directory: &dyn MessageDirectory) -> bool {
        if let Some(value) = self.cache.has_sender_photo {
            return value;
        }

        let service = self.is_service();
        let saved = self.is_saved(directory);
        let value = self.compute_has_sender_photo(service, saved);
        self.cache.has_sender_photo = Some(value);
        value
    }

    fn compute_has_sender_photo(&self, service: bool, saved: bool) -> bool {
        if service || self.message.is_channel_post {
            return false;
        }

        let forwarded_from_incoming = self
            .message
            .forward_info
            .as_ref()
            .and_then(|info| info.source.as_ref())
            .is_some_and(|source| !source.is_outgoing);
        if saved && forwarded_from_incoming {
            return true;
        }

        if self.message.is_outgoing {
            return false;
        }

        matches!(
            self.chat.kind,
            ConversationKind::BasicGroup { .. } | ConversationKind::Supergroup { .. }
        )
    }

    pub fn can_be_added_to_downloads(&mut self) -> bool {
        if let Some(value) = self.cache.can_be_added_to_downloads {
            return value;
        }

        let value = self.message.can_be_saved
            && !self.chat.has_protected_content
            && matches!(
                self.message.content,
                MessageContent::Audio { .. }
                    | MessageContent::Document { .. }
                    | MessageContent::Video { .. }
            );
        self.cache.can_be_added_to_downloads = Some(value);
        value
    }
}
