/// Identity of the author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderId {
    User(i64),
    Chat(i64),
}

impl SenderId {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            SenderId::User(id) => Some(*id),
            SenderId::Chat(_) => None,
        }
    }
}

/// Where a forwarded message originally came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOrigin {
    User(i64),
    Chat(i64),
    Channel { chat_id: i64, message_id: i64 },
    HiddenUser(String),
}

/// The chat a forwarded message was forwarded from, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardSource {
    pub chat_id: i64,
    pub is_outgoing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardInfo {
    pub origin: ForwardOrigin,
    pub source: Option<ForwardSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageReplyTo {
    pub chat_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionInfo {
    pub view_count: u32,
    pub forward_count: u32,
    pub reply_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendingState {
    Pending,
    Failed { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingState {
    AtDate(i64),
    WhenOnline,
}

/// Messages grouped under one media-album id, displayed as a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub messages: Vec<Message>,
    pub is_media: bool,
}

/// Message payload. Unrecognized wire content maps to `Unknown` so rendering
/// layers can degrade instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text { text: String, has_link_preview: bool },
    Photo { caption: String },
    Video { caption: String },
    Audio { caption: String },
    Document { caption: String },
    Animation { caption: String },
    Sticker,
    Dice,
    Contact,
    Location,
    Game,
    Invoice { title: String },
    Service,
    Album(Album),
    Unknown,
}

impl MessageContent {
    /// Returns the user-visible text carried by this content: the body of a
    /// text message, the caption of captioned media, nothing otherwise.
    pub fn caption(&self) -> Option<&str> {
        match self {
            MessageContent::Text { text, .. } => Some(text),
            MessageContent::Photo { caption }
            | MessageContent::Video { caption }
            | MessageContent::Audio { caption }
            | MessageContent::Document { caption }
            | MessageContent::Animation { caption } => Some(caption),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: SenderId,
    pub date: i64,
    pub edit_date: i64,
    pub is_outgoing: bool,
    pub is_pinned: bool,
    pub is_channel_post: bool,
    pub is_topic_message: bool,
    pub contains_unread_mention: bool,
    pub can_be_edited: bool,
    pub can_be_forwarded: bool,
    pub can_be_saved: bool,
    pub can_be_deleted_only_for_self: bool,
    pub can_be_deleted_for_all_users: bool,
    pub can_get_message_thread: bool,
    pub can_get_viewers: bool,
    pub can_get_read_date: bool,
    pub message_thread_id: i64,
    pub media_album_id: i64,
    pub via_bot_user_id: i64,
    pub author_signature: String,
    pub restriction_reason: String,
    pub reply_to: Option<MessageReplyTo>,
    pub forward_info: Option<ForwardInfo>,
    pub interaction_info: Option<InteractionInfo>,
    pub sending_state: Option<SendingState>,
    pub scheduling_state: Option<SchedulingState>,
    pub content: MessageContent,
}

impl Message {
    /// Derives the display text for a content payload: the caption, if any
    /// and non-empty.
    pub fn display_text_of(content: &MessageContent) -> Option<String> {
        content
            .caption()
            .filter(|caption| !caption.is_empty())
            .map(ToOwned::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_returns_body_for_text_content() {
        let content = MessageContent::Text {
            text: "hello".to_owned(),
            has_link_preview: false,
        };

        assert_eq!(content.caption(), Some("hello"));
    }

    #[test]
    fn caption_returns_media_caption() {
        let content = MessageContent::Photo {
            caption: "sunset".to_owned(),
        };

        assert_eq!(content.caption(), Some("sunset"));
    }

    #[test]
    fn caption_is_absent_for_uncaptioned_content() {
        assert_eq!(MessageContent::Sticker.caption(), None);
        assert_eq!(MessageContent::Service.caption(), None);
        assert_eq!(MessageContent::Unknown.caption(), None);
    }

    #[test]
    fn display_text_filters_empty_captions() {
        let empty = MessageContent::Photo {
            caption: String::new(),
        };

        assert_eq!(Message::display_text_of(&empty), None);
        assert_eq!(
            Message::display_text_of(&MessageContent::Photo {
                caption: "x".to_owned()
            }),
            Some("x".to_owned())
        );
    }

    #[test]
    fn sender_user_id_is_only_present_for_user_senders() {
        assert_eq!(SenderId::User(5).user_id(), Some(5));
        assert_eq!(SenderId::Chat(5).user_id(), None);
    }
}
