use crate::domain::message::{Message, MessageContent, SenderId};

/// Baseline incoming message fixture; tests override the fields they probe.
pub(crate) fn message(chat_id: i64, id: i64) -> Message {
    Message {
        id,
        chat_id,
        sender_id: SenderId::User(100),
        date: 1_700_000_000,
        edit_date: 0,
        is_outgoing: false,
        is_pinned: false,
        is_channel_post: false,
        is_topic_message: false,
        contains_unread_mention: false,
        can_be_edited: false,
        can_be_forwarded: true,
        can_be_saved: true,
        can_be_deleted_only_for_self: true,
        can_be_deleted_for_all_users: false,
        can_get_message_thread: false,
        can_get_viewers: false,
        can_get_read_date: false,
        message_thread_id: 0,
        media_album_id: 0,
        via_bot_user_id: 0,
        author_signature: String::new(),
        restriction_reason: String::new(),
        reply_to: None,
        forward_info: None,
        interaction_info: None,
        sending_state: None,
        scheduling_state: None,
        content: MessageContent::Text {
            text: "hello".to_owned(),
            has_link_preview: false,
        },
    }
}

pub(crate) fn message_with_content(chat_id: i64, id: i64, content: MessageContent) -> Message {
    let mut fixture = message(chat_id, id);
    fixture.content = content;
    fixture
}
