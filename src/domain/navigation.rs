use std::collections::HashMap;

use crate::domain::conversation::ConversationRef;

/// Opaque ancillary context carried with a navigation request, e.g. a
/// drag-drop payload reference handed over to the next view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateBag {
    entries: HashMap<String, String>,
}

impl StateBag {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A request to show a conversation, with optional sub-context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target: Option<ConversationRef>,
    pub message_id: Option<i64>,
    pub thread_id: Option<i64>,
    pub saved_topic_id: Option<i64>,
    pub access_token: Option<String>,
    pub scheduled: bool,
    pub force_new_view: bool,
    pub open_new_window: bool,
    pub truncate_back_stack: bool,
    pub state: StateBag,
}

impl NavigationRequest {
    pub fn to_conversation(target: ConversationRef) -> Self {
        Self {
            target: Some(target),
            message_id: None,
            thread_id: None,
            saved_topic_id: None,
            access_token: None,
            scheduled: false,
            force_new_view: false,
            open_new_window: false,
            truncate_back_stack: false,
            state: StateBag::default(),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            target: None,
            message_id: None,
            thread_id: None,
            saved_topic_id: None,
            access_token: None,
            scheduled: false,
            force_new_view: false,
            open_new_window: false,
            truncate_back_stack: false,
            state: StateBag::default(),
        }
    }
}

/// Kinds of views the navigation layer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Chat,
    ChatThread,
    SavedTopic,
    ScheduledChat,
    Profile,
}

/// The canonical view to show, with its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    Chat(i64),
    ChatThread { chat_id: i64, thread_id: i64 },
    SavedTopic { chat_id: i64, topic_id: i64 },
    ScheduledChat(i64),
    Profile(i64),
}

impl ViewTarget {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewTarget::Chat(_) => ViewKind::Chat,
            ViewTarget::ChatThread { .. } => ViewKind::ChatThread,
            ViewTarget::SavedTopic { .. } => ViewKind::SavedTopic,
            ViewTarget::ScheduledChat(_) => ViewKind::ScheduledChat,
            ViewTarget::Profile(_) => ViewKind::Profile,
        }
    }

    pub fn chat_id(&self) -> i64 {
        match self {
            ViewTarget::Chat(chat_id)
            | ViewTarget::ChatThread { chat_id, .. }
            | ViewTarget::SavedTopic { chat_id, .. }
            | ViewTarget::ScheduledChat(chat_id)
            | ViewTarget::Profile(chat_id) => *chat_id,
        }
    }
}

/// The view presently on screen. The resolver never mutates view state; it
/// only reads this snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedView {
    pub chat_id: i64,
    pub kind: ViewKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHint {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrentViewSnapshot {
    pub displayed: Option<DisplayedView>,
    pub layout_size: Option<SizeHint>,
}

impl CurrentViewSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn chat(chat_id: i64) -> Self {
        Self {
            displayed: Some(DisplayedView {
                chat_id,
                kind: ViewKind::Chat,
            }),
            layout_size: None,
        }
    }

    pub fn profile(chat_id: i64) -> Self {
        Self {
            displayed: Some(DisplayedView {
                chat_id,
                kind: ViewKind::Profile,
            }),
            layout_size: None,
        }
    }

    fn shows(&self, chat_id: i64, kind: ViewKind) -> bool {
        self.displayed
            .as_ref()
            .is_some_and(|view| view.chat_id == chat_id && view.kind == kind)
    }

    pub fn shows_chat(&self, chat_id: i64) -> bool {
        self.shows(chat_id, ViewKind::Chat)
    }

    pub fn shows_profile(&self, chat_id: i64) -> bool {
        self.shows(chat_id, ViewKind::Profile)
    }
}

/// Target position for loading a message slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAnchor {
    JumpTo(i64),
    MostRecent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionHint {
    SlideFromRight,
    SlideFromLeft,
    Suppressed,
}

/// Why a navigation request was rejected. Surfaced as a static informational
/// message keyed by the variant, never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeniedReason {
    Restriction(String),
    AntiSpamRedirect,
    PrivateChannel,
}

/// Outcome of resolving one navigation request. Exactly one variant per
/// request; `Denied` and `NoOp` never carry a transition hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    ReuseInPlace {
        refresh: MessageAnchor,
    },
    Replace {
        view: ViewTarget,
        anchor: Option<MessageAnchor>,
        transition: Option<TransitionHint>,
        truncate_back_stack: bool,
        state: StateBag,
    },
    OpenSecondary {
        view: ViewTarget,
        size_hint: Option<SizeHint>,
    },
    Denied {
        reason: DeniedReason,
    },
    NoOp,
}
