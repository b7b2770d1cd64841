use tracing::debug;

use crate::{
    domain::{
        conversation::{ConversationKind, ConversationRef, MembershipStatus},
        navigation::{
            CurrentViewSnapshot, MessageAnchor, NavigationDecision, NavigationRequest,
            TransitionHint, ViewTarget,
        },
    },
    infra::config::NavigationPrefs,
    usecases::contracts::ConversationDirectory,
};

/// State-bag key carrying the anchor message id to a newly opened view.
pub const STATE_MESSAGE_ID: &str = "message_id";
/// State-bag key carrying a pending invite credential to a newly opened view.
pub const STATE_ACCESS_TOKEN: &str = "access_token";

/// Decides what to do with a navigation request: reuse the displayed view,
/// replace it, open a secondary window, deny, or do nothing.
///
/// Pure with respect to its inputs; rules are evaluated in order and
/// short-circuit. The caller owns applying the decision to the view layer.
pub fn resolve(
    request: &NavigationRequest,
    current: &CurrentViewSnapshot,
    directory: &dyn ConversationDirectory,
    prefs: &NavigationPrefs,
) -> NavigationDecision {
    let Some(conversation) = &request.target else {
        return NavigationDecision::NoOp;
    };

    if let Some(denied) = gate_access(conversation, request, directory, prefs) {
        debug!(chat_id = conversation.id, ?denied, "navigation gated");
        return denied;
    }

    if can_reuse_in_place(conversation, request, current) {
        let refresh = request
            .message_id
            .map(MessageAnchor::JumpTo)
            .unwrap_or(MessageAnchor::MostRecent);
        return NavigationDecision::ReuseInPlace { refresh };
    }

    let view = select_view_target(conversation, request);

    if request.open_new_window {
        return NavigationDecision::OpenSecondary {
            view,
            size_hint: current.layout_size,
        };
    }

    let mut state = request.state.clone();
    if let Some(message_id) = request.message_id {
        state.insert(STATE_MESSAGE_ID, message_id.to_string());
    }
    if let Some(token) = &request.access_token {
        state.insert(STATE_ACCESS_TOKEN, token.clone());
    }

    NavigationDecision::Replace {
        view,
        anchor: request.message_id.map(MessageAnchor::JumpTo),
        transition: transition_for(&view, current),
        truncate_back_stack: request.truncate_back_stack,
        state,
    }
}

/// Access gating by conversation kind. Returns the terminal decision when a
/// gate fires, `None` to continue resolution.
fn gate_access(
    conversation: &ConversationRef,
    request: &NavigationRequest,
    directory: &dyn ConversationDirectory,
    prefs: &NavigationPrefs,
) -> Option<NavigationDecision> {
    use crate::domain::navigation::DeniedReason;

    match conversation.kind {
        ConversationKind::PrivateUser { user_id } => {
            let user = match directory.get_user(user_id) {
                Some(user) => user,
                None => return Some(NavigationDecision::NoOp),
            };

            if !user.restriction_reason.is_empty() {
                return Some(NavigationDecision::Denied {
                    reason: DeniedReason::Restriction(user.restriction_reason),
                });
            }

            if user.id == directory.anti_spam_bot_user_id() {
                return Some(NavigationDecision::Denied {
                    reason: DeniedReason::AntiSpamRedirect,
                });
            }

            // Saved-messages chat may be shown as a profile page instead.
            if user.id == directory.my_id()
                && request.thread_id.is_none()
                && request.saved_topic_id.is_none()
                && prefs.saved_view_as_chats
            {
                return Some(NavigationDecision::Replace {
                    view: ViewTarget::Profile(conversation.id),
                    anchor: None,
                    transition: None,
                    truncate_back_stack: false,
                    state: Default::default(),
                });
            }

            None
        }
        ConversationKind::Supergroup { supergroup_id }
        | ConversationKind::Channel { supergroup_id } => {
            let supergroup = match directory.get_supergroup(supergroup_id) {
                Some(supergroup) => supergroup,
                None => return Some(NavigationDecision::NoOp),
            };

            if supergroup.status == MembershipStatus::Left
                && !supergroup.is_public
                && !directory.is_conversation_accessible(conversation)
            {
                return Some(NavigationDecision::Denied {
                    reason: DeniedReason::PrivateChannel,
                });
            }

            if !supergroup.restriction_reason.is_empty() {
                return Some(NavigationDecision::Denied {
                    reason: DeniedReason::Restriction(supergroup.restriction_reason),
                });
            }

            None
        }
        ConversationKind::BasicGroup { .. } => None,
    }
}

/// Same conversation, same default-chat mode, and nothing forcing a fresh
/// view: refresh the displayed view in place instead of replacing it.
fn can_reuse_in_place(
    conversation: &ConversationRef,
    request: &NavigationRequest,
    current: &CurrentViewSnapshot,
) -> bool {
    current.shows_chat(conversation.id)
        && request.thread_id.is_none()
        && request.saved_topic_id.is_none()
        && !request.scheduled
        && !request.force_new_view
        && !request.open_new_window
}

/// Context precedence: thread over topic, topic over scheduled, scheduled
/// over the default chat view.
fn select_view_target(conversation: &ConversationRef, request: &NavigationRequest) -> ViewTarget {
    if let Some(thread_id) = request.thread_id {
        ViewTarget::ChatThread {
            chat_id: conversation.id,
            thread_id,
        }
    } else if let Some(topic_id) = request.saved_topic_id {
        ViewTarget::SavedTopic {
            chat_id: conversation.id,
            topic_id,
        }
    } else if request.scheduled {
        ViewTarget::ScheduledChat(conversation.id)
    } else {
        ViewTarget::Chat(conversation.id)
    }
}

fn transition_for(view: &ViewTarget, current: &CurrentViewSnapshot) -> Option<TransitionHint> {
    match view {
        ViewTarget::ChatThread { chat_id, .. } | ViewTarget::SavedTopic { chat_id, .. } => {
            if current.shows_chat(*chat_id) {
                Some(TransitionHint::SlideFromRight)
            } else {
                Some(TransitionHint::Suppressed)
            }
        }
        ViewTarget::Chat(chat_id) => current
            .shows_profile(*chat_id)
            .then_some(TransitionHint::SlideFromLeft),
        ViewTarget::ScheduledChat(_) | ViewTarget::Profile(_) => None,
    }
}
