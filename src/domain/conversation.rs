/// Kind of conversation behind a chat id, mirroring the wire-level chat types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    PrivateUser { user_id: i64 },
    BasicGroup { group_id: i64 },
    Supergroup { supergroup_id: i64 },
    Channel { supergroup_id: i64 },
}

impl ConversationKind {
    /// Returns the backing supergroup id for supergroup and channel chats.
    pub fn supergroup_id(&self) -> Option<i64> {
        match self {
            ConversationKind::Supergroup { supergroup_id }
            | ConversationKind::Channel { supergroup_id } => Some(*supergroup_id),
            _ => None,
        }
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, ConversationKind::Channel { .. })
    }
}

/// Immutable snapshot of a conversation, re-fetched by the caller per
/// navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRef {
    pub id: i64,
    pub kind: ConversationKind,
    pub has_protected_content: bool,
}

impl ConversationRef {
    pub fn private_user(id: i64, user_id: i64) -> Self {
        Self {
            id,
            kind: ConversationKind::PrivateUser { user_id },
            has_protected_content: false,
        }
    }

    pub fn basic_group(id: i64, group_id: i64) -> Self {
        Self {
            id,
            kind: ConversationKind::BasicGroup { group_id },
            has_protected_content: false,
        }
    }

    pub fn supergroup(id: i64, supergroup_id: i64) -> Self {
        Self {
            id,
            kind: ConversationKind::Supergroup { supergroup_id },
            has_protected_content: false,
        }
    }

    pub fn channel(id: i64, supergroup_id: i64) -> Self {
        Self {
            id,
            kind: ConversationKind::Channel { supergroup_id },
            has_protected_content: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MembershipStatus {
    Creator,
    Administrator,
    #[default]
    Member,
    Restricted,
    Left,
    Banned,
}

/// Directory snapshot of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: i64,
    pub is_bot: bool,
    pub restriction_reason: String,
}

impl UserRef {
    pub fn regular(id: i64) -> Self {
        Self {
            id,
            is_bot: false,
            restriction_reason: String::new(),
        }
    }

    pub fn bot(id: i64) -> Self {
        Self {
            id,
            is_bot: true,
            restriction_reason: String::new(),
        }
    }
}

/// Directory snapshot of a supergroup or channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupergroupRef {
    pub id: i64,
    pub is_channel: bool,
    pub is_public: bool,
    pub status: MembershipStatus,
    pub restriction_reason: String,
}

impl SupergroupRef {
    pub fn public_group(id: i64) -> Self {
        Self {
            id,
            is_channel: false,
            is_public: true,
            status: MembershipStatus::Member,
            restriction_reason: String::new(),
        }
    }

    pub fn private_channel(id: i64) -> Self {
        Self {
            id,
            is_channel: true,
            is_public: false,
            status: MembershipStatus::Left,
            restriction_reason: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supergroup_id_is_exposed_for_supergroups_and_channels() {
        assert_eq!(
            ConversationKind::Supergroup { supergroup_id: 7 }.supergroup_id(),
            Some(7)
        );
        assert_eq!(
            ConversationKind::Channel { supergroup_id: 9 }.supergroup_id(),
            Some(9)
        );
        assert_eq!(
            ConversationKind::PrivateUser { user_id: 1 }.supergroup_id(),
            None
        );
    }

    #[test]
    fn only_channel_kind_reports_channel() {
        assert!(ConversationKind::Channel { supergroup_id: 1 }.is_channel());
        assert!(!ConversationKind::Supergroup { supergroup_id: 1 }.is_channel());
        assert!(!ConversationKind::BasicGroup { group_id: 1 }.is_channel());
    }
}
