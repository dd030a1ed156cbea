use std::fmt;

/// Namespace a peer id lives in. Keyboard bookkeeping and capability checks
/// branch on this rather than on the peer record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum PeerNamespace {
    CloudUser,
    CloudGroup,
    CloudChannel,
    SecretChat,
}

impl PeerNamespace {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CloudUser => "user",
            Self::CloudGroup => "group",
            Self::CloudChannel => "channel",
            Self::SecretChat => "secret",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct PeerId {
    namespace: PeerNamespace,
    id: i64,
}

impl PeerId {
    #[must_use]
    pub const fn new(namespace: PeerNamespace, id: i64) -> Self {
        Self { namespace, id }
    }

    #[must_use]
    pub const fn namespace(self) -> PeerNamespace {
        self.namespace
    }

    #[must_use]
    pub const fn id(self) -> i64 {
        self.id
    }

    /// Channels and basic groups share message-actions bookkeeping.
    #[must_use]
    pub const fn is_group_like(self) -> bool {
        matches!(
            self.namespace,
            PeerNamespace::CloudGroup | PeerNamespace::CloudChannel
        )
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.as_str(), self.id)
    }
}

/// Message namespace within a peer's history.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum MessageNamespace {
    Cloud,
    Local,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct MessageId {
    peer_id: PeerId,
    namespace: MessageNamespace,
    id: i32,
}

impl MessageId {
    #[must_use]
    pub const fn new(peer_id: PeerId, namespace: MessageNamespace, id: i32) -> Self {
        Self {
            peer_id,
            namespace,
            id,
        }
    }

    #[must_use]
    pub const fn cloud(peer_id: PeerId, id: i32) -> Self {
        Self::new(peer_id, MessageNamespace::Cloud, id)
    }

    #[must_use]
    pub const fn peer_id(self) -> PeerId {
        self.peer_id
    }

    #[must_use]
    pub const fn namespace(self) -> MessageNamespace {
        self.namespace
    }

    #[must_use]
    pub const fn id(self) -> i32 {
        self.id
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.peer_id, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MediaId(i64);

impl MediaId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageId, PeerId, PeerNamespace};

    #[test]
    fn group_like_namespaces() {
        assert!(PeerId::new(PeerNamespace::CloudChannel, 1).is_group_like());
        assert!(PeerId::new(PeerNamespace::CloudGroup, 1).is_group_like());
        assert!(!PeerId::new(PeerNamespace::CloudUser, 1).is_group_like());
        assert!(!PeerId::new(PeerNamespace::SecretChat, 1).is_group_like());
    }

    #[test]
    fn message_id_display_includes_peer() {
        let id = MessageId::cloud(PeerId::new(PeerNamespace::CloudChannel, 42), 7);
        assert_eq!(id.to_string(), "channel:42/7");
    }
}
