//! Composer autocompletion: the query derived from the input and its results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::{MediaId, PeerId};
use crate::peer::Peer;

/// What the composer is currently asking autocompletion for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputQuery {
    #[default]
    None,
    Hashtag(String),
    Mention {
        query: String,
        include_recent: bool,
    },
    Command(String),
    /// Inline bot request: `@bot query`.
    ContextRequest {
        address_name: String,
        query: String,
    },
    Emoji(String),
    Stickers(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerCommand {
    pub peer_id: PeerId,
    pub command: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerItem {
    pub file_id: MediaId,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiClue {
    pub emoji: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResult {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResultCollection {
    pub query_id: i64,
    pub next_offset: Option<String>,
    pub results: Vec<ContextResult>,
}

/// Results shown above the composer for the current [`InputQuery`].
#[derive(Debug, Clone)]
pub enum InputQueryResult {
    Hashtags(Vec<String>),
    Mentions(Vec<Arc<Peer>>),
    Commands(Vec<PeerCommand>),
    Stickers(Vec<StickerItem>),
    Emoji(Vec<EmojiClue>),
    ContextRequestResult(Arc<Peer>, Option<ContextResultCollection>),
}

/// Shared peer handles are equal when they point at the same record or the
/// records themselves match.
#[must_use]
pub fn same_peer(lhs: &Arc<Peer>, rhs: &Arc<Peer>) -> bool {
    Arc::ptr_eq(lhs, rhs) || lhs == rhs
}

impl PartialEq for InputQueryResult {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Hashtags(lhs), Self::Hashtags(rhs)) => lhs == rhs,
            (Self::Mentions(lhs), Self::Mentions(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| same_peer(l, r))
            }
            (Self::Commands(lhs), Self::Commands(rhs)) => lhs == rhs,
            (Self::Stickers(lhs), Self::Stickers(rhs)) => lhs == rhs,
            (Self::Emoji(lhs), Self::Emoji(rhs)) => lhs == rhs,
            (
                Self::ContextRequestResult(lhs_peer, lhs_results),
                Self::ContextRequestResult(rhs_peer, rhs_results),
            ) => same_peer(lhs_peer, rhs_peer) && lhs_results == rhs_results,
            _ => false,
        }
    }
}
