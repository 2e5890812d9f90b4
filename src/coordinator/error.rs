//! Reasons an inbound event is dropped.
//!
//! None of these are reported back to the sender: the server logs them and moves on.

use super::types::{ConnectionId, MatchId};

#[derive(Debug, thiserror::Error)]
pub enum DropReason {
    /// The frame is not valid protocol JSON or lacks a required field.
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("connection {0} is not registered")]
    UnknownConnection(ConnectionId),
    /// Stale or already terminated match.
    #[error("unknown match {0}")]
    UnknownMatch(MatchId),
    #[error("connection {connection} is not a participant of {match_id}")]
    NotAParticipant {
        connection: ConnectionId,
        match_id: MatchId,
    },
    #[error("connection {0} is already in a match")]
    AlreadyInSession(ConnectionId),
    #[error("match {0} is already over")]
    MatchOver(MatchId),
}
