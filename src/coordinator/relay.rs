//! Addressing helpers for events leaving a match.
//!
//! Relays go to the participant other than the sender, never back to the sender.
//! Delivery is fire-and-forget; ordering is only guaranteed per sender.

use super::error::DropReason;
use super::messages::{Outbound, ServerEvent};
use super::session::MatchSession;
use super::types::ConnectionId;

/// Address `event` to the other participant of `session`.
pub fn relay(session: &MatchSession, sender: ConnectionId, event: ServerEvent) -> Result<Outbound, DropReason> {
    let to = session
        .opponent_of(sender)
        .ok_or_else(|| DropReason::NotAParticipant {
            connection: sender,
            match_id: session.match_id.clone(),
        })?;
    Ok(Outbound::new(to, event))
}

/// Address `event` to both participants, player1 first.
pub fn broadcast(session: &MatchSession, event: ServerEvent) -> Vec<Outbound> {
    session
        .players
        .iter()
        .map(|to| Outbound::new(*to, event.clone()))
        .collect()
}
