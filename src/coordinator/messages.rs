//! Wire protocol between the rendering clients and the coordinator.
//!
//! Frames are JSON objects `{"event": "<name>", "data": {...}}` with camelCase payloads.

use actix::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::DropReason;
use super::types::{ConnectionId, Facing, MatchId, PerPlayer, PlayerNumber, PlayerState, Position};

/// Kinematic snapshot of one fighter, relayed verbatim to the opponent.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Kinematics {
    pub x: f64,
    pub y: f64,
    pub facing: Facing,
    pub is_moving: bool,
}

/// Knockback impulse computed by the client that was hit.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnockbackMotion {
    pub velocity_x: f64,
    pub velocity_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

/// `findMatch` has no fields. The payload may be absent, `null` or an object.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MatchRequest {}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovementUpdate {
    pub match_id: MatchId,
    pub player_number: PlayerNumber,
    #[serde(flatten)]
    pub kinematics: Kinematics,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttackNotice {
    pub match_id: MatchId,
    pub player_number: PlayerNumber,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnockbackNotice {
    pub match_id: MatchId,
    pub player_number: PlayerNumber,
    #[serde(flatten)]
    pub motion: KnockbackMotion,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HitNotice {
    pub match_id: MatchId,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RingOutReport {
    pub match_id: MatchId,
    /// The side that left the ring.
    pub player_number: PlayerNumber,
}

// Client -> server
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    FindMatch(Option<MatchRequest>),
    PlayerMovement(MovementUpdate),
    PlayerAttack(AttackNotice),
    PlayerKnockback(KnockbackNotice),
    PlayerHit(HitNotice),
    RingOut(RingOutReport),
}

impl ClientEvent {
    /// Parse one text frame. Anything that does not match the protocol is malformed.
    pub fn from_json(text: &str) -> Result<Self, DropReason> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::FindMatch(_) => "findMatch",
            ClientEvent::PlayerMovement(_) => "playerMovement",
            ClientEvent::PlayerAttack(_) => "playerAttack",
            ClientEvent::PlayerKnockback(_) => "playerKnockback",
            ClientEvent::PlayerHit(_) => "playerHit",
            ClientEvent::RingOut(_) => "ringOut",
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchFound {
    pub match_id: MatchId,
    pub player_id: ConnectionId,
    pub player_number: PlayerNumber,
    pub opponent_id: ConnectionId,
    pub initial_state: PerPlayer<PlayerState>,
    pub round: u32,
    pub max_rounds: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NewRound {
    pub round: u32,
    pub scores: PerPlayer<u32>,
    pub positions: PerPlayer<Position>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchOver {
    #[serde(serialize_with = "PlayerNumber::serialize_key")]
    pub winner: PlayerNumber,
    pub final_score: PerPlayer<u32>,
}

// Server -> client
#[derive(Message, Serialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    WaitingForOpponent,
    MatchFound(MatchFound),
    OpponentMoved(Kinematics),
    OpponentAttack,
    OpponentKnockback(KnockbackMotion),
    PlayerHit,
    NewRound(NewRound),
    MatchOver(MatchOver),
    OpponentDisconnected,
}

/// A server event addressed to one connection.
#[derive(Clone, Debug, PartialEq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn new(to: ConnectionId, event: ServerEvent) -> Self {
        Self { to, event }
    }
}
