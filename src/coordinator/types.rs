//! Identifiers and per-player state shared by every coordinator component.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Opaque handle for one participant's channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier of a match, built from the creation time plus a random salt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let salt: u32 = rand::rng().random();
        Self(format!("match_{}_{:08x}", millis, salt))
    }
}

impl From<&str> for MatchId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat of a participant within a match. Travels on the wire as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    pub fn opponent(self) -> Self {
        match self {
            PlayerNumber::One => PlayerNumber::Two,
            PlayerNumber::Two => PlayerNumber::One,
        }
    }

    /// Key used for this side in state maps (`player1` / `player2`).
    pub fn key(self) -> &'static str {
        match self {
            PlayerNumber::One => "player1",
            PlayerNumber::Two => "player2",
        }
    }

    /// Serializes as the side key rather than the number.
    pub fn serialize_key<S: Serializer>(side: &PlayerNumber, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(side.key())
    }
}

impl TryFrom<u8> for PlayerNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerNumber::One),
            2 => Ok(PlayerNumber::Two),
            other => Err(format!("invalid player number {}", other)),
        }
    }
}

impl From<PlayerNumber> for u8 {
    fn from(value: PlayerNumber) -> Self {
        match value {
            PlayerNumber::One => 1,
            PlayerNumber::Two => 2,
        }
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    Right,
}

/// One value per side, serialized as `{"player1": .., "player2": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerPlayer<T> {
    pub player1: T,
    pub player2: T,
}

impl<T> PerPlayer<T> {
    pub fn new(player1: T, player2: T) -> Self {
        Self { player1, player2 }
    }

    pub fn get(&self, side: PlayerNumber) -> &T {
        match side {
            PlayerNumber::One => &self.player1,
            PlayerNumber::Two => &self.player2,
        }
    }

    pub fn get_mut(&mut self, side: PlayerNumber) -> &mut T {
        match side {
            PlayerNumber::One => &mut self.player1,
            PlayerNumber::Two => &mut self.player2,
        }
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PerPlayer<U> {
        PerPlayer {
            player1: f(&self.player1),
            player2: f(&self.player2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Mirrored physical state and score of one fighter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    #[serde(rename = "id")]
    pub connection_id: ConnectionId,
    pub x: f64,
    pub y: f64,
    pub facing: Facing,
    pub is_moving: bool,
    pub is_in_knockback: bool,
    pub score: u32,
}

impl PlayerState {
    pub fn spawn(connection_id: ConnectionId, x: f64, y: f64, facing: Facing) -> Self {
        Self {
            connection_id,
            x,
            y,
            facing,
            is_moving: false,
            is_in_knockback: false,
            score: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_number_wire_format() {
        assert_eq!(serde_json::to_string(&PlayerNumber::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<PlayerNumber>("1").unwrap(), PlayerNumber::One);
        assert!(serde_json::from_str::<PlayerNumber>("3").is_err());
        assert!(serde_json::from_str::<PlayerNumber>("0").is_err());
    }

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(PlayerNumber::One.opponent(), PlayerNumber::Two);
        assert_eq!(PlayerNumber::One.opponent().opponent(), PlayerNumber::One);
    }

    #[test]
    fn test_match_ids_are_distinct() {
        let a = MatchId::generate();
        let b = MatchId::generate();
        assert!(a.to_string().starts_with("match_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_player_state_serializes_id_key() {
        let conn = ConnectionId::new();
        let state = PlayerState::spawn(conn, 200.0, 450.0, Facing::Right);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["id"], serde_json::json!(conn.to_string()));
        assert_eq!(json["facing"], "right");
        assert_eq!(json["isMoving"], false);
        assert_eq!(json["isInKnockback"], false);
        assert_eq!(json["score"], 0);
    }
}
