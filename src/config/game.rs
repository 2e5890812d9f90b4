/// Game configuration constants.
/// 
/// This module defines the ring geometry shared with the rendering client and
/// the spawn positions used when a match starts or a new round begins.
use crate::config::matchmaking::DEFAULT_MAX_ROUNDS;

/// Left edge of the ring (x).
pub const RING_LEFT: f64 = 50.0;

/// Right edge of the ring (x).
pub const RING_RIGHT: f64 = 974.0;

/// Top of the ring. Both fighters spawn at this y.
pub const RING_TOP: f64 = 450.0;

/// Bottom of the ring.
pub const RING_BOTTOM: f64 = 500.0;

/// Spawn x for player 1 (left side).
pub const PLAYER1_START_X: f64 = 200.0;

/// Spawn x for player 2 (right side).
pub const PLAYER2_START_X: f64 = 800.0;

/// Valid play area. The server never computes ring-outs itself; clients report them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBoundary {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for RingBoundary {
    fn default() -> Self {
        Self {
            left: RING_LEFT,
            right: RING_RIGHT,
            top: RING_TOP,
            bottom: RING_BOTTOM,
        }
    }
}

/// Parameters fixed at match creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSettings {
    pub max_rounds: u32,
    pub ring: RingBoundary,
    pub player1_start_x: f64,
    pub player2_start_x: f64,
}

impl MatchSettings {
    /// Score a side needs to win the match.
    pub fn win_threshold(&self) -> u32 {
        self.max_rounds.div_ceil(2)
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            ring: RingBoundary::default(),
            player1_start_x: PLAYER1_START_X,
            player2_start_x: PLAYER2_START_X,
        }
    }
}
