//! State machine for one two-player match.
//!
//! A session is `Active` from creation until a side reaches the win threshold,
//! at which point it is `Over` and refuses further mutation. A non-final ring-out
//! passes through a round transition (round bump, respawn) and stays `Active`.

use crate::config::game::MatchSettings;
use crate::config::matchmaking::FIRST_ROUND;

use super::messages::{Kinematics, MatchOver, NewRound};
use super::types::{ConnectionId, Facing, MatchId, PerPlayer, PlayerNumber, PlayerState, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Over,
}

/// Result of a ring-out.
#[derive(Debug, Clone, PartialEq)]
pub enum RingOutOutcome {
    NewRound(NewRound),
    MatchOver(MatchOver),
}

#[derive(Debug, Clone)]
pub struct MatchSession {
    pub match_id: MatchId,
    /// `(player1, player2)`; player1 is the connection that waited first.
    pub players: [ConnectionId; 2],
    pub state: PerPlayer<PlayerState>,
    pub round: u32,
    pub max_rounds: u32,
    phase: SessionPhase,
    spawn: PerPlayer<Position>,
}

impl MatchSession {
    /// Seat `player1` on the left start and `player2` on the right start.
    pub fn new(
        match_id: MatchId,
        player1: ConnectionId,
        player2: ConnectionId,
        settings: &MatchSettings,
    ) -> Self {
        let spawn = PerPlayer::new(
            Position { x: settings.player1_start_x, y: settings.ring.top },
            Position { x: settings.player2_start_x, y: settings.ring.top },
        );
        let state = PerPlayer::new(
            PlayerState::spawn(player1, spawn.player1.x, spawn.player1.y, Facing::Right),
            PlayerState::spawn(player2, spawn.player2.x, spawn.player2.y, Facing::Left),
        );
        Self {
            match_id,
            players: [player1, player2],
            state,
            round: FIRST_ROUND,
            max_rounds: settings.max_rounds,
            phase: SessionPhase::Active,
            spawn,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    pub fn win_threshold(&self) -> u32 {
        self.max_rounds.div_ceil(2)
    }

    pub fn connection_of(&self, side: PlayerNumber) -> ConnectionId {
        match side {
            PlayerNumber::One => self.players[0],
            PlayerNumber::Two => self.players[1],
        }
    }

    pub fn player_number_of(&self, connection: ConnectionId) -> Option<PlayerNumber> {
        if self.players[0] == connection {
            Some(PlayerNumber::One)
        } else if self.players[1] == connection {
            Some(PlayerNumber::Two)
        } else {
            None
        }
    }

    /// The participant that is not `connection`, if `connection` plays here.
    pub fn opponent_of(&self, connection: ConnectionId) -> Option<ConnectionId> {
        self.player_number_of(connection)
            .map(|side| self.connection_of(side.opponent()))
    }

    pub fn scores(&self) -> PerPlayer<u32> {
        self.state.map(|p| p.score)
    }

    pub fn positions(&self) -> PerPlayer<Position> {
        self.state.map(PlayerState::position)
    }

    /// Overwrite the mirrored kinematics of `side`. Values are taken as reported.
    pub fn apply_movement(&mut self, side: PlayerNumber, kinematics: &Kinematics) {
        if self.is_over() {
            return;
        }
        let player = self.state.get_mut(side);
        player.x = kinematics.x;
        player.y = kinematics.y;
        player.facing = kinematics.facing;
        player.is_moving = kinematics.is_moving;
    }

    /// `loser` left the ring: award the point to the other side and advance.
    ///
    /// Returns `None` once the match is over.
    pub fn ring_out(&mut self, loser: PlayerNumber) -> Option<RingOutOutcome> {
        if self.is_over() {
            return None;
        }
        let scorer = loser.opponent();
        let score = {
            let player = self.state.get_mut(scorer);
            player.score += 1;
            player.score
        };

        if score >= self.win_threshold() {
            self.phase = SessionPhase::Over;
            return Some(RingOutOutcome::MatchOver(MatchOver {
                winner: scorer,
                final_score: self.scores(),
            }));
        }

        self.round += 1;
        for side in [PlayerNumber::One, PlayerNumber::Two] {
            let spawn = *self.spawn.get(side);
            let player = self.state.get_mut(side);
            player.x = spawn.x;
            player.y = spawn.y;
        }
        Some(RingOutOutcome::NewRound(NewRound {
            round: self.round,
            scores: self.scores(),
            positions: self.positions(),
        }))
    }
}
