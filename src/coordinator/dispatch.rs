//! Event dispatch for the match coordinator.
//!
//! `Coordinator` owns the registry, the waiting queue and the session store.
//! Each inbound event runs to completion against that state and returns the
//! messages to deliver; no I/O happens here, so the whole flow is testable
//! without a transport.

use log::{debug, info};
use serde::Serialize;

use crate::config::game::MatchSettings;

use super::error::DropReason;
use super::messages::{
    AttackNotice, ClientEvent, HitNotice, KnockbackNotice, MatchFound, MovementUpdate, Outbound,
    RingOutReport, ServerEvent,
};
use super::queue::MatchmakingQueue;
use super::registry::{Assignment, ConnectionRegistry};
use super::relay;
use super::session::{MatchSession, RingOutOutcome};
use super::store::SessionStore;
use super::types::{ConnectionId, MatchId, PlayerNumber};

/// Counters exposed for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoordinatorStats {
    pub connections: usize,
    pub queued: usize,
    pub sessions: usize,
}

pub struct Coordinator {
    settings: MatchSettings,
    registry: ConnectionRegistry,
    queue: MatchmakingQueue,
    store: SessionStore,
}

impl Coordinator {
    pub fn new(settings: MatchSettings) -> Self {
        Self {
            settings,
            registry: ConnectionRegistry::new(),
            queue: MatchmakingQueue::new(),
            store: SessionStore::new(),
        }
    }

    /// A channel opened.
    pub fn connect(&mut self, connection: ConnectionId) {
        self.registry.register(connection);
        info!("[Coordinator] Player connected: {}", connection);
    }

    /// Route one inbound event to its handler.
    pub fn handle(&mut self, connection: ConnectionId, event: ClientEvent) -> Result<Vec<Outbound>, DropReason> {
        if self.registry.assignment(connection).is_none() {
            return Err(DropReason::UnknownConnection(connection));
        }
        match event {
            ClientEvent::FindMatch(_) => self.find_match(connection),
            ClientEvent::PlayerMovement(update) => self.player_movement(connection, update),
            ClientEvent::PlayerAttack(notice) => self.player_attack(connection, notice),
            ClientEvent::PlayerKnockback(notice) => self.player_knockback(connection, notice),
            ClientEvent::PlayerHit(notice) => self.player_hit(connection, notice),
            ClientEvent::RingOut(report) => self.ring_out(connection, report),
        }
    }

    /// A channel closed. Dequeues it or tears down its match.
    pub fn disconnect(&mut self, connection: ConnectionId) -> Vec<Outbound> {
        let Some(assignment) = self.registry.unregister(connection) else {
            return Vec::new();
        };
        info!("[Coordinator] Player disconnected: {}", connection);

        match assignment {
            Assignment::Unassigned => Vec::new(),
            Assignment::Queued => {
                self.queue.remove(connection);
                debug!("[Coordinator] Removed {} from waiting queue", connection);
                Vec::new()
            }
            Assignment::InSession { match_id, player_number } => {
                let Some(session) = self.store.remove(&match_id) else {
                    return Vec::new();
                };
                info!(
                    "[Coordinator] Match {} closed: player {} ({}) disconnected",
                    match_id, player_number, connection
                );
                match session.opponent_of(connection) {
                    Some(opponent) => {
                        self.registry.assign(opponent, Assignment::Unassigned);
                        vec![Outbound::new(opponent, ServerEvent::OpponentDisconnected)]
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    pub fn stats(&self) -> CoordinatorStats {
        CoordinatorStats {
            connections: self.registry.len(),
            queued: self.queue.len(),
            sessions: self.store.len(),
        }
    }

    /// Drop all queue and session state.
    pub fn shutdown(&mut self) {
        let stats = self.stats();
        self.queue.clear();
        self.store.clear();
        self.registry.clear();
        info!(
            "[Coordinator] Cleared {} sessions, {} waiting, {} connections",
            stats.sessions, stats.queued, stats.connections
        );
    }

    #[cfg(test)]
    pub fn session(&self, match_id: &MatchId) -> Option<&MatchSession> {
        self.store.get(match_id).ok()
    }

    #[cfg(test)]
    pub fn assignment(&self, connection: ConnectionId) -> Option<&Assignment> {
        self.registry.assignment(connection)
    }

    fn find_match(&mut self, connection: ConnectionId) -> Result<Vec<Outbound>, DropReason> {
        match self.registry.assignment(connection) {
            Some(Assignment::Unassigned) => {}
            Some(Assignment::Queued) => {
                debug!("[Coordinator] Player {} is already waiting", connection);
                return Ok(vec![Outbound::new(connection, ServerEvent::WaitingForOpponent)]);
            }
            Some(Assignment::InSession { .. }) => return Err(DropReason::AlreadyInSession(connection)),
            None => return Err(DropReason::UnknownConnection(connection)),
        }

        let Some(opponent) = self.queue.pop_oldest() else {
            self.queue.enqueue(connection);
            self.registry.assign(connection, Assignment::Queued);
            info!(
                "[Coordinator] Player {} added to waiting queue ({} waiting)",
                connection,
                self.queue.len()
            );
            return Ok(vec![Outbound::new(connection, ServerEvent::WaitingForOpponent)]);
        };

        Ok(self.create_match(opponent, connection))
    }

    /// The earlier (queued) connection becomes player1.
    fn create_match(&mut self, player1: ConnectionId, player2: ConnectionId) -> Vec<Outbound> {
        let match_id = MatchId::generate();
        let session = MatchSession::new(match_id.clone(), player1, player2, &self.settings);

        let mut outbound = Vec::with_capacity(2);
        for side in [PlayerNumber::One, PlayerNumber::Two] {
            let player = session.connection_of(side);
            outbound.push(Outbound::new(
                player,
                ServerEvent::MatchFound(MatchFound {
                    match_id: match_id.clone(),
                    player_id: player,
                    player_number: side,
                    opponent_id: session.connection_of(side.opponent()),
                    initial_state: session.state.clone(),
                    round: session.round,
                    max_rounds: session.max_rounds,
                }),
            ));
            self.registry.assign(
                player,
                Assignment::InSession { match_id: match_id.clone(), player_number: side },
            );
        }

        self.store.insert(session);
        info!("[Coordinator] Match created: {} between {} and {}", match_id, player1, player2);
        outbound
    }

    fn player_movement(&mut self, connection: ConnectionId, update: MovementUpdate) -> Result<Vec<Outbound>, DropReason> {
        let session = self.store.get_mut(&update.match_id)?;
        let out = relay::relay(session, connection, ServerEvent::OpponentMoved(update.kinematics))?;
        session.apply_movement(update.player_number, &update.kinematics);
        Ok(vec![out])
    }

    fn player_attack(&mut self, connection: ConnectionId, notice: AttackNotice) -> Result<Vec<Outbound>, DropReason> {
        let session = self.store.get(&notice.match_id)?;
        let out = relay::relay(session, connection, ServerEvent::OpponentAttack)?;
        debug!("[Coordinator] Player {} in match {} is attacking", notice.player_number, notice.match_id);
        Ok(vec![out])
    }

    fn player_knockback(&mut self, connection: ConnectionId, notice: KnockbackNotice) -> Result<Vec<Outbound>, DropReason> {
        let session = self.store.get(&notice.match_id)?;
        let out = relay::relay(session, connection, ServerEvent::OpponentKnockback(notice.motion))?;
        debug!(
            "[Coordinator] Player {} in match {} is being knocked back",
            notice.player_number, notice.match_id
        );
        Ok(vec![out])
    }

    fn player_hit(&mut self, connection: ConnectionId, notice: HitNotice) -> Result<Vec<Outbound>, DropReason> {
        let session = self.store.get(&notice.match_id)?;
        Ok(vec![relay::relay(session, connection, ServerEvent::PlayerHit)?])
    }

    fn ring_out(&mut self, connection: ConnectionId, report: RingOutReport) -> Result<Vec<Outbound>, DropReason> {
        let match_id = report.match_id;
        let session = self.store.get_mut(&match_id)?;
        // Only the two participants can score in their match.
        if session.player_number_of(connection).is_none() {
            return Err(DropReason::NotAParticipant { connection, match_id });
        }

        let outcome = session
            .ring_out(report.player_number)
            .ok_or_else(|| DropReason::MatchOver(match_id.clone()))?;

        match outcome {
            RingOutOutcome::NewRound(new_round) => {
                info!(
                    "[Coordinator] Match {} round {} (score {}-{})",
                    match_id, new_round.round, new_round.scores.player1, new_round.scores.player2
                );
                Ok(relay::broadcast(session, ServerEvent::NewRound(new_round)))
            }
            RingOutOutcome::MatchOver(over) => {
                info!(
                    "[Coordinator] Match {} over: {} wins {}-{}",
                    match_id,
                    over.winner.key(),
                    over.final_score.player1,
                    over.final_score.player2
                );
                let players = session.players;
                let out = relay::broadcast(session, ServerEvent::MatchOver(over));
                self.store.remove(&match_id);
                for player in players {
                    self.registry.assign(player, Assignment::Unassigned);
                }
                Ok(out)
            }
        }
    }
}
