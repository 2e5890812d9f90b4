//! Live connections and what each one is currently doing.

use std::collections::HashMap;

use super::types::{ConnectionId, MatchId, PlayerNumber};

/// Where a connection stands. A connection holds exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Unassigned,
    Queued,
    InSession {
        match_id: MatchId,
        player_number: PlayerNumber,
    },
}

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Assignment>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly opened channel as unassigned.
    pub fn register(&mut self, connection: ConnectionId) {
        self.connections.insert(connection, Assignment::Unassigned);
    }

    /// Forget a closed channel, returning what it was doing.
    pub fn unregister(&mut self, connection: ConnectionId) -> Option<Assignment> {
        self.connections.remove(&connection)
    }

    pub fn assignment(&self, connection: ConnectionId) -> Option<&Assignment> {
        self.connections.get(&connection)
    }

    /// Update a registered connection. Unknown connections are left alone.
    pub fn assign(&mut self, connection: ConnectionId, assignment: Assignment) -> bool {
        match self.connections.get_mut(&connection) {
            Some(slot) => {
                *slot = assignment;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn clear(&mut self) {
        self.connections.clear();
    }
}
