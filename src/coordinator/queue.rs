//! FIFO waiting queue for unpaired connections.

use std::collections::VecDeque;

use super::types::ConnectionId;

#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    waiting: VecDeque<ConnectionId>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `connection` unless it is already waiting. Returns whether it was added.
    pub fn enqueue(&mut self, connection: ConnectionId) -> bool {
        if self.contains(connection) {
            return false;
        }
        self.waiting.push_back(connection);
        true
    }

    /// Take the connection that has waited longest.
    pub fn pop_oldest(&mut self) -> Option<ConnectionId> {
        self.waiting.pop_front()
    }

    /// Drop `connection` from the queue. Linear scan; queues stay short.
    pub fn remove(&mut self, connection: ConnectionId) -> bool {
        match self.waiting.iter().position(|c| *c == connection) {
            Some(idx) => {
                self.waiting.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, connection: ConnectionId) -> bool {
        self.waiting.contains(&connection)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn clear(&mut self) {
        self.waiting.clear();
    }
}
