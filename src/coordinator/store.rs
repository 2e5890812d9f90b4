//! Process-wide table of live matches.
//!
//! Owns every `MatchSession`. A session leaves the store the moment its match ends
//! or a participant disconnects; nothing is kept afterwards.

use std::collections::HashMap;

use super::error::DropReason;
use super::session::MatchSession;
use super::types::MatchId;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<MatchId, MatchSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: MatchSession) {
        self.sessions.insert(session.match_id.clone(), session);
    }

    pub fn get(&self, match_id: &MatchId) -> Result<&MatchSession, DropReason> {
        self.sessions
            .get(match_id)
            .ok_or_else(|| DropReason::UnknownMatch(match_id.clone()))
    }

    pub fn get_mut(&mut self, match_id: &MatchId) -> Result<&mut MatchSession, DropReason> {
        self.sessions
            .get_mut(match_id)
            .ok_or_else(|| DropReason::UnknownMatch(match_id.clone()))
    }

    pub fn remove(&mut self, match_id: &MatchId) -> Option<MatchSession> {
        self.sessions.remove(match_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::MatchSettings;
    use crate::coordinator::types::ConnectionId;

    #[test]
    fn test_insert_lookup_remove() {
        let mut store = SessionStore::new();
        let match_id = MatchId::generate();
        store.insert(MatchSession::new(
            match_id.clone(),
            ConnectionId::new(),
            ConnectionId::new(),
            &MatchSettings::default(),
        ));
        assert_eq!(store.get(&match_id).unwrap().round, 1);
        store.get_mut(&match_id).unwrap().round = 2;
        assert_eq!(store.remove(&match_id).map(|s| s.round), Some(2));
        assert!(matches!(store.get(&match_id), Err(DropReason::UnknownMatch(_))));
        assert_eq!(store.len(), 0);
    }
}
