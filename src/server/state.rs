// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the match server actor so HTTP/WebSocket handlers can reach it.

use actix::Addr;
use crate::server::match_server::MatchServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the match server actor (queue, sessions, relay).
    pub match_server: Addr<MatchServer>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(match_server: Addr<MatchServer>) -> Self {
        AppState { match_server }
    }
}
