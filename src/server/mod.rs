// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the transport around the coordinator core:
//! - Application state management
//! - HTTP/WebSocket routing
//! - The match server actor (single owner of queue and session state)
//! - Per-player WebSocket sessions

pub mod state;
pub mod router;
pub mod match_server;
pub mod session;
