/// Match server actor.
///
/// The single worker that owns all queue and session state. Every connection event
/// is a message processed to completion in mailbox order, so no locking is needed.
/// Outbound events are delivered to the socket actors registered here.

use actix::prelude::*;
use std::collections::HashMap;
use log::{debug, info};

use crate::coordinator::{ClientEvent, ConnectionId, Coordinator, CoordinatorStats, Outbound, ServerEvent};

type SocketAddr = Recipient<ServerEvent>;

/// Main match server actor.
pub struct MatchServer {
    coordinator: Coordinator,
    /// Outbound channel of every open socket.
    sockets: HashMap<ConnectionId, SocketAddr>,
}

impl MatchServer {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            sockets: HashMap::new(),
        }
    }

    /// Hand each message to its socket. Sockets that are already gone are skipped.
    fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { to, event } in outbound {
            match self.sockets.get(&to) {
                Some(addr) => addr.do_send(event),
                None => debug!("[MatchServer] No socket for {}, dropping outbound event", to),
            }
        }
    }
}

impl Actor for MatchServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[MatchServer] Started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.sockets.clear();
        self.coordinator.shutdown();
        info!("[MatchServer] Stopped");
    }
}

/// Message: a socket opened.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub connection_id: ConnectionId,
    pub addr: SocketAddr,
}

/// Message: a socket closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub connection_id: ConnectionId,
}

/// Message: a parsed event arrived on a socket.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ClientMessage {
    pub connection_id: ConnectionId,
    pub event: ClientEvent,
}

/// Message: current queue and session counters.
#[derive(Message)]
#[rtype(result = "CoordinatorStats")]
pub struct GetStats;

impl Handler<Connect> for MatchServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.sockets.insert(msg.connection_id, msg.addr);
        self.coordinator.connect(msg.connection_id);
    }
}

impl Handler<Disconnect> for MatchServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.sockets.remove(&msg.connection_id);
        let outbound = self.coordinator.disconnect(msg.connection_id);
        self.deliver(outbound);
    }
}

impl Handler<ClientMessage> for MatchServer {
    type Result = ();

    fn handle(&mut self, msg: ClientMessage, _ctx: &mut Self::Context) -> Self::Result {
        let name = msg.event.name();
        match self.coordinator.handle(msg.connection_id, msg.event) {
            Ok(outbound) => {
                debug!("[MatchServer] {} from {} -> {} message(s)", name, msg.connection_id, outbound.len());
                self.deliver(outbound);
            }
            Err(reason) => debug!("[MatchServer] Dropped {} from {}: {}", name, msg.connection_id, reason),
        }
    }
}

impl Handler<GetStats> for MatchServer {
    type Result = MessageResult<GetStats>;

    fn handle(&mut self, _msg: GetStats, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.coordinator.stats())
    }
}
