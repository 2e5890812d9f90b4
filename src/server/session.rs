/// WebSocket session handler for one player.
///
/// Each socket gets a fresh `ConnectionId`, registers with the match server when it
/// starts and unregisters when it stops. Text frames are parsed into client events
/// and forwarded; server events are serialized back out. Frames that do not parse
/// are dropped without a reply.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, error, info, warn};
use std::time::Instant;

use super::match_server::{ClientMessage, Connect, Disconnect, MatchServer};
use crate::config::server::{CLIENT_TIMEOUT, HEARTBEAT_INTERVAL};
use crate::coordinator::{ClientEvent, ConnectionId, ServerEvent};

/// Represents a player's WebSocket connection.
pub struct PlayerSession {
    pub connection_id: ConnectionId,
    pub match_server: Addr<MatchServer>,
    /// Last time anything arrived from the client.
    last_seen: Instant,
}

impl PlayerSession {
    pub fn new(match_server: Addr<MatchServer>) -> Self {
        Self {
            connection_id: ConnectionId::new(),
            match_server,
            last_seen: Instant::now(),
        }
    }

    /// Ping the client periodically and stop the session once it goes silent.
    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if timed_out(act.last_seen, Instant::now()) {
                warn!("[Session] Heartbeat timed out for {}, closing", act.connection_id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

/// A client last heard from at `last_seen` has been silent too long by `now`.
fn timed_out(last_seen: Instant, now: Instant) -> bool {
    now.saturating_duration_since(last_seen) > CLIENT_TIMEOUT
}

impl Actor for PlayerSession {
    type Context = ws::WebsocketContext<Self>;

    /// Registers the connection with the match server.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.heartbeat(ctx);
        self.match_server.do_send(Connect {
            connection_id: self.connection_id,
            addr: ctx.address().recipient(),
        });
    }

    /// Whatever ended the socket, the match server treats it as a disconnect.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.match_server.do_send(Disconnect {
            connection_id: self.connection_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!("[Session] Protocol error on {}: {}", self.connection_id, e);
                ctx.stop();
                return;
            }
        };
        self.last_seen = Instant::now();

        match msg {
            ws::Message::Text(text) => match ClientEvent::from_json(&text) {
                Ok(event) => self.match_server.do_send(ClientMessage {
                    connection_id: self.connection_id,
                    event,
                }),
                Err(reason) => debug!("[Session] Dropped frame from {}: {}", self.connection_id, reason),
            },
            ws::Message::Ping(bytes) => ctx.pong(&bytes),
            ws::Message::Pong(_) => {}
            ws::Message::Binary(_) => debug!("[Session] Ignoring binary frame from {}", self.connection_id),
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            ws::Message::Continuation(_) | ws::Message::Nop => {}
        }
    }
}

impl Handler<ServerEvent> for PlayerSession {
    type Result = ();

    /// Handles events sent from the match server to this session.
    fn handle(&mut self, msg: ServerEvent, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => error!("[Session] Failed to serialize event for {}: {}", self.connection_id, e),
        }
    }
}

/// WebSocket endpoint for players. One socket is one participant.
pub async fn ws_player(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let session = PlayerSession::new(data.match_server.clone());
    info!("[Session] Opening socket {} from {:?}", session.connection_id, req.peer_addr());
    ws::start(session, &req, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timeout_boundary() {
        let seen = Instant::now();
        assert!(!timed_out(seen, seen));
        assert!(!timed_out(seen, seen + CLIENT_TIMEOUT));
        assert!(timed_out(seen, seen + CLIENT_TIMEOUT + Duration::from_millis(1)));
    }

    #[test]
    fn test_clock_behind_last_seen_is_not_a_timeout() {
        let now = Instant::now();
        assert!(!timed_out(now + Duration::from_secs(1), now));
    }
}
