//! HTTP and WebSocket routing configuration.
//!
//! `/ws` carries the game protocol; `/stats` reports live queue and session counts.

use actix_web::{error, web, HttpResponse};
use crate::server::match_server::GetStats;
use crate::server::session::ws_player;
use crate::server::state::AppState;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws")
            .to(ws_player)
    )
    .service(
        web::resource("/stats")
            .route(web::get().to(stats))
    );
}

/// Snapshot of connection, queue and session counters.
async fn stats(data: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let stats = data.match_server
        .send(GetStats)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(stats))
}
