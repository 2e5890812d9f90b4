//! Main entry point for the match coordinator.
//!
//! Initializes logging, resolves configuration, starts the match server actor and
//! launches the HTTP server carrying the player WebSocket endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use config::server::ServerConfig;
use coordinator::Coordinator;
use server::match_server::MatchServer;

pub mod config;
mod coordinator;
mod server;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    info!(
        "[Main] Best of {} (first to {}), ring {:?}",
        config.match_settings.max_rounds,
        config.match_settings.win_threshold(),
        config.match_settings.ring
    );

    // Start the MatchServer actor (single owner of the queue and all sessions).
    let match_server = MatchServer::new(Coordinator::new(config.match_settings.clone())).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(match_server));

    let cors_origin = config.cors_origin.clone();
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", cors_origin.clone()))
                    .add(("Access-Control-Allow-Credentials", "true"))
                    .add(("Access-Control-Allow-Methods", "GET, POST"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    });

    // Failing to bind is fatal.
    let http_server = match http_server.bind((config.host.as_str(), config.port)) {
        Ok(server) => server,
        Err(e) => {
            error!("[Main] Cannot bind {}:{}: {}", config.host, config.port, e);
            return Err(e);
        }
    };

    info!("[Main] Server running on {}:{}", config.host, config.port);
    http_server.run().await
}
