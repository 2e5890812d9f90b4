/// Server configuration.
///
/// Network defaults, heartbeat timings, and the environment overrides read once at startup.
use std::str::FromStr;
use std::time::Duration;
use log::warn;

use crate::config::game::{MatchSettings, RING_BOTTOM, RING_TOP};
use crate::config::matchmaking::DEFAULT_MAX_ROUNDS;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default origin allowed to open the WebSocket (the rendering client's dev server).
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

/// How often the server pings each socket.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// A socket silent for longer than this is closed and treated as disconnected.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration resolved at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub match_settings: MatchSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            match_settings: MatchSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `CORS_ORIGIN`, `MAX_ROUNDS`, `RING_TOP` and `RING_BOTTOM`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host;
        }
        config.port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT);
        if let Some(origin) = lookup("CORS_ORIGIN").filter(|o| !o.trim().is_empty()) {
            config.cors_origin = origin;
        }

        let max_rounds = parse_or("MAX_ROUNDS", lookup("MAX_ROUNDS"), DEFAULT_MAX_ROUNDS);
        config.match_settings.max_rounds = if max_rounds == 0 {
            warn!("[Config] MAX_ROUNDS must be at least 1, using {}", DEFAULT_MAX_ROUNDS);
            DEFAULT_MAX_ROUNDS
        } else {
            max_rounds
        };

        let top = parse_or("RING_TOP", lookup("RING_TOP"), RING_TOP);
        let bottom = parse_or("RING_BOTTOM", lookup("RING_BOTTOM"), RING_BOTTOM);
        if top.is_finite() && bottom.is_finite() && top <= bottom {
            config.match_settings.ring.top = top;
            config.match_settings.ring.bottom = bottom;
        } else {
            warn!(
                "[Config] Invalid ring height (top={}, bottom={}), using {}..{}",
                top, bottom, RING_TOP, RING_BOTTOM
            );
        }

        config
    }
}

/// Parse `raw` or return `default`, warning when a value was present but unusable.
fn parse_or<T: FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("[Config] Ignoring invalid {}={:?}, using {}", key, value, default);
            default
        }),
    }
}
