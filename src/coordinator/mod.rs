/// Match coordinator core: pairing, per-match state machine and event relay.
///
/// Transport-free. The server layer feeds it connection events and delivers
/// whatever `Outbound` messages it returns.

pub mod types;
pub mod messages;
pub mod error;
pub mod queue;
pub mod registry;
pub mod session;
pub mod store;
pub mod relay;
pub mod dispatch;

pub use dispatch::{Coordinator, CoordinatorStats};
pub use messages::{ClientEvent, Outbound, ServerEvent};
pub use types::ConnectionId;
