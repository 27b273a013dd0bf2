//! WebSocket infrastructure for live seating updates.
//!
//! Provides connection management, heartbeat monitoring, the HTTP upgrade
//! handler and the task that relays change-bus events to subscribers.

mod forwarder;
mod handler;
mod heartbeat;
pub mod manager;
pub mod protocol;

pub use forwarder::start_change_forwarder;
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
