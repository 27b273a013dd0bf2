use std::sync::Arc;

use wedplan_core::messages::Translate;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: wedplan_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Feed of confirmed seating changes.
    pub change_bus: Arc<wedplan_events::ChangeBus>,
    /// Notice text lookup handed to every seating planner.
    pub translate: Translate,
}
