use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Interval between heartbeat pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn the ping loop that keeps seating-plan subscriptions open while
/// nobody is editing. Idle proxies would otherwise drop a planner's feed
/// between changes.
///
/// The task runs until aborted during shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            interval.tick().await;
            let connections = ws_manager.connection_count().await;
            let following = ws_manager.ping_all().await;
            tracing::debug!(connections, following, "Seating feed heartbeat");
        }
    })
}
