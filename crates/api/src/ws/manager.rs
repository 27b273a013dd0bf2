use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use wedplan_core::types::{DbId, Timestamp};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Authenticated user ID, if the connection presented a token.
    pub user_id: Option<DbId>,
    /// Wedding whose changes this connection receives.
    pub wedding_id: Option<DbId>,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: Option<DbId>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            wedding_id: None,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        if let Some(conn) = self.connections.write().await.remove(conn_id) {
            let secs = (chrono::Utc::now() - conn.connected_at).num_seconds();
            tracing::debug!(
                conn_id,
                user_id = conn.user_id,
                wedding_id = conn.wedding_id,
                secs,
                "WebSocket connection dropped"
            );
        }
    }

    /// Point a connection at a wedding, or clear its subscription with `None`.
    ///
    /// Returns `false` if the connection is unknown.
    pub async fn set_subscription(&self, conn_id: &str, wedding_id: Option<DbId>) -> bool {
        match self.connections.write().await.get_mut(conn_id) {
            Some(conn) => {
                conn.wedding_id = wedding_id;
                true
            }
            None => false,
        }
    }

    /// Send a message to every connection subscribed to `wedding_id`.
    ///
    /// Returns the number of connections the message was sent to.
    pub async fn send_to_wedding(&self, wedding_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.wedding_id == Some(wedding_id) {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Distinct weddings with at least one subscriber.
    pub async fn subscribed_weddings(&self) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self
            .connections
            .read()
            .await
            .values()
            .filter_map(|c| c.wedding_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Send a message to a single connection.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        match self.connections.read().await.get(conn_id) {
            Some(conn) => conn.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Returns how many of them are following a wedding.
    pub async fn ping_all(&self) -> usize {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
        conns.values().filter(|c| c.wedding_id.is_some()).count()
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
