use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use wedplan_core::error::CoreError;
use wedplan_core::types::DbId;
use wedplan_db::repositories::WeddingRepo;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::ws::protocol::{ClientFrame, ServerFrame};

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// Access token. Browsers cannot set headers on WebSocket upgrades.
    pub token: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// A present but invalid `token` is rejected with 401 before the upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = match params.token.as_deref() {
        Some(token) => Some(
            validate_token(token, &state.config.jwt)
                .map_err(|_| {
                    AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
                })?
                .sub,
        ),
        None => None,
    };
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes subscribe/unsubscribe frames on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: Option<DbId>) {
    let ws_manager = state.ws_manager.clone();
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                let reply = handle_frame(&state, &conn_id, user_id, text.as_str()).await;
                ws_manager.send_to(&conn_id, reply.to_message()).await;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Apply one inbound text frame and return the reply.
async fn handle_frame(
    state: &AppState,
    conn_id: &str,
    user_id: Option<DbId>,
    text: &str,
) -> ServerFrame {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            return ServerFrame::Error {
                message: format!("Unrecognised frame: {e}"),
            }
        }
    };

    match frame {
        ClientFrame::Subscribe { wedding_id } => {
            if user_id.is_none() {
                return ServerFrame::Error {
                    message: "Authentication required to subscribe".into(),
                };
            }
            match WeddingRepo::find_by_id(&state.pool, wedding_id).await {
                Ok(Some(_)) => {
                    state
                        .ws_manager
                        .set_subscription(conn_id, Some(wedding_id))
                        .await;
                    tracing::debug!(conn_id, wedding_id, "WebSocket subscribed");
                    ServerFrame::Subscribed { wedding_id }
                }
                Ok(None) => ServerFrame::Error {
                    message: format!("Wedding with id {wedding_id} not found"),
                },
                Err(e) => {
                    tracing::error!(conn_id, error = %e, "Subscription lookup failed");
                    ServerFrame::Error {
                        message: "Subscription failed".into(),
                    }
                }
            }
        }
        ClientFrame::Unsubscribe => {
            state.ws_manager.set_subscription(conn_id, None).await;
            ServerFrame::Unsubscribed
        }
    }
}
