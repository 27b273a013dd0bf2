//! Frames exchanged with browser clients.
//!
//! Inbound frames carry an `action` tag, outbound frames a `type` tag.

use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};
use wedplan_core::types::DbId;
use wedplan_events::ChangeEvent;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Start receiving changes of one wedding. Replaces any earlier subscription.
    Subscribe { wedding_id: DbId },
    Unsubscribe,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Subscribed { wedding_id: DbId },
    Unsubscribed,
    Change { event: ChangeEvent },
    /// Events were dropped; the client should reload its plan.
    Resync { wedding_id: DbId },
    Error { message: String },
}

impl ServerFrame {
    pub fn to_message(&self) -> Message {
        let text = serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to encode WebSocket frame");
            r#"{"type":"error","message":"encoding failed"}"#.to_string()
        });
        Message::Text(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"action":"subscribe","wedding_id":7}"#).unwrap();
        assert_eq!(frame, ClientFrame::Subscribe { wedding_id: 7 });
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"action":"dance"}"#).is_err());
    }

    #[test]
    fn subscribed_frame_shape() {
        let json = serde_json::to_value(ServerFrame::Subscribed { wedding_id: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "subscribed", "wedding_id": 3}));
    }
}
