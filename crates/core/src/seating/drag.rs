//! Drag payloads carried from a drag source to a drop target.
//!
//! Guests are dragged out of the guest pool, tables are dragged around the
//! canvas. Both arrive at the drop handler as a JSON string.

use serde::{Deserialize, Serialize};

use crate::seating::canvas::DragOrigin;
use crate::types::{DbId, Pixels};

/// Decoded drag payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragPayload {
    Guest {
        #[serde(rename = "guestId")]
        guest_id: DbId,
    },
    Table {
        #[serde(rename = "tableId")]
        table_id: DbId,
        #[serde(rename = "offsetX", default)]
        offset_x: Pixels,
        #[serde(rename = "offsetY", default)]
        offset_y: Pixels,
    },
}

/// The drop did not carry a payload this planner understands.
///
/// Usually a drag that started somewhere else on the page; callers log it
/// and move on.
#[derive(Debug, thiserror::Error)]
#[error("Malformed drag payload: {0}")]
pub struct MalformedPayload(String);

impl DragPayload {
    pub fn parse(raw: &str) -> Result<Self, MalformedPayload> {
        serde_json::from_str(raw).map_err(|e| MalformedPayload(e.to_string()))
    }

    /// Encode for a drag source.
    pub fn encode(&self) -> String {
        // Serializing a plain enum of numbers cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Pointer offset for table drags.
    pub fn drag_origin(&self) -> Option<DragOrigin> {
        match self {
            DragPayload::Table {
                offset_x, offset_y, ..
            } => Some(DragOrigin {
                offset_x: *offset_x,
                offset_y: *offset_y,
            }),
            DragPayload::Guest { .. } => None,
        }
    }
}
