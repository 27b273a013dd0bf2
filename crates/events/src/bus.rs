//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! Every confirmed write to a seating arrangement is published as a
//! [`ChangeEvent`]. Subscribers see events in publish order; a receiver that
//! falls more than the channel capacity behind observes `RecvError::Lagged`
//! and should reload its snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use wedplan_core::seating::change::ChangeNotice;
use wedplan_core::types::DbId;

use crate::subscription::Subscription;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// Kind of record a change refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Table,
    Seat,
    Guest,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// A confirmed change to one record of a wedding's arrangement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub entity: EntityKind,
    pub op: ChangeOp,
    pub wedding_id: DbId,
    pub entity_id: DbId,

    /// User whose request caused the change.
    pub actor_user_id: Option<DbId>,

    /// The record after the change (`null` for deletes).
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(entity: EntityKind, op: ChangeOp, wedding_id: DbId, entity_id: DbId) -> Self {
        Self {
            entity,
            op,
            wedding_id,
            entity_id,
            actor_user_id: None,
            payload: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Attach the changed record. Serialization failures leave `null`.
    pub fn with_record<T: Serialize>(mut self, record: &T) -> Self {
        self.payload = serde_json::to_value(record).unwrap_or(serde_json::Value::Null);
        self
    }

    /// Translate into the notice a planner snapshot understands.
    ///
    /// Returns `None` for changes a snapshot does not track (seat inserts
    /// and deletes travel with their table) or when the payload does not
    /// decode.
    pub fn to_notice(&self) -> Option<ChangeNotice> {
        let record = || self.payload.clone();
        let notice = match (self.entity, self.op) {
            (EntityKind::Table, ChangeOp::Delete) => ChangeNotice::TableDeleted(self.entity_id),
            (EntityKind::Table, _) => {
                ChangeNotice::TableUpserted(serde_json::from_value(record()).ok()?)
            }
            (EntityKind::Seat, ChangeOp::Update) => {
                ChangeNotice::SeatUpdated(serde_json::from_value(record()).ok()?)
            }
            (EntityKind::Seat, _) => return None,
            (EntityKind::Guest, ChangeOp::Delete) => ChangeNotice::GuestDeleted(self.entity_id),
            (EntityKind::Guest, _) => {
                ChangeNotice::GuestUpserted(serde_json::from_value(record()).ok()?)
            }
            (EntityKind::Group, ChangeOp::Delete) => ChangeNotice::GroupDeleted(self.entity_id),
            (EntityKind::Group, _) => {
                ChangeNotice::GroupUpserted(serde_json::from_value(record()).ok()?)
            }
        };
        Some(notice)
    }
}

// ---------------------------------------------------------------------------
// ChangeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out of [`ChangeEvent`]s, shared via `Arc<ChangeBus>`.
pub struct ChangeBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeBus {
    /// Create a bus with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(
            entity = ?event.entity,
            op = ?event.op,
            wedding_id = event.wedding_id,
            entity_id = event.entity_id,
            "Publishing change"
        );
        let _ = self.sender.send(event);
    }

    /// Raw receiver for every event on the bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Invoke `callback` for every event about `kind`, from a background
    /// task, until the returned handle is unsubscribed or dropped.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn subscribe_entity<F>(&self, kind: EntityKind, callback: F) -> Subscription
    where
        F: Fn(ChangeEvent) + Send + 'static,
    {
        self.subscribe_filtered(move |e| e.entity == kind, callback)
    }

    /// Invoke `callback` for every event of one wedding.
    pub fn subscribe_wedding<F>(&self, wedding_id: DbId, callback: F) -> Subscription
    where
        F: Fn(ChangeEvent) + Send + 'static,
    {
        self.subscribe_filtered(move |e| e.wedding_id == wedding_id, callback)
    }

    fn subscribe_filtered<P, F>(&self, predicate: P, callback: F) -> Subscription
    where
        P: Fn(&ChangeEvent) -> bool + Send + 'static,
        F: Fn(ChangeEvent) + Send + 'static,
    {
        let mut receiver = self.sender.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) if predicate(&event) => callback(event),
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Change subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Subscription::new(handle)
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
