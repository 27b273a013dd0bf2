//! Seating change feed.
//!
//! - [`ChangeBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeEvent`]: one confirmed insert, update or delete of a table,
//!   seat, guest or group.
//! - [`Subscription`]: handle for a callback subscription; dropping it or
//!   calling [`Subscription::unsubscribe`] stops delivery.

pub mod bus;
pub mod subscription;

pub use bus::{ChangeBus, ChangeEvent, ChangeOp, EntityKind};
pub use subscription::Subscription;
