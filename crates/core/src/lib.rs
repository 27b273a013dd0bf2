//! Domain logic for the wedding seating planner.
//!
//! Zero internal dependencies and no I/O: the persistence capability is a
//! trait ([`seating::store::SeatingStore`]) implemented by `wedplan-db`.

pub mod error;
pub mod group;
pub mod guest_pool;
pub mod messages;
pub mod roles;
pub mod seating;
pub mod types;
