//! Seating arrangement: table geometry, the drag/drop protocol, group
//! filtering and the [`planner::TablePlanner`] that ties them to a store.

pub mod assignment;
pub mod canvas;
pub mod change;
pub mod drag;
pub mod filter;
pub mod geometry;
pub mod planner;
pub mod records;
pub mod store;
pub mod table_spec;
pub mod view;
