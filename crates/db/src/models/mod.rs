//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! DTOs derive [`validator::Validate`] for the shape checks that do not need
//! domain knowledge; handlers run both that and the core validators.

pub mod guest;
pub mod seat;
pub mod seating_table;
pub mod table_group;
pub mod wedding;
