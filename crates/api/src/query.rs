//! Shared query parameter types for API handlers.

use serde::Deserialize;
use wedplan_core::types::DbId;

/// `?group_id=` narrowing for table lists and the seating-plan view.
///
/// Absent means "all tables".
#[derive(Debug, Default, Deserialize)]
pub struct GroupFilterParams {
    pub group_id: Option<DbId>,
}
