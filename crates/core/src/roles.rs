//! Well-known role name constants and the capabilities they grant.
//!
//! These must match the role names issued in access tokens by the identity
//! service.

use crate::types::DbId;

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_PLANNER: &str = "planner";
pub const ROLE_VIEWER: &str = "viewer";

/// All recognised roles.
pub const ALL: &[&str] = &[ROLE_OWNER, ROLE_PLANNER, ROLE_VIEWER];

/// Whether the role may create, move, rotate and delete tables and change
/// seat assignments.
pub fn can_edit_tables(role: &str) -> bool {
    role == ROLE_OWNER || role == ROLE_PLANNER
}

/// Whether the role may create or delete whole weddings.
pub fn can_manage_weddings(role: &str) -> bool {
    role == ROLE_OWNER
}

/// Authorization context handed to the seating coordinator.
///
/// Built by the caller from whatever identity source it has; the seating
/// logic only ever looks at the boolean capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: DbId,
    pub can_edit_tables: bool,
}

impl AuthContext {
    pub fn for_role(user_id: DbId, role: &str) -> Self {
        Self {
            user_id,
            can_edit_tables: can_edit_tables(role),
        }
    }
}
