//! User-facing notice texts.
//!
//! Callers inject a [`Translate`] lookup; [`english`] is the built-in
//! fallback used when no catalogue is supplied.

use std::sync::Arc;

/// Message key to display text.
pub type Translate = Arc<dyn Fn(&str) -> String + Send + Sync>;

pub const PERMISSION_DENIED: &str = "seating.permission_denied";
pub const SEAT_OCCUPIED: &str = "seating.seat_occupied";
pub const SEAT_NOT_FOUND: &str = "seating.seat_not_found";
pub const TABLE_NOT_FOUND: &str = "seating.table_not_found";
pub const GUEST_NOT_FOUND: &str = "seating.guest_not_found";
pub const GROUP_NOT_FOUND: &str = "seating.group_not_found";
pub const INVALID_TABLE: &str = "seating.invalid_table";
pub const INVALID_DROP: &str = "seating.invalid_drop";
pub const SAVE_FAILED: &str = "seating.save_failed";
pub const LOAD_FAILED: &str = "seating.load_failed";

/// Built-in English texts. Unknown keys are returned unchanged.
pub fn english(key: &str) -> String {
    let text = match key {
        PERMISSION_DENIED => "You do not have permission to edit tables.",
        SEAT_OCCUPIED => "This seat is already taken.",
        SEAT_NOT_FOUND => "The seat no longer exists.",
        TABLE_NOT_FOUND => "The table no longer exists.",
        GUEST_NOT_FOUND => "The guest no longer exists.",
        GROUP_NOT_FOUND => "The group no longer exists.",
        INVALID_TABLE => "The table settings are invalid.",
        INVALID_DROP => "The table cannot be placed there.",
        SAVE_FAILED => "Saving failed.",
        LOAD_FAILED => "Loading the seating plan failed.",
        other => other,
    };
    text.to_string()
}

pub fn english_translator() -> Translate {
    Arc::new(english)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_has_text() {
        assert_eq!(english(SAVE_FAILED), "Saving failed.");
    }

    #[test]
    fn unknown_key_falls_through() {
        assert_eq!(english("x.y"), "x.y");
    }

    #[test]
    fn translator_is_callable() {
        let t = english_translator();
        assert_eq!(t(SEAT_OCCUPIED), english(SEAT_OCCUPIED));
    }
}
