//! The guest pool: the set of guests a planner can drag onto seats.
//!
//! Supports free-text search, category and RSVP filters, and hiding guests
//! who already have a seat.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::seating::records::GuestRecord;
use crate::types::DbId;

/// Longest accepted guest name.
pub const MAX_GUEST_NAME_LEN: usize = 200;

/// RSVP state of a guest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Confirmed,
    #[default]
    Pending,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Confirmed => "confirmed",
            RsvpStatus::Pending => "pending",
            RsvpStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(RsvpStatus::Confirmed),
            "pending" => Ok(RsvpStatus::Pending),
            "declined" => Ok(RsvpStatus::Declined),
            other => Err(format!(
                "Unknown RSVP status '{other}' (expected confirmed, pending or declined)"
            )),
        }
    }
}

/// Guest pool filter. Empty fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    #[serde(default)]
    pub unassigned_only: bool,
}

impl GuestFilter {
    fn matches(&self, guest: &GuestRecord, seated: &HashSet<DbId>) -> bool {
        if self.unassigned_only && seated.contains(&guest.id) {
            return false;
        }
        if let Some(status) = self.rsvp_status {
            if guest.rsvp_status != status {
                return false;
            }
        }
        if let Some(category) = non_blank(&self.category) {
            if !guest.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(needle) = non_blank(&self.search) {
            let needle = needle.to_lowercase();
            return guest.name.to_lowercase().contains(&needle)
                || guest.category.to_lowercase().contains(&needle);
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Apply `filter` to `guests`, sorted by name.
///
/// `seated` holds the ids of guests that currently occupy a seat.
pub fn filter_guests<'a>(
    guests: &'a [GuestRecord],
    filter: &GuestFilter,
    seated: &HashSet<DbId>,
) -> Vec<&'a GuestRecord> {
    let mut out: Vec<&GuestRecord> = guests
        .iter()
        .filter(|g| filter.matches(g, seated))
        .collect();
    out.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    out
}

pub fn validate_guest_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Guest name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_GUEST_NAME_LEN {
        return Err(format!(
            "Guest name must be at most {MAX_GUEST_NAME_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(id: DbId, name: &str, category: &str, rsvp: RsvpStatus) -> GuestRecord {
        GuestRecord {
            id,
            name: name.to_string(),
            category: category.to_string(),
            rsvp_status: rsvp,
            dietary_restrictions: None,
            plus_one: false,
        }
    }

    fn pool() -> Vec<GuestRecord> {
        vec![
            guest(1, "Zoe Weber", "family", RsvpStatus::Confirmed),
            guest(2, "anna Keller", "friend", RsvpStatus::Pending),
            guest(3, "Max Weber", "Family", RsvpStatus::Declined),
            guest(4, "Lena Fischer", "colleague", RsvpStatus::Confirmed),
        ]
    }

    fn names(v: &[&GuestRecord]) -> Vec<String> {
        v.iter().map(|g| g.name.clone()).collect()
    }

    #[test]
    fn empty_filter_returns_all_sorted() {
        let guests = pool();
        let out = filter_guests(&guests, &GuestFilter::default(), &HashSet::new());
        assert_eq!(
            names(&out),
            ["anna Keller", "Lena Fischer", "Max Weber", "Zoe Weber"]
        );
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_category() {
        let guests = pool();
        let filter = GuestFilter {
            search: Some("WEBER".into()),
            ..Default::default()
        };
        assert_eq!(filter_guests(&guests, &filter, &HashSet::new()).len(), 2);

        let filter = GuestFilter {
            search: Some("colle".into()),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_guests(&guests, &filter, &HashSet::new())),
            ["Lena Fischer"]
        );
    }

    #[test]
    fn category_and_rsvp_combine() {
        let guests = pool();
        let filter = GuestFilter {
            category: Some("family".into()),
            rsvp_status: Some(RsvpStatus::Confirmed),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_guests(&guests, &filter, &HashSet::new())),
            ["Zoe Weber"]
        );
    }

    #[test]
    fn unassigned_only_hides_seated() {
        let guests = pool();
        let seated: HashSet<DbId> = [1, 4].into_iter().collect();
        let filter = GuestFilter {
            unassigned_only: true,
            ..Default::default()
        };
        assert_eq!(
            names(&filter_guests(&guests, &filter, &seated)),
            ["anna Keller", "Max Weber"]
        );
    }

    #[test]
    fn blank_search_is_ignored() {
        let guests = pool();
        let filter = GuestFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filter_guests(&guests, &filter, &HashSet::new()).len(), 4);
    }

    #[test]
    fn rsvp_parse() {
        assert_eq!("declined".parse::<RsvpStatus>().unwrap(), RsvpStatus::Declined);
        assert!("maybe".parse::<RsvpStatus>().is_err());
    }
}
