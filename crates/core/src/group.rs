//! Table groups: visual grouping of tables on the canvas.
//!
//! Groups carry no seating semantics. They only filter which tables are
//! shown and how they are coloured.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Colour assigned when a group is created without one.
pub const DEFAULT_GROUP_COLOR: &str = "#6366f1";

/// Longest accepted group name.
pub const MAX_GROUP_NAME_LEN: usize = 100;

/// `#RRGGBB` hex colours only.
const COLOR_PATTERN: &str = r"^#[0-9a-fA-F]{6}$";

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COLOR_PATTERN).expect("valid regex"));

/// Kind of group, used for icons and default colours in the planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[default]
    Standard,
    Bestman,
    Family,
    Friends,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Standard => "standard",
            GroupType::Bestman => "bestman",
            GroupType::Family => "family",
            GroupType::Friends => "friends",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(GroupType::Standard),
            "bestman" => Ok(GroupType::Bestman),
            "family" => Ok(GroupType::Family),
            "friends" => Ok(GroupType::Friends),
            other => Err(format!("Unknown group type '{other}'")),
        }
    }
}

pub fn validate_group_color(color: &str) -> Result<(), String> {
    if COLOR_RE.is_match(color) {
        Ok(())
    } else {
        Err(format!("Group color '{color}' must be a #RRGGBB hex value"))
    }
}

pub fn validate_group_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Group name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_GROUP_NAME_LEN {
        return Err(format!(
            "Group name must be at most {MAX_GROUP_NAME_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert!(validate_group_color("#A1b2C3").is_ok());
        assert!(validate_group_color(DEFAULT_GROUP_COLOR).is_ok());
        assert!(validate_group_color("A1B2C3").is_err());
        assert!(validate_group_color("#abc").is_err());
        assert!(validate_group_color("#abcdefg").is_err());
    }

    #[test]
    fn group_type_round_trip() {
        for t in [
            GroupType::Standard,
            GroupType::Bestman,
            GroupType::Family,
            GroupType::Friends,
        ] {
            assert_eq!(t.as_str().parse::<GroupType>().unwrap(), t);
        }
        assert!("coworkers".parse::<GroupType>().is_err());
    }

    #[test]
    fn group_names() {
        assert!(validate_group_name("Family Smith").is_ok());
        assert!(validate_group_name("").is_err());
        assert!(validate_group_name(&"x".repeat(MAX_GROUP_NAME_LEN + 1)).is_err());
    }
}
