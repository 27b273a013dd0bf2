/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Canvas-space length in CSS pixels (unscaled by zoom).
pub type Pixels = f64;

/// Table rotation in degrees, kept in `[0, 360)`.
pub type Degrees = f64;
