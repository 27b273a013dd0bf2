//! "Add table" intents issued by the table controls.

use serde::{Deserialize, Serialize};

use crate::seating::canvas::{validate_position, CanvasPoint};
use crate::seating::geometry::TableShape;
use crate::types::Pixels;

/// Maximum seats on a single table.
pub const MAX_TABLE_CAPACITY: i32 = 40;

/// Smallest table edge, in canvas pixels.
pub const MIN_TABLE_SIZE: Pixels = 40.0;

/// Largest table edge, in canvas pixels.
pub const MAX_TABLE_SIZE: Pixels = 2000.0;

/// Longest accepted table name.
pub const MAX_TABLE_NAME_LEN: usize = 100;

/// Where new tables land when the intent names no position.
pub const DEFAULT_POSITION: CanvasPoint = CanvasPoint::new(50.0, 50.0);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableSpecError {
    #[error("Table name must not be empty")]
    EmptyName,

    #[error("Table name must be at most {MAX_TABLE_NAME_LEN} characters")]
    NameTooLong,

    #[error("Capacity {0} is outside the allowed range [1, {MAX_TABLE_CAPACITY}]")]
    Capacity(i32),

    #[error("Table {axis} {value} is outside the allowed range [{MIN_TABLE_SIZE}, {MAX_TABLE_SIZE}]")]
    Dimension { axis: &'static str, value: Pixels },

    #[error("{0}")]
    Position(String),
}

/// Default pixel dimensions for a shape.
pub fn default_dimensions(shape: TableShape) -> (Pixels, Pixels) {
    match shape {
        TableShape::Round => (200.0, 200.0),
        TableShape::Rectangle | TableShape::Custom => (300.0, 150.0),
    }
}

/// Request to add a table with `capacity` seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTable {
    pub name: String,
    pub shape: TableShape,
    pub capacity: i32,
    #[serde(default)]
    pub width: Option<Pixels>,
    #[serde(default)]
    pub height: Option<Pixels>,
    #[serde(default)]
    pub position: Option<CanvasPoint>,
}

impl NewTable {
    pub fn new(name: impl Into<String>, shape: TableShape, capacity: i32) -> Self {
        Self {
            name: name.into(),
            shape,
            capacity,
            width: None,
            height: None,
            position: None,
        }
    }

    /// Width and height with shape defaults filled in.
    pub fn dimensions(&self) -> (Pixels, Pixels) {
        let (w, h) = default_dimensions(self.shape);
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    pub fn position_or_default(&self) -> CanvasPoint {
        self.position.unwrap_or(DEFAULT_POSITION)
    }

    pub fn validate(&self) -> Result<(), TableSpecError> {
        validate_table_name(&self.name)?;
        if !(1..=MAX_TABLE_CAPACITY).contains(&self.capacity) {
            return Err(TableSpecError::Capacity(self.capacity));
        }
        let (width, height) = self.dimensions();
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;
        if let Some(p) = self.position {
            validate_position(p).map_err(TableSpecError::Position)?;
        }
        Ok(())
    }
}

pub fn validate_table_name(name: &str) -> Result<(), TableSpecError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TableSpecError::EmptyName);
    }
    if trimmed.chars().count() > MAX_TABLE_NAME_LEN {
        return Err(TableSpecError::NameTooLong);
    }
    Ok(())
}

pub fn validate_dimension(axis: &'static str, value: Pixels) -> Result<(), TableSpecError> {
    if value.is_finite() && (MIN_TABLE_SIZE..=MAX_TABLE_SIZE).contains(&value) {
        Ok(())
    } else {
        Err(TableSpecError::Dimension { axis, value })
    }
}
