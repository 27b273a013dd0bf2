//! Canvas coordinate math for table drag and rotation.
//!
//! The canvas is rendered under a zoom scale factor. Pointer coordinates
//! arrive in viewport pixels, table positions are stored in unscaled canvas
//! pixels, so every drop divides by the zoom in effect at the time.

use serde::{Deserialize, Serialize};

use crate::types::{Degrees, Pixels};

/// Default canvas zoom level.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 4.0;

/// Rotation applied per rotate action.
pub const ROTATION_STEP: Degrees = 45.0;

const FULL_TURN: Degrees = 360.0;

/// A point in canvas or viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: Pixels,
    pub y: Pixels,
}

impl CanvasPoint {
    pub const fn new(x: Pixels, y: Pixels) -> Self {
        Self { x, y }
    }
}

/// Pointer offset inside the table element, captured on drag start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragOrigin {
    pub offset_x: Pixels,
    pub offset_y: Pixels,
}

/// Check that a zoom level is finite and within `[MIN_ZOOM, MAX_ZOOM]`.
pub fn validate_zoom(zoom: f64) -> Result<(), String> {
    if !zoom.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        Err(format!(
            "Zoom {zoom} is outside the allowed range [{MIN_ZOOM}, {MAX_ZOOM}]"
        ))
    } else {
        Ok(())
    }
}

/// New table origin for a drop at `pointer`.
///
/// `canvas_origin` is the canvas element's top-left in viewport pixels. The
/// result lands the table under the cursor regardless of zoom.
pub fn table_drop_position(
    pointer: CanvasPoint,
    canvas_origin: CanvasPoint,
    drag: DragOrigin,
    zoom: f64,
) -> Result<CanvasPoint, String> {
    validate_zoom(zoom)?;
    let position = CanvasPoint {
        x: (pointer.x - canvas_origin.x - drag.offset_x) / zoom,
        y: (pointer.y - canvas_origin.y - drag.offset_y) / zoom,
    };
    validate_position(position)?;
    Ok(position)
}

/// Fold any finite angle into `[0, 360)`. Non-finite input becomes `0`.
pub fn normalize_rotation(rotation: Degrees) -> Degrees {
    if !rotation.is_finite() {
        return 0.0;
    }
    let r = rotation.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= FULL_TURN {
        0.0
    } else {
        r
    }
}

/// Rotation after one rotate action.
pub fn rotate_step(rotation: Degrees) -> Degrees {
    normalize_rotation(rotation + ROTATION_STEP)
}

/// Check that a stored position is finite.
pub fn validate_position(point: CanvasPoint) -> Result<(), String> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err("Table position must be finite".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_at_unit_zoom_subtracts_offsets() {
        let p = table_drop_position(
            CanvasPoint::new(500.0, 320.0),
            CanvasPoint::new(100.0, 20.0),
            DragOrigin { offset_x: 40.0, offset_y: 30.0 },
            1.0,
        )
        .unwrap();
        assert_eq!(p, CanvasPoint::new(360.0, 270.0));
    }

    #[test]
    fn drop_scales_by_zoom() {
        let (px, py, left, top, ox, oy, z) = (820.0, 610.0, 20.0, 10.0, 50.0, 100.0, 2.0);
        let p = table_drop_position(
            CanvasPoint::new(px, py),
            CanvasPoint::new(left, top),
            DragOrigin { offset_x: ox, offset_y: oy },
            z,
        )
        .unwrap();
        assert_eq!(p.x, (px - left - ox) / z);
        assert_eq!(p.y, (py - top - oy) / z);
        assert_eq!(p, CanvasPoint::new(375.0, 250.0));
    }

    #[test]
    fn drop_rejects_invalid_zoom() {
        let at = CanvasPoint::new(0.0, 0.0);
        for z in [0.0, 0.05, 4.5, f64::NAN, f64::INFINITY] {
            assert!(table_drop_position(at, at, DragOrigin::default(), z).is_err());
        }
    }

    #[test]
    fn drop_overflowing_to_infinity_rejected() {
        let p = table_drop_position(
            CanvasPoint::new(1e308, 0.0),
            CanvasPoint::new(-1e308, 0.0),
            DragOrigin::default(),
            MIN_ZOOM,
        );
        assert!(p.is_err());
    }

    #[test]
    fn zoom_bounds_are_inclusive() {
        assert!(validate_zoom(MIN_ZOOM).is_ok());
        assert!(validate_zoom(MAX_ZOOM).is_ok());
        assert!(validate_zoom(DEFAULT_ZOOM).is_ok());
    }

    #[test]
    fn four_rotations_reach_half_turn_eight_return_home() {
        let mut r = 0.0;
        for _ in 0..4 {
            r = rotate_step(r);
        }
        assert_eq!(r, 180.0);
        for _ in 0..4 {
            r = rotate_step(r);
        }
        assert_eq!(r, 0.0);
    }

    #[test]
    fn rotation_wraps_past_full_turn() {
        assert_eq!(rotate_step(315.0), 0.0);
        assert_eq!(rotate_step(330.0), 15.0);
    }

    #[test]
    fn normalize_folds_into_range() {
        assert_eq!(normalize_rotation(-45.0), 315.0);
        assert_eq!(normalize_rotation(720.0), 0.0);
        assert_eq!(normalize_rotation(405.0), 45.0);
        assert_eq!(normalize_rotation(f64::NAN), 0.0);
        assert!(normalize_rotation(-1e-20) < 360.0);
    }

    #[test]
    fn non_finite_position_rejected() {
        assert!(validate_position(CanvasPoint::new(f64::NAN, 0.0)).is_err());
        assert!(validate_position(CanvasPoint::new(-20.0, 5.5)).is_ok());
    }
}
