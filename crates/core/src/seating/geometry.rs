//! Seat placement around a table.
//!
//! Seat positions are never stored. They are a pure function of the table's
//! shape, its pixel dimensions, the seat's index and the total seat count.
//! All offsets are relative to the table's top-left corner and already
//! shifted by half the seat marker size, so a marker drawn at the offset is
//! centred on the computed point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Pixels;

/// Diameter of the rendered seat marker.
pub const SEAT_MARKER_SIZE: Pixels = 30.0;

const MARKER_HALF: Pixels = SEAT_MARKER_SIZE / 2.0;

/// Round tables place seats on a circle of radius `min(width, height) / 2.5`,
/// which keeps the markers on the inner edge of the table rather than its rim.
pub const ROUND_RADIUS_DIVISOR: f64 = 2.5;

/// Number of sides seats are spread over on non-round tables.
const SIDES: usize = 4;

// ---------------------------------------------------------------------------
// Table shape
// ---------------------------------------------------------------------------

/// Physical shape of a table on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    Round,
    Rectangle,
    /// Free-form tables have no dedicated rule and are laid out like rectangles.
    Custom,
}

impl TableShape {
    pub const ALL: [TableShape; 3] = [TableShape::Round, TableShape::Rectangle, TableShape::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableShape::Round => "round",
            TableShape::Rectangle => "rectangle",
            TableShape::Custom => "custom",
        }
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round" => Ok(TableShape::Round),
            "rectangle" => Ok(TableShape::Rectangle),
            "custom" => Ok(TableShape::Custom),
            other => Err(format!(
                "Unknown table shape '{other}' (expected round, rectangle or custom)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Offsets
// ---------------------------------------------------------------------------

/// Marker position relative to the table's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatOffset {
    pub x: Pixels,
    pub y: Pixels,
}

impl SeatOffset {
    fn centred(x: Pixels, y: Pixels) -> Self {
        Self {
            x: x - MARKER_HALF,
            y: y - MARKER_HALF,
        }
    }
}

/// Compute the marker offset for seat `index` of `count` seats.
///
/// Total: a `count` of zero yields the table centre, and an `index` past the
/// end is clamped to the last seat.
pub fn seat_offset(
    shape: TableShape,
    width: Pixels,
    height: Pixels,
    index: usize,
    count: usize,
) -> SeatOffset {
    if count == 0 {
        return SeatOffset::centred(width / 2.0, height / 2.0);
    }
    let index = index.min(count - 1);

    match shape {
        TableShape::Round => round_offset(width, height, index, count),
        TableShape::Rectangle | TableShape::Custom => {
            rectangle_offset(width, height, index, count)
        }
    }
}

/// Offsets for every seat of a table, in seat-index order.
pub fn layout_seats(
    shape: TableShape,
    width: Pixels,
    height: Pixels,
    count: usize,
) -> Vec<SeatOffset> {
    (0..count)
        .map(|i| seat_offset(shape, width, height, i, count))
        .collect()
}

fn round_offset(width: Pixels, height: Pixels, index: usize, count: usize) -> SeatOffset {
    let angle = (360.0 / count as f64 * index as f64).to_radians();
    let radius = width.min(height) / ROUND_RADIUS_DIVISOR;
    SeatOffset::centred(
        width / 2.0 + radius * angle.cos(),
        height / 2.0 + radius * angle.sin(),
    )
}

/// Seats per side: top, right, bottom, left.
///
/// The remainder of `count / 4` goes to the earliest sides, one each, so
/// every seat index below `count` is placed.
pub fn seats_per_side(count: usize) -> [usize; SIDES] {
    let base = count / SIDES;
    let extra = count % SIDES;
    std::array::from_fn(|side| base + usize::from(side < extra))
}

fn rectangle_offset(width: Pixels, height: Pixels, index: usize, count: usize) -> SeatOffset {
    let per_side = seats_per_side(count);

    let mut side = 0;
    let mut position = index;
    while side < SIDES - 1 && position >= per_side[side] {
        position -= per_side[side];
        side += 1;
    }

    // Equal margins from both corners: seat p of k sits at len/(k+1) * (p+1).
    let slots = per_side[side] as f64 + 1.0;
    let along = |len: Pixels| len / slots * (position as f64 + 1.0);

    match side {
        0 => SeatOffset::centred(along(width), 0.0),
        1 => SeatOffset::centred(width, along(height)),
        2 => SeatOffset::centred(width - along(width), height),
        _ => SeatOffset::centred(0.0, height - along(height)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn distinct(points: &[SeatOffset]) -> bool {
        points.iter().enumerate().all(|(i, a)| {
            points[i + 1..]
                .iter()
                .all(|b| !(close(a.x, b.x) && close(a.y, b.y)))
        })
    }

    // -- Round tables -------------------------------------------------------

    #[test]
    fn round_four_seats_example() {
        let seats = layout_seats(TableShape::Round, 200.0, 200.0, 4);
        assert!(close(seats[0].x, 165.0));
        assert!(close(seats[0].y, 85.0));
        assert!(close(seats[1].x, 85.0));
        assert!(close(seats[1].y, 165.0));
        assert!(close(seats[2].x, 5.0));
        assert!(close(seats[2].y, 85.0));
        assert!(close(seats[3].x, 85.0));
        assert!(close(seats[3].y, 5.0));
    }

    #[test]
    fn round_seats_sit_on_inset_radius() {
        for (w, h) in [(200.0, 200.0), (300.0, 180.0), (90.0, 400.0)] {
            let radius = f64::min(w, h) / ROUND_RADIUS_DIVISOR;
            for n in 1..=24 {
                let seats = layout_seats(TableShape::Round, w, h, n);
                assert_eq!(seats.len(), n);
                for s in &seats {
                    let dx = s.x + MARKER_HALF - w / 2.0;
                    let dy = s.y + MARKER_HALF - h / 2.0;
                    assert!(
                        ((dx * dx + dy * dy).sqrt() - radius).abs() < 1e-6,
                        "seat off circle for n={n}, w={w}, h={h}"
                    );
                }
                assert!(distinct(&seats), "duplicate seat for n={n}");
            }
        }
    }

    // -- Rectangular tables -------------------------------------------------

    fn on_perimeter(s: &SeatOffset, w: f64, h: f64) -> bool {
        close(s.x, -MARKER_HALF)
            || close(s.x, w - MARKER_HALF)
            || close(s.y, -MARKER_HALF)
            || close(s.y, h - MARKER_HALF)
    }

    #[test]
    fn rectangle_seats_lie_on_perimeter() {
        for n in 1..=30 {
            let seats = layout_seats(TableShape::Rectangle, 300.0, 150.0, n);
            assert_eq!(seats.len(), n);
            for s in &seats {
                assert!(on_perimeter(s, 300.0, 150.0), "n={n}: {s:?}");
            }
            assert!(distinct(&seats), "duplicate seat for n={n}");
        }
    }

    #[test]
    fn rectangle_eight_seats_two_per_side() {
        let seats = layout_seats(TableShape::Rectangle, 300.0, 150.0, 8);
        // Top, left to right.
        assert!(close(seats[0].x, 100.0 - 15.0) && close(seats[0].y, -15.0));
        assert!(close(seats[1].x, 200.0 - 15.0) && close(seats[1].y, -15.0));
        // Right, top to bottom.
        assert!(close(seats[2].x, 285.0) && close(seats[2].y, 50.0 - 15.0));
        assert!(close(seats[3].x, 285.0) && close(seats[3].y, 100.0 - 15.0));
        // Bottom, right to left.
        assert!(close(seats[4].x, 200.0 - 15.0) && close(seats[4].y, 135.0));
        assert!(close(seats[5].x, 100.0 - 15.0) && close(seats[5].y, 135.0));
        // Left, bottom to top.
        assert!(close(seats[6].x, -15.0) && close(seats[6].y, 100.0 - 15.0));
        assert!(close(seats[7].x, -15.0) && close(seats[7].y, 50.0 - 15.0));
    }

    #[test]
    fn remainder_goes_to_earlier_sides() {
        assert_eq!(seats_per_side(0), [0, 0, 0, 0]);
        assert_eq!(seats_per_side(1), [1, 0, 0, 0]);
        assert_eq!(seats_per_side(5), [2, 1, 1, 1]);
        assert_eq!(seats_per_side(7), [2, 2, 2, 1]);
        assert_eq!(seats_per_side(8), [2, 2, 2, 2]);
        for n in 0..50 {
            assert_eq!(seats_per_side(n).iter().sum::<usize>(), n);
        }
    }

    #[test]
    fn multiple_of_four_matches_ceil_rule() {
        for n in (4usize..=40).step_by(4) {
            let per = n.div_ceil(4);
            assert_eq!(seats_per_side(n), [per; 4]);
        }
    }

    #[test]
    fn custom_shape_uses_rectangle_rule() {
        assert_eq!(
            layout_seats(TableShape::Custom, 240.0, 120.0, 6),
            layout_seats(TableShape::Rectangle, 240.0, 120.0, 6)
        );
    }

    // -- Degenerate input ---------------------------------------------------

    #[test]
    fn zero_seats_yield_centre() {
        let s = seat_offset(TableShape::Rectangle, 100.0, 60.0, 0, 0);
        assert!(close(s.x, 35.0) && close(s.y, 15.0));
        assert!(layout_seats(TableShape::Round, 100.0, 60.0, 0).is_empty());
    }

    #[test]
    fn index_past_end_is_clamped() {
        assert_eq!(
            seat_offset(TableShape::Round, 200.0, 200.0, 9, 4),
            seat_offset(TableShape::Round, 200.0, 200.0, 3, 4)
        );
    }

    // -- Shape parsing ------------------------------------------------------

    #[test]
    fn shape_round_trips_through_str() {
        for shape in TableShape::ALL {
            assert_eq!(shape.as_str().parse::<TableShape>().unwrap(), shape);
        }
        assert!("oval".parse::<TableShape>().is_err());
    }
}
