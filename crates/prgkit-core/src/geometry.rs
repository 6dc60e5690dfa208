//! Planar arc geometry
//!
//! Shared math for deriving arc centers, radii, and sweep angles from
//! the parameters a .prg motion line supplies. Both the parser and the
//! stress analyzer go through these functions so that a radius which
//! passes parsing is always usable downstream.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Absolute tolerance for degenerate chords and sweeps.
const GEOM_EPS: f64 = 1e-9;

/// Relative tolerance for start/end distance mismatch on center-offset arcs.
pub const CENTER_OFFSET_TOLERANCE: f64 = 1e-3;

/// 2-D coordinate in machine units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Derive an arc center from an explicit radius (R-form).
///
/// Positive radius selects the minor arc, matching the G2/G3 R-word
/// convention. Fails when the endpoints coincide (a full circle cannot
/// be expressed with R) or when the radius is shorter than half the
/// chord.
pub fn arc_center_from_radius(
    start: Point,
    end: Point,
    radius: f64,
    clockwise: bool,
) -> Result<Point, ParseError> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(ParseError::NonPositiveRadius { radius });
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let chord = dx.hypot(dy);

    if chord < GEOM_EPS {
        return Err(ParseError::InconsistentGeometry {
            reason: "coincident endpoints require center offsets, not a radius".to_string(),
        });
    }

    let half = chord / 2.0;
    if radius + GEOM_EPS < half {
        return Err(ParseError::InconsistentGeometry {
            reason: format!(
                "radius {:.4} is shorter than half the chord {:.4}",
                radius, half
            ),
        });
    }

    let apothem = (radius * radius - half * half).max(0.0).sqrt();
    let mid = Point::new(start.x + dx / 2.0, start.y + dy / 2.0);
    // Unit normal to the left of the chord direction.
    let nx = -dy / chord;
    let ny = dx / chord;

    let center = if clockwise {
        Point::new(mid.x - apothem * nx, mid.y - apothem * ny)
    } else {
        Point::new(mid.x + apothem * nx, mid.y + apothem * ny)
    };
    Ok(center)
}

/// Derive radius from a center offset (I/J-form).
///
/// The offset is relative to the segment start. Start and end must be
/// equidistant from the center within [`CENTER_OFFSET_TOLERANCE`],
/// otherwise the line is geometrically inconsistent.
pub fn arc_radius_from_center(
    start: Point,
    end: Point,
    center: Point,
) -> Result<f64, ParseError> {
    let r_start = start.distance_to(center);
    let r_end = end.distance_to(center);

    if r_start < GEOM_EPS {
        return Err(ParseError::NonPositiveRadius { radius: r_start });
    }

    let mismatch = (r_start - r_end).abs() / r_start;
    if mismatch > CENTER_OFFSET_TOLERANCE {
        return Err(ParseError::InconsistentGeometry {
            reason: format!(
                "start radius {:.4} and end radius {:.4} disagree",
                r_start, r_end
            ),
        });
    }

    Ok(r_start)
}

/// Signed sweep angle of an arc in radians.
///
/// Counter-clockwise arcs sweep in (0, 2π], clockwise arcs in [-2π, 0).
/// Coincident endpoints mean a full turn.
pub fn arc_sweep(start: Point, end: Point, center: Point, clockwise: bool) -> f64 {
    use std::f64::consts::PI;

    let a0 = (start.y - center.y).atan2(start.x - center.x);
    let a1 = (end.y - center.y).atan2(end.x - center.x);
    let mut sweep = a1 - a0;

    if clockwise {
        if sweep >= -GEOM_EPS {
            sweep -= 2.0 * PI;
        }
    } else if sweep <= GEOM_EPS {
        sweep += 2.0 * PI;
    }
    sweep
}
