//! Parsed motion segments

use prgkit_core::geometry::Point;
use serde::{Deserialize, Serialize};

/// Kind of motion a segment performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Straight move
    Line,
    /// Clockwise arc
    ArcCw,
    /// Counter-clockwise arc
    ArcCcw,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::ArcCw => write!(f, "arc (cw)"),
            Self::ArcCcw => write!(f, "arc (ccw)"),
        }
    }
}

/// One parsed motion instruction
///
/// Immutable once parsed. `center` and `radius` are `Some` exactly for
/// arc kinds, and a radius that survives parsing is always positive.
/// `source_line_index` is the 0-based index of the originating line in
/// the program file, kept so annotation and reporting can point back at
/// the exact source line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: Point,
    pub end: Point,
    pub center: Option<Point>,
    pub radius: Option<f64>,
    /// Feed in units/sec, as written or modal at this line.
    pub commanded_speed: f64,
    pub source_line_index: usize,
}

impl Segment {
    /// True for arc segments
    pub fn is_arc(&self) -> bool {
        matches!(self.kind, SegmentKind::ArcCw | SegmentKind::ArcCcw)
    }

    /// Arc direction; meaningless for lines
    pub fn is_clockwise(&self) -> bool {
        self.kind == SegmentKind::ArcCw
    }
}
