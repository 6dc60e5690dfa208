//! .prg program parser
//!
//! Turns raw program text into an ordered sequence of [`Segment`]s,
//! tracking modal state (current position and feed) across lines.
//! Recovery is per line: a malformed motion line is logged and skipped,
//! never fatal. A file that yields no segments at all comes back as an
//! empty sequence, which callers treat as "nothing to analyze".

use std::path::Path;

use prgkit_core::error::{ParseError, Result};
use prgkit_core::geometry::{arc_center_from_radius, arc_radius_from_center, Point};
use tracing::{debug, warn};

use crate::grammar::{classify, MotionCommand, MotionWord};
use crate::segment::{Segment, SegmentKind};

/// Parse a .prg file into motion segments.
///
/// Only I/O trouble is an error; grammar trouble is recovered per line.
pub fn parse_prg_file(path: &Path) -> Result<Vec<Segment>> {
    let text = std::fs::read_to_string(path)?;
    let segments = parse_prg_text(&text);
    debug!(
        file = %path.display(),
        segments = segments.len(),
        "parsed program"
    );
    Ok(segments)
}

/// Parse program text into motion segments.
///
/// Segments come back in program order; each carries the 0-based index
/// of its source line. Non-motion lines are passed over, malformed
/// motion lines are skipped with a warning.
pub fn parse_prg_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut position = Point::new(0.0, 0.0);
    let mut feed: Option<f64> = None;

    for (index, line) in text.lines().enumerate() {
        let command = match classify(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = index + 1, error = %err, "skipping malformed motion line");
                continue;
            }
        };

        let target = Point::new(
            command.params.x.unwrap_or(position.x),
            command.params.y.unwrap_or(position.y),
        );

        if let Some(f) = command.params.f {
            if f > 0.0 && f.is_finite() {
                feed = Some(f);
            } else {
                warn!(
                    line = index + 1,
                    error = %ParseError::NonPositiveFeed { feed: f },
                    "skipping motion line"
                );
                position = target;
                continue;
            }
        }

        match build_segment(&command, position, target, feed, index) {
            Ok(segment) => segments.push(segment),
            Err(err) => {
                warn!(line = index + 1, error = %err, "skipping motion line");
            }
        }

        // Even a skipped line moved the head; keep continuity for the
        // segments that follow.
        position = target;
    }

    segments
}

fn build_segment(
    command: &MotionCommand,
    start: Point,
    end: Point,
    feed: Option<f64>,
    source_line_index: usize,
) -> std::result::Result<Segment, ParseError> {
    let commanded_speed = feed.ok_or(ParseError::MissingFeed)?;

    if command.word == MotionWord::Linear {
        return Ok(Segment {
            kind: SegmentKind::Line,
            start,
            end,
            center: None,
            radius: None,
            commanded_speed,
            source_line_index,
        });
    }

    let clockwise = command.word == MotionWord::Cw;
    let params = &command.params;

    let (center, radius) = match (params.r, params.i, params.j) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(ParseError::InconsistentGeometry {
                reason: "both an explicit radius and center offsets were given".to_string(),
            });
        }
        (Some(r), None, None) => {
            let center = arc_center_from_radius(start, end, r, clockwise)?;
            (center, r)
        }
        (None, Some(_), _) | (None, _, Some(_)) => {
            // A missing offset component means the center sits on that
            // axis of the start point.
            let center = Point::new(
                start.x + params.i.unwrap_or(0.0),
                start.y + params.j.unwrap_or(0.0),
            );
            let radius = arc_radius_from_center(start, end, center)?;
            (center, radius)
        }
        (None, None, None) => {
            return Err(ParseError::UnderDetermined {
                reason: "arc carries neither a radius nor center offsets".to_string(),
            });
        }
    };

    Ok(Segment {
        kind: if clockwise {
            SegmentKind::ArcCw
        } else {
            SegmentKind::ArcCcw
        },
        start,
        end,
        center: Some(center),
        radius: Some(radius),
        commanded_speed,
        source_line_index,
    })
}
