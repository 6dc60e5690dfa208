//! Path stress analysis
//!
//! Walks the segment sequence and bounds the speed of every curved
//! segment by the G-factor: a commanded feed is safe when the
//! centripetal acceleration it produces, `v^2 / r`, stays at or below
//! `g_factor * STANDARD_GRAVITY`. Everything downstream is comparison
//! and aggregation over that one bound.

use prgkit_core::error::{AnalysisError, Result};
use prgkit_core::geometry::arc_sweep;
use prgkit_core::units::STANDARD_GRAVITY;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::segment::Segment;

/// Maximum speed at which an arc of `radius` stays within the G-factor.
///
/// `v = sqrt(g_factor * G * r)`; monotonically increasing in both the
/// radius and the factor.
pub fn max_safe_speed(g_factor: f64, radius: f64) -> f64 {
    (g_factor * STANDARD_GRAVITY * radius).sqrt()
}

/// A detected stress violation: commanded speed strictly above the bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressEvent {
    pub segment_index: usize,
    pub source_line_index: usize,
    pub radius: f64,
    pub commanded_speed: f64,
    pub max_safe_speed: f64,
    /// `commanded_speed / max_safe_speed`, > 1 by construction.
    pub excess_ratio: f64,
}

/// Per-arc geometry retained for reporting, violation or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcInfo {
    pub segment_index: usize,
    pub source_line_index: usize,
    pub radius: f64,
    pub arc_length: f64,
    /// Signed sweep in radians; negative for clockwise arcs.
    pub turn_angle: f64,
    pub max_safe_speed: f64,
}

/// The arc that produced the limiting speed
///
/// Present whenever the program has at least one arc. The bottleneck
/// arc need not itself be a violation: the tightest radius sets the
/// bound even when its commanded speed already respects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitingArcDetails {
    pub segment_index: usize,
    pub source_line_index: usize,
    pub radius: f64,
    pub max_safe_speed: f64,
    pub commanded_speed: f64,
    pub is_violation: bool,
}

/// Aggregate result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Minimum safe speed over all arcs; `None` when the program has no
    /// curved segments, which callers must treat as "no curvature
    /// constraint applies" rather than zero.
    pub limiting_speed: Option<f64>,
    /// Violations in program order.
    pub stress_events: Vec<StressEvent>,
    /// Geometry of every arc in program order.
    pub arc_info: Vec<ArcInfo>,
    pub limiting_arc: Option<LimitingArcDetails>,
}

impl AnalysisResult {
    /// True when at least one commanded speed exceeded its bound
    pub fn has_violations(&self) -> bool {
        !self.stress_events.is_empty()
    }

    /// Violations sorted worst-first by excess ratio
    pub fn events_by_severity(&self) -> Vec<StressEvent> {
        let mut events = self.stress_events.clone();
        events.sort_by(|a, b| {
            b.excess_ratio
                .partial_cmp(&a.excess_ratio)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        events
    }

    /// Total curved path length, for reporting
    pub fn total_arc_length(&self) -> f64 {
        self.arc_info.iter().map(|a| a.arc_length).sum()
    }
}

/// Analyze a segment sequence against a G-factor.
///
/// Deterministic: output depends only on the inputs. The G-factor is
/// re-asserted here even though callers validate it first.
pub fn run_path_stress_analysis(segments: &[Segment], g_factor: f64) -> Result<AnalysisResult> {
    if g_factor <= 0.0 || !g_factor.is_finite() {
        return Err(AnalysisError::InvalidGFactor { g_factor }.into());
    }

    let mut stress_events = Vec::new();
    let mut arc_info = Vec::new();
    let mut limiting_arc: Option<LimitingArcDetails> = None;

    for (segment_index, segment) in segments.iter().enumerate() {
        if !segment.is_arc() {
            continue;
        }
        // Parser guarantees both for arc kinds.
        let (Some(radius), Some(center)) = (segment.radius, segment.center) else {
            continue;
        };

        let safe = max_safe_speed(g_factor, radius);
        let sweep = arc_sweep(segment.start, segment.end, center, segment.is_clockwise());

        arc_info.push(ArcInfo {
            segment_index,
            source_line_index: segment.source_line_index,
            radius,
            arc_length: radius * sweep.abs(),
            turn_angle: sweep,
            max_safe_speed: safe,
        });

        let is_violation = segment.commanded_speed > safe;
        if is_violation {
            stress_events.push(StressEvent {
                segment_index,
                source_line_index: segment.source_line_index,
                radius,
                commanded_speed: segment.commanded_speed,
                max_safe_speed: safe,
                excess_ratio: segment.commanded_speed / safe,
            });
        }

        let tighter = limiting_arc
            .as_ref()
            .map(|current| safe < current.max_safe_speed)
            .unwrap_or(true);
        if tighter {
            limiting_arc = Some(LimitingArcDetails {
                segment_index,
                source_line_index: segment.source_line_index,
                radius,
                max_safe_speed: safe,
                commanded_speed: segment.commanded_speed,
                is_violation,
            });
        }
    }

    let limiting_speed = limiting_arc.as_ref().map(|arc| arc.max_safe_speed);
    debug!(
        arcs = arc_info.len(),
        violations = stress_events.len(),
        limiting_speed = ?limiting_speed,
        "stress analysis complete"
    );

    Ok(AnalysisResult {
        limiting_speed,
        stress_events,
        arc_info,
        limiting_arc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_prg_text;

    fn analyze(program: &str, g_factor: f64) -> AnalysisResult {
        run_path_stress_analysis(&parse_prg_text(program), g_factor).unwrap()
    }

    #[test]
    fn test_single_arc_known_value() {
        // r = 10, g = 0.5: v = sqrt(0.5 * 9.81 * 10) ≈ 7.0036
        let result = analyze("LINEAR X0 Y0 F2.0\nCW X20 Y0 R10\n", 0.5);
        let limiting = result.limiting_speed.unwrap();
        assert!((limiting - (0.5_f64 * 9.81 * 10.0).sqrt()).abs() < 1e-12);
        assert!((limiting - 7.0036).abs() < 1e-3);
    }

    #[test]
    fn test_limiting_speed_is_minimum_over_arcs() {
        let program = "\
LINEAR X0 Y0 F2.0
CW X20 Y0 R10
CW X24 Y0 R2
CW X44 Y0 R10
";
        let result = analyze(program, 0.5);
        let expected = max_safe_speed(0.5, 2.0);
        assert!((result.limiting_speed.unwrap() - expected).abs() < 1e-12);
        let limiting = result.limiting_arc.unwrap();
        assert_eq!(limiting.radius, 2.0);
        assert_eq!(limiting.segment_index, 2);
    }

    #[test]
    fn test_no_arcs_means_no_limiting_factor() {
        let result = analyze("LINEAR X10 Y0 F5\nLINEAR X10 Y10\n", 0.5);
        assert_eq!(result.limiting_speed, None);
        assert!(result.limiting_arc.is_none());
        assert!(result.arc_info.is_empty());
        assert!(!result.has_violations());
    }

    #[test]
    fn test_violation_requires_strict_excess() {
        // Commanded exactly at the bound: no event.
        let bound = max_safe_speed(0.5, 10.0);
        let program = format!("LINEAR X0 Y0 F{bound}\nCW X20 Y0 R10\n");
        let result = analyze(&program, 0.5);
        assert!(!result.has_violations());
        // The bottleneck arc is still reported.
        let limiting = result.limiting_arc.unwrap();
        assert!(!limiting.is_violation);
    }

    #[test]
    fn test_events_only_for_violating_arcs() {
        let program = "\
LINEAR X0 Y0 F9.0
CW X20 Y0 R10
LINEAR X20 Y10 F1.0
CW X40 Y10 R10
";
        let result = analyze(program, 0.5);
        assert_eq!(result.stress_events.len(), 1);
        let event = &result.stress_events[0];
        assert_eq!(event.commanded_speed, 9.0);
        assert!(event.excess_ratio > 1.0);
        // Both arcs still carry geometry.
        assert_eq!(result.arc_info.len(), 2);
    }

    #[test]
    fn test_events_by_severity_orders_descending() {
        let result = AnalysisResult {
            limiting_speed: Some(1.0),
            stress_events: vec![
                StressEvent {
                    segment_index: 0,
                    source_line_index: 0,
                    radius: 1.0,
                    commanded_speed: 1.2,
                    max_safe_speed: 1.0,
                    excess_ratio: 1.2,
                },
                StressEvent {
                    segment_index: 1,
                    source_line_index: 1,
                    radius: 1.0,
                    commanded_speed: 3.5,
                    max_safe_speed: 1.0,
                    excess_ratio: 3.5,
                },
                StressEvent {
                    segment_index: 2,
                    source_line_index: 2,
                    radius: 1.0,
                    commanded_speed: 1.0,
                    max_safe_speed: 1.0,
                    excess_ratio: 1.0,
                },
            ],
            arc_info: vec![],
            limiting_arc: None,
        };
        let ratios: Vec<f64> = result
            .events_by_severity()
            .iter()
            .map(|e| e.excess_ratio)
            .collect();
        assert_eq!(ratios, vec![3.5, 1.2, 1.0]);
    }

    #[test]
    fn test_invalid_g_factor_fails_fast() {
        let segments = parse_prg_text("LINEAR X1 Y0 F1\n");
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = run_path_stress_analysis(&segments, bad).unwrap_err();
            assert!(err.is_analysis_error());
        }
    }

    #[test]
    fn test_arc_info_geometry() {
        // Quarter arc, r = 10, swept clockwise.
        let result = analyze("LINEAR X0 Y0 F1\nCW X10 Y10 I10 J0\n", 1.0);
        let info = &result.arc_info[0];
        assert!((info.turn_angle + std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((info.arc_length - 10.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }
}
