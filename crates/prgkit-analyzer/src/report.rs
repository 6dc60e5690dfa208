//! Analysis report rendering
//!
//! Pure formatting of an [`AnalysisResult`] into the multi-section text
//! report shown to the operator. No side effects, no file I/O.

use std::fmt::{self, Write};

use prgkit_core::units::STANDARD_GRAVITY;

use crate::analysis::AnalysisResult;

/// Render an analysis result as a human-readable report.
///
/// Sections: header with the factor used, the limiting speed (or the
/// explicit "no curvature constraint" state), violations worst-first,
/// and a spotlight on the limiting arc.
pub fn generate_analysis_report(result: &AnalysisResult, g_factor: f64) -> String {
    let mut out = String::new();
    // Formatting into a String is infallible.
    render(&mut out, result, g_factor).expect("write to string");
    out
}

fn render(w: &mut String, result: &AnalysisResult, g_factor: f64) -> fmt::Result {
    writeln!(w, "=== PRG Path Stress Analysis ===")?;
    writeln!(
        w,
        "G-factor: {:.3} (lateral acceleration bound {:.3} units/s^2)",
        g_factor,
        g_factor * STANDARD_GRAVITY
    )?;
    writeln!(
        w,
        "Arcs analyzed: {} (total arc length {:.3} units)",
        result.arc_info.len(),
        result.total_arc_length()
    )?;
    writeln!(w)?;

    let Some(speed) = result.limiting_speed else {
        writeln!(
            w,
            "No curved segments found: no curvature constraint applies."
        )?;
        writeln!(w, "No limiting speed was derived.")?;
        return Ok(());
    };

    writeln!(w, "Curvature-limited print speed: {:.4} units/sec", speed)?;
    writeln!(w)?;

    if result.has_violations() {
        writeln!(w, "Stress violations: {}", result.stress_events.len())?;
        for (rank, event) in result.events_by_severity().iter().enumerate() {
            writeln!(
                w,
                "  {}. line {}: radius {:.3}, commanded {:.4}, safe bound {:.4} ({:.2}x over)",
                rank + 1,
                event.source_line_index + 1,
                event.radius,
                event.commanded_speed,
                event.max_safe_speed,
                event.excess_ratio
            )?;
        }
    } else {
        writeln!(
            w,
            "No stress violations found: all commanded speeds are within their safe bounds."
        )?;
    }

    if let Some(arc) = &result.limiting_arc {
        writeln!(w)?;
        writeln!(w, "Limiting arc:")?;
        writeln!(w, "  source line:     {}", arc.source_line_index + 1)?;
        writeln!(w, "  radius:          {:.3} units", arc.radius)?;
        writeln!(w, "  max safe speed:  {:.4} units/sec", arc.max_safe_speed)?;
        writeln!(
            w,
            "  commanded speed: {:.4} units/sec ({})",
            arc.commanded_speed,
            if arc.is_violation {
                "exceeds bound"
            } else {
                "within bound"
            }
        )?;
    }

    Ok(())
}
