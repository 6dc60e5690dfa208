//! Program annotation
//!
//! Rewrites a .prg program at the analyzed limiting speed and writes
//! the result alongside the original. The policy is uniform: every
//! motion command's feed is set to the one stress-safe speed, so the
//! whole path runs at a consistent rate. Everything outside the feed
//! field is preserved byte for byte, and the output has exactly as
//! many lines as the input.

use std::path::{Path, PathBuf};

use prgkit_core::error::{AnalysisError, Result};
use tracing::info;

use crate::analysis::AnalysisResult;
use crate::grammar::{classify, format_feed, rewrite_feed};

/// Destination naming convention: `<stem>_annotated<ext>` next to the
/// source. A boundary contract with the caller, not a decision the
/// annotator makes on its own.
pub fn annotated_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{}_annotated.{}", stem, ext.to_string_lossy()),
        None => format!("{}_annotated", stem),
    };
    source.with_file_name(name)
}

/// Write a corrected copy of `source_path` to `destination_path`.
///
/// Requires a concrete limiting speed; calling this on a no-arc result
/// is an [`AnalysisError::NoLimitingFactor`], never a silent rewrite.
/// Failures reading the source or writing the destination surface as
/// I/O errors, distinguishable from analysis failures.
pub fn create_annotated_prg_file(
    source_path: &Path,
    destination_path: &Path,
    analysis: &AnalysisResult,
) -> Result<()> {
    let limiting_speed = analysis
        .limiting_speed
        .ok_or(AnalysisError::NoLimitingFactor)?;

    let text = std::fs::read_to_string(source_path)?;
    let annotated = annotate_text(&text, limiting_speed);
    std::fs::write(destination_path, annotated)?;

    info!(
        source = %source_path.display(),
        destination = %destination_path.display(),
        limiting_speed,
        "wrote annotated program"
    );
    Ok(())
}

/// Rewrite every motion line's feed to `limiting_speed`.
///
/// Splitting on `\n` and re-joining reproduces the original byte
/// layout (including any trailing newline); a `\r` left by CRLF line
/// endings is detached before the rewrite and re-attached after.
fn annotate_text(text: &str, limiting_speed: f64) -> String {
    let feed_text = format_feed(limiting_speed);

    let rewritten: Vec<String> = text
        .split('\n')
        .map(|raw| {
            let (body, cr) = match raw.strip_suffix('\r') {
                Some(body) => (body, "\r"),
                None => (raw, ""),
            };
            match classify(body) {
                // Every line that classifies as motion gets the new
                // feed, geometry-invalid arcs included; only non-motion
                // lines and malformed tokens pass through verbatim.
                Ok(Some(_)) => format!("{}{}", rewrite_feed(body, &feed_text), cr),
                _ => raw.to_string(),
            }
        })
        .collect();

    rewritten.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_path_stress_analysis;
    use crate::parser::parse_prg_text;

    const PROGRAM: &str = "\
' test pattern
ENABLE X Y
LINEAR X10.0 Y0.0 F9.0
CW X20.0 Y0.0 R5.0 ; tight bend
LINEAR X20.0 Y10.0
DWELL 0.5
";

    fn annotate(program: &str, g_factor: f64) -> String {
        let segments = parse_prg_text(program);
        let result = run_path_stress_analysis(&segments, g_factor).unwrap();
        annotate_text(program, result.limiting_speed.unwrap())
    }

    #[test]
    fn test_every_motion_line_gets_the_limiting_feed() {
        let out = annotate(PROGRAM, 0.5);
        // sqrt(0.5 * 9.81 * 5) = 4.9522..., floored to 4 decimals.
        assert!(out.contains("LINEAR X10.0 Y0.0 F4.9522"));
        assert!(out.contains("CW X20.0 Y0.0 R5.0 F4.9522 ; tight bend"));
        // The modal line without an F word gains one.
        assert!(out.contains("LINEAR X20.0 Y10.0 F4.9522"));
    }

    #[test]
    fn test_non_motion_lines_and_line_count_preserved() {
        let out = annotate(PROGRAM, 0.5);
        assert_eq!(out.lines().count(), PROGRAM.lines().count());
        assert!(out.contains("' test pattern"));
        assert!(out.contains("ENABLE X Y"));
        assert!(out.contains("DWELL 0.5"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_crlf_endings_preserved() {
        let program = "LINEAR X1 Y0 F9.0\r\nCW X3 Y0 R1\r\n";
        let segments = parse_prg_text(program);
        let result = run_path_stress_analysis(&segments, 0.5).unwrap();
        let out = annotate_text(program, result.limiting_speed.unwrap());
        assert!(out.contains("F2.2147\r\n"));
        assert_eq!(out.matches("\r\n").count(), 2);
    }

    #[test]
    fn test_annotated_speed_never_exceeds_the_bound() {
        let out = annotate(PROGRAM, 0.5);
        let segments = parse_prg_text(&out);
        let result = run_path_stress_analysis(&segments, 0.5).unwrap();
        assert!(!result.has_violations());
    }

    #[test]
    fn test_geometry_invalid_motion_line_still_rewritten() {
        // The arc on line 3 is under-determined and skipped by the
        // parser, but it still classifies as motion and gets the feed.
        let program = "LINEAR X10 Y0 F9.0\nCW X20 Y0 R5\nCW X30 Y0 F9.0\nLINEAR X1 Yoops\n";
        let segments = parse_prg_text(program);
        assert_eq!(segments.len(), 2);
        let result = run_path_stress_analysis(&segments, 0.5).unwrap();
        let out = annotate_text(program, result.limiting_speed.unwrap());
        assert!(out.contains("CW X30 Y0 F4.9522\n"));
        // Malformed tokens keep the line out of the rewrite entirely.
        assert!(out.contains("LINEAR X1 Yoops\n"));
    }

    #[test]
    fn test_trailing_dot_feed_survives_annotation() {
        let program = "LINEAR X10 Y0 F9.\nCW X20 Y0 R10\n";
        let segments = parse_prg_text(program);
        assert_eq!(segments.len(), 2);
        let result = run_path_stress_analysis(&segments, 0.5).unwrap();
        let out = annotate_text(program, result.limiting_speed.unwrap());
        // No stray digits after the rewritten feed; the arc re-parses.
        assert!(out.contains("LINEAR X10 Y0 F7.0035\n"));
        assert_eq!(parse_prg_text(&out).len(), 2);
    }

    #[test]
    fn test_annotated_path_naming() {
        assert_eq!(
            annotated_path(Path::new("/data/pattern.prg")),
            PathBuf::from("/data/pattern_annotated.prg")
        );
        assert_eq!(
            annotated_path(Path::new("job")),
            PathBuf::from("job_annotated")
        );
    }

    #[test]
    fn test_no_limiting_factor_refuses_to_annotate() {
        let segments = parse_prg_text("LINEAR X1 Y0 F1\n");
        let result = run_path_stress_analysis(&segments, 0.5).unwrap();
        let err = create_annotated_prg_file(
            Path::new("/nonexistent/in.prg"),
            Path::new("/nonexistent/out.prg"),
            &result,
        )
        .unwrap_err();
        assert!(err.is_analysis_error());
    }
}
