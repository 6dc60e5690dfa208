//! # PRGKit
//!
//! Path stress analysis and speed correction for aerosol-jet .prg
//! toolpath programs:
//! - Parses Aerotech-style motion programs into typed segments
//! - Bounds curved-segment speeds by a G-factor (a multiple of
//!   standard gravity on centripetal acceleration)
//! - Renders a human-readable stress report
//! - Writes a corrected copy of the program at the safe uniform feed
//!
//! ## Architecture
//!
//! PRGKit is organized as a workspace with multiple crates:
//!
//! 1. **prgkit-core** - Error taxonomy, physical constants, arc geometry
//! 2. **prgkit-analyzer** - Parser, stress analysis, report, annotator
//! 3. **prgkit-settings** - Config persistence (last-used G-factor)
//! 4. **prgkit** - Library facade and the CLI binary

pub use prgkit_core::{
    arc_center_from_radius, arc_radius_from_center, arc_sweep, AnalysisError, ConfigError, Error,
    ParseError, Point, Result, STANDARD_GRAVITY,
};

pub use prgkit_analyzer::{
    annotated_path, create_annotated_prg_file, generate_analysis_report, max_safe_speed,
    parse_prg_file, parse_prg_text, run_path_stress_analysis, AnalysisResult, ArcInfo,
    LimitingArcDetails, Segment, SegmentKind, StressEvent,
};

pub use prgkit_settings::{default_config_path, AnalysisSettings, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output, RUST_LOG
/// environment variable support, and INFO as the default level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
