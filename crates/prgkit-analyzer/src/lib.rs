//! # PRGKit Analyzer
//!
//! The analytical core of PRGKit: parses Aerotech-style .prg toolpath
//! programs into motion segments, bounds curved-segment speeds by a
//! G-factor, renders the stress report, and writes the speed-corrected
//! copy of the program.
//!
//! The pipeline is a strict sequential chain with no shared state:
//!
//! ```text
//! parse_prg_file -> run_path_stress_analysis -> { generate_analysis_report,
//!                                                 create_annotated_prg_file }
//! ```

pub mod analysis;
pub mod annotator;
pub mod grammar;
pub mod parser;
pub mod report;
pub mod segment;

pub use analysis::{
    max_safe_speed, run_path_stress_analysis, AnalysisResult, ArcInfo, LimitingArcDetails,
    StressEvent,
};
pub use annotator::{annotated_path, create_annotated_prg_file};
pub use grammar::{MotionCommand, MotionLine, MotionWord};
pub use parser::{parse_prg_file, parse_prg_text};
pub use report::generate_analysis_report;
pub use segment::{Segment, SegmentKind};
