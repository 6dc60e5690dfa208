//! # PRGKit Core
//!
//! Core types, errors, and arc geometry for PRGKit.
//! Provides the fundamental abstractions shared by the analyzer and
//! settings crates: the error taxonomy, physical constants, and the
//! planar geometry used to derive arc centers and radii.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{AnalysisError, ConfigError, Error, ParseError, Result};
pub use geometry::{
    arc_center_from_radius, arc_radius_from_center, arc_sweep, Point, CENTER_OFFSET_TOLERANCE,
};
pub use units::STANDARD_GRAVITY;
