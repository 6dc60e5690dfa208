//! Physical constants
//!
//! .prg programs are unit-agnostic: coordinates are machine units and
//! feed rates are units/sec. The stress bound uses standard gravity as
//! written, so G-factor comparisons stay consistent regardless of the
//! machine unit in use.

/// Standard gravitational acceleration used by the stress bound.
pub const STANDARD_GRAVITY: f64 = 9.81;
