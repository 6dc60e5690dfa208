//! # PRGKit Settings
//!
//! Configuration persistence for PRGKit: the operator's last-used
//! G-factor, stored as JSON or TOML in the platform config directory.

pub mod config;

pub use config::{default_config_path, AnalysisSettings, Config};
