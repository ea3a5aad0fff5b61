//! Configuration loading and management for the attendance engine.
//!
//! This module loads the day-resolution rules and the report palette from
//! YAML files, or supplies built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Missing punch rule: {:?}", config.policy().missing_punch);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EVENING_LATE_AFTER_DUAL, EVENING_LATE_AFTER_SINGLE, EngineConfig, GENERAL_LATE_AFTER,
    HalfDayLeavePolicy, MissingPunchPolicy, PaletteFile, PolicyFile, PolicyPreset,
    ResolutionPolicy,
};
