//! Monthly attendance report engine.
//!
//! This crate merges a biometric punch export with an HRMS leave sheet and
//! resolves every employee-day of the month into a single status, with late
//! and leave counters, ready to be served as JSON or rendered as a
//! color-coded workbook.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod render;
pub mod resolution;
