//! Report rendering.
//!
//! Turns an [`crate::models::AttendanceReport`] into a color-coded `.xlsx`
//! workbook.

mod palette;
mod xlsx;

pub use palette::Palette;
pub use xlsx::{DEFAULT_FILE_NAME, SHEET_NAME, render_to_buffer, save_report};
