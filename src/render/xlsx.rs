//! Spreadsheet rendering of a finished report.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceReport, EmployeeSummary};

use super::Palette;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Attendance Report";

/// Default output file name.
pub const DEFAULT_FILE_NAME: &str = "attendance_report.xlsx";

const HEADER_COLOR: u32 = 0x4472C4;
const FIRST_DAY_COLUMN: u16 = 3;

/// Renders the report into an in-memory `.xlsx` workbook.
///
/// Day cells whose literal has a palette color get a solid fill; blank days
/// are left empty.
///
/// # Errors
///
/// Returns [`EngineError::RenderError`] if the writer fails.
pub fn render_to_buffer(report: &AttendanceReport, palette: &Palette) -> EngineResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let days = report.month.days_in_month;
    let headers = AttendanceReport::column_headers(days);
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    worksheet.set_column_width(0, 14)?; // Employee Id
    worksheet.set_column_width(1, 28)?; // Employee Name
    worksheet.set_column_width(2, 11)?; // Late Count
    for day in 0..days as u16 {
        worksheet.set_column_width(FIRST_DAY_COLUMN + day, 12)?;
    }

    let mut fills: HashMap<u32, Format> = HashMap::new();
    for (idx, summary) in report.rows.iter().enumerate() {
        write_row(worksheet, (idx + 1) as u32, summary, days, palette, &mut fills)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let buffer = workbook.save_to_buffer()?;
    debug!(
        report_id = %report.report_id,
        rows = report.rows.len(),
        bytes = buffer.len(),
        "Rendered report workbook"
    );
    Ok(buffer)
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    summary: &EmployeeSummary,
    days: u32,
    palette: &Palette,
    fills: &mut HashMap<u32, Format>,
) -> EngineResult<()> {
    worksheet.write_string(row, 0, &summary.employee_id)?;
    worksheet.write_string(row, 1, &summary.employee_name)?;
    worksheet.write_number(row, 2, summary.late_count)?;

    for (offset, status) in summary.day_statuses.iter().enumerate() {
        let Some(status) = status else {
            continue;
        };
        let col = FIRST_DAY_COLUMN + offset as u16;
        let literal = status.to_string();
        match palette.color_for(&literal) {
            Some(color) => {
                let format = fills.entry(color).or_insert_with(|| {
                    Format::new()
                        .set_background_color(Color::RGB(color))
                        .set_border(FormatBorder::Thin)
                });
                worksheet.write_string_with_format(row, col, &literal, format)?;
            }
            None => {
                worksheet.write_string(row, col, &literal)?;
            }
        }
    }

    let counts = [
        summary.leave_count,
        summary.pl_count,
        summary.cl_count,
        summary.ll_count,
        summary.lwp_count,
    ];
    let first_count = FIRST_DAY_COLUMN + days as u16;
    for (offset, count) in counts.into_iter().enumerate() {
        worksheet.write_number(row, first_count + offset as u16, count)?;
    }
    Ok(())
}

/// Renders the report and writes it to `path`.
///
/// The workbook is rendered fully in memory first, so a rendering failure
/// never leaves a partial file behind.
pub fn save_report(
    report: &AttendanceReport,
    palette: &Palette,
    path: impl AsRef<Path>,
) -> EngineResult<()> {
    let path = path.as_ref();
    let buffer = render_to_buffer(report, palette)?;
    std::fs::write(path, &buffer).map_err(|e| EngineError::RenderError {
        message: format!("cannot write '{}': {e}", path.display()),
    })?;
    debug!(path = %path.display(), "Saved report workbook");
    Ok(())
}
