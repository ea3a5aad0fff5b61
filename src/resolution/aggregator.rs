//! Per-employee aggregation over the reporting month.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::ResolutionPolicy;
use crate::models::{EmployeeSummary, LeaveRow, LeaveTable, MonthContext, PunchRecord, PunchTable};

use super::day_resolver::DayResolver;

/// Punch records grouped by employee and date, in source order.
type PunchIndex<'a> = HashMap<(&'a str, NaiveDate), Vec<&'a PunchRecord>>;

/// Builds one [`EmployeeSummary`] per leave-table row, in row order.
///
/// Every day of `month` is resolved against the row's leave code for that
/// date and the employee's punches on it. Punches outside the month, or
/// without a date, are ignored. Employees that only appear in the punch
/// table get no row.
pub fn aggregate(
    leaves: &LeaveTable,
    punches: &PunchTable,
    month: &MonthContext,
    policy: &ResolutionPolicy,
) -> Vec<EmployeeSummary> {
    let index = index_punches(punches, month);
    let resolver = DayResolver::new(policy, punches.schema);

    leaves
        .rows
        .iter()
        .map(|row| summarize_row(row, &index, month, &resolver))
        .collect()
}

fn index_punches<'a>(punches: &'a PunchTable, month: &MonthContext) -> PunchIndex<'a> {
    let mut index: PunchIndex<'a> = HashMap::new();
    for record in &punches.records {
        let Some(date) = record.date.filter(|d| month.contains(*d)) else {
            continue;
        };
        index
            .entry((record.employee_id.as_str(), date))
            .or_default()
            .push(record);
    }
    index
}

fn summarize_row(
    row: &LeaveRow,
    index: &PunchIndex<'_>,
    month: &MonthContext,
    resolver: &DayResolver<'_>,
) -> EmployeeSummary {
    let mut summary = EmployeeSummary::new(
        row.employee_id.as_str(),
        row.employee_name.as_str(),
        month.days_in_month as usize,
    );

    for (idx, date) in month.dates().enumerate() {
        let code = row.code(date);
        if code.is_none() {
            if let Some(raw) = row.raw_code(date) {
                debug!(
                    employee_id = %row.employee_id,
                    date = %date,
                    code = raw,
                    "Unrecognized leave code"
                );
            }
        }

        let punches = index
            .get(&(row.employee_id.as_str(), date))
            .map(Vec::as_slice)
            .unwrap_or_default();
        let day = resolver.resolve(code, punches);

        summary.day_statuses[idx] = day.status;
        if day.is_late {
            summary.late_count += 1;
        }
        if let Some(leave) = day.leave {
            summary.record_leave(leave);
        }
    }

    summary
}
