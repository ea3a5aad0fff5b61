//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structure shared by the `/report`
//! and `/report/xlsx` endpoints.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{ClockTime, LeaveRow, LeaveTable, PunchRecord, PunchSchema, PunchTable};

/// Request body for the report endpoints.
///
/// Carries both input tables: the punch export and the HRMS leave sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The punch export.
    pub punches: PunchTableRequest,
    /// The HRMS rows, one per employee, in output order.
    pub employees: Vec<LeaveRowRequest>,
}

/// The punch export in a report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchTableRequest {
    /// Export layout; defaults to the split punch-in/punch-out layout.
    #[serde(default)]
    pub schema: PunchSchema,
    /// Punch records in source order.
    pub records: Vec<PunchRecordRequest>,
}

/// One punch record in a report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRecordRequest {
    /// Employee identifier.
    pub employee_id: String,
    /// Calendar date; defaults to the date of the punch-in, then the punch-out.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Punch-in timestamp (ISO 8601, no offset).
    #[serde(default)]
    pub punch_in: Option<NaiveDateTime>,
    /// Punch-out timestamp (ISO 8601, no offset).
    #[serde(default)]
    pub punch_out: Option<NaiveDateTime>,
    /// Free-text shift name.
    pub shift_name: String,
}

/// One HRMS row in a report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRowRequest {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Leave codes keyed by `DD-MM-YYYY` day column; other keys are ignored.
    #[serde(default)]
    pub codes: BTreeMap<String, String>,
}

impl From<PunchRecordRequest> for PunchRecord {
    fn from(req: PunchRecordRequest) -> Self {
        let date = req
            .date
            .or_else(|| req.punch_in.map(|dt| dt.date()))
            .or_else(|| req.punch_out.map(|dt| dt.date()));
        PunchRecord {
            employee_id: req.employee_id,
            date,
            punch_in: req.punch_in.map(ClockTime::from_datetime),
            punch_out: req.punch_out.map(ClockTime::from_datetime),
            shift_name: req.shift_name,
        }
    }
}

impl From<PunchTableRequest> for PunchTable {
    fn from(req: PunchTableRequest) -> Self {
        PunchTable::new(req.schema, req.records.into_iter().map(Into::into).collect())
    }
}

impl From<LeaveRowRequest> for LeaveRow {
    fn from(req: LeaveRowRequest) -> Self {
        LeaveRow::from_columns(req.employee_id, req.employee_name, req.codes)
    }
}

impl ReportRequest {
    /// Splits the request into the two domain tables.
    pub fn into_tables(self) -> (LeaveTable, PunchTable) {
        let leaves = LeaveTable::new(self.employees.into_iter().map(Into::into).collect());
        (leaves, self.punches.into())
    }
}
