//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints that resolve a month of
//! attendance from JSON input, as JSON or as a workbook.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{XLSX_CONTENT_TYPE, create_router};
pub use request::{LeaveRowRequest, PunchRecordRequest, PunchTableRequest, ReportRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
