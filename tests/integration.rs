//! End-to-end tests for the attendance engine.
//!
//! This suite covers:
//! - CSV and workbook ingestion of both punch layouts
//! - Dual-punch and single-punch resolution rules
//! - Month inference and out-of-month punches
//! - Workbook rendering
//! - The HTTP API
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use calamine::{Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::io::Cursor;
use tower::ServiceExt;

use attendance_engine::api::{AppState, XLSX_CONTENT_TYPE, create_router};
use attendance_engine::config::{ConfigLoader, ResolutionPolicy};
use attendance_engine::error::EngineError;
use attendance_engine::ingest::{load_leave_table, load_punch_table};
use attendance_engine::models::{
    AttendanceReport, ClockTime, EmployeeSummary, LeaveRow, LeaveTable, PunchRecord, PunchSchema,
    PunchTable,
};
use attendance_engine::render::{DEFAULT_FILE_NAME, SHEET_NAME, render_to_buffer, save_report};
use attendance_engine::resolution::build_report;

// =============================================================================
// Test Helpers
// =============================================================================

const SPLIT_PUNCHES: &str = "tests/fixtures/punches_split.csv";
const COMBINED_PUNCHES: &str = "tests/fixtures/punches_combined.csv";
const COMBINED_PUNCHES_XLSX: &str = "tests/fixtures/punches_combined.xlsx";
const HRMS: &str = "tests/fixtures/hrms.csv";

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn build_from_fixtures(punches: &str, policy: &ResolutionPolicy) -> AttendanceReport {
    let punches = load_punch_table(punches).unwrap();
    let leaves = load_leave_table(HRMS).unwrap();
    build_report(&leaves, &punches, policy).unwrap()
}

fn row<'a>(report: &'a AttendanceReport, id: &str) -> &'a EmployeeSummary {
    report
        .rows
        .iter()
        .find(|r| r.employee_id == id)
        .unwrap_or_else(|| panic!("no row for {id}"))
}

fn literal(summary: &EmployeeSummary, day: u32) -> Option<String> {
    summary.status(day).map(|s| s.to_string())
}

/// Opens a rendered workbook and returns its report sheet.
fn read_sheet(bytes: Vec<u8>) -> Range<Data> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("not a workbook");
    workbook.worksheet_range(SHEET_NAME).expect("missing report sheet")
}

fn text_at(sheet: &Range<Data>, row: u32, col: u32) -> Option<String> {
    match sheet.get_value((row, col)) {
        Some(Data::String(value)) => Some(value.clone()),
        Some(Data::Empty) | None => None,
        Some(other) => panic!("unexpected cell {other:?} at ({row}, {col})"),
    }
}

fn number_at(sheet: &Range<Data>, row: u32, col: u32) -> f64 {
    match sheet.get_value((row, col)) {
        Some(Data::Float(value)) => *value,
        Some(Data::Int(value)) => *value as f64,
        other => panic!("expected a number at ({row}, {col}), got {other:?}"),
    }
}

async fn post_report(router: Router, uri: &str, body: Value) -> (StatusCode, axum::body::Bytes) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

fn valid_request_json() -> Value {
    json!({
        "punches": {
            "schema": "split",
            "records": [
                {
                    "employee_id": "E001",
                    "punch_in": "2024-03-04T09:50:00",
                    "punch_out": "2024-03-04T18:00:00",
                    "shift_name": "General"
                },
                {
                    "employee_id": "E001",
                    "punch_in": "2024-03-05T09:10:00",
                    "punch_out": "2024-03-05T18:00:00",
                    "shift_name": "General"
                }
            ]
        },
        "employees": [
            {
                "employee_id": "E001",
                "employee_name": "Asha Rao",
                "codes": {"04-03-2024": "PT", "05-03-2024": "PT", "06-03-2024": "PL"}
            },
            {
                "employee_id": "E002",
                "employee_name": "Ravi Menon",
                "codes": {"04-03-2024": "PT"}
            }
        ]
    })
}

// =============================================================================
// Split layout, dual-punch rules
// =============================================================================

#[test]
fn test_split_layout_is_detected() {
    let punches = load_punch_table(SPLIT_PUNCHES).unwrap();
    assert_eq!(punches.schema, PunchSchema::Split);
    assert_eq!(punches.records.len(), 11);
}

#[test]
fn test_report_follows_hrms_row_order() {
    let report = build_from_fixtures(SPLIT_PUNCHES, &ResolutionPolicy::dual_punch());
    let ids: Vec<_> = report.rows.iter().map(|r| r.employee_id.as_str()).collect();
    assert_eq!(ids, ["E001", "E002", "E003"]);
    assert_eq!((report.month.year, report.month.month), (2024, 1));
    assert!(report.rows.iter().all(|r| r.day_statuses.len() == 31));
}

#[test]
fn test_general_shift_employee_month() {
    let report = build_from_fixtures(SPLIT_PUNCHES, &ResolutionPolicy::dual_punch());
    let asha = row(&report, "E001");

    assert_eq!(literal(asha, 1).as_deref(), Some("HD"));
    assert_eq!(literal(asha, 2).as_deref(), Some("GSL 09:50"));
    assert_eq!(literal(asha, 3).as_deref(), Some("PT"));
    assert_eq!(literal(asha, 4).as_deref(), Some("Morning Punch Miss"));
    assert_eq!(literal(asha, 5).as_deref(), Some("Evening Punch Miss"));
    assert_eq!(literal(asha, 6).as_deref(), Some("WOff"));
    assert_eq!(literal(asha, 8).as_deref(), Some("Half Day Leave"));
    assert_eq!(literal(asha, 9).as_deref(), Some("PL"));
    assert_eq!(literal(asha, 13), None);

    assert_eq!(asha.late_count, 1);
    assert_eq!(asha.leave_count, 4);
    assert_eq!(
        (asha.pl_count, asha.cl_count, asha.ll_count, asha.lwp_count),
        (1, 1, 1, 1)
    );
}

#[test]
fn test_evening_shift_employee_month() {
    let report = build_from_fixtures(SPLIT_PUNCHES, &ResolutionPolicy::dual_punch());
    let ravi = row(&report, "E002");

    assert_eq!(literal(ravi, 1).as_deref(), Some("Not Enrolled"));
    assert_eq!(literal(ravi, 2).as_deref(), Some("ESL 16:45"));
    assert_eq!(literal(ravi, 3).as_deref(), Some("PT"));
    assert_eq!(literal(ravi, 4).as_deref(), Some("PT"));
    assert_eq!(literal(ravi, 5).as_deref(), Some("Morning Punch Miss"));
    assert_eq!(literal(ravi, 8).as_deref(), Some("AT"));
    assert_eq!(literal(ravi, 9).as_deref(), Some("WFH"));
    assert_eq!(literal(ravi, 10).as_deref(), Some("AT"));
    assert_eq!(literal(ravi, 11), None);
    assert_eq!(literal(ravi, 12), None);

    assert_eq!(ravi.late_count, 1);
    assert_eq!(ravi.leave_count, 0);
}

#[test]
fn test_leave_only_employee() {
    let report = build_from_fixtures(SPLIT_PUNCHES, &ResolutionPolicy::dual_punch());
    let meera = row(&report, "E003");

    assert_eq!(literal(meera, 1).as_deref(), Some("PL"));
    assert_eq!(literal(meera, 3).as_deref(), Some("AT"));
    assert_eq!(meera.pl_count, 2);
    assert_eq!(meera.leave_count, 2);
}

#[test]
fn test_punch_only_employee_gets_no_row() {
    let report = build_from_fixtures(SPLIT_PUNCHES, &ResolutionPolicy::dual_punch());
    assert!(report.rows.iter().all(|r| r.employee_id != "E009"));
}

// =============================================================================
// Combined layout, single-punch rules
// =============================================================================

#[test]
fn test_combined_layout_single_punch_rules() {
    let punches = load_punch_table(COMBINED_PUNCHES).unwrap();
    assert_eq!(punches.schema, PunchSchema::Combined);

    let report = build_from_fixtures(COMBINED_PUNCHES, &ResolutionPolicy::single_punch());
    let asha = row(&report, "E001");
    assert_eq!(literal(asha, 2).as_deref(), Some("GSL 09:50"));
    assert_eq!(literal(asha, 3).as_deref(), Some("PT"));
    assert_eq!(literal(asha, 4).as_deref(), Some("Punch Miss"));
    assert_eq!(literal(asha, 8).as_deref(), Some("Half Day"));

    let ravi = row(&report, "E002");
    assert_eq!(literal(ravi, 2).as_deref(), Some("ESL 14:31"));
    assert_eq!(literal(ravi, 3).as_deref(), Some("PT"));
    assert_eq!(literal(ravi, 4).as_deref(), Some("Punch Miss"));
    assert_eq!(literal(ravi, 8).as_deref(), Some("Half Day"));
    assert_eq!(ravi.late_count, 1);
}

#[test]
fn test_combined_layout_from_workbook() {
    let punches = load_punch_table(COMBINED_PUNCHES_XLSX).unwrap();
    assert_eq!(punches.schema, PunchSchema::Combined);
    assert_eq!(punches.records.len(), 5);

    let report = build_from_fixtures(COMBINED_PUNCHES_XLSX, &ResolutionPolicy::single_punch());
    assert_eq!((report.month.year, report.month.month), (2024, 1));

    // the first punch is a native date-time cell, the rest are text
    let asha = row(&report, "E001");
    assert_eq!(literal(asha, 2).as_deref(), Some("GSL 10:30"));
    assert_eq!(literal(asha, 3).as_deref(), Some("PT"));
    assert_eq!(literal(asha, 4).as_deref(), Some("Punch Miss"));

    let ravi = row(&report, "E002");
    assert_eq!(literal(ravi, 2).as_deref(), Some("ESL 14:31"));
    assert_eq!(literal(ravi, 4).as_deref(), Some("Punch Miss"));
    assert_eq!(ravi.late_count, 1);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_workbook_layout_matches_report() {
    let report = build_from_fixtures(SPLIT_PUNCHES, &ResolutionPolicy::dual_punch());
    let config = ConfigLoader::load("./config/default").unwrap();
    let sheet = read_sheet(render_to_buffer(&report, config.palette()).unwrap());

    let headers = AttendanceReport::column_headers(31);
    for (col, header) in headers.iter().enumerate() {
        assert_eq!(text_at(&sheet, 0, col as u32).as_deref(), Some(header.as_str()));
    }
    assert_eq!(text_at(&sheet, 0, 3).as_deref(), Some("Day 1"));
    assert_eq!(text_at(&sheet, 0, 34).as_deref(), Some("Leaves Count"));

    // E001: D2 is day 1, E2 is day 2
    assert_eq!(text_at(&sheet, 1, 0).as_deref(), Some("E001"));
    assert_eq!(text_at(&sheet, 1, 1).as_deref(), Some("Asha Rao"));
    assert_eq!(number_at(&sheet, 1, 2), 1.0);
    assert_eq!(text_at(&sheet, 1, 3).as_deref(), Some("HD"));
    assert_eq!(text_at(&sheet, 1, 4).as_deref(), Some("GSL 09:50"));
    assert_eq!(text_at(&sheet, 1, 3 + 12), None);

    // leave, PL, CL, LL and LWP counts follow Day 31
    let counts: Vec<f64> = (34..39).map(|col| number_at(&sheet, 1, col)).collect();
    assert_eq!(counts, [4.0, 1.0, 1.0, 1.0, 1.0]);

    assert_eq!(text_at(&sheet, 2, 4).as_deref(), Some("ESL 16:45"));
    assert_eq!(text_at(&sheet, 3, 0).as_deref(), Some("E003"));
    assert_eq!(sheet.height(), 4);
}

#[test]
fn test_workbook_count_columns_follow_short_month() {
    let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let leaves = LeaveTable::new(vec![LeaveRow::from_columns(
        "E1",
        "Asha",
        [("29-02-2024", "CL"), ("01-02-2024", "PT")],
    )]);
    let punches = PunchTable::new(
        PunchSchema::Split,
        vec![PunchRecord {
            employee_id: "E1".to_string(),
            date: Some(leap_day),
            punch_in: None,
            punch_out: ClockTime::from_hm(18, 0),
            shift_name: "General".to_string(),
        }],
    );
    let report = build_report(&leaves, &punches, &ResolutionPolicy::dual_punch()).unwrap();
    assert_eq!(report.month.days_in_month, 29);

    let sheet = read_sheet(render_to_buffer(&report, ConfigLoader::builtin().palette()).unwrap());

    // column AG
    assert_eq!(text_at(&sheet, 0, 31).as_deref(), Some("Day 29"));
    assert_eq!(text_at(&sheet, 0, 32).as_deref(), Some("Leaves Count"));
    assert_eq!(text_at(&sheet, 0, 36).as_deref(), Some("LWP Count"));
    assert_eq!(sheet.width(), 37);

    assert_eq!(text_at(&sheet, 1, 3).as_deref(), Some("AT"));
    assert_eq!(text_at(&sheet, 1, 31).as_deref(), Some("CL"));
    assert_eq!(number_at(&sheet, 1, 32), 1.0);
    assert_eq!(number_at(&sheet, 1, 34), 1.0);
}

#[test]
fn test_workbook_written_to_disk() {
    let report = build_from_fixtures(SPLIT_PUNCHES, &ResolutionPolicy::dual_punch());
    let config = ConfigLoader::load("./config/default").unwrap();

    let dir = std::env::temp_dir().join(format!("attendance-it-{}", report.report_id));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(DEFAULT_FILE_NAME);

    save_report(&report, config.palette(), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_workbook_renders_with_builtin_palette() {
    let report = build_from_fixtures(COMBINED_PUNCHES, &ResolutionPolicy::single_punch());
    let builtin = ConfigLoader::builtin();

    let bytes = render_to_buffer(&report, builtin.palette()).unwrap();
    assert!(bytes.len() > 1000);
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_missing_employee_id_column_aborts() {
    let err = load_leave_table("tests/fixtures/hrms_missing_id.csv").unwrap_err();
    assert!(matches!(err, EngineError::MissingColumn { .. }));
    assert_eq!(
        err.to_string(),
        "leave table is missing required column 'Employee Id'"
    );
}

#[test]
fn test_missing_input_file() {
    let err = load_punch_table("tests/fixtures/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, EngineError::InputRead { .. }));
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_report_json() {
    let (status, body) = post_report(create_router_for_test(), "/report", valid_request_json()).await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["month"]["month"], 3);
    assert_eq!(report["month"]["days_in_month"], 31);

    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["late_count"], 1);
    assert_eq!(rows[0]["day_statuses"][3], "GSL 09:50");
    assert_eq!(rows[0]["day_statuses"][4], "PT");
    assert_eq!(rows[0]["day_statuses"][5], "PL");
    assert_eq!(rows[0]["day_statuses"][0], Value::Null);
    assert_eq!(rows[0]["pl_count"], 1);
    assert_eq!(rows[1]["day_statuses"][3], "AT");
}

#[tokio::test]
async fn test_api_report_xlsx() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/report/xlsx")
                .header("Content-Type", "application/json")
                .body(Body::from(valid_request_json().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        XLSX_CONTENT_TYPE
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attendance_report.xlsx"));
}

#[tokio::test]
async fn test_api_no_punch_dates() {
    let body = json!({
        "punches": {"records": [{"employee_id": "E001", "shift_name": "General"}]},
        "employees": [{"employee_id": "E001", "employee_name": "Asha Rao"}]
    });
    let (status, body) = post_report(create_router_for_test(), "/report", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "NO_PUNCH_DATES");
    assert_eq!(
        error["message"],
        "No valid punch dates found; cannot determine the reporting month"
    );
}

#[tokio::test]
async fn test_api_bad_timestamp_is_rejected() {
    let body = json!({
        "punches": {"records": [{"employee_id": "E001", "punch_in": "yesterday", "shift_name": "General"}]},
        "employees": []
    });
    let (status, body) = post_report(create_router_for_test(), "/report", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}
