use fibertrack_core::error::CoreError;
use fibertrack_core::types::{new_id, now};

use super::Report;

pub const REPORT_FORMAT: &str = "pdf";
/// Link stored on every report. No document is rendered.
pub const PLACEHOLDER_URL: &str = "#";

/// Create a report record. `parameters` must be a JSON object.
pub fn new_report(report_type: &str, parameters: serde_json::Value) -> Result<Report, CoreError> {
    if report_type.trim().is_empty() {
        return Err(CoreError::Validation("report type must not be empty".into()));
    }
    if !parameters.is_object() {
        return Err(CoreError::Validation(
            "report parameters must be a JSON object".into(),
        ));
    }
    Ok(Report {
        id: new_id(),
        title: format!("Report: {report_type}"),
        report_type: report_type.to_string(),
        format: REPORT_FORMAT.to_string(),
        generated_at: now(),
        url: PLACEHOLDER_URL.to_string(),
        parameters,
    })
}
