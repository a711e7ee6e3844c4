//! JSON report output

use crate::output::{OutputError, OutputResult};
use crate::scoring::BatchReport;

/// Serializes the full batch report as pretty-printed JSON
pub fn format_json_report(report: &BatchReport) -> OutputResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| OutputError::Format(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::PageResult;

    #[test]
    fn test_json_report_round_trips_as_value() {
        let report = BatchReport::from_results(vec![PageResult::failed(
            "https://example.com/",
            "net::ERR_CONNECTION_REFUSED",
        )]);
        let text = format_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["overall_score"], 0);
        assert_eq!(value["pages"][0]["status"], "failed");
        assert!(value["config_hash"].is_null());
        assert!(value["generated_at"].is_string());
    }
}
