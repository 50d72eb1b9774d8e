//! JSON serialization for matrix tournament results.
//!
//! Produces the structured tournament record of a run: the full
//! `MatrixResult` with ISO-8601 timestamps plus the derived duration.

use serde_json::Value;

use crate::matrix::types::MatrixResult;

/// Serialize a `MatrixResult` to a pretty-printed JSON string.
///
/// The computed `duration_seconds` is included alongside the serialized
/// fields so consumers need not re-derive it from the timestamps.
pub fn matrix_result_to_json(result: &MatrixResult) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "duration_seconds".to_string(),
            serde_json::json!(result.duration_seconds()),
        );
    }
    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::stats::compute_matrix_stats;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_serialization_includes_timestamps_and_duration() {
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        let result = MatrixResult {
            id: "t1".to_string(),
            resolution: "Resolved: records persist".to_string(),
            model_names: names.clone(),
            total_debates: 0,
            debate_results: vec![],
            stats: compute_matrix_stats(&[], &names),
            started_at: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
            completed_at: Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 0).unwrap(),
        };

        let json = matrix_result_to_json(&result).expect("serialization should succeed");
        let parsed: Value = serde_json::from_str(&json).expect("round-trips");

        assert_eq!(parsed["id"], "t1");
        assert_eq!(parsed["duration_seconds"], 1800.0);
        // chrono serializes DateTime<Utc> as ISO-8601 / RFC 3339.
        let started = parsed["started_at"].as_str().expect("string timestamp");
        assert!(started.starts_with("2026-08-07T12:00:00"));
        assert!(parsed["stats"]["elo_ratings"]["Alpha"]["rating"].is_number());
    }
}
