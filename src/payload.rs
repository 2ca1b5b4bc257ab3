//! Parsing the analysis endpoint's series payload.
//!
//! The endpoint answers `{"series": [{"t": 0.0, "value": 0.42}, ...]}`.
//! Individual fields that are missing, `null`, or non-numeric coerce to
//! zero rather than failing the document; only a structurally invalid
//! document is an error. Transport failures are the caller's concern.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::geom::Sample;
use crate::series::Series;

/// Error for a structurally invalid analysis payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The document is not valid JSON or lacks the `series` array.
    #[error("malformed analysis payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    series: Vec<RawSample>,
}

/// One point as the endpoint serializes it.
#[derive(Debug, Deserialize)]
struct RawSample {
    #[serde(default, deserialize_with = "lenient_f64")]
    t: f64,
    #[serde(default, deserialize_with = "lenient_f64", alias = "v")]
    value: f64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_f64().unwrap_or(0.0))
}

/// Parse an analysis payload into an unlabeled series.
///
/// Use [`Series::with_label`] on the result to attach the display name
/// shown in legends.
pub fn parse_analysis(json: &str) -> Result<Series, PayloadError> {
    let payload: AnalysisPayload = serde_json::from_str(json)?;
    Ok(Series::new(
        payload
            .series
            .into_iter()
            .map(|raw| Sample::new(raw.t, raw.value))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_payload() {
        let series = parse_analysis(r#"{"series": [{"t": 0, "value": 0.2}, {"t": 10, "value": 0.9}]}"#)
            .expect("valid payload");
        assert_eq!(series.len(), 2);
        assert_eq!(series.samples()[1].t, 10.0);
        assert_eq!(series.samples()[1].value, 0.9);
    }

    #[test]
    fn accepts_the_short_field_alias() {
        let series = parse_analysis(r#"{"series": [{"t": 1, "v": 0.5}]}"#).expect("valid payload");
        assert_eq!(series.samples()[0].value, 0.5);
    }

    #[test]
    fn malformed_fields_coerce_to_zero() {
        let series = parse_analysis(
            r#"{"series": [{"value": 0.4}, {"t": null, "value": "high"}, {"t": 2}]}"#,
        )
        .expect("valid payload");
        assert_eq!(series.samples()[0].t, 0.0);
        assert_eq!(series.samples()[0].value, 0.4);
        assert_eq!(series.samples()[1].t, 0.0);
        assert_eq!(series.samples()[1].value, 0.0);
        assert_eq!(series.samples()[2].t, 2.0);
        assert_eq!(series.samples()[2].value, 0.0);
    }

    #[test]
    fn empty_series_is_not_an_error() {
        let series = parse_analysis(r#"{"series": []}"#).expect("valid payload");
        assert!(series.is_empty());
    }

    #[test]
    fn structurally_invalid_documents_are_errors() {
        assert!(parse_analysis("not json").is_err());
        assert!(parse_analysis(r#"{"no_series": true}"#).is_err());
        assert!(parse_analysis(r#"{"series": 5}"#).is_err());
    }
}
