use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Confidence line shown on every reveal. The service does send a
/// `confidence` field, but the display deliberately ignores it and shows
/// this fixed string instead (known limitation, kept as-is).
pub const FIXED_CONFIDENCE: &str = "Accuracy: 99.99%";

/// Raw JSON verdict returned by the analysis endpoint.
///
/// Only `status` is interpreted. `defect_locations` is decoded so markers
/// can be placed from it if ever wired up; everything else the service
/// sends is carried along untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub defect_locations: Vec<DefectLocation>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Normalized marker position over the previewed image, 0–100 on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefectLocation {
    pub x: f64,
    pub y: f64,
}

/// Binary verdict derived from a stored result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Defective,
    NonDefective,
}

impl Classification {
    /// Pure function of the result: a `status` equal to "defective"
    /// (case-insensitive) classifies as Defective; anything else, absent
    /// status included, is Non-Defective.
    pub fn from_result(result: &AnalysisResult) -> Self {
        match result.status.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("defective") => Self::Defective,
            _ => Self::NonDefective,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Defective => "Defective",
            Self::NonDefective => "Non-Defective",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_status(status: Option<&str>) -> AnalysisResult {
        AnalysisResult {
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_classification_defective_case_insensitive() {
        for s in ["defective", "Defective", "DEFECTIVE", "dEfEcTiVe"] {
            assert_eq!(
                Classification::from_result(&result_with_status(Some(s))),
                Classification::Defective,
                "status {s:?} should classify as defective"
            );
        }
    }

    #[test]
    fn test_classification_other_status_is_non_defective() {
        for s in ["non-defective", "Non-Defective", "healthy", "", "defect"] {
            assert_eq!(
                Classification::from_result(&result_with_status(Some(s))),
                Classification::NonDefective,
            );
        }
    }

    #[test]
    fn test_classification_absent_status_is_non_defective() {
        assert_eq!(
            Classification::from_result(&result_with_status(None)),
            Classification::NonDefective,
        );
    }

    #[test]
    fn test_analysis_result_preserves_unrecognized_fields() {
        let json = r#"{
            "status": "Defective",
            "confidence": "99.99%",
            "defect_locations": [{"x": 30, "y": 40}, {"x": 70, "y": 60}],
            "scan_saved": true
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status.as_deref(), Some("Defective"));
        assert_eq!(result.defect_locations.len(), 2);
        assert_eq!(result.defect_locations[0], DefectLocation { x: 30.0, y: 40.0 });
        assert_eq!(result.extra["confidence"], "99.99%");
        assert_eq!(result.extra["scan_saved"], true);
    }

    #[test]
    fn test_analysis_result_decodes_empty_object() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert!(result.status.is_none());
        assert!(result.defect_locations.is_empty());
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_fixed_confidence_string() {
        assert_eq!(FIXED_CONFIDENCE, "Accuracy: 99.99%");
    }
}
