//! Severity rules and result assembly.
//!
//! An ordered rule list evaluated top to bottom, first match wins. The
//! thresholds below are a literal contract: changing any of them changes
//! the classifier. Confidence is clamped into [0, 1] before the result is
//! assembled.

use std::fmt;

use serde::Serialize;

use crate::features::{FeatureSet, SoilAnalysis};

const VEG_NONE_MIN: f64 = 0.4;
const DARK_SEVERE_MIN: f64 = 0.12;
const EDGE_SEVERE_MIN: f64 = 0.12;
const LINES_SEVERE_MIN: u32 = 12;
const LINES_MODERATE_MIN: u32 = 4;
const DARK_MODERATE_MIN: f64 = 0.03;

/// Erosion severity, ordered Slight < Moderate < Severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    None,
    Slight,
    Moderate,
    Severe,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Slight => "Slight (Sheet)",
            Severity::Moderate => "Moderate (Rill)",
            Severity::Severe => "Severe (Gully)",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The metric subset surfaced alongside every classification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErosionMetrics {
    pub vegetation: f64,
    pub edge_density: f64,
    pub line_count: u32,
    pub darkness: f64,
}

/// Final output record for one photograph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub prediction: Severity,
    pub confidence: f64,
    pub soil_type: &'static str,
    pub soil_color: &'static str,
    pub metrics: ErosionMetrics,
    /// Ordered reasoning strings. Currently always length one, kept as a
    /// sequence so additional cues can be appended without breaking callers.
    pub reasoning: Vec<String>,
}

/// Evaluate the severity rules and assemble the output record.
pub fn classify(features: &FeatureSet, soil: &SoilAnalysis) -> ClassificationResult {
    let (prediction, confidence, reason) = if features.vegetation_ratio > VEG_NONE_MIN {
        (
            Severity::None,
            0.8 + features.vegetation_ratio * 0.2,
            format!(
                "High vegetation coverage ({:.1}%)",
                features.vegetation_ratio * 100.0
            ),
        )
    } else if features.darkness_ratio > DARK_SEVERE_MIN
        || (features.edge_density > EDGE_SEVERE_MIN && features.line_count > LINES_SEVERE_MIN)
    {
        (
            Severity::Severe,
            0.7 + features.darkness_ratio * 0.3,
            format!(
                "Significant deep shadows/voids ({:.1}%) or high ruggedness",
                features.darkness_ratio * 100.0
            ),
        )
    } else if features.line_count > LINES_MODERATE_MIN
        || features.darkness_ratio > DARK_MODERATE_MIN
    {
        (
            Severity::Moderate,
            0.6 + f64::from(features.line_count) * 0.01,
            "Visible linear drainage patterns or surface irregularities".to_string(),
        )
    } else {
        (
            Severity::Slight,
            0.6,
            "Minimal vegetation with uniform soil surface texture".to_string(),
        )
    };

    ClassificationResult {
        prediction,
        confidence: confidence.clamp(0.0, 1.0),
        soil_type: soil.color.soil_type(),
        soil_color: soil.color.label(),
        metrics: ErosionMetrics {
            vegetation: features.vegetation_ratio,
            edge_density: features.edge_density,
            line_count: features.line_count,
            darkness: features.darkness_ratio,
        },
        reasoning: vec![reason],
    }
}
