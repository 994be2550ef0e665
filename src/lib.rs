//! Soil erosion severity classification from a single photograph.
//!
//! The classifier is a fixed set of hand-crafted image-feature heuristics
//! combined through a small decision tree. There is no model, no training,
//! and no state between calls.
//!
//! # Pipeline
//!
//! Data flows strictly forward through five stages:
//!
//! 1. `loader` reads and decodes the photograph
//! 2. `preprocess` resizes to the canonical 500x500 resolution and derives
//!    HSV and grayscale views
//! 3. `features` computes five independent measurements from the views
//! 4. `classify` evaluates an ordered severity rule list against the
//!    features
//! 5. the result record carries the label, clamped confidence, soil
//!    analysis, raw metrics, and human-readable reasoning
//!
//! Every threshold is a fixed constant embedded next to the rule it feeds;
//! classifying the same photograph twice yields identical results.

use std::path::Path;

use anyhow::Result;

pub mod classify;
pub mod features;
pub mod loader;
pub mod preprocess;

pub use classify::{ClassificationResult, ErosionMetrics, Severity};
pub use features::{FeatureSet, SoilAnalysis, SoilColor};
pub use loader::LoadError;
pub use preprocess::{CanonicalViews, CANONICAL_HEIGHT, CANONICAL_WIDTH};

/// Run the full pipeline on the photograph at `path`.
pub fn classify_image(path: &Path) -> Result<ClassificationResult> {
    let decoded = loader::load(path)?;
    let views = preprocess::prepare(&decoded);
    let (features, soil) = features::extract(&views);
    let result = classify::classify(&features, &soil);
    log::debug!(
        "classified {} as {} (confidence {:.2})",
        path.display(),
        result.prediction,
        result.confidence
    );
    Ok(result)
}
