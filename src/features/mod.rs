//! Feature extraction.
//!
//! Five independent measurements over the canonical views:
//!
//! - `vegetation`: fraction of pixels in the green HSV band
//! - `edges`: Canny edge density (surface roughness)
//! - `lines`: probabilistic Hough segment count (rill channels)
//! - `darkness`: fraction of low-intensity pixels (gully shadows/voids)
//! - `soil`: mean HSV of non-vegetation pixels, mapped to a soil type
//!
//! The measurements never feed back into one another except where the
//! pipeline is explicitly staged: lines are detected on the edge map, and
//! the soil mean excludes the vegetation mask.

pub mod darkness;
pub mod edges;
pub mod lines;
pub mod soil;
pub mod vegetation;

pub use edges::EdgeMap;
pub use lines::LineSegment;
pub use soil::{SoilAnalysis, SoilColor};
pub use vegetation::VegetationMask;

use serde::Serialize;

use crate::preprocess::CanonicalViews;

pub const CANNY_LOW: f32 = 50.0;
pub const CANNY_HIGH: f32 = 150.0;

/// Scalar features of one photograph. Ratios are fractions of the canonical
/// pixel count; soil means are on the HSV scale of the canonical view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureSet {
    pub vegetation_ratio: f64,
    pub edge_density: f64,
    pub line_count: u32,
    pub darkness_ratio: f64,
    pub soil_hue: f64,
    pub soil_saturation: f64,
    pub soil_value: f64,
}

/// Compute every feature for the given views.
pub fn extract(views: &CanonicalViews) -> (FeatureSet, SoilAnalysis) {
    let vegetation = vegetation::detect(&views.hsv);
    let edge_map = edges::canny(&views.gray, CANNY_LOW, CANNY_HIGH);
    let segments = lines::detect_segments(
        &edge_map,
        lines::ACCUM_THRESHOLD,
        lines::MIN_SEGMENT_LEN,
        lines::MAX_GAP,
    );
    let darkness = darkness::darkness_ratio(&views.gray);
    let soil = soil::analyze(&views.hsv, &vegetation.mask);

    let features = FeatureSet {
        vegetation_ratio: vegetation.ratio,
        edge_density: edge_map.density(),
        line_count: segments.len() as u32,
        darkness_ratio: darkness,
        soil_hue: soil.mean_hue,
        soil_saturation: soil.mean_saturation,
        soil_value: soil.mean_value,
    };
    log::debug!(
        "features: vegetation={:.4} edge_density={:.4} lines={} darkness={:.4} soil=({:.1}, {:.1}, {:.1})",
        features.vegetation_ratio,
        features.edge_density,
        features.line_count,
        features.darkness_ratio,
        features.soil_hue,
        features.soil_saturation,
        features.soil_value,
    );

    (features, soil)
}
