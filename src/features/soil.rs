//! Soil color and type.
//!
//! The dominant soil color is the mean HSV over everything that is not
//! vegetation, classified through an ordered rule list. Rule order matters:
//! a desaturated dark mean is black cotton soil even when its hue would also
//! satisfy the laterite rule, so the black rule is checked first.

use serde::Serialize;

use crate::preprocess::HsvImage;

/// Dominant soil color category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SoilColor {
    Black,
    Red,
    Yellow,
    LightSandy,
    Brown,
}

impl SoilColor {
    pub fn label(self) -> &'static str {
        match self {
            SoilColor::Black => "Black",
            SoilColor::Red => "Red",
            SoilColor::Yellow => "Yellow",
            SoilColor::LightSandy => "Light / Sandy",
            SoilColor::Brown => "Brown",
        }
    }

    pub fn soil_type(self) -> &'static str {
        match self {
            SoilColor::Black => "Black Cotton Soil (Clay)",
            SoilColor::Red => "Laterite / Red Soil",
            SoilColor::Yellow => "Sandy / Desert Soil",
            SoilColor::LightSandy => "Sandy Soil",
            SoilColor::Brown => "Alluvial / Loamy",
        }
    }
}

/// Soil classification plus the masked means it was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SoilAnalysis {
    pub color: SoilColor,
    pub mean_hue: f64,
    pub mean_saturation: f64,
    pub mean_value: f64,
}

/// Mean HSV over non-vegetation pixels, then the ordered color rules.
///
/// When every pixel is vegetation there is no soil evidence at all: the
/// means are reported as zero and the rule cascade is skipped in favor of
/// the loam default, rather than letting a zero mean masquerade as black
/// cotton soil.
pub fn analyze(hsv: &HsvImage, vegetation_mask: &[bool]) -> SoilAnalysis {
    let mut sums = [0u64; 3];
    let mut soil_pixels = 0u64;
    for (pixel, &is_green) in hsv.pixels.iter().zip(vegetation_mask) {
        if is_green {
            continue;
        }
        sums[0] += u64::from(pixel[0]);
        sums[1] += u64::from(pixel[1]);
        sums[2] += u64::from(pixel[2]);
        soil_pixels += 1;
    }

    if soil_pixels == 0 {
        log::warn!("no soil pixels outside the vegetation mask; defaulting soil type");
        return SoilAnalysis {
            color: SoilColor::Brown,
            mean_hue: 0.0,
            mean_saturation: 0.0,
            mean_value: 0.0,
        };
    }

    let mean_hue = sums[0] as f64 / soil_pixels as f64;
    let mean_saturation = sums[1] as f64 / soil_pixels as f64;
    let mean_value = sums[2] as f64 / soil_pixels as f64;
    SoilAnalysis {
        color: classify_means(mean_hue, mean_saturation, mean_value),
        mean_hue,
        mean_saturation,
        mean_value,
    }
}

/// Ordered color rules, first match wins.
pub fn classify_means(h: f64, s: f64, v: f64) -> SoilColor {
    if s < 30.0 && v < 80.0 {
        SoilColor::Black
    } else if (h < 20.0 || h > 160.0) && s > 50.0 {
        SoilColor::Red
    } else if (20.0..=45.0).contains(&h) && s > 50.0 {
        SoilColor::Yellow
    } else if v > 200.0 {
        SoilColor::LightSandy
    } else {
        SoilColor::Brown
    }
}
