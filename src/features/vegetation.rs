//! Vegetation coverage.
//!
//! A pixel counts as vegetation when its hue sits in the green band and both
//! saturation and value clear a low floor; the floor filters out near-gray
//! and near-black pixels that would otherwise pass on hue alone.

use crate::preprocess::HsvImage;

const HUE_MIN: u8 = 35;
const HUE_MAX: u8 = 85;
const SAT_MIN: u8 = 40;
const VAL_MIN: u8 = 40;

/// Per-pixel vegetation mask (row-major, aligned with the HSV view) plus the
/// covered fraction.
#[derive(Clone, Debug)]
pub struct VegetationMask {
    pub mask: Vec<bool>,
    pub ratio: f64,
}

pub fn detect(hsv: &HsvImage) -> VegetationMask {
    let mut mask = Vec::with_capacity(hsv.pixels.len());
    let mut green = 0usize;
    for &[h, s, v] in &hsv.pixels {
        let is_green = (HUE_MIN..=HUE_MAX).contains(&h) && s >= SAT_MIN && v >= VAL_MIN;
        if is_green {
            green += 1;
        }
        mask.push(is_green);
    }
    VegetationMask {
        mask,
        ratio: green as f64 / hsv.pixels.len() as f64,
    }
}
