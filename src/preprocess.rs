//! Canonical views.
//!
//! Every photograph is resized to a fixed 500x500 resolution before feature
//! extraction so that ratio-based features are comparable across inputs. Two
//! views are derived from the resized pixels:
//!
//! - an HSV view on the 8-bit scale (hue 0..=180, saturation/value 0..=255)
//!   that every hue and saturation threshold in this crate is calibrated
//!   against
//! - a single-channel grayscale view using BT.601 luma weights
//!
//! Preparation is deterministic and side-effect free; the views are never
//! mutated after this stage.

use image::imageops::FilterType;
use image::DynamicImage;

pub const CANONICAL_WIDTH: u32 = 500;
pub const CANONICAL_HEIGHT: u32 = 500;

/// HSV pixels at the canonical resolution.
///
/// Hue is stored as degrees halved (0..=180) so it fits in a byte;
/// saturation and value span the full 0..=255 range.
#[derive(Clone, Debug)]
pub struct HsvImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

/// Grayscale intensities at the canonical resolution, row-major.
#[derive(Clone, Debug)]
pub struct GrayView {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GrayView {
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Both derived views of a single photograph.
#[derive(Clone, Debug)]
pub struct CanonicalViews {
    pub hsv: HsvImage,
    pub gray: GrayView,
}

/// Resize to the canonical resolution and derive the HSV and grayscale views.
pub fn prepare(image: &DynamicImage) -> CanonicalViews {
    let resized = image.resize_exact(CANONICAL_WIDTH, CANONICAL_HEIGHT, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let total = (CANONICAL_WIDTH * CANONICAL_HEIGHT) as usize;
    let mut hsv = Vec::with_capacity(total);
    let mut gray = Vec::with_capacity(total);
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        hsv.push(rgb_to_hsv(r, g, b));
        gray.push(rgb_to_gray(r, g, b));
    }

    CanonicalViews {
        hsv: HsvImage {
            width: CANONICAL_WIDTH,
            height: CANONICAL_HEIGHT,
            pixels: hsv,
        },
        gray: GrayView {
            width: CANONICAL_WIDTH,
            height: CANONICAL_HEIGHT,
            pixels: gray,
        },
    }
}

/// 8-bit HSV with hue halved into 0..=180.
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * delta / v };

    let h = if delta == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / delta
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    [(h / 2.0).round() as u8, s.round() as u8, v.round() as u8]
}

/// BT.601 luma, rounded.
fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)).round() as u8
}
