//! Dark cavity detection.
//!
//! Deep gullies photograph as large low-intensity regions. An inverted
//! binary threshold flags every pixel below the cutoff as dark; the ratio of
//! dark pixels is the strongest single cue for severe erosion.

use crate::preprocess::GrayView;

/// Intensities below this count as dark.
pub const DARK_CUTOFF: u8 = 60;

pub fn darkness_ratio(gray: &GrayView) -> f64 {
    let dark = gray.pixels.iter().filter(|&&p| p < DARK_CUTOFF).count();
    dark as f64 / gray.pixels.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_of(pixels: Vec<u8>) -> GrayView {
        GrayView {
            width: pixels.len() as u32,
            height: 1,
            pixels,
        }
    }

    #[test]
    fn fully_dark_scene() {
        assert_eq!(darkness_ratio(&gray_of(vec![30; 100])), 1.0);
    }

    #[test]
    fn bright_scene() {
        assert_eq!(darkness_ratio(&gray_of(vec![200; 100])), 0.0);
    }

    #[test]
    fn cutoff_is_exclusive() {
        // 59 is dark, 60 is not.
        let gray = gray_of(vec![59, 59, 60, 60]);
        assert_eq!(darkness_ratio(&gray), 0.5);
    }
}
