//! Edge and texture density.
//!
//! Canny edge detection over the grayscale view: Sobel 3x3 gradients, L1
//! magnitude, non-maximum suppression along the quantized gradient
//! direction, then dual-threshold hysteresis. Rough, heavily channeled soil
//! produces a dense edge map; smooth sheet-eroded soil produces almost none.

use crate::preprocess::GrayView;

// tan(22.5 deg) and tan(67.5 deg), the sector boundaries for suppression.
const TAN_22_5: f32 = 0.414_213_56;
const TAN_67_5: f32 = 2.414_213_6;

/// Binary edge mask at the canonical resolution, row-major.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<bool>,
}

impl EdgeMap {
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Fraction of pixels flagged as edges.
    pub fn density(&self) -> f64 {
        let edges = self.pixels.iter().filter(|&&e| e).count();
        edges as f64 / self.pixels.len() as f64
    }
}

/// Canny edge detection with hysteresis thresholds `low` and `high`.
pub fn canny(gray: &GrayView, low: f32, high: f32) -> EdgeMap {
    let w = gray.width as usize;
    let h = gray.height as usize;

    // Sobel gradients with replicated borders.
    let sample = |x: isize, y: isize| -> f32 {
        let x = x.clamp(0, w as isize - 1) as usize;
        let y = y.clamp(0, h as isize - 1) as usize;
        f32::from(gray.pixels[y * w + x])
    };
    let mut gx = vec![0f32; w * h];
    let mut gy = vec![0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let (xi, yi) = (x as isize, y as isize);
            let tl = sample(xi - 1, yi - 1);
            let tc = sample(xi, yi - 1);
            let tr = sample(xi + 1, yi - 1);
            let ml = sample(xi - 1, yi);
            let mr = sample(xi + 1, yi);
            let bl = sample(xi - 1, yi + 1);
            let bc = sample(xi, yi + 1);
            let br = sample(xi + 1, yi + 1);
            gx[y * w + x] = (tr + 2.0 * mr + br) - (tl + 2.0 * ml + bl);
            gy[y * w + x] = (bl + 2.0 * bc + br) - (tl + 2.0 * tc + tr);
        }
    }

    let mag: Vec<f32> = gx
        .iter()
        .zip(&gy)
        .map(|(x, y)| x.abs() + y.abs())
        .collect();

    // Non-maximum suppression: keep a pixel only if it dominates both
    // neighbors along its gradient direction. 0 = suppressed, 1 = weak,
    // 2 = strong.
    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0.0
        } else {
            mag[y as usize * w + x as usize]
        }
    };
    let mut state = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let m = mag[idx];
            if m < low {
                continue;
            }
            let (dx, dy) = gradient_sector(gx[idx], gy[idx]);
            let (xi, yi) = (x as isize, y as isize);
            if m >= mag_at(xi + dx, yi + dy) && m >= mag_at(xi - dx, yi - dy) {
                state[idx] = if m >= high { 2 } else { 1 };
            }
        }
    }

    // Hysteresis: weak pixels survive only when connected to a strong one.
    let mut edges = vec![false; w * h];
    let mut stack: Vec<usize> = state
        .iter()
        .enumerate()
        .filter(|(_, &s)| s == 2)
        .map(|(idx, _)| idx)
        .collect();
    for &idx in &stack {
        edges[idx] = true;
    }
    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % w) as isize, (idx / w) as isize);
        for ny in (y - 1)..=(y + 1) {
            for nx in (x - 1)..=(x + 1) {
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if state[nidx] > 0 && !edges[nidx] {
                    edges[nidx] = true;
                    stack.push(nidx);
                }
            }
        }
    }

    EdgeMap {
        width: gray.width,
        height: gray.height,
        pixels: edges,
    }
}

/// Step offsets toward the two neighbors along the gradient direction,
/// quantized to 45 degree sectors.
fn gradient_sector(gx: f32, gy: f32) -> (isize, isize) {
    let ax = gx.abs();
    let ay = gy.abs();
    if ay <= TAN_22_5 * ax {
        (1, 0)
    } else if ay >= TAN_67_5 * ax {
        (0, 1)
    } else if gx * gy > 0.0 {
        (1, 1)
    } else {
        (1, -1)
    }
}
