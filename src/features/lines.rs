//! Linear drainage detection.
//!
//! Progressive probabilistic Hough transform over the edge map. Each edge
//! point votes into a rho/theta accumulator; once a bin crosses the
//! accumulator threshold, the corresponding line is walked pixel by pixel
//! (tolerating small gaps) and the traversed segment is kept when it is long
//! enough. Consumed pixels are removed from the mask and their votes
//! retracted so the same rill is not counted twice.
//!
//! Points are consumed in a fixed pseudo-random order instead of a true
//! random one: the pipeline guarantees identical output for identical input,
//! so the shuffle seed is a constant.

use crate::features::edges::EdgeMap;

/// Minimum accumulator votes before a line candidate is traced.
pub const ACCUM_THRESHOLD: i32 = 50;
/// Minimum axis-aligned extent for a traced segment to count.
pub const MIN_SEGMENT_LEN: i32 = 40;
/// Maximum run of non-edge pixels tolerated while tracing.
pub const MAX_GAP: u32 = 10;

const NUM_ANGLES: usize = 180;
const SHUFFLE_SEED: u64 = 0x5eed_50f7_11e5_c0de;

/// A detected line segment in canonical-view pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Detect line segments in the edge map.
pub fn detect_segments(
    edges: &EdgeMap,
    threshold: i32,
    min_len: i32,
    max_gap: u32,
) -> Vec<LineSegment> {
    let w = edges.width as i32;
    let h = edges.height as i32;
    let mut mask = edges.pixels.clone();

    let mut points: Vec<(i32, i32)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if mask[(y * w + x) as usize] {
                points.push((x, y));
            }
        }
    }
    if points.is_empty() {
        return Vec::new();
    }
    shuffle(&mut points);

    // Accumulator over 1 degree angle steps and 1 pixel rho steps,
    // rho in -(w + h) ..= (w + h).
    let max_rho = w + h;
    let rho_span = (2 * max_rho + 1) as usize;
    let mut accum = vec![0i32; NUM_ANGLES * rho_span];
    let trig: Vec<(f32, f32)> = (0..NUM_ANGLES)
        .map(|n| {
            let angle = n as f32 * std::f32::consts::PI / NUM_ANGLES as f32;
            (angle.cos(), angle.sin())
        })
        .collect();
    let bin_of = |n: usize, x: i32, y: i32| -> usize {
        let (cos, sin) = trig[n];
        let rho = (x as f32 * cos + y as f32 * sin).round() as i32 + max_rho;
        n * rho_span + rho as usize
    };

    let mut segments = Vec::new();
    for &(x, y) in &points {
        if !mask[(y * w + x) as usize] {
            continue; // consumed by an earlier segment
        }

        // Vote, tracking the best bin this point lands in.
        let mut best_n = 0usize;
        let mut best_votes = 0i32;
        for n in 0..NUM_ANGLES {
            let bin = bin_of(n, x, y);
            accum[bin] += 1;
            if accum[bin] > best_votes {
                best_votes = accum[bin];
                best_n = n;
            }
        }
        if best_votes < threshold {
            continue;
        }

        // Walk the line through the mask in both directions, stepping one
        // pixel along the dominant axis.
        let (cos, sin) = trig[best_n];
        let (dx, dy) = (-sin, cos);
        let (sx, sy) = if dx.abs() >= dy.abs() {
            (dx.signum(), dy / dx.abs())
        } else {
            (dx / dy.abs(), dy.signum())
        };

        let mut ends = [(x, y); 2];
        for (k, dir) in [1.0f32, -1.0].into_iter().enumerate() {
            let (mut fx, mut fy) = (x as f32, y as f32);
            let mut gap = 0u32;
            loop {
                fx += sx * dir;
                fy += sy * dir;
                let (ix, iy) = (fx.round() as i32, fy.round() as i32);
                if ix < 0 || iy < 0 || ix >= w || iy >= h {
                    break;
                }
                if mask[(iy * w + ix) as usize] {
                    gap = 0;
                    ends[k] = (ix, iy);
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
            }
        }

        let [(x1, y1), (x2, y2)] = ends;
        let good = (x2 - x1).abs() >= min_len || (y2 - y1).abs() >= min_len;

        // Second pass: release every mask pixel on the traversed span and,
        // for an accepted segment, retract its accumulator votes.
        let mut release = |ix: i32, iy: i32| {
            let idx = (iy * w + ix) as usize;
            if mask[idx] {
                mask[idx] = false;
                if good {
                    for n in 0..NUM_ANGLES {
                        accum[bin_of(n, ix, iy)] -= 1;
                    }
                }
            }
        };
        release(x, y);
        for (k, dir) in [1.0f32, -1.0].into_iter().enumerate() {
            let (mut fx, mut fy) = (x as f32, y as f32);
            loop {
                if (fx.round() as i32, fy.round() as i32) == ends[k] {
                    break;
                }
                fx += sx * dir;
                fy += sy * dir;
                let (ix, iy) = (fx.round() as i32, fy.round() as i32);
                if ix < 0 || iy < 0 || ix >= w || iy >= h {
                    break;
                }
                release(ix, iy);
            }
        }

        if good {
            segments.push(LineSegment { x1, y1, x2, y2 });
        }
    }

    segments
}

/// Fisher-Yates with a fixed-seed splitmix-style generator.
fn shuffle(points: &mut [(i32, i32)]) {
    let mut state = SHUFFLE_SEED;
    let mut next = |bound: usize| -> usize {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) as usize) % bound
    };
    for i in (1..points.len()).rev() {
        points.swap(i, next(i + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_map(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> EdgeMap {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        EdgeMap {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn empty_map_yields_no_segments() {
        let edges = edge_map(100, 100, |_, _| false);
        assert!(detect_segments(&edges, ACCUM_THRESHOLD, MIN_SEGMENT_LEN, MAX_GAP).is_empty());
    }

    #[test]
    fn long_horizontal_line_yields_one_segment() {
        let edges = edge_map(100, 100, |x, y| y == 50 && (10..90).contains(&x));
        let segments = detect_segments(&edges, ACCUM_THRESHOLD, MIN_SEGMENT_LEN, MAX_GAP);
        assert_eq!(segments.len(), 1);
        let seg = segments[0];
        assert_eq!(seg.y1, 50);
        assert_eq!(seg.y2, 50);
        assert!((seg.x2 - seg.x1).abs() >= MIN_SEGMENT_LEN);
    }

    #[test]
    fn diagonal_line_yields_one_segment() {
        let edges = edge_map(100, 100, |x, y| x == y && (10..90).contains(&x));
        let segments = detect_segments(&edges, ACCUM_THRESHOLD, MIN_SEGMENT_LEN, MAX_GAP);
        assert_eq!(segments.len(), 1);
        let seg = segments[0];
        assert!((seg.x2 - seg.x1).abs() >= MIN_SEGMENT_LEN);
        assert!((seg.y2 - seg.y1).abs() >= MIN_SEGMENT_LEN);
    }

    #[test]
    fn short_line_gathers_too_few_votes() {
        let edges = edge_map(100, 100, |x, y| y == 50 && (40..60).contains(&x));
        assert!(detect_segments(&edges, ACCUM_THRESHOLD, MIN_SEGMENT_LEN, MAX_GAP).is_empty());
    }

    #[test]
    fn detection_is_deterministic() {
        let edges = edge_map(100, 100, |x, y| {
            (y == 30 && (5..95).contains(&x)) || (x == 70 && (10..95).contains(&y))
        });
        let a = detect_segments(&edges, ACCUM_THRESHOLD, MIN_SEGMENT_LEN, MAX_GAP);
        let b = detect_segments(&edges, ACCUM_THRESHOLD, MIN_SEGMENT_LEN, MAX_GAP);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}
