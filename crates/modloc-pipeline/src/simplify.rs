//! Polygon simplification using the Ramer-Douglas-Peucker algorithm.
//!
//! Operates on integer pixel contours. Open curves keep both endpoints.
//! Closed curves are split at the point farthest from the first point and
//! each half is simplified on its own, so a closed square traced from a
//! corner collapses to its four corners.

use imageproc::point::Point;

/// Simplify `points` so that no removed point lies farther than
/// `epsilon` from the simplified polyline.
///
/// Curves with fewer than 3 points, and non-positive tolerances, are
/// returned unchanged.
#[must_use = "returns the simplified points"]
pub fn simplify(points: &[Point<i32>], epsilon: f64, closed: bool) -> Vec<Point<i32>> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let mut kept = vec![false; points.len()];
    kept[0] = true;

    if closed {
        let first = points[0];
        let split = farthest_from(points, first);
        kept[split] = true;
        rdp_recurse(points, 0, split, epsilon, &mut kept);

        // Second half runs from the split point back around to the start.
        let mut tail: Vec<Point<i32>> = points[split..].to_vec();
        tail.push(first);
        let mut tail_kept = vec![false; tail.len()];
        let last = tail.len() - 1;
        rdp_recurse(&tail, 0, last, epsilon, &mut tail_kept);
        for (i, k) in tail_kept.into_iter().enumerate().take(last) {
            kept[split + i] |= k;
        }
    } else {
        let last = points.len() - 1;
        kept[last] = true;
        rdp_recurse(points, 0, last, epsilon, &mut kept);
    }

    points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect()
}

/// Index of the point farthest from `origin`; 0 if all coincide.
fn farthest_from(points: &[Point<i32>], origin: Point<i32>) -> usize {
    let mut best = 0;
    let mut best_dist = 0.0;
    for (i, &p) in points.iter().enumerate() {
        let d = distance(p, origin);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Recursive step of the Ramer-Douglas-Peucker algorithm.
///
/// Finds the point between `start` and `end` that is farthest from the
/// line segment between them. If that distance exceeds `epsilon`, the
/// point is kept and both sub-segments are processed recursively.
fn rdp_recurse(points: &[Point<i32>], start: usize, end: usize, epsilon: f64, kept: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;

    for i in (start + 1)..end {
        let d = perpendicular_distance(points[i], points[start], points[end]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        kept[max_idx] = true;
        rdp_recurse(points, start, max_idx, epsilon, kept);
        rdp_recurse(points, max_idx, end, epsilon, kept);
    }
}

fn distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    dx.hypot(dy)
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
///
/// When `a` and `b` coincide, returns the distance from `p` to `a`.
fn perpendicular_distance(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    let length = dx.hypot(dy);

    if length == 0.0 {
        return distance(p, a);
    }

    let cross = dx.mul_add(f64::from(a.y - p.y), -(dy * f64::from(a.x - p.x)));
    cross.abs() / length
}
