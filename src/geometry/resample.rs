use crate::sample::model::StrokePoint;

/// Resample `points` to exactly `count` points, evenly spaced in *index* space.
///
/// Input index `0..n-1` maps linearly onto output index `0..count-1` and x/y are linearly
/// interpolated between neighbours. This is not arc-length resampling: dense runs of input points
/// stay dense.
///
/// Pressure, timestamp and pen state of every output point are copied from the first input point.
///
/// Sequences with fewer than two points (or a `count` below two) are returned unchanged.
pub fn densify(points: &[StrokePoint], count: usize) -> Vec<StrokePoint> {
    let n = points.len();
    if n < 2 || count < 2 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[n - 1];
    let last_segment = n - 2;
    let step = (n - 1) as f64 / (count - 1) as f64;

    (0..count)
        .map(|j| {
            if j == count - 1 {
                return StrokePoint {
                    x: last.x,
                    y: last.y,
                    ..first
                };
            }
            let u = j as f64 * step;
            let i = (u.floor() as usize).min(last_segment);
            let frac = (u - i as f64).clamp(0.0, 1.0);
            let (a, b) = (points[i], points[i + 1]);
            StrokePoint {
                x: a.x + (b.x - a.x) * frac,
                y: a.y + (b.y - a.y) * frac,
                ..first
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resample.rs"]
mod tests;
