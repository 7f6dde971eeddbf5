use crate::foundation::core::{BezPath, CubicBez, Point};

/// Fit a Catmull-Rom chain through `points` and return it as cubic Bézier segments.
///
/// The chain is extended with reflected phantom points at both ends (`2*p[0] - p[1]` and
/// `2*p[m-1] - p[m-2]`), so the curve passes through every input point and `m` points yield
/// exactly `m - 1` segments. Fewer than two points yield no segments.
pub fn catmull_rom_to_bezier(points: &[Point]) -> Vec<CubicBez> {
    let m = points.len();
    if m < 2 {
        return Vec::new();
    }

    let phantom_start = reflect(points[0], points[1]);
    let phantom_end = reflect(points[m - 1], points[m - 2]);

    (0..m - 1)
        .map(|i| {
            let p0 = if i == 0 { phantom_start } else { points[i - 1] };
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = if i + 2 < m { points[i + 2] } else { phantom_end };

            let c1 = p1 + (p2 - p0) / 6.0;
            let c2 = p2 - (p3 - p1) / 6.0;
            CubicBez::new(p1, c1, c2, p2)
        })
        .collect()
}

/// Join consecutive segments into one open path starting at the first segment's start.
pub fn segments_to_path(segments: &[CubicBez]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = segments.first() else {
        return path;
    };
    path.move_to(first.p0);
    for seg in segments {
        path.curve_to(seg.p1, seg.p2, seg.p3);
    }
    path
}

fn reflect(anchor: Point, neighbour: Point) -> Point {
    Point::new(2.0 * anchor.x - neighbour.x, 2.0 * anchor.y - neighbour.y)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/spline.rs"]
mod tests;
