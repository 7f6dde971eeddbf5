use crate::foundation::core::{Affine, Canvas, Point, Rect};

/// Added to bounding-box extents so zero-width or zero-height input never divides by zero.
pub const FIT_EPSILON: f64 = 1e-5;

/// Axis-aligned bounding box of `points`, or `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let init = Rect::from_points(*first, *first);
    Some(points[1..].iter().fold(init, |r, p| r.union_pt(*p)))
}

/// Uniform scale-then-translate transform fitting `bbox` into `canvas` with `padding` on every
/// side.
///
/// The scale is the smaller of the two per-axis factors, so aspect ratio is preserved and the
/// larger axis fills `size * (1 - 2 * padding)`. The box's minimum corner lands on
/// `(width * padding, height * padding)`.
pub fn fit_transform(bbox: Rect, canvas: Canvas, padding: f64) -> Affine {
    let (w, h) = canvas.size_f64();
    let scale = f64::min(
        (w * (1.0 - 2.0 * padding)) / (bbox.width() + FIT_EPSILON),
        (h * (1.0 - 2.0 * padding)) / (bbox.height() + FIT_EPSILON),
    );
    let offset_x = w * padding - bbox.x0 * scale;
    let offset_y = h * padding - bbox.y0 * scale;
    Affine::new([scale, 0.0, 0.0, scale, offset_x, offset_y])
}

/// Fit `points` into the padded canvas using their own bounding box.
pub fn scale_points(points: &[Point], canvas: Canvas, padding: f64) -> Vec<Point> {
    let Some(bbox) = bounding_box(points) else {
        return Vec::new();
    };
    let xf = fit_transform(bbox, canvas, padding);
    points.iter().map(|p| xf * *p).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mapping.rs"]
mod tests;
