use crate::config::{Normalization, RenderConfig, WidthPolicy};
use crate::foundation::core::{BezPath, Canvas, CubicBez, Point, Rgb8};
use crate::foundation::error::InkResult;
use crate::geometry::mapping::{bounding_box, fit_transform};
use crate::geometry::resample::densify;
use crate::geometry::spline::{catmull_rom_to_bezier, segments_to_path};
use crate::sample::model::{Sample, StrokePoint};

/// Widths never go below one canvas pixel.
pub const MIN_STROKE_WIDTH: f64 = 1.0;

/// Fraction of a stroke's segments that ramp up (and down) under the tapered policy.
const TAPER_FRACTION: f64 = 0.2;
/// Floor of the taper factor at the very ends of a stroke.
const TAPER_FLOOR: f64 = 0.2;

/// One stroke call: an open path in canvas coordinates and its line width.
///
/// Caps and joins are always round; color comes from the owning [`DrawPlan`].
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeOp {
    /// Index of the source stroke in [`Sample::strokes`].
    pub stroke_index: usize,
    /// Path to stroke, starting with a `MoveTo`.
    pub path: BezPath,
    /// Line width in canvas pixels.
    pub width: f64,
}

/// Backend-agnostic drawing instructions for one sample.
///
/// Both the raster and the vector sinks execute the same plan, so their geometry is identical by
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawPlan {
    /// Working canvas the paths are expressed in.
    pub canvas: Canvas,
    /// Fill painted once before any stroke.
    pub background: Rgb8,
    /// Color of every stroke.
    pub ink: Rgb8,
    /// Stroke calls in drawing order; later ops paint over earlier ones.
    pub ops: Vec<StrokeOp>,
}

/// Compile a sample into a [`DrawPlan`] on the config's working canvas.
///
/// Per stroke: resample, map into the padded canvas, fit a Catmull-Rom chain, then emit stroke
/// ops according to the width policy. Strokes with fewer than two points are skipped.
#[tracing::instrument(skip(sample, cfg), fields(label = %sample.label, strokes = sample.strokes.len()))]
pub fn compile_sample(sample: &Sample, cfg: &RenderConfig) -> InkResult<DrawPlan> {
    cfg.validate()?;
    let canvas = cfg.canvas()?;

    let mut resampled: Vec<(usize, Vec<StrokePoint>)> = Vec::with_capacity(sample.strokes.len());
    for (index, stroke) in sample.strokes.iter().enumerate() {
        if !stroke.is_renderable() {
            tracing::debug!(
                index,
                id = %stroke.id,
                points = stroke.points.len(),
                "skipping degenerate stroke"
            );
            continue;
        }
        resampled.push((index, densify(&stroke.points, cfg.resample_count)));
    }

    let sample_fit = match cfg.normalization {
        Normalization::PerStroke => None,
        Normalization::PerSample => {
            let all: Vec<Point> = resampled
                .iter()
                .flat_map(|(_, pts)| pts.iter().map(StrokePoint::pos))
                .collect();
            bounding_box(&all).map(|bbox| fit_transform(bbox, canvas, cfg.padding))
        }
    };

    let mut ops = Vec::new();
    for (stroke_index, points) in &resampled {
        let positions: Vec<Point> = points.iter().map(StrokePoint::pos).collect();
        let xf = match sample_fit {
            Some(xf) => xf,
            None => match bounding_box(&positions) {
                Some(bbox) => fit_transform(bbox, canvas, cfg.padding),
                None => continue,
            },
        };
        let mapped: Vec<Point> = positions.iter().map(|p| xf * *p).collect();
        let segments = catmull_rom_to_bezier(&mapped);

        match cfg.width_policy {
            WidthPolicy::Uniform => ops.push(StrokeOp {
                stroke_index: *stroke_index,
                path: segments_to_path(&segments),
                width: uniform_width(cfg.base_width, points),
            }),
            WidthPolicy::Tapered => {
                ops.extend(tapered_ops(*stroke_index, cfg.base_width, points, &segments))
            }
        }
    }

    tracing::debug!(renderable = resampled.len(), ops = ops.len(), "compiled draw plan");

    Ok(DrawPlan {
        canvas,
        background: cfg.background_rgb,
        ink: cfg.ink_rgb,
        ops,
    })
}

/// `max(1, base_width * mean pressure)` over the (resampled) points of a stroke.
pub fn uniform_width(base_width: f64, points: &[StrokePoint]) -> f64 {
    if points.is_empty() {
        return MIN_STROKE_WIDTH;
    }
    let mean = points.iter().map(|p| p.pressure).sum::<f64>() / points.len() as f64;
    (base_width * mean).max(MIN_STROKE_WIDTH)
}

/// End taper for segment `index` of `count`: ramps over the first and last 20% of a stroke.
pub fn taper_factor(index: usize, count: usize) -> f64 {
    let i = index as f64;
    let n = count as f64;
    let ramp = n * TAPER_FRACTION;
    let t = if i < ramp {
        i / ramp
    } else if i > n - ramp {
        (n - i) / ramp
    } else {
        1.0
    };
    t.clamp(TAPER_FLOOR, 1.0)
}

fn tapered_ops(
    stroke_index: usize,
    base_width: f64,
    points: &[StrokePoint],
    segments: &[CubicBez],
) -> Vec<StrokeOp> {
    let n = segments.len();
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let pressure = (points[i].pressure + points[i + 1].pressure) / 2.0;
            let mut path = BezPath::new();
            path.move_to(seg.p0);
            path.curve_to(seg.p1, seg.p2, seg.p3);
            StrokeOp {
                stroke_index,
                path,
                width: (base_width * pressure * taper_factor(i, n)).max(MIN_STROKE_WIDTH),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
