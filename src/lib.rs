//! inkraster turns recorded pen strokes into fixed-size training images.
//!
//! A [`Sample`] (a labelled list of strokes) goes through one linear pipeline:
//!
//! - resample every stroke to a fixed point count ([`densify`])
//! - fit each stroke into the padded working canvas ([`scale_points`])
//! - turn the points into a smooth Catmull-Rom chain of cubic Béziers ([`catmull_rom_to_bezier`])
//! - compile the paths and widths into a backend-agnostic [`DrawPlan`]
//! - stroke the plan on a supersampled CPU canvas, downsample with Lanczos3 and soften with a light
//!   Gaussian blur ([`render_raster`])
//! - optionally stroke the same plan into an SVG document ([`render_vector`])
//!
//! [`render_file`] and [`render_batch`] add file IO on top, writing outputs atomically.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compile;
/// Render configuration.
pub mod config;
pub(crate) mod encode;
pub(crate) mod geometry;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod sample;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, CubicBez, MAX_CANVAS_EDGE, Point, Rect, Rgb8, Vec2,
};
pub use crate::foundation::error::{InkError, InkResult};

pub use crate::compile::plan::{
    DrawPlan, MIN_STROKE_WIDTH, StrokeOp, compile_sample, taper_factor, uniform_width,
};
pub use crate::config::{Normalization, RenderConfig, WidthPolicy};
pub use crate::encode::file::write_atomic;
pub use crate::encode::png::encode_png;
pub use crate::geometry::mapping::{FIT_EPSILON, bounding_box, fit_transform, scale_points};
pub use crate::geometry::resample::densify;
pub use crate::geometry::spline::{catmull_rom_to_bezier, segments_to_path};
pub use crate::pipeline::{
    RenderJob, RenderReport, THREADS_ENV, jobs_for_dir, rasterize_plan, render_batch, render_file,
    render_raster, render_vector,
};
pub use crate::render::backend::{FrameRGBA, StrokeSink, execute_plan};
pub use crate::render::cpu::CpuSink;
pub use crate::render::postprocess::{RenderedImage, downsample};
pub use crate::render::svg::{SvgSink, VectorDocument};
pub use crate::sample::model::{Sample, Stroke, StrokePoint};
