use crate::{
    compile::plan::DrawPlan,
    foundation::core::{BezPath, Canvas, Rgb8},
    foundation::error::InkResult,
};

/// A rendered canvas as RGBA8 pixels.
///
/// Canvases are **premultiplied alpha**. With the opaque background every sample is painted on,
/// alpha is 255 everywhere and the color channels equal straight RGB.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// An output target that accepts stroke calls.
///
/// Call order contract: `begin` once, then `stroke` any number of times in drawing order, then
/// `finish` once. Later strokes paint over earlier ones.
pub trait StrokeSink {
    /// Artifact produced by [`StrokeSink::finish`].
    type Output;

    /// Allocate the surface and paint the background.
    fn begin(&mut self, canvas: Canvas, background: Rgb8) -> InkResult<()>;

    /// Stroke one open path with round caps and joins.
    fn stroke(&mut self, path: &BezPath, width: f64, ink: Rgb8) -> InkResult<()>;

    /// Finalize the surface and hand back the artifact.
    fn finish(&mut self) -> InkResult<Self::Output>;
}

/// Drive a sink through a compiled [`DrawPlan`].
pub fn execute_plan<S: StrokeSink + ?Sized>(sink: &mut S, plan: &DrawPlan) -> InkResult<S::Output> {
    sink.begin(plan.canvas, plan.background)?;
    for op in &plan.ops {
        sink.stroke(&op.path, op.width, plan.ink)?;
    }
    sink.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
