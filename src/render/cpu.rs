use crate::{
    foundation::core::{BezPath, Canvas, Point, Rgb8},
    foundation::error::{InkError, InkResult},
    render::backend::{FrameRGBA, StrokeSink},
};

/// Supersampled raster sink powered by `vello_cpu`.
///
/// The render context lives only between `begin` and `finish`; each sample gets a fresh canvas.
#[derive(Default)]
pub struct CpuSink {
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuSink {
    /// Create an idle sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn surface_mut(&mut self) -> InkResult<&mut CpuSurface> {
        self.surface
            .as_mut()
            .ok_or_else(|| InkError::render("cpu canvas used before begin"))
    }
}

impl StrokeSink for CpuSink {
    type Output = FrameRGBA;

    fn begin(&mut self, canvas: Canvas, background: Rgb8) -> InkResult<()> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| InkError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| InkError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(color_to_cpu(background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        self.surface = Some(CpuSurface { width, height, ctx });
        Ok(())
    }

    fn stroke(&mut self, path: &BezPath, width: f64, ink: Rgb8) -> InkResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(InkError::render(format!("invalid stroke width {width}")));
        }
        let surface = self.surface_mut()?;
        surface.ctx.set_paint(color_to_cpu(ink));
        surface.ctx.set_stroke(round_stroke(width));
        surface.ctx.stroke_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn finish(&mut self) -> InkResult<FrameRGBA> {
        let mut surface = self
            .surface
            .take()
            .ok_or_else(|| InkError::render("cpu canvas finished before begin"))?;

        surface.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(surface.width, surface.height);
        surface.ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(surface.width),
            height: u32::from(surface.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn round_stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_caps(vello_cpu::kurbo::Cap::Round)
        .with_join(vello_cpu::kurbo::Join::Round)
}

fn color_to_cpu(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
