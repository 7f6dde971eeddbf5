use std::fmt::Write as _;

use crate::{
    foundation::core::{BezPath, Canvas, Rgb8},
    foundation::error::{InkError, InkResult},
    render::backend::StrokeSink,
};

/// A finished SVG document mirroring the raster draw calls at working-canvas resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorDocument {
    /// Document width in user units (equal to the working canvas).
    pub width: u32,
    /// Document height in user units.
    pub height: u32,
    svg: String,
}

impl VectorDocument {
    /// SVG markup.
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    /// SVG markup as owned bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.svg.into_bytes()
    }
}

/// Resolution-independent sink emitting one `<path>` per stroke call.
#[derive(Default)]
pub struct SvgSink {
    canvas: Option<Canvas>,
    elements: Vec<String>,
}

impl SvgSink {
    /// Create an idle sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrokeSink for SvgSink {
    type Output = VectorDocument;

    fn begin(&mut self, canvas: Canvas, background: Rgb8) -> InkResult<()> {
        self.elements.clear();
        self.elements.push(format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            canvas.width,
            canvas.height,
            background.to_css()
        ));
        self.canvas = Some(canvas);
        Ok(())
    }

    fn stroke(&mut self, path: &BezPath, width: f64, ink: Rgb8) -> InkResult<()> {
        if self.canvas.is_none() {
            return Err(InkError::vector_export("svg surface used before begin"));
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(InkError::vector_export(format!("invalid stroke width {width}")));
        }
        self.elements.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            path.to_svg(),
            ink.to_css(),
            width
        ));
        Ok(())
    }

    fn finish(&mut self) -> InkResult<VectorDocument> {
        let canvas = self
            .canvas
            .take()
            .ok_or_else(|| InkError::vector_export("svg surface finished before begin"))?;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height
        );
        for el in self.elements.drain(..) {
            svg.push_str("  ");
            svg.push_str(&el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");

        usvg::Tree::from_str(&svg, &usvg::Options::default())
            .map_err(|e| InkError::vector_export(format!("generated svg does not parse: {e}")))?;

        Ok(VectorDocument {
            width: canvas.width,
            height: canvas.height,
            svg,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
