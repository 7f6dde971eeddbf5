use crate::foundation::core::{Canvas, MAX_CANVAS_EDGE, Rgb8};
use crate::foundation::error::{InkError, InkResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How stroke width is derived from pressure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthPolicy {
    /// One path per stroke, width `max(1, base_width * mean pressure)`.
    #[default]
    Uniform,
    /// One path per curve segment, width scaled by segment pressure and a 20% end taper.
    Tapered,
}

/// Which point set a coordinate fit is computed over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Every stroke is fitted to the padded canvas on its own.
    #[default]
    PerStroke,
    /// One fit over all renderable strokes, preserving their relative layout.
    PerSample,
}

/// Parameters of a sample render.
///
/// All fields have defaults, so a JSON config file only needs the fields it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Edge length of the supersampled working canvas (and of the SVG document).
    pub canvas_size: u32,
    /// Edge length of the final raster.
    pub output_size: u32,
    /// Number of points each stroke is resampled to.
    pub resample_count: usize,
    /// Fraction of the canvas left empty on each side.
    pub padding: f64,
    /// Stroke width in canvas pixels at pressure 1.
    pub base_width: f64,
    /// Stroke color.
    pub ink_rgb: Rgb8,
    /// Background fill.
    pub background_rgb: Rgb8,
    /// Gaussian sigma of the post-downsample blur, in output pixels. `0` disables it.
    pub blur_sigma: f32,
    /// Stroke width policy.
    pub width_policy: WidthPolicy,
    /// Coordinate fit scope.
    pub normalization: Normalization,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_size: 2048,
            output_size: 256,
            resample_count: 60,
            padding: 0.1,
            base_width: 6.0,
            ink_rgb: Rgb8::BLACK,
            background_rgb: Rgb8::WHITE,
            blur_sigma: 0.3,
            width_policy: WidthPolicy::Uniform,
            normalization: Normalization::PerStroke,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> InkResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| InkError::config(format!("parse render config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> InkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            InkError::config(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field is in range.
    pub fn validate(&self) -> InkResult<()> {
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS_EDGE {
            return Err(InkError::config(format!(
                "canvas_size must be in 1..={MAX_CANVAS_EDGE}"
            )));
        }
        if self.output_size == 0 || self.output_size > self.canvas_size {
            return Err(InkError::config(
                "output_size must be > 0 and <= canvas_size",
            ));
        }
        if self.resample_count < 2 {
            return Err(InkError::config("resample_count must be >= 2"));
        }
        if !self.padding.is_finite() || !(0.0..0.5).contains(&self.padding) {
            return Err(InkError::config("padding must be in [0, 0.5)"));
        }
        if !self.base_width.is_finite() || self.base_width <= 0.0 {
            return Err(InkError::config("base_width must be > 0"));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(InkError::config("blur_sigma must be >= 0"));
        }
        if self.blur_sigma > self.output_size as f32 {
            return Err(InkError::config("blur_sigma must be <= output_size"));
        }
        Ok(())
    }

    /// The supersampled working canvas.
    pub fn canvas(&self) -> InkResult<Canvas> {
        Canvas::square(self.canvas_size)
    }

    /// The final raster size.
    pub fn output(&self) -> InkResult<Canvas> {
        Canvas::square(self.output_size)
    }

    /// Return a config with a different stroke base width.
    pub fn with_base_width(mut self, base_width: f64) -> Self {
        self.base_width = base_width;
        self
    }

    /// Return a config with different canvas and output sizes.
    pub fn with_sizes(mut self, canvas_size: u32, output_size: u32) -> Self {
        self.canvas_size = canvas_size;
        self.output_size = output_size;
        self
    }

    /// Return a config with a different width policy.
    pub fn with_width_policy(mut self, policy: WidthPolicy) -> Self {
        self.width_policy = policy;
        self
    }

    /// Return a config with a different normalization scope.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Return a config with a different blur sigma.
    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
