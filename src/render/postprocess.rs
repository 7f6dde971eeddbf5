use crate::{
    foundation::core::Canvas,
    foundation::error::{InkError, InkResult},
    render::{backend::FrameRGBA, blur::gaussian_blur_u8},
};

/// The final square RGB raster.
pub type RenderedImage = image::RgbImage;

/// Downsample a supersampled canvas to `output` with Lanczos3, then apply a light Gaussian blur.
///
/// Only the RGB channels are kept; the canvas is expected to be opaque.
pub fn downsample(frame: &FrameRGBA, output: Canvas, blur_sigma: f32) -> InkResult<RenderedImage> {
    let full = rgb_from_frame(frame)?;

    let resized = if (frame.width, frame.height) == (output.width, output.height) {
        full
    } else {
        image::imageops::resize(
            &full,
            output.width,
            output.height,
            image::imageops::FilterType::Lanczos3,
        )
    };

    let blurred = gaussian_blur_u8(resized.as_raw(), output.width, output.height, 3, blur_sigma)?;
    RenderedImage::from_raw(output.width, output.height, blurred)
        .ok_or_else(|| InkError::render("blurred buffer does not match output size"))
}

fn rgb_from_frame(frame: &FrameRGBA) -> InkResult<RenderedImage> {
    let px_count = (frame.width as usize) * (frame.height as usize);
    if frame.data.len() != px_count * 4 {
        return Err(InkError::render("canvas byte length mismatch"));
    }
    let mut rgb = Vec::with_capacity(px_count * 3);
    for px in frame.data.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    RenderedImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| InkError::render("failed to wrap canvas pixels"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/postprocess.rs"]
mod tests;
