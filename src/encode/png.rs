use crate::foundation::error::{InkError, InkResult};
use crate::render::postprocess::RenderedImage;
use std::io::Cursor;

/// Encode the final raster as PNG bytes in memory.
pub fn encode_png(image: &RenderedImage) -> InkResult<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| InkError::render(format!("png encode failed: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
