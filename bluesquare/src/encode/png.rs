use std::io::Cursor;

use crate::foundation::{
    core::Canvas,
    error::{BluesquareError, BluesquareResult},
    math::unpremultiply_rgba8_in_place,
};

/// MIME type of [`encode_png`] output.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Encode the canvas as a straight-alpha RGBA8 PNG.
///
/// Output is byte-identical for identical pixels.
pub fn encode_png(canvas: &Canvas) -> BluesquareResult<Vec<u8>> {
    let mut straight = canvas.data().to_vec();
    unpremultiply_rgba8_in_place(&mut straight);

    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), straight)
        .ok_or_else(|| BluesquareError::encode("canvas byte length mismatch"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| BluesquareError::encode(format!("png: {e}")))?;
    tracing::debug!(bytes = out.len(), "encoded png");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
