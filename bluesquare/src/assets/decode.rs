use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{
    error::{BluesquareError, BluesquareResult},
    math::premultiply_rgba8_in_place,
};

/// Decoded raster icon in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Build from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> BluesquareResult<Self> {
        if width == 0 || height == 0 {
            return Err(BluesquareError::validation("image must not be empty"));
        }
        if rgba.len() as u64 != u64::from(width) * u64::from(height) * 4 {
            return Err(BluesquareError::validation("image byte length mismatch"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }
}

/// Decode encoded image bytes (PNG or JPEG) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BluesquareResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
