use crate::foundation::error::{BluesquareError, BluesquareResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Canvas edge length used for profile codes.
pub const DEFAULT_CANVAS_SIZE: u32 = 600;

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Fully opaque color; premultiplication is a no-op.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight-alpha color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            crate::foundation::math::mul_div255_u8(u16::from(c), u16::from(a))
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Mutable pixel buffer for one render.
///
/// Pixels are premultiplied RGBA8, tightly packed, row-major. Dimensions are limited to
/// `1..=u16::MAX` so the buffer can be handed to the raster backend without conversion checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba8Premul) -> BluesquareResult<Self> {
        let w = canvas_dim(width, "width")?;
        let h = canvas_dim(height, "height")?;
        let px = fill.to_array();
        let mut data = vec![0u8; usize::from(w) * usize::from(h) * 4];
        for c in data.chunks_exact_mut(4) {
            c.copy_from_slice(&px);
        }
        Ok(Self {
            width: w,
            height: h,
            data,
        })
    }

    /// Wrap existing premultiplied RGBA8 bytes.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> BluesquareResult<Self> {
        let w = canvas_dim(width, "width")?;
        let h = canvas_dim(height, "height")?;
        if data.len() != usize::from(w) * usize::from(h) * 4 {
            return Err(BluesquareError::validation("canvas byte length mismatch"));
        }
        Ok(Self {
            width: w,
            height: h,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub(crate) fn width_u16(&self) -> u16 {
        self.width
    }

    pub(crate) fn height_u16(&self) -> u16 {
        self.height
    }

    /// Raw premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw premultiplied RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the canvas, returning its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = ((y as usize) * usize::from(self.width) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Return `true` when every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }
}

fn canvas_dim(v: u32, what: &str) -> BluesquareResult<u16> {
    match u16::try_from(v) {
        Ok(0) => Err(BluesquareError::validation(format!(
            "canvas {what} must be > 0"
        ))),
        Ok(d) => Ok(d),
        Err(_) => Err(BluesquareError::validation(format!(
            "canvas {what} exceeds {}",
            u16::MAX
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
