use crate::{
    code::matrix::ModuleMatrix,
    foundation::{
        core::{Canvas, Rgba8Premul},
        error::BluesquareResult,
    },
};

/// Scale `matrix` onto a `size x size` opaque canvas with nearest-neighbor block fill.
///
/// Pixel `(x, y)` takes module `(x * n / size, y * n / size)`, so every module covers a
/// contiguous block of `size / n` pixels (one pixel wider where `n` does not divide `size`).
#[tracing::instrument(skip(matrix), fields(side = matrix.side()))]
pub fn rasterize(matrix: &ModuleMatrix, size: u32) -> BluesquareResult<Canvas> {
    let mut canvas = Canvas::new(size, size, Rgba8Premul::WHITE)?;
    let n = matrix.side();
    let size_px = size as usize;
    let dark = Rgba8Premul::BLACK.to_array();

    let module_of: Vec<usize> = (0..size_px).map(|p| p * n / size_px).collect();
    let row_bytes = size_px * 4;
    for (y, row) in canvas.data_mut().chunks_exact_mut(row_bytes).enumerate() {
        let my = module_of[y];
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            if matrix.is_dark(module_of[x], my) {
                px.copy_from_slice(&dark);
            }
        }
    }
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
