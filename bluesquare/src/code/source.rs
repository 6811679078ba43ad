use crate::{
    code::matrix::ModuleMatrix,
    foundation::error::{BluesquareError, BluesquareResult},
};

/// Produces the module matrix for a payload.
pub trait MatrixSource {
    /// Encode `payload` into a square module matrix.
    fn encode(&self, payload: &str) -> BluesquareResult<ModuleMatrix>;
}

/// [`MatrixSource`] backed by the `qrcode` crate (automatic version, medium error correction).
#[derive(Clone, Copy, Debug)]
pub struct QrMatrixSource {
    quiet_zone: u32,
}

impl QrMatrixSource {
    /// Source that pads each symbol with `quiet_zone` light modules.
    pub fn new(quiet_zone: u32) -> Self {
        Self { quiet_zone }
    }
}

impl Default for QrMatrixSource {
    fn default() -> Self {
        Self::new(4)
    }
}

impl MatrixSource for QrMatrixSource {
    fn encode(&self, payload: &str) -> BluesquareResult<ModuleMatrix> {
        let code = qrcode::QrCode::new(payload.as_bytes())
            .map_err(|e| BluesquareError::encode(format!("qr symbol: {e}")))?;
        let side = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        let matrix = ModuleMatrix::new(side, modules)?;
        tracing::debug!(side, quiet_zone = self.quiet_zone, "encoded qr symbol");
        let margin = usize::try_from(self.quiet_zone)
            .map_err(|_| BluesquareError::validation("quiet zone does not fit in memory"))?;
        matrix.with_quiet_zone(margin)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/code/source.rs"]
mod tests;
