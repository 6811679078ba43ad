use crate::foundation::error::{BluesquareError, BluesquareResult};

/// Largest side a quiet-zone padded matrix may have, in modules.
pub const MAX_MATRIX_SIDE: usize = 4096;

/// Square grid of QR modules; `true` is a dark module.
///
/// Immutable once built. Row-major storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMatrix {
    side: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Build from row-major modules. `modules.len()` must equal `side * side` and `side >= 1`.
    pub fn new(side: usize, modules: Vec<bool>) -> BluesquareResult<Self> {
        if side == 0 {
            return Err(BluesquareError::validation("module matrix side must be >= 1"));
        }
        if side.checked_mul(side) != Some(modules.len()) {
            return Err(BluesquareError::validation(format!(
                "module matrix expects {side}x{side} modules, got {}",
                modules.len()
            )));
        }
        Ok(Self { side, modules })
    }

    /// Build from rows; every row must be as long as the row count.
    pub fn from_rows(rows: &[Vec<bool>]) -> BluesquareResult<Self> {
        let side = rows.len();
        if rows.iter().any(|r| r.len() != side) {
            return Err(BluesquareError::validation("module matrix rows must be square"));
        }
        Self::new(side, rows.concat())
    }

    /// Number of modules per row (and per column).
    pub fn side(&self) -> usize {
        self.side
    }

    /// Module at column `x`, row `y`. Out-of-range coordinates read as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.side || y >= self.side {
            return false;
        }
        self.modules[y * self.side + x]
    }

    /// Copy with `margin` light modules added on every side.
    ///
    /// Fails when the padded side would exceed [`MAX_MATRIX_SIDE`].
    pub fn with_quiet_zone(&self, margin: usize) -> BluesquareResult<Self> {
        if margin == 0 {
            return Ok(self.clone());
        }
        let side = margin
            .checked_mul(2)
            .and_then(|m| m.checked_add(self.side))
            .filter(|&s| s <= MAX_MATRIX_SIDE)
            .ok_or_else(|| {
                BluesquareError::validation(format!(
                    "quiet zone of {margin} modules exceeds the {MAX_MATRIX_SIDE}-module limit"
                ))
            })?;
        let mut modules = vec![false; side * side];
        for y in 0..self.side {
            let src = &self.modules[y * self.side..(y + 1) * self.side];
            let start = (y + margin) * side + margin;
            modules[start..start + self.side].copy_from_slice(src);
        }
        Ok(Self { side, modules })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/code/matrix.rs"]
mod tests;
