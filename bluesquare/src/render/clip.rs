use crate::foundation::core::{BezPath, Point, Rect};

/// Rounded square used both as the icon border stroke and as its clip mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRegion {
    /// Top-left corner of the bounding square.
    pub offset: Point,
    /// Edge length of the bounding square.
    pub side: f64,
    /// Corner radius.
    pub radius: f64,
}

impl ClipRegion {
    /// Icon box centered on a square `canvas_size` canvas: a quarter of the canvas wide, with
    /// a corner radius of a tenth of its side.
    pub fn centered_icon(canvas_size: u32) -> Self {
        Self::centered_in(canvas_size, canvas_size)
    }

    /// Same as [`ClipRegion::centered_icon`], sized from the shorter canvas edge.
    pub fn centered_in(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let side = w.min(h) / 4.0;
        Self {
            offset: Point::new((w - side) / 2.0, (h - side) / 2.0),
            side,
            radius: side / 10.0,
        }
    }

    /// Bounding square.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.offset.x + self.side,
            self.offset.y + self.side,
        )
    }

    /// Closed outline: four edges joined by quadratic corners whose control point is the
    /// square's corner. Traversal is clockwise starting at the top edge.
    pub fn to_path(&self) -> BezPath {
        let (x0, y0) = (self.offset.x, self.offset.y);
        let (x1, y1) = (x0 + self.side, y0 + self.side);
        let r = self.radius;

        let mut p = BezPath::new();
        p.move_to((x0 + r, y0));
        p.line_to((x1 - r, y0));
        p.quad_to((x1, y0), (x1, y0 + r));
        p.line_to((x1, y1 - r));
        p.quad_to((x1, y1), (x1 - r, y1));
        p.line_to((x0 + r, y1));
        p.quad_to((x0, y1), (x0, y1 - r));
        p.line_to((x0, y0 + r));
        p.quad_to((x0, y0), (x0 + r, y0));
        p.close_path();
        p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/clip.rs"]
mod tests;
