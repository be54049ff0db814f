use std::ops::Range;

use crate::geometry::Canvas;
use crate::types::TerminalContract;

/// Maps canvas coordinates onto terminal cells.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    sx: f64,
    sy: f64,
    cols: u16,
    rows: u16,
}

impl Projection {
    pub fn new(canvas: Canvas, contract: TerminalContract) -> Self {
        Self {
            sx: contract.width as f64 / canvas.width,
            sy: contract.height as f64 / canvas.height,
            cols: contract.width,
            rows: contract.height,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Column holding canvas x, or None when it falls off the grid.
    pub fn col(&self, x: f64) -> Option<u16> {
        Self::cell(x * self.sx, self.cols)
    }

    pub fn row(&self, y: f64) -> Option<u16> {
        Self::cell(y * self.sy, self.rows)
    }

    /// Columns covered by the canvas span `[x0, x1)`, clipped to the grid.
    pub fn cols_between(&self, x0: f64, x1: f64) -> Range<u16> {
        Self::span(x0 * self.sx, x1 * self.sx, self.cols)
    }

    pub fn rows_between(&self, y0: f64, y1: f64) -> Range<u16> {
        Self::span(y0 * self.sy, y1 * self.sy, self.rows)
    }

    /// Canvas point at the center of a cell.
    pub fn to_canvas(&self, col: u16, row: u16) -> (f64, f64) {
        ((col as f64 + 0.5) / self.sx, (row as f64 + 0.5) / self.sy)
    }

    fn cell(v: f64, limit: u16) -> Option<u16> {
        let v = v.floor();
        if v < 0.0 || v >= limit as f64 {
            None
        } else {
            Some(v as u16)
        }
    }

    fn span(a: f64, b: f64, limit: u16) -> Range<u16> {
        let clip = |v: f64| v.round().clamp(0.0, limit as f64) as u16;
        let (start, end) = (clip(a), clip(b));
        start..end.max(start)
    }
}
