//! The deterministic rasterizer.
//!
//! Takes a `ResolvedScene` from the engine and produces a cell grid, then
//! encodes each grid as a `Frame` relative to the previous one.
//!
//! The renderer is pure and stateless. Given the same input, it always
//! produces the same output. It knows nothing about doors, figures, or time.

use crate::types::{Cell, CellChange, Frame, Grid, ResolvedScene};

pub struct Renderer;

impl Renderer {
    /// Rasterize a resolved scene onto a fixed-size cell grid.
    ///
    /// Draw operations are sorted by z-order so that higher z values
    /// paint over lower ones. Operations off the grid are dropped.
    pub fn rasterize(scene: &ResolvedScene) -> Grid {
        let w = scene.width as usize;
        let h = scene.height as usize;
        let mut grid = vec![vec![Cell::default(); w]; h];

        let mut ops: Vec<_> = scene.ops.iter().collect();
        ops.sort_by_key(|op| op.z_order);

        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            if x < w && y < h {
                grid[y][x] = Cell {
                    ch: op.ch,
                    style: op.style,
                };
            }
        }

        grid
    }

    /// Encode `next` as a frame. Without a previous grid, or when the grid
    /// size changed, the frame is full; otherwise it is a diff.
    pub fn frame(prev: Option<&Grid>, next: &Grid) -> Frame {
        match prev {
            Some(prev) if same_shape(prev, next) => Frame::Diff {
                changes: Self::diff(prev, next),
            },
            _ => Frame::Full {
                cells: next.clone(),
            },
        }
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: *next_cell,
                    });
                }
            }
        }
        changes
    }
}

fn same_shape(a: &Grid, b: &Grid) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(ra, rb)| ra.len() == rb.len())
}
