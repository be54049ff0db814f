use crate::scene::Scene;
use crate::types::{Color, DrawOp, Style, rgb};

use super::super::projection::Projection;
use super::fill;

pub(super) const SKY_BLUE: Color = rgb(120, 190, 255);
const SKY: Style = Style::on(rgb(255, 255, 255), SKY_BLUE);
const GRASS: Style = Style::on(rgb(40, 100, 30), rgb(80, 150, 50));

/// Sky above the horizon, grass below it with a scattering of tufts.
pub fn paint(scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>) {
    let horizon = scene.geometry().horizon_y;
    let canvas = scene.canvas();
    let cols = 0..proj.cols();

    fill(ops, cols.clone(), proj.rows_between(0.0, horizon), ' ', SKY, 0);

    for y in proj.rows_between(horizon, canvas.height) {
        for x in cols.clone() {
            let ch = if (x as u32 * 7 + y as u32 * 3) % 11 == 0 { '"' } else { ' ' };
            ops.push(DrawOp {
                x,
                y,
                ch,
                style: GRASS,
                z_order: 0,
            });
        }
    }
}
