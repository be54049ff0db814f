use crate::scene::Scene;
use crate::types::{DrawOp, Style, rgb};

use super::super::projection::Projection;
use super::fill;

/// Warm light of the barn interior, seen through the doorway.
const GLOW: Style = Style::on(rgb(255, 220, 160), rgb(255, 179, 102));
const DOOR: Style = Style::on(rgb(60, 15, 15), rgb(100, 30, 30));
const FACADE: Style = Style::on(rgb(220, 200, 200), rgb(170, 40, 40));
const ROOF: Style = Style::on(rgb(200, 120, 120), rgb(120, 20, 20));

/// Roof apex height as a fraction of the barn height.
const ROOF_RATIO: f64 = 0.3;

pub fn paint_glow(scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>) {
    let g = scene.geometry();
    fill(
        ops,
        proj.cols_between(g.door_x, g.door_x + g.door_w),
        proj.rows_between(g.door_y, g.door_y + g.door_h),
        ' ',
        GLOW,
        5,
    );
}

/// The door slab, shifted left by its slide offset. The facade hides
/// whatever part has slid behind it.
pub fn paint_door(scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>) {
    let g = scene.geometry();
    let left = g.door_x - scene.door().open_fraction() * g.door_w;
    let rows = proj.rows_between(g.door_y, g.door_y + g.door_h);
    let cols = proj.cols_between(left, left + g.door_w);
    let last = cols.end.saturating_sub(1);
    for y in rows {
        for x in cols.clone() {
            let ch = if x == cols.start || x == last { '║' } else { '╳' };
            ops.push(DrawOp {
                x,
                y,
                ch,
                style: DOOR,
                z_order: 6,
            });
        }
    }
}

/// One-piece facade with a hole where the door sits, topped by the roof.
pub fn paint_facade(scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>) {
    let g = scene.geometry();
    let hole_cols = proj.cols_between(g.door_x, g.door_x + g.door_w);
    let hole_rows = proj.rows_between(g.door_y, g.door_y + g.door_h);

    for y in proj.rows_between(g.barn_y, g.barn_y + g.barn_h) {
        for x in proj.cols_between(g.barn_x, g.barn_x + g.barn_w) {
            if hole_cols.contains(&x) && hole_rows.contains(&y) {
                continue;
            }
            ops.push(DrawOp {
                x,
                y,
                ch: ' ',
                style: FACADE,
                z_order: 10,
            });
        }
    }

    // Roof: a triangle narrowing from the barn's top edge to the apex.
    let apex_y = g.barn_y - g.barn_h * ROOF_RATIO;
    let center = g.barn_x + g.barn_w / 2.0;
    for y in proj.rows_between(apex_y, g.barn_y) {
        let (_, cy) = proj.to_canvas(0, y);
        let t = ((cy - apex_y) / (g.barn_y - apex_y)).clamp(0.0, 1.0);
        let half = g.barn_w / 2.0 * t;
        let cols = proj.cols_between(center - half, center + half);
        if cols.is_empty() {
            continue;
        }
        let last = cols.end - 1;
        for x in cols.clone() {
            let ch = if x == cols.start {
                '/'
            } else if x == last {
                '\\'
            } else {
                ' '
            };
            ops.push(DrawOp {
                x,
                y,
                ch,
                style: ROOF,
                z_order: 10,
            });
        }
    }
}
