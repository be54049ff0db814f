use crate::geometry::Canvas;
use crate::scene::Scene;
use crate::types::{Color, DrawOp, Style, rgb};

use super::super::projection::Projection;
use super::fill;

const FLOOR_RATIO: f64 = 0.75;
const ROOF_RATIO: f64 = 1.0 / 6.0;

const WALL: Color = rgb(221, 221, 221);
const FLOOR: Color = rgb(170, 170, 170);
const ROOF: Color = rgb(139, 69, 19);
const SERVER: Color = rgb(68, 68, 68);
const WINDOW_SKY: Color = rgb(135, 206, 235);
const WINDOW_TREES: Color = rgb(34, 139, 34);
const DESK: Color = rgb(255, 255, 255);
const INK: Color = rgb(40, 40, 40);
const WORKERS: [Color; 2] = [rgb(51, 102, 204), rgb(204, 102, 51)];

/// A rectangle in canvas units.
#[derive(Debug, Clone, Copy)]
struct Block {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

struct Room {
    floor_y: f64,
    roof_y: f64,
    server: Block,
    whiteboard: Block,
    window: Block,
    desks: [Block; 2],
}

impl Room {
    fn layout(c: Canvas) -> Self {
        let floor_y = c.height * FLOOR_RATIO;
        let server = Block {
            x: 0.0,
            y: floor_y - c.height * 0.5,
            w: c.width * 0.15,
            h: c.height * 0.5,
        };
        let whiteboard = Block {
            x: server.w + c.width * 0.05,
            y: floor_y - c.height * 0.3,
            w: c.width * 0.2,
            h: c.height * 0.3,
        };
        let window = Block {
            x: c.width * 0.75,
            y: c.height * 0.3,
            w: c.width * 0.25,
            h: c.height * 0.3,
        };
        let desk = |x: f64| Block {
            x,
            y: floor_y - c.height * 0.12,
            w: c.width * 0.15,
            h: c.height * 0.12,
        };
        Room {
            floor_y,
            roof_y: c.height * ROOF_RATIO,
            server,
            whiteboard,
            window,
            desks: [desk(c.width * 0.4), desk(c.width * 0.65)],
        }
    }
}

/// The office inside the barn: two people at their desks.
pub fn paint(scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>) {
    let canvas = scene.canvas();
    let room = Room::layout(canvas);
    let all = 0..proj.cols();

    let wall = proj.rows_between(0.0, room.floor_y);
    let floor = proj.rows_between(room.floor_y, canvas.height);
    let roof = proj.rows_between(0.0, room.roof_y);
    fill(ops, all.clone(), wall, ' ', Style::on(INK, WALL), 0);
    fill(ops, all.clone(), floor, '░', Style::on(INK, FLOOR), 0);
    fill(ops, all, roof, '═', Style::on(rgb(90, 30, 0), ROOF), 1);

    block(ops, proj, room.server, '▤', Style::on(rgb(0, 200, 0), SERVER), 2);

    let split = room.window.h * 0.7;
    let sky = Block {
        h: split,
        ..room.window
    };
    let trees = Block {
        y: room.window.y + split,
        h: room.window.h - split,
        ..room.window
    };
    block(ops, proj, sky, ' ', Style::on(INK, WINDOW_SKY), 2);
    block(ops, proj, trees, '♣', Style::on(rgb(20, 90, 20), WINDOW_TREES), 2);
    frame(ops, proj, room.window, None, Style::on(INK, WALL), 3);

    block(ops, proj, room.whiteboard, ' ', Style::on(INK, DESK), 2);
    frame(ops, proj, room.whiteboard, Some("plan"), Style::on(INK, DESK), 3);

    for (desk, shirt) in room.desks.iter().zip(WORKERS) {
        block(ops, proj, *desk, '▄', Style::on(DESK, WALL), 2);
        let (Some(x), Some(feet)) = (
            proj.col(desk.x + desk.w / 2.0),
            proj.row(room.floor_y - 1.0),
        ) else {
            continue;
        };
        ops.push(DrawOp {
            x,
            y: feet,
            ch: 'Å',
            style: Style::on(shirt, WALL),
            z_order: 4,
        });
        if let Some(head) = feet.checked_sub(1) {
            ops.push(DrawOp {
                x,
                y: head,
                ch: 'o',
                style: Style::on(rgb(255, 220, 180), WALL),
                z_order: 4,
            });
        }
    }
}

fn block(ops: &mut Vec<DrawOp>, proj: &Projection, b: Block, ch: char, style: Style, z: i32) {
    fill(
        ops,
        proj.cols_between(b.x, b.x + b.w),
        proj.rows_between(b.y, b.y + b.h),
        ch,
        style,
        z,
    );
}

/// Box-drawing outline around a block, with an optional title on the top edge.
fn frame(
    ops: &mut Vec<DrawOp>,
    proj: &Projection,
    b: Block,
    title: Option<&str>,
    style: Style,
    z: i32,
) {
    let cols = proj.cols_between(b.x, b.x + b.w);
    let rows = proj.rows_between(b.y, b.y + b.h);
    if cols.len() < 2 || rows.len() < 2 {
        return;
    }
    let (x, y) = (cols.start, rows.start);
    let (right, bottom) = (cols.end - 1, rows.end - 1);
    let mut put = |x, y, ch, z_order| {
        ops.push(DrawOp {
            x,
            y,
            ch,
            style,
            z_order,
        })
    };

    // Corners
    put(x, y, '┌', z);
    put(right, y, '┐', z);
    put(x, bottom, '└', z);
    put(right, bottom, '┘', z);

    for i in x + 1..right {
        put(i, y, '─', z);
        put(i, bottom, '─', z);
    }
    for j in y + 1..bottom {
        put(x, j, '│', z);
        put(right, j, '│', z);
    }

    if let Some(title) = title {
        let style = Style {
            bold: true,
            ..style
        };
        for (i, ch) in title.chars().enumerate() {
            let tx = x + 2 + i as u16;
            if tx < right {
                ops.push(DrawOp {
                    x: tx,
                    y,
                    ch,
                    style,
                    z_order: z + 1,
                });
            }
        }
    }
}
