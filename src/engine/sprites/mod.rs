//! Sprite layers and their paint implementations.
//!
//! Each layer lives in its own module; the `Sprite` enum dispatches to them
//! the same way for every frame.

mod barn;
mod figures;
mod interior;
mod landscape;

use std::ops::Range;

use crate::scene::Scene;
use crate::types::{DrawOp, Style};

use super::projection::Projection;

/// Paint one layer of the scene as it currently stands.
pub trait Paint {
    fn paint(&self, scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Landscape,
    Glow,
    Door,
    Facade,
    Figures,
    Interior,
}

/// Back to front, matching the order the exterior is painted in.
pub const EXTERIOR: &[Sprite] = &[
    Sprite::Landscape,
    Sprite::Glow,
    Sprite::Door,
    Sprite::Facade,
    Sprite::Figures,
];

pub const INTERIOR: &[Sprite] = &[Sprite::Interior];

impl Paint for Sprite {
    fn paint(&self, scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>) {
        match self {
            Sprite::Landscape => landscape::paint(scene, proj, ops),
            Sprite::Glow => barn::paint_glow(scene, proj, ops),
            Sprite::Door => barn::paint_door(scene, proj, ops),
            Sprite::Facade => barn::paint_facade(scene, proj, ops),
            Sprite::Figures => figures::paint(scene, proj, ops),
            Sprite::Interior => interior::paint(scene, proj, ops),
        }
    }
}

/// Fill a block of cells with one char and style.
pub(crate) fn fill(
    ops: &mut Vec<DrawOp>,
    cols: Range<u16>,
    rows: Range<u16>,
    ch: char,
    style: Style,
    z_order: i32,
) {
    for y in rows {
        for x in cols.clone() {
            ops.push(DrawOp {
                x,
                y,
                ch,
                style,
                z_order,
            });
        }
    }
}
