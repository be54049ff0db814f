use crate::crossing::Membership;
use crate::scene::Scene;
use crate::types::{Color, DrawOp, Style, rgb};

use super::super::projection::Projection;
use super::landscape::SKY_BLUE;

const SKIN: Color = rgb(255, 220, 180);
const SHIRTS: [Color; 2] = [rgb(51, 102, 204), rgb(204, 102, 51)];

/// Head and body of every figure still walking. Figures at a resting
/// coordinate are out of sight and not drawn.
pub fn paint(scene: &Scene, proj: &Projection, ops: &mut Vec<DrawOp>) {
    let crossing = scene.crossing();
    let layout = crossing.layout();

    for (i, actor) in crossing.actors().iter().enumerate() {
        if layout.membership(actor.x) != Membership::InTransit {
            continue;
        }
        let (Some(x), Some(feet)) = (proj.col(actor.x), proj.row(actor.y - 1.0)) else {
            continue;
        };
        let shirt = SHIRTS[i % SHIRTS.len()];
        ops.push(DrawOp {
            x,
            y: feet,
            ch: 'Å',
            style: Style::on(shirt, SKY_BLUE),
            z_order: 20,
        });
        if let Some(head) = feet.checked_sub(1) {
            ops.push(DrawOp {
                x,
                y: head,
                ch: 'o',
                style: Style::on(SKIN, SKY_BLUE),
                z_order: 20,
            });
        }
    }
}
