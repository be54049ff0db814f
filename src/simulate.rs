//! Headless runs of the exterior control loop, recorded frame by frame.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SceneTuning;
use crate::crossing::CrossingLayout;
use crate::geometry::{BarnGeometry, Canvas};
use crate::scene::{FrameSnapshot, Scene};
use crate::schedule::View;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub canvas: Canvas,
    pub barn: BarnGeometry,
    pub layout: CrossingLayout,
    pub frames: Vec<FrameSnapshot>,
}

/// Run `frames` steps of the exterior scene, flipping the desired side at
/// the start of every frame listed in `toggle_frames`.
pub fn simulate(tuning: &SceneTuning, frames: usize, toggle_frames: &[usize]) -> Trace {
    let mut scene = Scene::new(tuning, View::Exterior);
    let mut snapshots = Vec::with_capacity(frames);

    for frame in 0..frames {
        if toggle_frames.contains(&frame) {
            scene.toggle();
        }
        let signal = scene.step();
        snapshots.push(scene.snapshot(signal));
    }
    info!(frames, toggles = toggle_frames.len(), "simulation finished");

    Trace {
        canvas: scene.canvas(),
        barn: *scene.geometry(),
        layout: *scene.crossing().layout(),
        frames: snapshots,
    }
}
