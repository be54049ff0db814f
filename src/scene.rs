//! One barn, one door, two figures, and the view schedule.
//!
//! Owns every piece of mutable state; nothing lives at module scope, so any
//! number of scenes can run side by side.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::WallTime;
use crate::config::SceneTuning;
use crate::crossing::{Actor, CrossingCoordinator, CrossingSignal, DesiredSide};
use crate::door::{Door, DoorStage};
use crate::geometry::{BarnGeometry, Canvas};
use crate::schedule::{View, ViewDirector, ViewEvent};

/// Gap between the two figures when they start offscreen.
const ACTOR_SPACING: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Scene {
    canvas: Canvas,
    geometry: BarnGeometry,
    door: Door,
    crossing: CrossingCoordinator,
    director: ViewDirector,
    tuning: SceneTuning,
    frame: u64,
}

/// Plain-data view of one frame, for traces and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub view: View,
    pub door_stage: DoorStage,
    pub door_position: f64,
    pub desired_side: DesiredSide,
    pub actor_x: Vec<f64>,
    pub signal: CrossingSignal,
}

impl Scene {
    /// Figures start offscreen to the right. When the scene opens on the
    /// interior they are already inside instead, and the door stays shut.
    pub fn new(tuning: &SceneTuning, initial_view: View) -> Self {
        let canvas = Canvas {
            width: tuning.canvas_width,
            height: tuning.canvas_height,
        };
        let geometry = BarnGeometry::from_canvas(canvas);
        let layout = geometry.crossing_layout(canvas, tuning);

        let actors = tuning
            .actor_speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| Actor {
                x: layout.outside_x + ACTOR_SPACING * i as f64,
                y: geometry.horizon_y,
                speed,
            })
            .collect();
        let mut crossing = CrossingCoordinator::new(layout, actors, DesiredSide::Outside);
        if initial_view == View::Interior {
            crossing.set_desired_side(DesiredSide::Inside);
            crossing.place_all(DesiredSide::Inside);
        }

        Self {
            canvas,
            geometry,
            door: Door::new(geometry.door_w, tuning.door_speed),
            crossing,
            director: ViewDirector::new(initial_view),
            tuning: tuning.clone(),
            frame: 0,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn geometry(&self) -> &BarnGeometry {
        &self.geometry
    }

    pub fn door(&self) -> &Door {
        &self.door
    }

    pub fn crossing(&self) -> &CrossingCoordinator {
        &self.crossing
    }

    pub fn director(&self) -> &ViewDirector {
        &self.director
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// One frame of the door and crossing control loop.
    pub fn step(&mut self) -> CrossingSignal {
        self.door.tick();
        let signal = self.crossing.update(self.door.is_open());
        if signal.want_door_open {
            self.door.request_open();
        }
        if signal.all_inside || signal.all_outside {
            self.door.request_close();
        }
        self.frame += 1;
        signal
    }

    /// One frame including the view schedule. The door and figures only move
    /// while the exterior is on screen.
    pub fn advance(&mut self, now_ms: u64, time: WallTime) -> Option<CrossingSignal> {
        match self.director.update(now_ms, View::for_time(time)) {
            Some(ViewEvent::Began { target }) => {
                let side = match target {
                    View::Interior => DesiredSide::Inside,
                    View::Exterior => DesiredSide::Outside,
                };
                self.crossing.set_desired_side(side);
                self.door.request_open();
            }
            Some(ViewEvent::Finished { .. }) => self.door.request_close(),
            None => {}
        }

        if self.director.exterior_visible() {
            Some(self.step())
        } else {
            self.frame += 1;
            None
        }
    }

    /// Toggle where the figures are heading. Only the exterior accepts
    /// toggles, and not during a view change.
    pub fn toggle(&mut self) -> bool {
        if self.director.view() != View::Exterior || self.director.is_transitioning() {
            return false;
        }
        let side = self.crossing.toggle_desired_side();
        info!(?side, "figures toggled");
        true
    }

    /// Toggle when the canvas point `(x, y)` lands on the barn.
    pub fn toggle_at(&mut self, x: f64, y: f64) -> bool {
        self.geometry.contains(x, y) && self.toggle()
    }

    /// Force a view re-check on the next frame, e.g. after the clock changed.
    pub fn recheck_view(&mut self) {
        self.director.force_check();
    }

    /// Re-derive geometry for a new canvas size. The door comes back closed.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas = Canvas { width, height };
        self.geometry = BarnGeometry::from_canvas(self.canvas);
        self.door = Door::new(self.geometry.door_w, self.tuning.door_speed);
        self.crossing
            .relayout(self.geometry.crossing_layout(self.canvas, &self.tuning));
        debug!(width, height, "scene resized");
    }

    pub fn snapshot(&self, signal: CrossingSignal) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            view: self.director.view(),
            door_stage: self.door.stage(),
            door_position: self.door.position(),
            desired_side: self.crossing.desired_side(),
            actor_x: self.crossing.actors().iter().map(|a| a.x).collect(),
            signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> SceneTuning {
        SceneTuning {
            canvas_width: 1000.0,
            canvas_height: 400.0,
            ..SceneTuning::default()
        }
    }

    fn run_until(scene: &mut Scene, max: usize, done: impl Fn(&Scene) -> bool) -> usize {
        for i in 1..=max {
            scene.step();
            if done(scene) {
                return i;
            }
        }
        panic!("condition not reached in {max} frames");
    }

    #[test]
    fn starts_outside_and_stays_put() {
        let mut scene = Scene::new(&tuning(), View::Exterior);
        let before = scene.crossing().actors().to_vec();
        for _ in 0..50 {
            let signal = scene.step();
            assert!(signal.all_outside);
        }
        assert_eq!(scene.crossing().actors(), before.as_slice());
        assert!(scene.door().is_closed());
    }

    #[test]
    fn round_trip_through_the_door() {
        let mut scene = Scene::new(&tuning(), View::Exterior);
        assert!(scene.toggle());

        run_until(&mut scene, 2_000, |s| s.door().stage() == DoorStage::Opening);
        run_until(&mut scene, 2_000, |s| s.door().is_open());
        run_until(&mut scene, 2_000, |s| {
            s.crossing().actors().iter().all(|a| a.x == 722.0)
        });
        run_until(&mut scene, 2_000, |s| s.door().is_closed());

        assert!(scene.toggle());
        run_until(&mut scene, 2_000, |s| s.door().is_open());
        run_until(&mut scene, 2_000, |s| {
            s.crossing().actors().iter().all(|a| a.x == 1050.0)
        });
        run_until(&mut scene, 2_000, |s| s.door().is_closed());
    }

    #[test]
    fn toggle_needs_a_hit_on_the_barn() {
        let mut scene = Scene::new(&tuning(), View::Exterior);
        assert!(!scene.toggle_at(10.0, 10.0));
        assert_eq!(scene.crossing().desired_side(), DesiredSide::Outside);
        assert!(scene.toggle_at(700.0, 250.0));
        assert_eq!(scene.crossing().desired_side(), DesiredSide::Inside);
    }

    #[test]
    fn interior_start_places_figures_inside() {
        let mut scene = Scene::new(&tuning(), View::Interior);
        assert!(scene.crossing().actors().iter().all(|a| a.x == 722.0));
        assert!(!scene.toggle());
        assert_eq!(scene.advance(0, WallTime::new(10, 0)), None);
        assert!(scene.door().is_closed());
    }

    #[test]
    fn leaving_work_sends_everyone_out() {
        let mut scene = Scene::new(&tuning(), View::Interior);
        let signal = scene.advance(10_000, WallTime::new(18, 0));
        assert!(signal.is_some());
        assert_eq!(scene.crossing().desired_side(), DesiredSide::Outside);
        assert!(scene.director().is_transitioning());

        for i in 1..3_000 {
            scene.advance(10_000 + i * 16, WallTime::new(18, 0));
        }
        assert_eq!(scene.director().view(), View::Exterior);
        assert!(scene.crossing().actors().iter().all(|a| a.x == 1050.0));
        assert!(scene.door().is_closed());
    }

    #[test]
    fn resize_rederives_layout() {
        let mut scene = Scene::new(&tuning(), View::Exterior);
        scene.resize(2000.0, 800.0);
        assert_eq!(scene.geometry().barn_x, 1300.0);
        assert!(scene.door().is_closed());
        assert!(
            scene
                .crossing()
                .actors()
                .iter()
                .all(|a| a.x == scene.crossing().layout().outside_x)
        );
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut scene = Scene::new(&tuning(), View::Exterior);
        let signal = scene.step();
        let snap = scene.snapshot(signal);
        assert_eq!(snap.frame, 1);
        assert_eq!(snap.door_stage, DoorStage::Closed);
        assert_eq!(snap.actor_x, vec![1050.0, 1060.0]);
        assert!(snap.signal.all_outside);
    }
}
