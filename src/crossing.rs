//! Moves the two figures through the barn door.
//!
//! The coordinator never touches the door. Each update reports whether the
//! door should be open and whether everyone has reached a resting side; the
//! caller turns those flags into door requests and passes the door's state
//! back in on the next frame.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesiredSide {
    Inside,
    Outside,
}

impl DesiredSide {
    pub fn toggled(self) -> Self {
        match self {
            DesiredSide::Inside => DesiredSide::Outside,
            DesiredSide::Outside => DesiredSide::Inside,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Inside,
    Outside,
    InTransit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub x: f64,
    /// Only used for drawing.
    pub y: f64,
    pub speed: f64,
}

/// Fixed horizontal landmarks of a crossing.
///
/// Inside is to the left of the door, outside to the right:
/// `inside_x < door_center < outside_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingLayout {
    pub inside_x: f64,
    pub outside_x: f64,
    pub door_center: f64,
    /// Half-width of the sensor band around `door_center`.
    pub sensor_range: f64,
}

impl CrossingLayout {
    pub fn membership(&self, x: f64) -> Membership {
        if x <= self.inside_x {
            Membership::Inside
        } else if x >= self.outside_x {
            Membership::Outside
        } else {
            Membership::InTransit
        }
    }

    pub fn resting_x(&self, side: DesiredSide) -> f64 {
        match side {
            DesiredSide::Inside => self.inside_x,
            DesiredSide::Outside => self.outside_x,
        }
    }

    /// Left and right edges of the sensor band.
    pub fn sensor_edges(&self) -> (f64, f64) {
        (
            self.door_center - self.sensor_range,
            self.door_center + self.sensor_range,
        )
    }

    /// Whether `x` lies in the sensor band, edges included. Approaching
    /// actors are clamped to exactly these edges.
    pub fn in_sensor_zone(&self, x: f64) -> bool {
        let (lo, hi) = self.sensor_edges();
        x >= lo && x <= hi
    }

    /// Whether `x` is on the side of the door an actor heading for `side`
    /// still has to leave.
    fn on_origin_side(&self, x: f64, side: DesiredSide) -> bool {
        match side {
            DesiredSide::Inside => x > self.door_center,
            DesiredSide::Outside => x < self.door_center,
        }
    }
}

/// Flags produced by one coordinator update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingSignal {
    pub want_door_open: bool,
    pub all_inside: bool,
    pub all_outside: bool,
}

#[derive(Debug, Clone)]
pub struct CrossingCoordinator {
    actors: Vec<Actor>,
    desired: DesiredSide,
    layout: CrossingLayout,
}

impl CrossingCoordinator {
    pub fn new(layout: CrossingLayout, actors: Vec<Actor>, desired: DesiredSide) -> Self {
        Self {
            actors,
            desired,
            layout,
        }
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn layout(&self) -> &CrossingLayout {
        &self.layout
    }

    pub fn desired_side(&self) -> DesiredSide {
        self.desired
    }

    pub fn set_desired_side(&mut self, side: DesiredSide) {
        self.desired = side;
    }

    /// Flip the desired side. Two toggles in a row restore the original side.
    pub fn toggle_desired_side(&mut self) -> DesiredSide {
        self.desired = self.desired.toggled();
        self.desired
    }

    pub fn everyone(&self, membership: Membership) -> bool {
        self.actors
            .iter()
            .all(|a| self.layout.membership(a.x) == membership)
    }

    /// Snap every actor to the resting coordinate of `side`, without animating.
    pub fn place_all(&mut self, side: DesiredSide) {
        let x = self.layout.resting_x(side);
        for actor in &mut self.actors {
            actor.x = x;
        }
    }

    /// Swap in landmarks re-derived after a canvas resize.
    ///
    /// Resting actors snap to the new resting coordinates; actors in transit
    /// keep their relative position along the walk, clamped so they stay in
    /// transit.
    pub fn relayout(&mut self, layout: CrossingLayout) {
        let old = self.layout;
        let scale = if old.outside_x > 0.0 {
            layout.outside_x / old.outside_x
        } else {
            1.0
        };
        for actor in &mut self.actors {
            actor.x = match old.membership(actor.x) {
                Membership::Inside => layout.inside_x,
                Membership::Outside => layout.outside_x,
                Membership::InTransit => {
                    // Stay in transit, at least one step clear of either resting point.
                    let margin = actor.speed.min((layout.outside_x - layout.inside_x) / 2.0);
                    (actor.x * scale).clamp(layout.inside_x + margin, layout.outside_x - margin)
                }
            };
        }
        self.layout = layout;
    }

    /// One frame of movement. `door_is_open` is the door's settled-open state.
    pub fn update(&mut self, door_is_open: bool) -> CrossingSignal {
        let everyone_inside = self.everyone(Membership::Inside);
        let everyone_outside = self.everyone(Membership::Outside);

        match self.desired {
            DesiredSide::Inside if everyone_inside => {
                return CrossingSignal {
                    all_inside: true,
                    ..CrossingSignal::default()
                };
            }
            DesiredSide::Outside if everyone_outside => {
                return CrossingSignal {
                    all_outside: true,
                    ..CrossingSignal::default()
                };
            }
            _ => {}
        }

        let layout = self.layout;
        let side = self.desired;
        for actor in &mut self.actors {
            step_actor(actor, &layout, side, door_is_open);
        }

        CrossingSignal {
            want_door_open: self.actors.iter().any(|a| layout.in_sensor_zone(a.x)),
            all_inside: self.everyone(Membership::Inside),
            all_outside: self.everyone(Membership::Outside),
        }
    }
}

/// Move one actor at most once toward where `side` wants it.
///
/// Outside the sensor band on the origin side the actor approaches the band
/// edge. Inside the band it only crosses while the door is open. Past the band
/// on the destination side nothing blocks it any more.
fn step_actor(actor: &mut Actor, layout: &CrossingLayout, side: DesiredSide, door_is_open: bool) {
    let in_zone = layout.in_sensor_zone(actor.x);

    if !in_zone && layout.on_origin_side(actor.x, side) {
        let (lo, hi) = layout.sensor_edges();
        actor.x = match side {
            DesiredSide::Inside => (actor.x - actor.speed).max(hi),
            DesiredSide::Outside => (actor.x + actor.speed).min(lo),
        };
        return;
    }

    if in_zone && !door_is_open {
        return;
    }

    let target = layout.resting_x(side);
    match side {
        DesiredSide::Inside if actor.x > target => {
            actor.x = (actor.x - actor.speed).max(target);
        }
        DesiredSide::Outside if actor.x < target => {
            actor.x = (actor.x + actor.speed).min(target);
        }
        _ => {}
    }
}
