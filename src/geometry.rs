//! Barn and door geometry, derived from the canvas size.

use serde::{Deserialize, Serialize};

use crate::config::SceneTuning;
use crate::crossing::CrossingLayout;

const HORIZON_RATIO: f64 = 0.75;
const BARN_X_RATIO: f64 = 0.65;
const BARN_W_RATIO: f64 = 0.18;
const BARN_H_RATIO: f64 = 0.6;
const DOOR_W_RATIO: f64 = 0.2;
const DOOR_H_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarnGeometry {
    pub horizon_y: f64,
    pub barn_x: f64,
    pub barn_y: f64,
    pub barn_w: f64,
    pub barn_h: f64,
    pub door_x: f64,
    pub door_y: f64,
    pub door_w: f64,
    pub door_h: f64,
}

impl BarnGeometry {
    /// Barn near the right of the canvas, standing on the horizon, with the
    /// door in the bottom center of its facade.
    pub fn from_canvas(canvas: Canvas) -> Self {
        let horizon_y = canvas.height * HORIZON_RATIO;
        let barn_w = canvas.width * BARN_W_RATIO;
        let barn_h = barn_w * BARN_H_RATIO;
        let barn_x = canvas.width * BARN_X_RATIO;
        let barn_y = horizon_y - barn_h;

        let door_w = barn_w * DOOR_W_RATIO;
        let door_h = barn_h * DOOR_H_RATIO;
        let door_x = barn_x + (barn_w - door_w) / 2.0;
        let door_y = barn_y + barn_h - door_h;

        Self {
            horizon_y,
            barn_x,
            barn_y,
            barn_w,
            barn_h,
            door_x,
            door_y,
            door_w,
            door_h,
        }
    }

    pub fn door_center(&self) -> f64 {
        self.door_x + self.door_w / 2.0
    }

    /// Hit-test the barn facade, edges included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.barn_x
            && x <= self.barn_x + self.barn_w
            && y >= self.barn_y
            && y <= self.barn_y + self.barn_h
    }

    /// Inside rests just behind the door's left edge; outside is past the
    /// right edge of the canvas.
    pub fn crossing_layout(&self, canvas: Canvas, tuning: &SceneTuning) -> CrossingLayout {
        CrossingLayout {
            inside_x: self.door_x,
            outside_x: canvas.width + tuning.offscreen_margin,
            door_center: self.door_center(),
            sensor_range: self.door_w * tuning.sensor_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Canvas = Canvas {
        width: 1000.0,
        height: 400.0,
    };

    #[test]
    fn derives_barn_from_canvas() {
        let g = BarnGeometry::from_canvas(CANVAS);
        assert_eq!(g.horizon_y, 300.0);
        assert_eq!(g.barn_x, 650.0);
        assert_eq!(g.barn_w, 180.0);
        assert_eq!(g.barn_h, 108.0);
        assert_eq!(g.barn_y, 192.0);
        assert_eq!(g.door_w, 36.0);
        assert_eq!(g.door_h, 54.0);
        assert_eq!(g.door_x, 722.0);
        assert_eq!(g.door_y, 246.0);
        assert_eq!(g.door_center(), 740.0);
    }

    #[test]
    fn hit_test_includes_edges() {
        let g = BarnGeometry::from_canvas(CANVAS);
        assert!(g.contains(650.0, 192.0));
        assert!(g.contains(830.0, 300.0));
        assert!(g.contains(700.0, 250.0));
        assert!(!g.contains(649.0, 250.0));
        assert!(!g.contains(700.0, 301.0));
    }

    #[test]
    fn layout_keeps_rest_inside_the_sensor_band() {
        let g = BarnGeometry::from_canvas(CANVAS);
        let layout = g.crossing_layout(CANVAS, &SceneTuning::default());
        assert_eq!(layout.inside_x, 722.0);
        assert_eq!(layout.outside_x, 1050.0);
        assert_eq!(layout.door_center, 740.0);
        assert_eq!(layout.sensor_range, 36.0);
        assert!(layout.in_sensor_zone(layout.inside_x));
        assert!(!layout.in_sensor_zone(layout.outside_x));
    }
}
