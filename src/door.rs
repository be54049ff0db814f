//! The sliding barn door controller.
//!
//! The door slides left behind the facade. `position` is the offset from the
//! closed resting position: `0.0` is closed, `-width` is fully open.
//! Open and close requests only take effect from the settled stages; a slide
//! in progress always runs to its end.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorStage {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    position: f64,
    stage: DoorStage,
    width: f64,
    speed: f64,
}

impl Door {
    /// A closed door of the given travel width, sliding `speed` units per tick.
    pub fn new(width: f64, speed: f64) -> Self {
        Self {
            position: 0.0,
            stage: DoorStage::Closed,
            width,
            speed,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn stage(&self) -> DoorStage {
        self.stage
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_open(&self) -> bool {
        self.stage == DoorStage::Open
    }

    pub fn is_closed(&self) -> bool {
        self.stage == DoorStage::Closed
    }

    /// How far the door has slid, from 0.0 (closed) to 1.0 (open).
    pub fn open_fraction(&self) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (-self.position / self.width).clamp(0.0, 1.0)
    }

    /// Start opening. Ignored unless the door is fully closed.
    pub fn request_open(&mut self) {
        if self.stage == DoorStage::Closed {
            self.set_stage(DoorStage::Opening);
        }
    }

    /// Start closing. Ignored unless the door is fully open.
    pub fn request_close(&mut self) {
        if self.stage == DoorStage::Open {
            self.set_stage(DoorStage::Closing);
        }
    }

    /// Advance the slide by one step.
    pub fn tick(&mut self) {
        match self.stage {
            DoorStage::Opening => {
                self.position -= self.speed;
                if self.position <= -self.width {
                    self.position = -self.width;
                    self.set_stage(DoorStage::Open);
                }
            }
            DoorStage::Closing => {
                self.position += self.speed;
                if self.position >= 0.0 {
                    self.position = 0.0;
                    self.set_stage(DoorStage::Closed);
                }
            }
            DoorStage::Closed | DoorStage::Open => {}
        }
    }

    fn set_stage(&mut self, stage: DoorStage) {
        debug!(from = ?self.stage, to = ?stage, position = self.position, "door stage");
        self.stage = stage;
    }
}
