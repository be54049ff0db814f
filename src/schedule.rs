//! Picks the interior or exterior view from the time of day.
//!
//! The figures work inside during work hours and are outdoors otherwise.
//! A change of view plays out as a short cross-fade, and view changes are
//! debounced so a clock flickering around a boundary cannot thrash them.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::WallTime;

/// Minimum time between two view changes.
pub const DEBOUNCE_MS: u64 = 5_000;
/// Transition progress added per frame.
pub const TRANSITION_STEP: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Exterior,
    Interior,
}

impl View {
    /// Interior from 9 to 12 and from 13 to 17.
    pub fn for_time(t: WallTime) -> Self {
        if (9..12).contains(&t.hour) || (13..17).contains(&t.hour) {
            View::Interior
        } else {
            View::Exterior
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub target: View,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Began { target: View },
    Finished { view: View },
}

#[derive(Debug, Clone)]
pub struct ViewDirector {
    view: View,
    transition: Option<Transition>,
    last_change_ms: Option<u64>,
}

impl ViewDirector {
    pub fn new(view: View) -> Self {
        Self {
            view,
            transition: None,
            last_change_ms: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether the exterior scene is on screen, alone or mid-fade.
    pub fn exterior_visible(&self) -> bool {
        self.view == View::Exterior || self.is_transitioning()
    }

    /// Advance one frame. `now_ms` is a monotonic clock reading.
    pub fn update(&mut self, now_ms: u64, wanted: View) -> Option<ViewEvent> {
        if let Some(t) = &mut self.transition {
            t.progress += TRANSITION_STEP;
            if t.progress >= 1.0 {
                let view = t.target;
                self.transition = None;
                self.view = view;
                info!(?view, "view transition finished");
                return Some(ViewEvent::Finished { view });
            }
            return None;
        }

        if wanted == self.view {
            return None;
        }
        let debounced = self
            .last_change_ms
            .is_some_and(|last| now_ms.saturating_sub(last) <= DEBOUNCE_MS);
        if debounced {
            return None;
        }

        self.transition = Some(Transition {
            target: wanted,
            progress: 0.0,
        });
        self.last_change_ms = Some(now_ms);
        info!(to = ?wanted, "view transition started");
        Some(ViewEvent::Began { target: wanted })
    }

    /// Drop any running transition and the debounce, so the next update
    /// re-checks the view straight away.
    pub fn force_check(&mut self) {
        self.transition = None;
        self.last_change_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_hours_are_interior() {
        for (hour, view) in [
            (8, View::Exterior),
            (9, View::Interior),
            (11, View::Interior),
            (12, View::Exterior),
            (13, View::Interior),
            (16, View::Interior),
            (17, View::Exterior),
            (23, View::Exterior),
        ] {
            assert_eq!(View::for_time(WallTime::new(hour, 30)), view, "hour {hour}");
        }
    }

    #[test]
    fn transition_runs_fifty_frames() {
        let mut d = ViewDirector::new(View::Exterior);
        assert_eq!(
            d.update(0, View::Interior),
            Some(ViewEvent::Began {
                target: View::Interior
            })
        );
        let mut frames = 0;
        let finished = loop {
            frames += 1;
            if let Some(event) = d.update(frames, View::Interior) {
                break event;
            }
            assert!(frames < 100);
        };
        assert_eq!(
            finished,
            ViewEvent::Finished {
                view: View::Interior
            }
        );
        // Floating point accumulation may need one extra frame.
        assert!((50..=51).contains(&frames));
        assert_eq!(d.view(), View::Interior);
        assert!(!d.is_transitioning());
    }

    #[test]
    fn changes_are_debounced() {
        let mut d = ViewDirector::new(View::Exterior);
        d.update(1_000, View::Interior);
        for i in 0..60 {
            d.update(1_001 + i, View::Interior);
        }
        assert_eq!(d.view(), View::Interior);

        assert_eq!(d.update(3_000, View::Exterior), None);
        assert_eq!(d.update(6_000, View::Exterior), None);
        assert!(matches!(
            d.update(6_001, View::Exterior),
            Some(ViewEvent::Began {
                target: View::Exterior
            })
        ));
    }

    #[test]
    fn force_check_skips_debounce() {
        let mut d = ViewDirector::new(View::Exterior);
        d.update(100, View::Interior);
        d.force_check();
        assert!(!d.is_transitioning());
        assert_eq!(d.view(), View::Exterior);
        assert!(d.update(200, View::Interior).is_some());
    }

    #[test]
    fn exterior_visible_during_fade() {
        let mut d = ViewDirector::new(View::Interior);
        assert!(!d.exterior_visible());
        d.update(0, View::Exterior);
        assert!(d.exterior_visible());
    }
}
