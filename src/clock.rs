//! Wall-clock time for the scene, either the system clock or a manual override.

use std::fmt;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Frames a confirmation message stays on screen.
const MESSAGE_FRAMES: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallTime {
    pub hour: u32,
    pub minute: u32,
}

impl WallTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    pub fn now_local() -> Self {
        let now = chrono::Local::now();
        Self::new(now.hour(), now.minute())
    }

    fn shift_hour(self, delta: i32) -> Self {
        let hour = (self.hour as i32 + delta).rem_euclid(24) as u32;
        Self { hour, ..self }
    }

    fn shift_minute(self, delta: i32) -> Self {
        let minute = (self.minute as i32 + delta).rem_euclid(60) as u32;
        Self { minute, ..self }
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    System,
    Manual(WallTime),
}

/// Manual time control: a small panel for picking an hour and minute,
/// quick presets, and a way back to the system clock.
#[derive(Debug, Clone)]
pub struct TimeControl {
    source: TimeSource,
    /// Time being edited while the panel is open.
    editing: Option<WallTime>,
    message: Option<(String, u32)>,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeControl {
    pub fn new() -> Self {
        Self {
            source: TimeSource::System,
            editing: None,
            message: None,
        }
    }

    pub fn source(&self) -> TimeSource {
        self.source
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.source, TimeSource::Manual(_))
    }

    /// The active time, given what the system clock currently reads.
    pub fn resolve(&self, system: WallTime) -> WallTime {
        match self.source {
            TimeSource::System => system,
            TimeSource::Manual(t) => t,
        }
    }

    pub fn panel(&self) -> Option<WallTime> {
        self.editing
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|(m, _)| m.as_str())
    }

    /// Open or close the panel. Opening starts from the active time.
    pub fn toggle_panel(&mut self, system: WallTime) {
        self.editing = match self.editing {
            Some(_) => None,
            None => Some(self.resolve(system)),
        };
    }

    pub fn adjust_hour(&mut self, delta: i32) {
        if let Some(t) = &mut self.editing {
            *t = t.shift_hour(delta);
        }
    }

    pub fn adjust_minute(&mut self, delta: i32) {
        if let Some(t) = &mut self.editing {
            *t = t.shift_minute(delta);
        }
    }

    /// Apply the edited time. Returns true when the active time changed source
    /// or value, which calls for an immediate view re-check.
    pub fn apply(&mut self) -> bool {
        match self.editing.take() {
            Some(t) => {
                self.set_manual(t);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    pub fn use_system_time(&mut self) -> bool {
        self.source = TimeSource::System;
        self.show("Using system time".into());
        true
    }

    /// Quick presets on keys 1 to 5: morning, lunch, afternoon, evening, night.
    pub fn preset(&mut self, slot: u8) -> bool {
        let t = match slot {
            1 => WallTime::new(10, 0),
            2 => WallTime::new(12, 30),
            3 => WallTime::new(14, 0),
            4 => WallTime::new(18, 0),
            5 => WallTime::new(22, 0),
            _ => return false,
        };
        self.set_manual(t);
        true
    }

    /// Count down the on-screen message, once per frame.
    pub fn tick(&mut self) {
        if let Some((_, frames)) = &mut self.message {
            *frames = frames.saturating_sub(1);
            if *frames == 0 {
                self.message = None;
            }
        }
    }

    fn set_manual(&mut self, t: WallTime) {
        self.source = TimeSource::Manual(t);
        self.show(format!("Time set to {t}"));
    }

    fn show(&mut self, message: String) {
        self.message = Some((message, MESSAGE_FRAMES));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_edits_wrap_around() {
        let mut tc = TimeControl::new();
        tc.toggle_panel(WallTime::new(23, 59));
        tc.adjust_hour(1);
        tc.adjust_minute(1);
        assert_eq!(tc.panel(), Some(WallTime::new(0, 0)));
        tc.adjust_hour(-1);
        tc.adjust_minute(-1);
        assert_eq!(tc.panel(), Some(WallTime::new(23, 59)));
    }

    #[test]
    fn apply_switches_to_manual() {
        let mut tc = TimeControl::new();
        tc.toggle_panel(WallTime::new(8, 5));
        tc.adjust_hour(2);
        assert!(tc.apply());
        assert!(tc.panel().is_none());
        assert_eq!(tc.resolve(WallTime::new(3, 0)), WallTime::new(10, 5));
        assert_eq!(tc.message(), Some("Time set to 10:05"));
    }

    #[test]
    fn cancel_keeps_system_time() {
        let mut tc = TimeControl::new();
        tc.toggle_panel(WallTime::new(8, 0));
        tc.adjust_hour(5);
        tc.cancel();
        assert!(!tc.apply());
        assert_eq!(tc.source(), TimeSource::System);
    }

    #[test]
    fn presets_and_system_reset() {
        let mut tc = TimeControl::new();
        assert!(tc.preset(2));
        assert_eq!(tc.resolve(WallTime::new(1, 1)), WallTime::new(12, 30));
        assert!(!tc.preset(9));
        assert!(tc.use_system_time());
        assert!(!tc.is_manual());
        assert_eq!(tc.message(), Some("Using system time"));
    }

    #[test]
    fn message_expires() {
        let mut tc = TimeControl::new();
        tc.preset(1);
        for _ in 0..MESSAGE_FRAMES - 1 {
            tc.tick();
        }
        assert!(tc.message().is_some());
        tc.tick();
        assert!(tc.message().is_none());
    }

    #[test]
    fn reopening_panel_starts_from_manual_time() {
        let mut tc = TimeControl::new();
        tc.preset(5);
        tc.toggle_panel(WallTime::new(7, 0));
        assert_eq!(tc.panel(), Some(WallTime::new(22, 0)));
    }
}
