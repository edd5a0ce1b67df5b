//! Per-hole stroke counter

use serde::{Deserialize, Serialize};

/// Result of counting a connecting swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeIncrement {
    pub count: u32,
    /// True only on the swing that first reaches the cap
    pub limit_reached: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeCounter {
    count: u32,
    cap: u32,
    /// Open from release until the swing is counted
    swing_open: bool,
    limit_signalled: bool,
}

impl StrokeCounter {
    pub fn new(cap: u32) -> Self {
        Self {
            count: 0,
            cap,
            swing_open: false,
            limit_signalled: false,
        }
    }

    pub fn get(&self) -> u32 {
        self.count
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn limit_signalled(&self) -> bool {
        self.limit_signalled
    }

    /// A swing has been released and may now be counted once
    pub fn open_swing(&mut self) {
        self.swing_open = true;
    }

    /// Count the connecting swing. None if this swing was already counted.
    pub fn increment(&mut self) -> Option<StrokeIncrement> {
        if !self.swing_open {
            return None;
        }
        self.swing_open = false;
        self.count += 1;

        let limit_reached = !self.limit_signalled && self.count >= self.cap;
        if limit_reached {
            self.limit_signalled = true;
        }
        Some(StrokeIncrement {
            count: self.count,
            limit_reached,
        })
    }

    /// Fresh hole
    pub fn reset(&mut self) {
        self.count = 0;
        self.swing_open = false;
        self.limit_signalled = false;
    }
}
