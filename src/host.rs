//! Headless host: collaborator implementations with no engine behind them
//!
//! Used by the native demo and by tests.

use crate::feedback::LogFeedback;
use crate::scorecard::Scorecard;
use crate::sim::{HoleServices, LevelLoader, StrokeDisplay};

/// Records advance requests; the driver loop decides what to load
#[derive(Debug, Default)]
pub struct LevelQueue {
    pub requested: Vec<u32>,
}

impl LevelQueue {
    /// Index requested by the most recent advance, consumed once
    pub fn take_next(&mut self) -> Option<u32> {
        self.requested.pop().map(|current| current + 1)
    }
}

impl LevelLoader for LevelQueue {
    fn advance_to_next(&mut self, current_index: u32) {
        log::info!("Advance requested after hole {}", current_index);
        self.requested.push(current_index);
    }
}

/// Stroke text as a string, turning "red" at the cap
#[derive(Debug, Default)]
pub struct StrokeText {
    pub text: String,
    pub warning: bool,
}

impl StrokeDisplay for StrokeText {
    fn show_strokes(&mut self, count: u32) {
        self.text = count.to_string();
    }

    fn show_limit_warning(&mut self) {
        self.warning = true;
    }
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub feedback: LogFeedback,
    pub scorecard: Scorecard,
    pub levels: LevelQueue,
    pub strokes: StrokeText,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&mut self) -> HoleServices<'_> {
        HoleServices {
            feedback: &mut self.feedback,
            levels: &mut self.levels,
            scores: &mut self.scorecard,
            display: Some(&mut self.strokes),
        }
    }

    /// Services without stroke text (host UI not loaded yet)
    pub fn services_without_display(&mut self) -> HoleServices<'_> {
        HoleServices {
            feedback: &mut self.feedback,
            levels: &mut self.levels,
            scores: &mut self.scorecard,
            display: None,
        }
    }

    /// New hole: stroke text back to zero
    pub fn reset_display(&mut self) {
        self.strokes = StrokeText::default();
    }
}
