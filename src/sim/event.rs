//! Signals emitted by the hole for UI, audio and tests

use serde::{Deserialize, Serialize};

use super::club::ShotState;

/// Final result of one hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleOutcome {
    pub final_strokes: u32,
    pub hole_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotStateChanged { from: ShotState, to: ShotState },
    StrokeCounted { count: u32 },
    ExcessiveStrokes { count: u32 },
    GoalEntered { strokes: u32 },
    /// Ball crossed into the cup too fast to drop
    GoalRejected { speed: f32 },
    HoleFinished(HoleOutcome),
}
