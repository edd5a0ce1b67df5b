//! Shot lifecycle simulation
//!
//! All gameplay logic lives here. This module must stay engine-free:
//! - Fixed timestep only
//! - Waits are scheduled tasks, never blocking
//! - Collaborators come in through the `collab` traits

pub mod ball;
pub mod club;
pub mod collab;
pub mod event;
pub mod round;
pub mod shot;
pub mod state;
pub mod stroke;
pub mod tick;
pub mod timer;

pub use ball::SimBall;
pub use club::{Club, ShotState, SpringRig, drag_position};
pub use collab::{
    BallProxy, FeedbackSink, HoleServices, InputSource, LevelLoader, ScoreSink, StrokeDisplay,
    read_ball,
};
pub use event::{GameEvent, HoleOutcome};
pub use round::{RoundOrchestrator, RoundPhase};
pub use shot::ShotController;
pub use state::{GoalRegion, Hole};
pub use stroke::{StrokeCounter, StrokeIncrement};
pub use tick::{ShotInput, tick};
pub use timer::{Scheduler, TimerHandle};
