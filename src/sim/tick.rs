//! Fixed timestep hole tick
//!
//! One call per simulation step, after the host has stepped ball physics.

use glam::Vec2;

use super::collab::{BallProxy, HoleServices, InputSource};
use super::state::Hole;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct ShotInput {
    /// Pointer in world space (None when off-screen / no device)
    pub pointer: Option<Vec2>,
    /// Press on the club this tick
    pub aim_begin: bool,
    /// Release this tick
    pub aim_end: bool,
}

impl ShotInput {
    /// Sample an input source for this tick
    pub fn poll(source: &mut dyn InputSource) -> Self {
        Self {
            pointer: source.pointer_position(),
            aim_begin: source.take_aim_begin(),
            aim_end: source.take_aim_end(),
        }
    }
}

/// Advance the hole by one fixed timestep
pub fn tick<B: BallProxy>(
    hole: &mut Hole<B>,
    input: &ShotInput,
    services: &mut HoleServices<'_>,
    dt: f32,
) {
    if hole.is_finished() {
        return;
    }
    hole.time_ticks += 1;

    if input.aim_begin {
        hole.shot.begin_aim(&mut hole.ball, &mut hole.events);
    }
    hole.shot.update_aim(&hole.ball, input.pointer, dt);
    if input.aim_end {
        hole.shot
            .end_aim(&mut hole.ball, &mut hole.strokes, &mut hole.events);
    }

    if let Some(stroke) = hole
        .shot
        .tick(&mut hole.ball, &mut hole.strokes, dt, &mut hole.events)
    {
        hole.after_stroke(stroke, services);
    }

    hole.check_goal(services);

    let swing_ongoing = hole.shot.is_swing_ongoing();
    hole.round
        .tick(swing_ongoing, &mut hole.ball, services, dt, &mut hole.events);
}
