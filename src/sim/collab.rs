//! Interfaces to the host engine
//!
//! The core never owns rendering, rigid-body dynamics or level loading; it
//! talks to them through these traits.

use glam::Vec2;

use crate::feedback::SoundEffect;

/// The simulated golf ball
pub trait BallProxy {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    /// Lock (true) or release (false) the ball's physical freedom
    fn set_kinematic(&mut self, kinematic: bool);
    fn apply_impulse_toward(&mut self, dir: Vec2, magnitude: f32);
    /// Remove the ball from the simulation
    fn destroy(&mut self);
    /// False once destroyed; reads after that are meaningless
    fn is_alive(&self) -> bool {
        true
    }
}

/// Pointer plus edge-triggered aim presses
pub trait InputSource {
    fn pointer_position(&self) -> Option<Vec2>;
    /// True once per press
    fn take_aim_begin(&mut self) -> bool;
    /// True once per release
    fn take_aim_end(&mut self) -> bool;
}

pub trait FeedbackSink {
    fn play_sound(&mut self, sound: SoundEffect);
    fn play_particles(&mut self);
}

pub trait LevelLoader {
    fn advance_to_next(&mut self, current_index: u32);
}

pub trait ScoreSink {
    fn record_score(&mut self, hole_index: u32, strokes: u32);
}

/// On-screen stroke text
pub trait StrokeDisplay {
    fn show_strokes(&mut self, count: u32);
    /// Stroke cap reached (the text turns red)
    fn show_limit_warning(&mut self);
}

/// Collaborators handed to the hole each tick
pub struct HoleServices<'a> {
    pub feedback: &'a mut dyn FeedbackSink,
    pub levels: &'a mut dyn LevelLoader,
    pub scores: &'a mut dyn ScoreSink,
    /// Not every host has stroke text; absent means skip
    pub display: Option<&'a mut dyn StrokeDisplay>,
}

/// Ball position and velocity, or None once the ball is gone
#[inline]
pub fn read_ball(ball: &dyn BallProxy) -> Option<(Vec2, Vec2)> {
    if ball.is_alive() {
        Some((ball.position(), ball.velocity()))
    } else {
        None
    }
}
