//! Spring Putt - shot lifecycle core for a 2D mini-golf game
//!
//! Core modules:
//! - `sim`: Club state machine, stroke counting, hole orchestration
//! - `settings`: Data-driven shot and round tuning
//! - `scorecard`: Per-hole stroke results
//! - `feedback`: Sound/particle cues handed to the host
//! - `host`: Headless collaborator implementations
//! - `autoplay`: Seeded demo golfer

pub mod autoplay;
pub mod feedback;
pub mod host;
pub mod scorecard;
pub mod settings;
pub mod sim;

pub use scorecard::Scorecard;
pub use settings::{CourseMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Ball speed at or below which it counts as resting (units/s)
    pub const SETTLE_THRESHOLD: f32 = 0.02;
    /// Seconds the spring stays armed after release
    pub const RELEASE_TIME: f32 = 0.5;
    /// Maximum club distance from the hook while aiming
    pub const MAX_DRAG_DISTANCE: f32 = 2.0;
    /// Club angular easing rate while aiming (per second)
    pub const AIM_SPEED: f32 = 5.0;
    /// Club rest position relative to the ball
    pub const CLUB_REST_OFFSET: Vec2 = Vec2::new(0.0, -0.5);

    /// Smoothed drag: distance kept between club and ball
    pub const SMOOTH_DRAG_OFFSET: f32 = 0.4;
    /// Smoothed drag: maximum lerp factor per tick
    pub const SMOOTH_DRAG_MAX_STEP: f32 = 0.5;
    /// Loose-ball mode waits this long after disarm before re-checking settle
    pub const LOOSE_SETTLE_GRACE: f32 = 2.0;

    /// Spring rig defaults
    pub const SPRING_STIFFNESS: f32 = 120.0;
    pub const SPRING_DAMPING: f32 = 4.0;
    pub const CONTACT_RADIUS: f32 = 0.3;
    pub const IMPULSE_TRANSFER: f32 = 1.0;

    /// Strokes at which the hole is capped
    pub const STROKE_CAP: u32 = 7;
    /// Ball must be slower than this for the cup to count it
    pub const GOAL_SPEED_CAP: f32 = 4.0;
    /// Seconds of celebration before advancing
    pub const GOAL_DELAY: f32 = 3.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Signed shortest rotation taking `from` to `to`
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Angle of the vector pointing from `from` to `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let dir = to - from;
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_shortest_delta_wraps() {
        let d = shortest_angle_delta(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-5);
        let d = shortest_angle_delta(-PI + 0.1, PI - 0.1);
        assert!((d + 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_heading() {
        assert!((heading(Vec2::ZERO, Vec2::Y) - PI / 2.0).abs() < 1e-6);
        assert!(heading(Vec2::ZERO, Vec2::X).abs() < 1e-6);
    }
}
