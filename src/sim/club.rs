//! Club pose, aim geometry and the spring rig

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::ClampMode;
use crate::{heading, normalize_angle, shortest_angle_delta};

/// Where the club is in its shot lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotState {
    /// Resting beside the ball, ready to be grabbed
    Idle,
    /// Held by the player, following the pointer
    Aiming,
    /// Let go; the spring is pulling the club through the ball
    Released,
    /// Spring off, waiting for the ball to stop
    Recovering,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub pos: Vec2,
    /// Radians; 0 = club shaft pointing up
    pub orientation: f32,
    /// Anchor the club is drawn back from (tracks the ball)
    pub hook: Vec2,
    pub state: ShotState,
    pub has_settled_since_last_shot: bool,
    /// Club can touch the ball (visible in the scene)
    pub collider_enabled: bool,
}

impl Club {
    pub fn new(ball_pos: Vec2, rest_offset: Vec2) -> Self {
        Self {
            pos: ball_pos + rest_offset,
            orientation: 0.0,
            hook: ball_pos,
            state: ShotState::Idle,
            has_settled_since_last_shot: true,
            collider_enabled: true,
        }
    }

    /// Put the club back beside a resting ball
    pub fn rest_at(&mut self, ball_pos: Vec2, rest_offset: Vec2) {
        self.orientation = 0.0;
        self.hook = ball_pos;
        self.pos = ball_pos + rest_offset;
        self.collider_enabled = true;
        self.has_settled_since_last_shot = true;
    }

    /// Ease orientation toward facing `target`, shortest way round
    pub fn face_toward(&mut self, target: Vec2, rate: f32, dt: f32) {
        let desired = normalize_angle(heading(self.pos, target) - std::f32::consts::FRAC_PI_2);
        let t = (rate * dt).clamp(0.0, 1.0);
        let delta = shortest_angle_delta(self.orientation, desired);
        self.orientation = normalize_angle(self.orientation + delta * t);
    }

    /// A swing is in flight until the club is idle again
    pub fn is_swing_ongoing(&self) -> bool {
        self.state != ShotState::Idle
    }
}

/// Club position for a pointer drag, clamped to `max_drag` around the hook
pub fn drag_position(
    mode: ClampMode,
    club_pos: Vec2,
    hook: Vec2,
    ball_pos: Vec2,
    pointer: Vec2,
    max_drag: f32,
) -> Vec2 {
    let clamped = hook + (pointer - hook).normalize_or_zero() * max_drag;
    match mode {
        ClampMode::Direct => {
            if pointer.distance(hook) > max_drag {
                clamped
            } else {
                pointer
            }
        }
        ClampMode::Smoothed { offset, max_step } => {
            let t = club_pos.distance(pointer).clamp(0.0, max_step);
            let candidate =
                club_pos.lerp(pointer, t) + (ball_pos - pointer).normalize_or_zero() * offset;
            if candidate.distance(ball_pos) > max_drag {
                clamped
            } else {
                candidate
            }
        }
    }
}

/// Damped spring between club and hook, armed only between release and disarm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpringRig {
    pub armed: bool,
    pub vel: Vec2,
}

impl SpringRig {
    pub fn arm(&mut self) {
        self.armed = true;
        self.vel = Vec2::ZERO;
    }

    /// Switch off and drop whatever motion the rig gave the club
    pub fn disarm(&mut self) {
        self.armed = false;
        self.vel = Vec2::ZERO;
    }

    /// Pull `club_pos` toward `anchor` for one step (semi-implicit Euler)
    pub fn step(&mut self, club_pos: &mut Vec2, anchor: Vec2, stiffness: f32, damping: f32, dt: f32) {
        if !self.armed {
            return;
        }
        let accel = (anchor - *club_pos) * stiffness - self.vel * damping;
        self.vel += accel * dt;
        *club_pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_direct_drag_clamps_to_max() {
        let hook = Vec2::new(1.0, 1.0);
        let pointer = hook + Vec2::new(3.0, 4.0); // 5 units away
        let pos = drag_position(ClampMode::Direct, hook, hook, hook, pointer, 2.0);
        let expected = hook + Vec2::new(0.6, 0.8) * 2.0;
        assert!(pos.distance(expected) < 1e-5);
    }

    #[test]
    fn test_direct_drag_within_range_follows_pointer() {
        let pointer = Vec2::new(0.5, -1.0);
        let pos = drag_position(ClampMode::Direct, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, pointer, 2.0);
        assert_eq!(pos, pointer);
    }

    #[test]
    fn test_smoothed_drag_keeps_offset_from_ball() {
        let ball = Vec2::ZERO;
        let pointer = Vec2::new(0.0, -1.0);
        let mode = ClampMode::Smoothed { offset: 0.4, max_step: 0.5 };
        // Club already under the pointer: lerp is a no-op, offset pulls toward the ball
        let pos = drag_position(mode, pointer, ball, ball, pointer, 2.0);
        assert!(pos.distance(Vec2::new(0.0, -0.6)) < 1e-5);
    }

    #[test]
    fn test_smoothed_drag_clamps_far_pointer() {
        let ball = Vec2::ZERO;
        let pointer = Vec2::new(10.0, 0.0);
        let mode = ClampMode::Smoothed { offset: 0.4, max_step: 0.5 };
        let pos = drag_position(mode, Vec2::new(9.0, 0.0), ball, ball, pointer, 2.0);
        assert!(pos.distance(Vec2::new(2.0, 0.0)) < 1e-5);
    }

    #[test]
    fn test_face_toward_eases_not_snaps() {
        let mut club = Club::new(Vec2::ZERO, Vec2::new(0.0, -0.5));
        // Target straight to the right: desired orientation is -90°
        let target = club.pos + Vec2::new(1.0, 0.0);
        club.face_toward(target, 5.0, SIM_DT);
        let desired = -std::f32::consts::FRAC_PI_2;
        assert!(club.orientation < 0.0);
        assert!(club.orientation > desired);

        for _ in 0..300 {
            club.face_toward(target, 5.0, SIM_DT);
        }
        assert!((club.orientation - desired).abs() < 1e-3);
    }

    #[test]
    fn test_spring_pulls_club_through_hook() {
        let mut rig = SpringRig::default();
        let mut pos = Vec2::new(0.0, -2.0);
        rig.step(&mut pos, Vec2::ZERO, 120.0, 4.0, SIM_DT);
        assert_eq!(pos, Vec2::new(0.0, -2.0), "unarmed rig must not move the club");

        rig.arm();
        let mut closest = f32::MAX;
        for _ in 0..30 {
            rig.step(&mut pos, Vec2::ZERO, 120.0, 4.0, SIM_DT);
            closest = closest.min(pos.length());
        }
        assert!(closest < 0.3);

        rig.disarm();
        assert_eq!(rig.vel, Vec2::ZERO);
    }

    #[test]
    fn test_rest_at_resets_pose() {
        let mut club = Club::new(Vec2::ZERO, Vec2::new(0.0, -0.5));
        club.orientation = 1.2;
        club.collider_enabled = false;
        club.has_settled_since_last_shot = false;

        club.rest_at(Vec2::new(3.0, 2.0), Vec2::new(0.0, -0.5));
        assert_eq!(club.pos, Vec2::new(3.0, 1.5));
        assert_eq!(club.hook, Vec2::new(3.0, 2.0));
        assert_eq!(club.orientation, 0.0);
        assert!(club.collider_enabled);
        assert!(club.has_settled_since_last_shot);
    }
}
