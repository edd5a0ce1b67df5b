//! Reference rolling ball
//!
//! A minimal stand-in for the host's rigid body: constant rolling friction,
//! optional kinematic lock, impulses. Good enough for headless play and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collab::BallProxy;

/// Rolling deceleration (units/s²)
pub const DEFAULT_ROLLING_FRICTION: f32 = 6.0;
pub const DEFAULT_BALL_RADIUS: f32 = 0.15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimBall {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub rolling_friction: f32,
    pub kinematic: bool,
    pub alive: bool,
}

impl SimBall {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: DEFAULT_BALL_RADIUS,
            mass: 1.0,
            rolling_friction: DEFAULT_ROLLING_FRICTION,
            kinematic: false,
            alive: true,
        }
    }

    /// Integrate one timestep
    pub fn step(&mut self, dt: f32) {
        if !self.alive || self.kinematic {
            return;
        }
        let speed = self.vel.length();
        let slow = self.rolling_friction * dt;
        if speed <= slow {
            self.vel = Vec2::ZERO;
        } else {
            self.vel *= (speed - slow) / speed;
        }
        self.pos += self.vel * dt;
    }

    /// Knock the ball without going through the club (wind, bumpers, tests)
    pub fn nudge(&mut self, vel: Vec2) {
        if self.alive && !self.kinematic {
            self.vel += vel;
        }
    }
}

impl BallProxy for SimBall {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
        if kinematic {
            self.vel = Vec2::ZERO;
        }
    }

    fn apply_impulse_toward(&mut self, dir: Vec2, magnitude: f32) {
        if !self.alive || self.kinematic {
            return;
        }
        self.vel += dir.normalize_or_zero() * (magnitude / self.mass);
    }

    fn destroy(&mut self) {
        self.alive = false;
        self.vel = Vec2::ZERO;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
