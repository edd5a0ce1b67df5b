//! Demo golfer
//!
//! Plays holes without a human: waits for the club to be ready, drags it
//! back opposite the cup by the amount its own spring model says will carry
//! the ball that far, holds, releases. Aim and power get seeded jitter so
//! runs are varied but reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SIM_DT;
use crate::settings::{ClampMode, ShotConfig};
use crate::sim::{BallProxy, ShotController, ShotInput, ShotState, SpringRig, read_ball};

#[derive(Debug, Clone, Copy, PartialEq)]
enum GolferPhase {
    /// Waiting for the club to come back to idle
    Waiting,
    /// Holding the club back
    Dragging { pointer: Vec2, ticks_left: u32 },
}

#[derive(Debug, Clone)]
pub struct AutoGolfer {
    rng: Pcg32,
    phase: GolferPhase,
    /// Max aim error (radians)
    pub aim_error: f32,
    /// Max power error (fraction of planned drag)
    pub power_error: f32,
    /// Deceleration assumed for the ball when planning
    pub rolling_friction: f32,
}

impl AutoGolfer {
    pub fn new(seed: u64, rolling_friction: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GolferPhase::Waiting,
            aim_error: 0.05,
            power_error: 0.08,
            rolling_friction,
        }
    }

    /// Input for this tick
    pub fn next_input(&mut self, shot: &ShotController, ball: &dyn BallProxy, cup: Vec2) -> ShotInput {
        let Some((ball_pos, ball_vel)) = read_ball(ball) else {
            self.phase = GolferPhase::Waiting;
            return ShotInput::default();
        };

        match self.phase {
            GolferPhase::Waiting => {
                let ready = shot.state() == ShotState::Idle
                    && shot.club().has_settled_since_last_shot
                    && ball_vel.length() <= shot.config().settle_threshold;
                if !ready {
                    return ShotInput::default();
                }
                let pointer = self.plan_pointer(shot.config(), ball_pos, cup);
                let ticks_left = self.rng.random_range(30..=50);
                self.phase = GolferPhase::Dragging { pointer, ticks_left };
                ShotInput {
                    pointer: Some(pointer),
                    aim_begin: true,
                    aim_end: false,
                }
            }
            GolferPhase::Dragging { pointer, ticks_left } => {
                if shot.state() != ShotState::Aiming {
                    // Press was refused
                    self.phase = GolferPhase::Waiting;
                    return ShotInput::default();
                }
                if ticks_left == 0 {
                    self.phase = GolferPhase::Waiting;
                    return ShotInput {
                        pointer: Some(pointer),
                        aim_begin: false,
                        aim_end: true,
                    };
                }
                self.phase = GolferPhase::Dragging {
                    pointer,
                    ticks_left: ticks_left - 1,
                };
                ShotInput {
                    pointer: Some(pointer),
                    ..Default::default()
                }
            }
        }
    }

    fn plan_pointer(&mut self, config: &ShotConfig, ball_pos: Vec2, cup: Vec2) -> Vec2 {
        let to_cup = cup - ball_pos;
        let jitter = self.rng.random_range(-self.aim_error..=self.aim_error);
        let aim = Vec2::from_angle(jitter).rotate(to_cup.normalize_or(Vec2::Y));

        let power = 1.0 + self.rng.random_range(-self.power_error..=self.power_error);
        let drag = (drag_for_carry(config, to_cup.length(), self.rolling_friction) * power)
            .min(config.max_drag_distance);

        // Smoothed drag settles short of the pointer; reach past it
        let lead = match config.clamp_mode {
            ClampMode::Direct => 0.0,
            ClampMode::Smoothed { offset, max_step } if max_step > 0.0 => {
                (offset / max_step).max(offset.sqrt())
            }
            ClampMode::Smoothed { .. } => 0.0,
        };
        ball_pos - aim * (drag + lead)
    }
}

/// Distance the ball rolls if the club is released `drag` units back
pub fn predicted_carry(config: &ShotConfig, drag: f32, rolling_friction: f32) -> f32 {
    let mut rig = SpringRig::default();
    rig.arm();
    let mut pos = Vec2::new(0.0, -drag);
    for _ in 0..120 {
        rig.step(
            &mut pos,
            Vec2::ZERO,
            config.spring_stiffness,
            config.spring_damping,
            SIM_DT,
        );
        if pos.length() <= config.contact_radius {
            let v = rig.vel.length() * config.impulse_transfer;
            return v * v / (2.0 * rolling_friction.max(f32::EPSILON));
        }
    }
    0.0
}

/// Smallest drag whose predicted carry reaches `distance` (bisection)
pub fn drag_for_carry(config: &ShotConfig, distance: f32, rolling_friction: f32) -> f32 {
    let mut lo = 0.0;
    let mut hi = config.max_drag_distance;
    if predicted_carry(config, hi, rolling_friction) <= distance {
        return hi;
    }
    for _ in 0..24 {
        let mid = 0.5 * (lo + hi);
        if predicted_carry(config, mid, rolling_friction) < distance {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CourseMode;
    use crate::sim::ball::{DEFAULT_ROLLING_FRICTION, SimBall};

    #[test]
    fn test_carry_grows_with_drag() {
        let config = ShotConfig::for_mode(CourseMode::Loose);
        let short = predicted_carry(&config, 0.8, DEFAULT_ROLLING_FRICTION);
        let long = predicted_carry(&config, 1.6, DEFAULT_ROLLING_FRICTION);
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn test_drag_for_carry_inverts_prediction() {
        let config = ShotConfig::for_mode(CourseMode::Loose);
        let drag = drag_for_carry(&config, 8.0, DEFAULT_ROLLING_FRICTION);
        assert!(drag > 0.0 && drag < config.max_drag_distance);
        let carry = predicted_carry(&config, drag, DEFAULT_ROLLING_FRICTION);
        assert!(carry >= 8.0 && carry < 10.0, "carry {}", carry);
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let config = ShotConfig::for_mode(CourseMode::Course);
        let ball = SimBall::new(Vec2::ZERO);
        let shot = ShotController::new(config, ball.pos);
        let cup = Vec2::new(3.0, 4.0);

        let mut a = AutoGolfer::new(7, DEFAULT_ROLLING_FRICTION);
        let mut b = AutoGolfer::new(7, DEFAULT_ROLLING_FRICTION);
        let ia = a.next_input(&shot, &ball, cup);
        let ib = b.next_input(&shot, &ball, cup);
        assert!(ia.aim_begin);
        assert_eq!(ia.pointer, ib.pointer);
    }

    #[test]
    fn test_pulls_back_away_from_cup() {
        let config = ShotConfig::for_mode(CourseMode::Loose);
        let ball = SimBall::new(Vec2::ZERO);
        let shot = ShotController::new(config, ball.pos);
        let mut golfer = AutoGolfer::new(1, DEFAULT_ROLLING_FRICTION);

        let input = golfer.next_input(&shot, &ball, Vec2::new(10.0, 0.0));
        let pointer = input.pointer.unwrap();
        assert!(pointer.x < 0.0);
        assert!(pointer.y.abs() < 0.2);
    }

    #[test]
    fn test_waits_while_ball_rolls() {
        let config = ShotConfig::for_mode(CourseMode::Loose);
        let mut ball = SimBall::new(Vec2::ZERO);
        let shot = ShotController::new(config, ball.pos);
        let mut golfer = AutoGolfer::new(1, DEFAULT_ROLLING_FRICTION);

        ball.nudge(Vec2::X);
        let input = golfer.next_input(&shot, &ball, Vec2::new(10.0, 0.0));
        assert!(!input.aim_begin);
        assert!(input.pointer.is_none());
    }
}
