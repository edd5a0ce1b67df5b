//! Shot controller: the club's state machine
//!
//! Idle -> Aiming on press (ball at rest), Aiming -> Released on release,
//! Released -> Recovering when the spring is switched off after
//! `release_time`, Recovering -> Idle once the ball settles. Requests that
//! arrive in the wrong state or with the ball moving are ignored.

use glam::Vec2;

use super::club::{Club, ShotState, SpringRig, drag_position};
use super::collab::{BallProxy, read_ball};
use super::event::GameEvent;
use super::stroke::{StrokeCounter, StrokeIncrement};
use super::timer::Scheduler;
use crate::settings::ShotConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShotTask {
    /// Switch the spring off
    Disarm,
    /// Start watching for the ball to settle
    EnableSettleCheck,
}

#[derive(Debug, Clone)]
pub struct ShotController {
    config: ShotConfig,
    club: Club,
    rig: SpringRig,
    timers: Scheduler<ShotTask>,
    camera_pan_allowed: bool,
    shoot_is_released: bool,
    settle_check_enabled: bool,
}

impl ShotController {
    pub fn new(config: ShotConfig, ball_pos: Vec2) -> Self {
        let club = Club::new(ball_pos, config.rest_offset);
        Self {
            config,
            club,
            rig: SpringRig::default(),
            timers: Scheduler::new(),
            camera_pan_allowed: true,
            shoot_is_released: false,
            settle_check_enabled: true,
        }
    }

    pub fn club(&self) -> &Club {
        &self.club
    }

    pub fn state(&self) -> ShotState {
        self.club.state
    }

    pub fn config(&self) -> &ShotConfig {
        &self.config
    }

    pub fn camera_pan_allowed(&self) -> bool {
        self.camera_pan_allowed
    }

    pub fn shoot_is_released(&self) -> bool {
        self.shoot_is_released
    }

    pub fn spring_armed(&self) -> bool {
        self.rig.armed
    }

    pub fn is_swing_ongoing(&self) -> bool {
        self.club.is_swing_ongoing()
    }

    fn is_at_rest(&self, vel: Vec2) -> bool {
        vel.length() <= self.config.settle_threshold
    }

    fn transition(&mut self, to: ShotState, events: &mut Vec<GameEvent>) {
        let from = self.club.state;
        if from == to {
            return;
        }
        log::debug!("club {:?} -> {:?}", from, to);
        self.club.state = to;
        events.push(GameEvent::ShotStateChanged { from, to });
    }

    /// Player grabs the club. Returns false if the request was ignored.
    pub fn begin_aim(&mut self, ball: &mut dyn BallProxy, events: &mut Vec<GameEvent>) -> bool {
        if self.club.state != ShotState::Idle || !self.club.has_settled_since_last_shot {
            return false;
        }
        let Some((ball_pos, ball_vel)) = read_ball(ball) else {
            return false;
        };
        if !self.is_at_rest(ball_vel) {
            return false;
        }

        ball.set_kinematic(true);
        self.club.hook = ball_pos;
        self.camera_pan_allowed = false;
        self.shoot_is_released = false;
        self.transition(ShotState::Aiming, events);
        true
    }

    /// Per-tick aim: ease the club's facing and follow the pointer
    pub fn update_aim(&mut self, ball: &dyn BallProxy, pointer: Option<Vec2>, dt: f32) {
        if self.club.state != ShotState::Aiming {
            return;
        }
        let Some((ball_pos, _)) = read_ball(ball) else {
            return;
        };
        self.club.hook = ball_pos;

        let target = self.config.aim_target.unwrap_or(ball_pos);
        self.club.face_toward(target, self.config.aim_speed, dt);

        if let Some(pointer) = pointer {
            self.club.pos = drag_position(
                self.config.clamp_mode,
                self.club.pos,
                self.club.hook,
                ball_pos,
                pointer,
                self.config.max_drag_distance,
            );
        }
    }

    /// Player lets go. Returns false if the request was ignored.
    pub fn end_aim(
        &mut self,
        ball: &mut dyn BallProxy,
        strokes: &mut StrokeCounter,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.club.state != ShotState::Aiming {
            return false;
        }
        let Some((_, ball_vel)) = read_ball(ball) else {
            return false;
        };
        if !self.is_at_rest(ball_vel) {
            return false;
        }

        ball.set_kinematic(false);
        self.rig.arm();
        self.camera_pan_allowed = true;
        self.shoot_is_released = true;
        self.club.has_settled_since_last_shot = false;
        self.settle_check_enabled = self.config.settle_grace <= 0.0;
        strokes.open_swing();
        self.timers.schedule(self.config.release_time, ShotTask::Disarm);
        self.transition(ShotState::Released, events);
        true
    }

    /// Club touched the ball. Counts the stroke once per swing; later
    /// contacts, or contacts outside a swing, are ignored.
    pub fn on_club_contact(
        &mut self,
        ball: &mut dyn BallProxy,
        strokes: &mut StrokeCounter,
        events: &mut Vec<GameEvent>,
    ) -> Option<StrokeIncrement> {
        if !matches!(self.club.state, ShotState::Released | ShotState::Recovering) {
            return None;
        }
        if !self.club.collider_enabled || !ball.is_alive() {
            return None;
        }
        self.club.collider_enabled = false;

        let magnitude = self.rig.vel.length() * self.config.impulse_transfer;
        if magnitude > 0.0 {
            ball.apply_impulse_toward(self.rig.vel, magnitude);
        }

        let counted = strokes.increment();
        if let Some(stroke) = counted {
            events.push(GameEvent::StrokeCounted {
                count: stroke.count,
            });
        }
        counted
    }

    fn disarm(&mut self, events: &mut Vec<GameEvent>) {
        self.rig.disarm();
        if self.club.state != ShotState::Released {
            return;
        }
        if self.config.settle_grace > 0.0 {
            self.timers
                .schedule(self.config.settle_grace, ShotTask::EnableSettleCheck);
        }
        self.transition(ShotState::Recovering, events);
    }

    /// Advance timers, the spring swing and the settle check by one step
    pub fn tick(
        &mut self,
        ball: &mut dyn BallProxy,
        strokes: &mut StrokeCounter,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) -> Option<StrokeIncrement> {
        for task in self.timers.advance(dt) {
            match task {
                ShotTask::Disarm => self.disarm(events),
                ShotTask::EnableSettleCheck => self.settle_check_enabled = true,
            }
        }

        let (ball_pos, ball_vel) = read_ball(ball)?;

        let mut counted = None;
        if self.club.state == ShotState::Released && self.rig.armed && self.club.collider_enabled
        {
            self.rig.step(
                &mut self.club.pos,
                self.club.hook,
                self.config.spring_stiffness,
                self.config.spring_damping,
                dt,
            );
            if self.club.pos.distance(ball_pos) <= self.config.contact_radius {
                counted = self.on_club_contact(ball, strokes, events);
            }
        }

        if self.club.state == ShotState::Recovering
            && self.settle_check_enabled
            && !self.club.has_settled_since_last_shot
            && self.is_at_rest(ball_vel)
        {
            self.club.rest_at(ball_pos, self.config.rest_offset);
            self.transition(ShotState::Idle, events);
        }

        counted
    }

    /// Drop pending timers and stop the rig (hole torn down)
    pub fn cancel_pending(&mut self) {
        self.timers.cancel_all();
        self.rig.disarm();
    }
}
