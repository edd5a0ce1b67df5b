//! Hole state
//!
//! Everything one hole needs: the ball, the cup, the club controller, the
//! stroke counter and the orchestrator. Dropped and rebuilt per hole, so no
//! count leaks from one hole into the next.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collab::{BallProxy, HoleServices, read_ball};
use super::event::{GameEvent, HoleOutcome};
use super::round::RoundOrchestrator;
use super::shot::ShotController;
use super::stroke::{StrokeCounter, StrokeIncrement};
use crate::feedback::SoundEffect;
use crate::settings::Settings;

/// Circular cup trigger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRegion {
    pub center: Vec2,
    pub radius: f32,
}

impl GoalRegion {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

pub struct Hole<B> {
    pub index: u32,
    pub ball: B,
    pub goal: GoalRegion,
    pub shot: ShotController,
    pub strokes: StrokeCounter,
    pub round: RoundOrchestrator,
    /// Signals since the last drain
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    ball_in_goal: bool,
}

impl<B: BallProxy> Hole<B> {
    pub fn new(index: u32, ball: B, goal: GoalRegion, settings: &Settings) -> Self {
        let ball_pos = ball.position();
        Self {
            index,
            shot: ShotController::new(settings.shot.clone(), ball_pos),
            strokes: StrokeCounter::new(settings.round.stroke_cap),
            round: RoundOrchestrator::new(index, settings.round.clone()),
            ball_in_goal: goal.contains(ball_pos),
            goal,
            ball,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn outcome(&self) -> Option<HoleOutcome> {
        self.round.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.round.outcome().is_some()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Club/ball collision reported by a host physics engine
    pub fn report_club_contact(&mut self, services: &mut HoleServices<'_>) -> Option<StrokeIncrement> {
        if self.is_finished() {
            return None;
        }
        let stroke = self
            .shot
            .on_club_contact(&mut self.ball, &mut self.strokes, &mut self.events)?;
        self.after_stroke(stroke, services);
        Some(stroke)
    }

    /// Ball entered the cup trigger. Returns true if it counted as holed.
    pub fn report_goal_entered(&mut self, services: &mut HoleServices<'_>) -> bool {
        self.round.on_goal_entered(
            &mut self.ball,
            &self.strokes,
            &mut *services.feedback,
            &mut self.events,
        )
    }

    pub(crate) fn after_stroke(&mut self, stroke: StrokeIncrement, services: &mut HoleServices<'_>) {
        log::debug!("Hole {}: stroke {}", self.index, stroke.count);
        services.feedback.play_sound(SoundEffect::Hit);
        if let Some(display) = services.display.as_deref_mut() {
            display.show_strokes(stroke.count);
            if stroke.limit_reached {
                display.show_limit_warning();
            }
        }
        if stroke.limit_reached {
            services.feedback.play_sound(SoundEffect::StrokeLimit);
            self.round.on_excessive_strokes(stroke.count, &mut self.events);
        }
    }

    /// Edge-detect the ball crossing into the cup
    pub(crate) fn check_goal(&mut self, services: &mut HoleServices<'_>) {
        let Some((pos, _)) = read_ball(&self.ball) else {
            self.ball_in_goal = false;
            return;
        };
        let inside = self.goal.contains(pos);
        let entered = inside && !self.ball_in_goal;
        self.ball_in_goal = inside;
        if entered {
            self.report_goal_entered(services);
        }
    }

    /// Hole torn down externally (reset/quit): cancel everything pending
    pub fn abort(&mut self) {
        log::info!("Hole {} aborted", self.index);
        self.shot.cancel_pending();
        self.round.abort();
    }
}
