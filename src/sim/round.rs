//! Round orchestrator: end-of-hole sequencing
//!
//! Two ways out of a hole:
//! - the ball drops into the cup slowly enough, which records the count at
//!   that instant, celebrates for `goal_delay` seconds, then finishes;
//! - the stroke cap is reached, which waits for the swing in flight to come
//!   to rest and then finishes with the penalty count.
//!
//! A goal on the capping swing takes the first path. Either way exactly one
//! `HoleOutcome` is produced.

use serde::{Deserialize, Serialize};

use super::collab::{BallProxy, FeedbackSink, HoleServices, read_ball};
use super::event::{GameEvent, HoleOutcome};
use super::stroke::StrokeCounter;
use super::timer::Scheduler;
use crate::feedback::SoundEffect;
use crate::settings::RoundConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Playing,
    /// Stroke cap hit; waiting for the club to come back to idle
    AwaitingSwingEnd,
    /// Ball holed; feedback playing before the hole closes
    Celebrating,
    Finishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundTask {
    FinishAfterGoal,
}

#[derive(Debug, Clone)]
pub struct RoundOrchestrator {
    hole_index: u32,
    config: RoundConfig,
    phase: RoundPhase,
    timers: Scheduler<RoundTask>,
    final_strokes: Option<u32>,
    outcome: Option<HoleOutcome>,
}

impl RoundOrchestrator {
    pub fn new(hole_index: u32, config: RoundConfig) -> Self {
        Self {
            hole_index,
            config,
            phase: RoundPhase::Playing,
            timers: Scheduler::new(),
            final_strokes: None,
            outcome: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn hole_index(&self) -> u32 {
        self.hole_index
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<HoleOutcome> {
        self.outcome
    }

    pub fn final_strokes(&self) -> Option<u32> {
        self.final_strokes
    }

    /// Stroke cap reached on the swing in flight
    pub fn on_excessive_strokes(&mut self, count: u32, events: &mut Vec<GameEvent>) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        log::warn!("Hole {}: stroke cap reached ({})", self.hole_index, count);
        self.phase = RoundPhase::AwaitingSwingEnd;
        events.push(GameEvent::ExcessiveStrokes { count });
    }

    /// Ball crossed into the cup. Returns true if it counts as holed.
    pub fn on_goal_entered(
        &mut self,
        ball: &mut dyn BallProxy,
        strokes: &StrokeCounter,
        feedback: &mut dyn FeedbackSink,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if matches!(self.phase, RoundPhase::Celebrating | RoundPhase::Finishing) {
            return false;
        }
        let Some((_, vel)) = read_ball(ball) else {
            return false;
        };
        let speed = vel.length();
        if speed >= self.config.goal_speed_cap {
            log::debug!("Hole {}: ball over the cup too fast ({:.2})", self.hole_index, speed);
            events.push(GameEvent::GoalRejected { speed });
            return false;
        }

        let count = strokes.get();
        log::info!("Hole {}: holed in {}", self.hole_index, count);
        self.final_strokes = Some(count);
        events.push(GameEvent::GoalEntered { strokes: count });

        feedback.play_sound(SoundEffect::Goal);
        feedback.play_particles();
        ball.destroy();

        self.timers
            .schedule(self.config.goal_delay, RoundTask::FinishAfterGoal);
        self.phase = RoundPhase::Celebrating;
        true
    }

    /// Advance pending waits. Returns the outcome on the tick the hole closes.
    pub fn tick(
        &mut self,
        swing_ongoing: bool,
        ball: &mut dyn BallProxy,
        services: &mut HoleServices<'_>,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) -> Option<HoleOutcome> {
        if self.outcome.is_some() {
            return None;
        }

        for task in self.timers.advance(dt) {
            match task {
                RoundTask::FinishAfterGoal => return self.finish(ball, services, events),
            }
        }

        // A vanished ball has nothing left in flight
        if self.phase == RoundPhase::AwaitingSwingEnd && (!swing_ongoing || !ball.is_alive()) {
            self.final_strokes = Some(self.config.penalty_strokes());
            return self.finish(ball, services, events);
        }
        None
    }

    fn finish(
        &mut self,
        ball: &mut dyn BallProxy,
        services: &mut HoleServices<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Option<HoleOutcome> {
        self.phase = RoundPhase::Finishing;
        if ball.is_alive() {
            ball.destroy();
        }

        let outcome = HoleOutcome {
            final_strokes: self.final_strokes.unwrap_or(self.config.penalty_strokes()),
            hole_index: self.hole_index,
        };
        self.outcome = Some(outcome);
        log::info!(
            "Hole {} finished: {} strokes",
            outcome.hole_index,
            outcome.final_strokes
        );

        services
            .scores
            .record_score(outcome.hole_index, outcome.final_strokes);
        events.push(GameEvent::HoleFinished(outcome));
        services.levels.advance_to_next(outcome.hole_index);
        Some(outcome)
    }

    /// Hole torn down: nothing scheduled may fire afterwards
    pub fn abort(&mut self) {
        self.timers.cancel_all();
        if self.outcome.is_none() {
            // Closed without an outcome
            self.phase = RoundPhase::Finishing;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::SIM_DT;
    use crate::host::HeadlessHost;
    use crate::sim::ball::SimBall;

    fn counter_at(count: u32) -> StrokeCounter {
        let mut strokes = StrokeCounter::new(7);
        for _ in 0..count {
            strokes.open_swing();
            strokes.increment();
        }
        strokes
    }

    #[test]
    fn test_goal_records_count_and_finishes_after_delay() {
        let mut host = HeadlessHost::new();
        let mut round = RoundOrchestrator::new(2, RoundConfig::default());
        let mut ball = SimBall::new(Vec2::ZERO);
        ball.vel = Vec2::new(1.0, 0.0);
        let strokes = counter_at(3);
        let mut events = Vec::new();

        assert!(round.on_goal_entered(&mut ball, &strokes, &mut host.feedback, &mut events));
        assert_eq!(round.phase(), RoundPhase::Celebrating);
        assert!(!ball.alive);
        assert_eq!(host.feedback.sounds, vec![SoundEffect::Goal]);
        assert_eq!(host.feedback.particle_bursts, 1);

        // 3 seconds of celebration
        let mut outcome = None;
        let mut ticks = 0;
        while outcome.is_none() && ticks < 400 {
            outcome = round.tick(false, &mut ball, &mut host.services(), SIM_DT, &mut events);
            ticks += 1;
        }
        assert!((179..=181).contains(&ticks), "finished after {} ticks", ticks);
        assert_eq!(
            outcome,
            Some(HoleOutcome {
                final_strokes: 3,
                hole_index: 2
            })
        );
        assert_eq!(host.scorecard.strokes_for(2), Some(3));
        assert_eq!(host.levels.requested, vec![2]);
    }

    #[test]
    fn test_fast_ball_is_not_holed() {
        let mut host = HeadlessHost::new();
        let mut round = RoundOrchestrator::new(0, RoundConfig::default());
        let mut ball = SimBall::new(Vec2::ZERO);
        ball.vel = Vec2::new(4.0, 0.0);
        let strokes = counter_at(1);
        let mut events = Vec::new();

        assert!(!round.on_goal_entered(&mut ball, &strokes, &mut host.feedback, &mut events));
        assert_eq!(round.phase(), RoundPhase::Playing);
        assert!(ball.alive);
        assert!(matches!(events.as_slice(), [GameEvent::GoalRejected { .. }]));

        for _ in 0..600 {
            assert!(round.tick(false, &mut ball, &mut host.services(), SIM_DT, &mut events).is_none());
        }
        assert!(host.scorecard.is_empty());
    }

    #[test]
    fn test_cap_waits_for_swing_then_charges_penalty() {
        let mut host = HeadlessHost::new();
        let mut round = RoundOrchestrator::new(0, RoundConfig::default());
        let mut ball = SimBall::new(Vec2::ZERO);
        let mut events = Vec::new();

        round.on_excessive_strokes(7, &mut events);
        assert_eq!(round.phase(), RoundPhase::AwaitingSwingEnd);

        for _ in 0..100 {
            assert!(round.tick(true, &mut ball, &mut host.services(), SIM_DT, &mut events).is_none());
        }
        let outcome = round.tick(false, &mut ball, &mut host.services(), SIM_DT, &mut events);
        assert_eq!(outcome.map(|o| o.final_strokes), Some(8));
        assert!(!ball.alive, "ball removed on completion");

        // Exactly once
        for _ in 0..10 {
            assert!(round.tick(false, &mut ball, &mut host.services(), SIM_DT, &mut events).is_none());
        }
        let finished = events
            .iter()
            .filter(|e| matches!(e, GameEvent::HoleFinished(_)))
            .count();
        assert_eq!(finished, 1);
        assert_eq!(host.levels.requested.len(), 1);
    }

    #[test]
    fn test_goal_on_capping_swing_keeps_cap_count() {
        let mut host = HeadlessHost::new();
        let mut round = RoundOrchestrator::new(0, RoundConfig::default());
        let mut ball = SimBall::new(Vec2::ZERO);
        ball.vel = Vec2::new(0.5, 0.0);
        let strokes = counter_at(7);
        let mut events = Vec::new();

        round.on_excessive_strokes(7, &mut events);
        assert!(round.on_goal_entered(&mut ball, &strokes, &mut host.feedback, &mut events));

        let mut outcome = None;
        for _ in 0..400 {
            // Club never returns to idle once the ball is gone
            if let Some(o) = round.tick(true, &mut ball, &mut host.services(), SIM_DT, &mut events) {
                outcome = Some(o);
            }
        }
        assert_eq!(outcome.map(|o| o.final_strokes), Some(7));
        assert_eq!(host.scorecard.strokes_for(0), Some(7));
    }

    #[test]
    fn test_abort_cancels_pending_finish() {
        let mut host = HeadlessHost::new();
        let mut round = RoundOrchestrator::new(0, RoundConfig::default());
        let mut ball = SimBall::new(Vec2::ZERO);
        let strokes = counter_at(2);
        let mut events = Vec::new();

        assert!(round.on_goal_entered(&mut ball, &strokes, &mut host.feedback, &mut events));
        round.abort();
        for _ in 0..600 {
            assert!(round.tick(false, &mut ball, &mut host.services(), SIM_DT, &mut events).is_none());
        }
        assert!(host.levels.requested.is_empty());
    }

    #[test]
    fn test_abort_while_awaiting_swing_end() {
        let mut host = HeadlessHost::new();
        let mut round = RoundOrchestrator::new(0, RoundConfig::default());
        let mut ball = SimBall::new(Vec2::ZERO);
        let mut events = Vec::new();

        round.on_excessive_strokes(7, &mut events);
        round.abort();
        assert!(round.tick(false, &mut ball, &mut host.services(), SIM_DT, &mut events).is_none());
        assert!(round.outcome().is_none());
        assert!(ball.alive);
        assert!(host.scorecard.is_empty());
    }

    #[test]
    fn test_second_goal_ignored() {
        let mut host = HeadlessHost::new();
        let mut round = RoundOrchestrator::new(0, RoundConfig::default());
        let mut ball = SimBall::new(Vec2::ZERO);
        let strokes = counter_at(2);
        let mut events = Vec::new();

        assert!(round.on_goal_entered(&mut ball, &strokes, &mut host.feedback, &mut events));
        assert!(!round.on_goal_entered(&mut ball, &strokes, &mut host.feedback, &mut events));
        assert_eq!(host.feedback.sounds.len(), 1);
    }
}
