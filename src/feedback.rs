//! Sound and particle cues
//!
//! The core only names the cue; playing it is up to the host.

use serde::{Deserialize, Serialize};

use crate::sim::FeedbackSink;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Club connects with the ball
    Hit,
    /// Ball drops into the cup
    Goal,
    /// Stroke cap reached
    StrokeLimit,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Hit => "hit",
            SoundEffect::Goal => "goal",
            SoundEffect::StrokeLimit => "stroke_limit",
        }
    }
}

/// Feedback sink for headless runs: logs cues and keeps a tally
#[derive(Debug, Default)]
pub struct LogFeedback {
    pub sounds: Vec<SoundEffect>,
    pub particle_bursts: u32,
    muted: bool,
}

impl LogFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl FeedbackSink for LogFeedback {
    fn play_sound(&mut self, sound: SoundEffect) {
        if self.muted {
            return;
        }
        log::debug!("sound: {}", sound.as_str());
        self.sounds.push(sound);
    }

    fn play_particles(&mut self) {
        if self.muted {
            return;
        }
        log::debug!("particles");
        self.particle_bursts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_drops_cues() {
        let mut feedback = LogFeedback::new();
        feedback.play_sound(SoundEffect::Goal);
        feedback.set_muted(true);
        feedback.play_sound(SoundEffect::Hit);
        feedback.play_particles();

        assert_eq!(feedback.sounds, vec![SoundEffect::Goal]);
        assert_eq!(feedback.particle_bursts, 0);
    }
}
