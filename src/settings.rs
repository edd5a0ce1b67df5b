//! Shot and round tuning
//!
//! Loaded from a JSON file when one is given, otherwise defaults for the
//! selected course mode.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("setting `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// How the club follows the pointer while aiming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClampMode {
    /// Club sits on the pointer, clamped around the hook
    Direct,
    /// Club eases toward the pointer and keeps `offset` away from the ball
    Smoothed { offset: f32, max_step: f32 },
}

/// Course mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CourseMode {
    /// Free practice ball: direct drag, long settle grace
    Loose,
    /// Regular course hole: smoothed drag, immediate settle
    #[default]
    Course,
}

impl CourseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseMode::Loose => "Loose",
            CourseMode::Course => "Course",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "loose" | "ball" => Some(CourseMode::Loose),
            "course" => Some(CourseMode::Course),
            _ => None,
        }
    }

    pub fn clamp_mode(&self) -> ClampMode {
        match self {
            CourseMode::Loose => ClampMode::Direct,
            CourseMode::Course => ClampMode::Smoothed {
                offset: SMOOTH_DRAG_OFFSET,
                max_step: SMOOTH_DRAG_MAX_STEP,
            },
        }
    }

    /// Seconds after disarm before the club looks for a resting ball
    pub fn settle_grace(&self) -> f32 {
        match self {
            CourseMode::Loose => LOOSE_SETTLE_GRACE,
            CourseMode::Course => 0.0,
        }
    }
}

/// Club / spring tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub settle_threshold: f32,
    pub release_time: f32,
    pub max_drag_distance: f32,
    pub aim_speed: f32,
    pub clamp_mode: ClampMode,
    /// Fixed point the club faces while aiming (None = face the ball)
    pub aim_target: Option<Vec2>,
    pub rest_offset: Vec2,
    pub settle_grace: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    pub contact_radius: f32,
    pub impulse_transfer: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self::for_mode(CourseMode::default())
    }
}

impl ShotConfig {
    pub fn for_mode(mode: CourseMode) -> Self {
        Self {
            settle_threshold: SETTLE_THRESHOLD,
            release_time: RELEASE_TIME,
            max_drag_distance: MAX_DRAG_DISTANCE,
            aim_speed: AIM_SPEED,
            clamp_mode: mode.clamp_mode(),
            aim_target: None,
            rest_offset: CLUB_REST_OFFSET,
            settle_grace: mode.settle_grace(),
            spring_stiffness: SPRING_STIFFNESS,
            spring_damping: SPRING_DAMPING,
            contact_radius: CONTACT_RADIUS,
            impulse_transfer: IMPULSE_TRANSFER,
        }
    }
}

/// End-of-hole tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub stroke_cap: u32,
    pub goal_speed_cap: f32,
    pub goal_delay: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            stroke_cap: STROKE_CAP,
            goal_speed_cap: GOAL_SPEED_CAP,
            goal_delay: GOAL_DELAY,
        }
    }
}

impl RoundConfig {
    /// Strokes charged when the cap is hit without holing out
    pub fn penalty_strokes(&self) -> u32 {
        self.stroke_cap + 1
    }
}

/// Game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: CourseMode,
    pub shot: ShotConfig,
    pub round: RoundConfig,
}

impl Settings {
    /// Create settings from a course mode (applies mode defaults)
    pub fn from_mode(mode: CourseMode) -> Self {
        Self {
            mode,
            shot: ShotConfig::for_mode(mode),
            round: RoundConfig::default(),
        }
    }

    /// Apply a course mode (updates mode-dependent shot settings)
    pub fn apply_mode(&mut self, mode: CourseMode) {
        self.mode = mode;
        self.shot.clamp_mode = mode.clamp_mode();
        self.shot.settle_grace = mode.settle_grace();
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let has_shot = value.get("shot").is_some();
        let mut settings: Settings = serde_json::from_value(value)?;
        if !has_shot {
            settings.shot = ShotConfig::for_mode(settings.mode);
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let shot = &self.shot;
        let non_negative = [
            ("shot.settle_threshold", shot.settle_threshold),
            ("shot.release_time", shot.release_time),
            ("shot.aim_speed", shot.aim_speed),
            ("shot.settle_grace", shot.settle_grace),
            ("shot.spring_damping", shot.spring_damping),
            ("shot.contact_radius", shot.contact_radius),
            ("shot.impulse_transfer", shot.impulse_transfer),
            ("round.goal_speed_cap", self.round.goal_speed_cap),
            ("round.goal_delay", self.round.goal_delay),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SettingsError::OutOfRange { field, value });
            }
        }
        let positive = [
            ("shot.max_drag_distance", shot.max_drag_distance),
            ("shot.spring_stiffness", shot.spring_stiffness),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::OutOfRange { field, value });
            }
        }
        if let ClampMode::Smoothed { offset, max_step } = shot.clamp_mode {
            if !(0.0..=1.0).contains(&max_step) {
                return Err(SettingsError::OutOfRange {
                    field: "shot.clamp_mode.max_step",
                    value: max_step,
                });
            }
            if !(offset >= 0.0) {
                return Err(SettingsError::OutOfRange {
                    field: "shot.clamp_mode.offset",
                    value: offset,
                });
            }
        }
        if self.round.stroke_cap == 0 {
            return Err(SettingsError::OutOfRange {
                field: "round.stroke_cap",
                value: 0.0,
            });
        }
        Ok(())
    }
}
