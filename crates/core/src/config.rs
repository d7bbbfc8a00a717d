//! Session configuration.
//!
//! Defaults reproduce the classic feel (3x3 base, 5 units/s). Every field can
//! be overridden from the environment; unparsable values fall back to the
//! default rather than failing.

use thiserror::Error;

use crate::types::{
    BOX_HEIGHT, CAMERA_OFFSET, DEFAULT_SPEED, DRIFT_TOLERANCE, FRAGMENT_MASS, FRUSTUM_SIZE,
    GRAVITY, ORIGINAL_BOX_SIZE, PHYSICS_STEP, PRUNE_DEPTH, SPAWN_OFFSET,
};

/// How the moving layer advances each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    /// `speed * dt` units per tick (frame-rate independent).
    RealTime { speed: f32 },
    /// A constant increment per tick regardless of `dt`.
    PerFrame { step: f32 },
}

impl MotionMode {
    /// Distance to advance for a tick of `dt` seconds.
    pub fn step(&self, dt: f32) -> f32 {
        match *self {
            MotionMode::RealTime { speed } => speed * dt.max(0.0),
            MotionMode::PerFrame { step } => step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackerConfig {
    pub box_size: f32,
    pub box_height: f32,
    pub motion: MotionMode,
    pub spawn_offset: f32,
    pub camera_offset: f32,
    pub frustum_size: f32,
    pub physics_step: f32,
    pub drift_check: bool,
    pub drift_tolerance: f32,
    pub fragment_mass: f32,
    pub gravity: f32,
    pub prune_depth: f32,
}

impl Default for StackerConfig {
    fn default() -> Self {
        Self {
            box_size: ORIGINAL_BOX_SIZE,
            box_height: BOX_HEIGHT,
            motion: MotionMode::RealTime {
                speed: DEFAULT_SPEED,
            },
            spawn_offset: SPAWN_OFFSET,
            camera_offset: CAMERA_OFFSET,
            frustum_size: FRUSTUM_SIZE,
            physics_step: PHYSICS_STEP,
            drift_check: true,
            drift_tolerance: DRIFT_TOLERANCE,
            fragment_mass: FRAGMENT_MASS,
            gravity: GRAVITY,
            prune_depth: PRUNE_DEPTH,
        }
    }
}

impl StackerConfig {
    /// Build a config from `STACKER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let num = |key: &str| lookup(key).and_then(|s| s.trim().parse::<f32>().ok());
        let mut config = Self::default();

        if let Some(speed) = num("STACKER_SPEED") {
            config.motion = MotionMode::RealTime { speed };
        }
        // Per-frame motion wins over a speed when both are set.
        if let Some(step) = num("STACKER_PER_FRAME") {
            config.motion = MotionMode::PerFrame { step };
        }
        if let Some(size) = num("STACKER_BOX_SIZE") {
            config.box_size = size;
        }
        if let Some(offset) = num("STACKER_SPAWN_OFFSET") {
            config.spawn_offset = offset;
        }
        if let Some(frustum) = num("STACKER_FRUSTUM") {
            config.frustum_size = frustum;
        }
        if let Some(v) = lookup("STACKER_DRIFT_CHECK") {
            let v = v.trim().to_lowercase();
            config.drift_check = !(v == "0" || v == "false" || v == "off");
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("box_size", self.box_size)?;
        positive("box_height", self.box_height)?;
        positive("frustum_size", self.frustum_size)?;
        positive("physics_step", self.physics_step)?;
        positive("fragment_mass", self.fragment_mass)?;
        positive("prune_depth", self.prune_depth)?;
        match self.motion {
            MotionMode::RealTime { speed } => positive("speed", speed)?,
            MotionMode::PerFrame { step } => positive("per_frame", step)?,
        }
        non_negative("spawn_offset", self.spawn_offset)?;
        non_negative("drift_tolerance", self.drift_tolerance)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this check too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = StackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.box_size, 3.0);
        assert_eq!(config.motion, MotionMode::RealTime { speed: 5.0 });
        assert!(config.drift_check);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = StackerConfig::from_lookup(lookup(&[
            ("STACKER_SPEED", "7.5"),
            ("STACKER_BOX_SIZE", " 4 "),
            ("STACKER_DRIFT_CHECK", "false"),
        ]));
        assert_eq!(config.motion, MotionMode::RealTime { speed: 7.5 });
        assert_eq!(config.box_size, 4.0);
        assert!(!config.drift_check);
    }

    #[test]
    fn test_per_frame_wins_over_speed() {
        let config = StackerConfig::from_lookup(lookup(&[
            ("STACKER_SPEED", "7.5"),
            ("STACKER_PER_FRAME", "0.15"),
        ]));
        assert_eq!(config.motion, MotionMode::PerFrame { step: 0.15 });
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let config = StackerConfig::from_lookup(lookup(&[("STACKER_SPEED", "fast")]));
        assert_eq!(config.motion, MotionMode::RealTime { speed: 5.0 });
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = StackerConfig {
            box_size: 0.0,
            ..StackerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "box_size",
                value: 0.0
            })
        );

        let config = StackerConfig {
            motion: MotionMode::RealTime { speed: -1.0 },
            ..StackerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StackerConfig {
            spawn_offset: -2.0,
            ..StackerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "spawn_offset", .. })
        ));
    }

    #[test]
    fn test_motion_step() {
        assert_eq!(MotionMode::RealTime { speed: 5.0 }.step(0.1), 0.5);
        assert_eq!(MotionMode::RealTime { speed: 5.0 }.step(-1.0), 0.0);
        assert_eq!(MotionMode::PerFrame { step: 0.15 }.step(10.0), 0.15);
    }
}
