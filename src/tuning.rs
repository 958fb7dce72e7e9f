//! Data-driven game balance
//!
//! All rates are per reference frame (see `consts::REFERENCE_FRAME_MS`) and
//! get multiplied by the tick's frame scale. Defaults give the classic
//! Flappy Magic feel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration (pixels per frame, per frame)
    pub gravity: f32,
    /// Velocity the bird is set to on a flap (negative = upward)
    pub flap_strength: f32,

    // === Bird ===
    /// Fixed horizontal lane (left edge, pixels)
    pub bird_x: f32,
    /// Bird hitbox edge length (pixels)
    pub bird_size: f32,

    // === Pipes ===
    /// Leftward pipe speed (pixels per frame)
    pub pipe_speed: f32,
    /// Pipe width (pixels)
    pub pipe_width: f32,
    /// Height of the passable band (pixels)
    pub gap_size: f32,
    /// Minimum horizontal distance between spawns (pixels)
    pub min_spacing: f32,
    /// Spawn spacing as a fraction of playfield width (wins when larger)
    pub spacing_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            flap_strength: -8.0,

            bird_x: 200.0,
            bird_size: 30.0,

            pipe_speed: 3.0,
            pipe_width: 70.0,
            gap_size: 150.0,
            min_spacing: 300.0,
            spacing_ratio: 0.4,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason })
            }
        }

        check(
            self.gravity.is_finite() && self.gravity >= 0.0,
            "gravity",
            "must be finite and non-negative",
        )?;
        check(
            self.flap_strength.is_finite() && self.flap_strength < 0.0,
            "flap_strength",
            "must be negative (upward)",
        )?;
        check(
            self.bird_x.is_finite() && self.bird_x >= 0.0,
            "bird_x",
            "must be finite and non-negative",
        )?;
        check(
            self.bird_size.is_finite() && self.bird_size > 0.0,
            "bird_size",
            "must be positive",
        )?;
        check(
            self.pipe_speed.is_finite() && self.pipe_speed > 0.0,
            "pipe_speed",
            "must be positive",
        )?;
        check(
            self.pipe_width.is_finite() && self.pipe_width > 0.0,
            "pipe_width",
            "must be positive",
        )?;
        check(
            self.gap_size.is_finite() && self.gap_size > self.bird_size,
            "gap_size",
            "must be larger than the bird",
        )?;
        check(
            self.min_spacing.is_finite() && self.min_spacing > 0.0,
            "min_spacing",
            "must be positive",
        )?;
        check(
            self.spacing_ratio.is_finite() && self.spacing_ratio >= 0.0,
            "spacing_ratio",
            "must be finite and non-negative",
        )
    }

    /// Horizontal distance the newest pipe must travel before the next spawn
    #[inline]
    pub fn spawn_spacing(&self, playfield_width: f32) -> f32 {
        self.min_spacing.max(playfield_width * self.spacing_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.4, "gap_size": 180 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.4);
        assert_eq!(tuning.gap_size, 180.0);
        assert_eq!(tuning.pipe_speed, Tuning::default().pipe_speed);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ gravity: }"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let err = Tuning::from_json(r#"{ "flap_strength": 5.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "flap_strength",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "gap_size": 20.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_size", .. }));
    }

    #[test]
    fn test_spawn_spacing() {
        let tuning = Tuning::default();
        // Narrow playfield: the minimum wins
        assert_eq!(tuning.spawn_spacing(500.0), 300.0);
        // Wide playfield: 40% of width wins
        assert_eq!(tuning.spawn_spacing(1000.0), 400.0);
    }
}
