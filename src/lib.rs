//! Flappy Magic - a side-scrolling flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, scoring)
//! - `session`: Host-facing controller (input queue, ticks, best-score bridge)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Best-score key-value storage
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::BestScore;
pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Duration of one reference frame in milliseconds (60 Hz).
    /// Every per-tick rate in `Tuning` is expressed against this frame.
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Maximum frames a single tick may cover (tab switch, debugger pause)
    pub const MAX_FRAME_SCALE: f32 = 4.0;

    /// Default playfield dimensions (largest size the game is laid out for)
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Smallest playfield the simulation accepts
    pub const MIN_PLAYFIELD_WIDTH: f32 = 320.0;
    pub const MIN_PLAYFIELD_HEIGHT: f32 = 240.0;
    /// Space reserved around the playfield when fitting the viewport
    pub const VIEWPORT_MARGIN_X: f32 = 20.0;
    pub const VIEWPORT_MARGIN_Y: f32 = 100.0;
    /// Viewports this wide or narrower are treated as touch screens
    pub const NARROW_VIEWPORT_WIDTH: f32 = 768.0;

    /// Bird tilt: degrees per unit of vertical velocity, and the clamp
    pub const TILT_PER_VELOCITY: f32 = 4.0;
    pub const MAX_TILT_DEGREES: f32 = 30.0;

    /// Wing squash animation after a flap
    pub const WING_FLAP_MS: f32 = 150.0;
}

/// Convert elapsed wall time into a frame scale for `sim::tick`.
///
/// Non-finite and negative durations count as zero; long gaps are capped at
/// [`consts::MAX_FRAME_SCALE`].
#[inline]
pub fn frame_scale(elapsed_ms: f64) -> f32 {
    let scale = elapsed_ms as f32 / consts::REFERENCE_FRAME_MS;
    if scale.is_finite() {
        scale.clamp(0.0, consts::MAX_FRAME_SCALE)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_scale() {
        assert!((frame_scale(consts::REFERENCE_FRAME_MS as f64) - 1.0).abs() < 1e-4);
        assert!((frame_scale(consts::REFERENCE_FRAME_MS as f64 * 2.0) - 2.0).abs() < 1e-4);
        assert_eq!(frame_scale(0.0), 0.0);
        assert_eq!(frame_scale(-5.0), 0.0);
        assert_eq!(frame_scale(f64::NAN), 0.0);
        assert_eq!(frame_scale(f64::INFINITY), 0.0);
        assert_eq!(frame_scale(10_000.0), consts::MAX_FRAME_SCALE);
    }
}
