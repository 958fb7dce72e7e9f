//! Game state and core simulation types
//!
//! Everything the render surface reads between ticks lives here.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the first flap
    #[default]
    Idle,
    /// Active gameplay (the only phase that ticks)
    Running,
    /// Run ended, waiting for restart
    Ended,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashKind {
    /// Bird left the playfield vertically
    Bounds,
    /// Bird hit a pipe's solid region
    Pipe,
}

/// Notifications for the host (HUD, hit flash, storage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    Crashed(CrashKind),
    GameOver { score: u32 },
    NewBest { score: u32 },
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYFIELD_WIDTH,
            height: DEFAULT_PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }.clamped()
    }

    /// Fit the playfield into a browser viewport, leaving room for the page
    pub fn fit_viewport(viewport_width: f32, viewport_height: f32) -> Self {
        Self::new(
            DEFAULT_PLAYFIELD_WIDTH.min(viewport_width - VIEWPORT_MARGIN_X),
            DEFAULT_PLAYFIELD_HEIGHT.min(viewport_height - VIEWPORT_MARGIN_Y),
        )
    }

    /// Clamp to a sane size: non-finite dimensions fall back to the default
    /// layout, anything smaller than the minimum is raised to it
    pub fn clamped(self) -> Self {
        fn sane(value: f32, default: f32, min: f32) -> f32 {
            if value.is_finite() {
                value.max(min)
            } else {
                default
            }
        }
        Self {
            width: sane(self.width, DEFAULT_PLAYFIELD_WIDTH, MIN_PLAYFIELD_WIDTH),
            height: sane(self.height, DEFAULT_PLAYFIELD_HEIGHT, MIN_PLAYFIELD_HEIGHT),
        }
    }
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Fixed horizontal lane (left edge)
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Vertical velocity (pixels per frame, positive = down)
    pub vel: f32,
    /// Hitbox edge length
    pub size: f32,
}

impl Bird {
    /// Bird at rest in the vertical center of the playfield
    pub fn centered(tuning: &Tuning, playfield: &Playfield) -> Self {
        Self {
            x: tuning.bird_x,
            y: playfield.height / 2.0,
            vel: 0.0,
            size: tuning.bird_size,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    /// Whether the bird is inside the valid vertical band
    #[inline]
    pub fn in_bounds(&self, playfield: &Playfield) -> bool {
        self.y >= 0.0 && self.y <= playfield.height - self.size
    }

    /// Nose tilt for rendering (degrees, positive = nose down)
    pub fn tilt_degrees(&self) -> f32 {
        (self.vel * TILT_PER_VELOCITY).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
    }
}

/// A pipe pair with a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub gap_center: f32,
    pub gap_size: f32,
    pub width: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl Pipe {
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_size / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_size / 2.0
    }

    /// Right edge, the last part of the pipe the bird passes
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub playfield: Playfield,
    pub tuning: Tuning,
    pub bird: Bird,
    /// Active pipes, oldest (leftmost) first
    pub pipes: Vec<Pipe>,
    /// Pipes passed this run
    pub score: u32,
    /// Best score known to the session (persisted outside the simulation)
    pub best_score: u32,
    /// Ticks simulated this run
    pub time_ticks: u64,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next pipe ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game state
    pub fn new(tuning: Tuning, playfield: Playfield) -> Self {
        let playfield = playfield.clamped();
        Self {
            phase: GamePhase::Idle,
            bird: Bird::centered(&tuning, &playfield),
            playfield,
            tuning,
            pipes: Vec::new(),
            score: 0,
            best_score: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new pipe ID
    pub fn next_pipe_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Best score as the HUD shows it (a running score can exceed the record)
    pub fn display_best(&self) -> u32 {
        self.score.max(self.best_score)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Most recently spawned pipe
    pub fn newest_pipe(&self) -> Option<&Pipe> {
        self.pipes.last()
    }

    /// Oldest pipe the bird has not yet fully passed
    pub fn next_pipe(&self) -> Option<&Pipe> {
        self.pipes
            .iter()
            .find(|p| p.trailing_edge() >= self.bird.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playfield_clamps_degenerate_sizes() {
        let pf = Playfield::new(0.0, -50.0);
        assert_eq!(pf.width, MIN_PLAYFIELD_WIDTH);
        assert_eq!(pf.height, MIN_PLAYFIELD_HEIGHT);

        let pf = Playfield::new(f32::NAN, f32::NEG_INFINITY);
        assert_eq!(pf, Playfield::default());

        let pf = Playfield::new(1000.0, f32::INFINITY);
        assert_eq!(pf.height, DEFAULT_PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_fit_viewport() {
        // Large screen: capped at the default layout
        let pf = Playfield::fit_viewport(1920.0, 1080.0);
        assert_eq!(pf, Playfield::new(1000.0, 600.0));

        // Phone portrait: margins applied, then clamped
        let pf = Playfield::fit_viewport(390.0, 844.0);
        assert_eq!(pf.width, 370.0);
        assert_eq!(pf.height, 600.0);

        let pf = Playfield::fit_viewport(100.0, 100.0);
        assert_eq!(pf.width, MIN_PLAYFIELD_WIDTH);
        assert_eq!(pf.height, MIN_PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_bird_tilt_clamped() {
        let tuning = Tuning::default();
        let mut bird = Bird::centered(&tuning, &Playfield::default());
        bird.vel = 2.0;
        assert_eq!(bird.tilt_degrees(), 8.0);
        bird.vel = -20.0;
        assert_eq!(bird.tilt_degrees(), -MAX_TILT_DEGREES);
        bird.vel = 20.0;
        assert_eq!(bird.tilt_degrees(), MAX_TILT_DEGREES);
    }

    #[test]
    fn test_pipe_gap_edges() {
        let pipe = Pipe {
            id: 1,
            x: 100.0,
            gap_center: 300.0,
            gap_size: 150.0,
            width: 70.0,
            scored: false,
        };
        assert_eq!(pipe.gap_top(), 225.0);
        assert_eq!(pipe.gap_bottom(), 375.0);
        assert_eq!(pipe.trailing_edge(), 170.0);
    }

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let state = GameState::new(Tuning::default(), Playfield::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.bird.y, 300.0);
        assert_eq!(state.bird.vel, 0.0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.score, 0);
    }
}
