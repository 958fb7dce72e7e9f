//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time only enters through the tick's frame scale
//! - Randomness only through an injected `GapSource`
//! - Pipes kept in spawn order (oldest first)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, any_collision, bird_hits_pipe};
pub use spawn::{FixedGaps, GapSource, SeededGaps, spawn_due, spawn_pipe};
pub use state::{Bird, CrashKind, GameEvent, GamePhase, GameState, Pipe, Playfield};
pub use tick::{TickInput, autopilot_wants_flap, resize_playfield, start_run, tick};
