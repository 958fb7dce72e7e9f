//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use super::collision::any_collision;
use super::spawn::{GapSource, spawn_due, spawn_pipe};
use super::state::{Bird, CrashKind, GameEvent, GamePhase, GameState, Playfield};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (Space/tap/click) queued since the last tick
    pub flap: bool,
}

/// Reset the run and enter `Running` (idle → running, ended → running)
pub fn start_run(state: &mut GameState) {
    state.bird = Bird::centered(&state.tuning, &state.playfield);
    state.pipes.clear();
    state.score = 0;
    state.time_ticks = 0;
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::Started);
    log::info!(
        "Run started ({}x{} playfield)",
        state.playfield.width,
        state.playfield.height
    );
}

/// Enter `Ended`. Does not touch the best score; the session owns that.
fn end_run(state: &mut GameState, cause: CrashKind) {
    state.phase = GamePhase::Ended;
    state.events.push(GameEvent::Crashed(cause));
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Run ended by {:?} after {} ticks, score {}",
        cause,
        state.time_ticks,
        state.score
    );
}

/// Advance the game state by one frame.
///
/// `frame_scale` is the elapsed time in reference frames (see
/// [`crate::frame_scale`]); every rate is multiplied by it. Does nothing
/// unless the state is `Running`.
pub fn tick<G: GapSource + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    frame_scale: f32,
    gaps: &mut G,
) {
    if state.phase != GamePhase::Running {
        return;
    }
    let dt = frame_scale;
    state.time_ticks += 1;

    // Bird: a flap replaces the velocity, then gravity integrates
    if input.flap {
        state.bird.vel = state.tuning.flap_strength;
        state.events.push(GameEvent::Flapped);
    }
    state.bird.vel += state.tuning.gravity * dt;
    state.bird.y += state.bird.vel * dt;

    if !state.bird.in_bounds(&state.playfield) {
        end_run(state, CrashKind::Bounds);
        return;
    }

    // Scroll pipes
    let speed = state.tuning.pipe_speed * dt;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }

    // Collision ends the run, but only after scoring and cleanup
    let crashed = any_collision(&state.bird, &state.pipes);

    // Score pipes the bird has fully passed
    let bird_x = state.bird.x;
    for pipe in &mut state.pipes {
        if !pipe.scored && pipe.trailing_edge() < bird_x {
            pipe.scored = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
            log::debug!("Passed pipe {}, score {}", pipe.id, state.score);
        }
    }

    // Drop pipes that left the playfield, then spawn
    state.pipes.retain(|p| p.trailing_edge() >= 0.0);
    if spawn_due(state) {
        spawn_pipe(state, gaps);
    }

    if crashed {
        end_run(state, CrashKind::Pipe);
    }
}

/// Change the playfield width, scaling pipe positions to keep the layout.
/// The width is clamped to the minimum playfield size first.
pub fn resize_playfield(state: &mut GameState, new_width: f32) {
    let old_width = state.playfield.width;
    let playfield = Playfield {
        width: new_width,
        height: state.playfield.height,
    }
    .clamped();
    let ratio = playfield.width / old_width;

    for pipe in &mut state.pipes {
        pipe.x *= ratio;
    }
    state.playfield = playfield;
    log::debug!("Playfield resized {} -> {}", old_width, playfield.width);
}

/// Demo-mode pilot: flap when the bird sinks below the middle of the next gap
/// and is not already climbing.
pub fn autopilot_wants_flap(state: &GameState) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    let bird = &state.bird;
    let target = state
        .next_pipe()
        .map(|p| p.gap_center)
        .unwrap_or(state.playfield.height / 2.0);
    let bird_center = bird.y + bird.size / 2.0;
    // Look one frame ahead so the flap lands before the bird drops too far
    let predicted = bird_center + bird.vel + state.tuning.gravity;
    predicted > target + bird.size / 2.0 && bird.vel >= 0.0
}
