//! Host-facing session controller
//!
//! Owns the game state, queues input between frames, and carries the best
//! score to and from the store. Hosts call the discrete handlers (`flap`,
//! `start`, `restart`, `resize`) from their event listeners and `tick` once
//! per animation frame; `tick` reports whether another frame is wanted.

use crate::frame_scale;
use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::sim::{
    GameEvent, GamePhase, GameState, GapSource, Playfield, TickInput, resize_playfield,
    start_run, tick,
};
use crate::tuning::Tuning;

/// One player's game: state, pending input, best score and gap source
pub struct Session<S: ScoreStore, G: GapSource> {
    state: GameState,
    input: TickInput,
    best: BestScore<S>,
    gaps: G,
    /// Demo mode: the autopilot supplies flaps
    pub autopilot: bool,
}

impl<S: ScoreStore, G: GapSource> Session<S, G> {
    pub fn new(tuning: Tuning, playfield: Playfield, store: S, gaps: G) -> Self {
        let best = BestScore::new(store);
        let mut state = GameState::new(tuning, playfield);
        state.best_score = best.value();
        Self {
            state,
            input: TickInput::default(),
            best,
            gaps,
            autopilot: false,
        }
    }

    /// Idle: start a run. Running: queue an impulse for the next tick.
    /// Ended: ignored (restart is explicit).
    pub fn flap(&mut self) {
        match self.state.phase {
            GamePhase::Idle => self.begin(),
            GamePhase::Running => self.input.flap = true,
            GamePhase::Ended => {}
        }
    }

    /// Start from the idle or ended screen; no-op while running
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Running {
            self.begin();
        }
    }

    /// Same as `start`, named for the game-over screen
    pub fn restart(&mut self) {
        self.start();
    }

    fn begin(&mut self) {
        self.input = TickInput::default();
        self.state.best_score = self.best.refresh();
        start_run(&mut self.state);
    }

    /// Advance one frame. Returns true while the run continues, i.e. when
    /// the host should schedule another frame.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        if self.autopilot && crate::sim::autopilot_wants_flap(&self.state) {
            self.input.flap = true;
        }

        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, frame_scale(elapsed_ms), &mut self.gaps);

        if self.state.phase == GamePhase::Ended {
            self.finish_run();
        }
        self.state.is_running()
    }

    fn finish_run(&mut self) {
        let score = self.state.score;
        if self.best.record(score) {
            self.state.events.push(GameEvent::NewBest { score });
        }
        self.state.best_score = self.best.value();
    }

    /// Playfield width changed (viewport resize)
    pub fn resize(&mut self, new_width: f32) {
        resize_playfield(&mut self.state, new_width);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn best(&self) -> &BestScore<S> {
        &self.best
    }

    /// Mutable state access for hosts and tests that stage positions
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
