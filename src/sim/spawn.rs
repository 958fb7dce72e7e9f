//! Pipe spawning
//!
//! Gap placement is the only randomness in the game, so it sits behind
//! [`GapSource`]; everything else in a tick is a pure function of input.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameState, Pipe};

/// Supplies gap centers for new pipes
pub trait GapSource {
    /// Next gap center, nominally uniform in `[min, max]` (`min <= max`)
    fn next_gap_center(&mut self, min: f32, max: f32) -> f32;
}

/// Seeded PCG gap placement (reproducible per seed)
#[derive(Debug, Clone)]
pub struct SeededGaps {
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for SeededGaps {
    fn next_gap_center(&mut self, min: f32, max: f32) -> f32 {
        self.rng.random_range(min..=max)
    }
}

/// Scripted gap centers, returned verbatim (bounds are ignored).
/// The last value repeats once the script runs out.
#[derive(Debug, Clone)]
pub struct FixedGaps {
    script: VecDeque<f32>,
    last: f32,
}

impl FixedGaps {
    pub fn new(centers: impl IntoIterator<Item = f32>) -> Self {
        let script: VecDeque<f32> = centers.into_iter().collect();
        let last = script.back().copied().unwrap_or(0.0);
        Self { script, last }
    }

    /// Every pipe gets the same gap center
    pub fn constant(center: f32) -> Self {
        Self::new([center])
    }
}

impl GapSource for FixedGaps {
    fn next_gap_center(&mut self, _min: f32, _max: f32) -> f32 {
        self.script.pop_front().unwrap_or(self.last)
    }
}

/// Whether a new pipe is due: none active, or the newest has moved more
/// than the spawn spacing away from the right edge
pub fn spawn_due(state: &GameState) -> bool {
    let spacing = state.tuning.spawn_spacing(state.playfield.width);
    match state.newest_pipe() {
        None => true,
        Some(pipe) => pipe.x < state.playfield.width - spacing,
    }
}

/// Append a fresh pipe at the right edge of the playfield
pub fn spawn_pipe<G: GapSource + ?Sized>(state: &mut GameState, gaps: &mut G) {
    let gap_size = state.tuning.gap_size;
    let height = state.playfield.height;
    let (min, max) = (gap_size, height - gap_size);
    let gap_center = if min <= max {
        gaps.next_gap_center(min, max)
    } else {
        // Playfield too short for the usual range: keep the gap centered
        height / 2.0
    };

    let pipe = Pipe {
        id: state.next_pipe_id(),
        x: state.playfield.width,
        gap_center,
        gap_size,
        width: state.tuning.pipe_width,
        scored: false,
    };
    log::trace!(
        "Spawned pipe {} (gap center {:.1}, {} active)",
        pipe.id,
        pipe.gap_center,
        state.pipes.len() + 1
    );
    state.pipes.push(pipe);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Playfield;
    use crate::tuning::Tuning;

    #[test]
    fn test_seeded_gaps_stay_in_range_and_repeat() {
        let mut a = SeededGaps::new(42);
        let mut b = SeededGaps::new(42);
        for _ in 0..200 {
            let x = a.next_gap_center(150.0, 450.0);
            assert!((150.0..=450.0).contains(&x));
            assert_eq!(x, b.next_gap_center(150.0, 450.0));
        }
    }

    #[test]
    fn test_fixed_gaps_script_then_repeat() {
        let mut gaps = FixedGaps::new([100.0, 200.0]);
        assert_eq!(gaps.next_gap_center(0.0, 1.0), 100.0);
        assert_eq!(gaps.next_gap_center(0.0, 1.0), 200.0);
        assert_eq!(gaps.next_gap_center(0.0, 1.0), 200.0);
    }

    #[test]
    fn test_spawn_at_right_edge() {
        let mut state = GameState::new(Tuning::default(), Playfield::default());
        assert!(spawn_due(&state));
        spawn_pipe(&mut state, &mut FixedGaps::constant(300.0));

        let pipe = &state.pipes[0];
        assert_eq!(pipe.x, state.playfield.width);
        assert_eq!(pipe.gap_center, 300.0);
        assert_eq!(pipe.gap_size, 150.0);
        assert!(!pipe.scored);
        assert!(!spawn_due(&state));
    }

    #[test]
    fn test_spawn_due_after_spacing() {
        let mut state = GameState::new(Tuning::default(), Playfield::default());
        spawn_pipe(&mut state, &mut FixedGaps::constant(300.0));
        // Default 1000px playfield: spacing is 400px
        state.pipes[0].x = 600.0;
        assert!(!spawn_due(&state));
        state.pipes[0].x = 599.0;
        assert!(spawn_due(&state));
    }

    #[test]
    fn test_short_playfield_centers_gap() {
        let tuning = Tuning::default();
        let mut state = GameState::new(tuning, Playfield::new(400.0, 250.0));
        // 250 < 2 * 150, so the random range is empty
        spawn_pipe(&mut state, &mut SeededGaps::new(1));
        assert_eq!(state.pipes[0].gap_center, 125.0);
    }
}
