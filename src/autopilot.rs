//! Seeded autopilot for headless runs
//!
//! Drives an `InputSignal` the way a keyboard would: holds right most of the
//! time, taps jump when blocked or at random, and occasionally backs off.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::input::{Action, InputSignal};
use crate::sim::state::SimulationState;

/// Chance per frame of tapping jump while grounded
const JUMP_CHANCE: f64 = 0.04;
/// Chance per frame of starting a short retreat
const RETREAT_CHANCE: f64 = 0.01;
/// Retreat duration in frames
const RETREAT_FRAMES: u32 = 12;

pub struct Autopilot {
    rng: Pcg32,
    retreat_frames: u32,
    last_x: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            retreat_frames: 0,
            last_x: f32::NAN,
        }
    }

    /// Decide this frame's keys from the current state
    pub fn drive(&mut self, state: &SimulationState, input: &mut InputSignal) {
        let actor = &state.actor;

        if self.retreat_frames > 0 {
            self.retreat_frames -= 1;
        } else if self.rng.random_bool(RETREAT_CHANCE) {
            self.retreat_frames = RETREAT_FRAMES;
        }
        let retreating = self.retreat_frames > 0;
        set_key(input, Action::MoveLeft, retreating);
        set_key(input, Action::MoveRight, !retreating);

        let blocked = actor.pos.x == self.last_x && !retreating;
        self.last_x = actor.pos.x;

        let want_jump = actor.on_ground && (blocked || self.rng.random_bool(JUMP_CHANCE));
        // Release first so every tap is a fresh edge
        if want_jump {
            input.key_up(Action::Jump);
            input.key_down(Action::Jump);
        } else {
            input.key_up(Action::Jump);
        }
    }
}

fn set_key(input: &mut InputSignal, action: Action, down: bool) {
    if down {
        input.key_down(action);
    } else {
        input.key_up(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Level;

    #[test]
    fn test_same_seed_same_inputs() {
        let state = SimulationState::new(&Level::standard());
        let mut a = Autopilot::new(7);
        let mut b = Autopilot::new(7);
        let mut input_a = InputSignal::default();
        let mut input_b = InputSignal::default();

        for _ in 0..200 {
            a.drive(&state, &mut input_a);
            b.drive(&state, &mut input_b);
            assert_eq!(input_a.left, input_b.left);
            assert_eq!(input_a.right, input_b.right);
            assert_eq!(input_a.jump_edge, input_b.jump_edge);
        }
    }

    #[test]
    fn test_blocked_and_grounded_jumps() {
        let mut state = SimulationState::new(&Level::standard());
        state.actor.on_ground = true;
        let mut pilot = Autopilot::new(1);
        pilot.retreat_frames = 0;
        let mut input = InputSignal::default();

        pilot.drive(&state, &mut input);
        input.clear_edges();
        // Same x on the next frame means the actor is stuck
        pilot.retreat_frames = 0;
        pilot.drive(&state, &mut input);
        assert!(input.jump_edge || input.left);
    }
}
