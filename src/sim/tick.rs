//! Per-step simulation
//!
//! Advances a `SimulationState` by one variable timestep. Deterministic:
//! identical state, input and `dt` always produce identical results.

use super::collision::{resolve_horizontal, resolve_vertical};
use super::rect::{clamp, overlaps};
use super::state::{Facing, SimulationState, Status};
use crate::consts::*;
use crate::input::InputSignal;

/// Advance the run by `dt` seconds.
///
/// A no-op once the run is won or lost, and for a zero or negative `dt`.
/// Otherwise the pending jump edge is consumed whether or not the jump fires.
pub fn step(state: &mut SimulationState, dt: f32, input: &mut InputSignal) {
    if state.status != Status::InProgress || dt <= 0.0 {
        return;
    }
    let jump_requested = input.take_jump_edge();

    // Clock
    state.time_remaining = (state.time_remaining - dt).max(0.0);
    if state.time_remaining <= 0.0 {
        state.status = Status::Lost;
        return;
    }

    let actor = &mut state.actor;
    let was_grounded = actor.on_ground;
    actor.on_ground = false;

    // Horizontal velocity is rebuilt every step
    actor.vel.x = 0.0;
    if input.left {
        actor.vel.x -= MOVE_SPEED;
    }
    if input.right {
        actor.vel.x += MOVE_SPEED;
    }
    match (input.left, input.right) {
        (true, false) => actor.facing = Facing::Left,
        (false, true) => actor.facing = Facing::Right,
        _ => {}
    }

    if jump_requested && was_grounded {
        actor.vel.y = JUMP_IMPULSE;
    }

    actor.vel.y = (actor.vel.y + GRAVITY * dt).min(MAX_FALL_SPEED);

    let next_x = actor.pos.x + actor.vel.x * dt;
    let next_x = resolve_horizontal(actor, next_x, &state.surfaces);

    let next_y = actor.pos.y + actor.vel.y * dt;
    let next_y = resolve_vertical(actor, next_x, next_y, &state.surfaces);

    actor.pos.x = clamp(next_x, 0.0, state.world_width - actor.size.x);
    actor.pos.y = next_y.min(state.world_height + FALLOUT_MARGIN);

    if actor.pos.y > state.world_height {
        state.status = Status::Lost;
        return;
    }

    collect_coins(state);

    if overlaps(&state.actor.hitbox(), &state.goal) {
        state.status = Status::Won;
    }
}

/// Mark every coin the actor touches this step
fn collect_coins(state: &mut SimulationState) {
    let center = state.actor.center();
    let reach = state.actor.size.x.min(state.actor.size.y) / 2.0;

    for coin in state.coins.iter_mut().filter(|c| !c.collected) {
        if center.distance(coin.pos) < coin.radius + reach {
            coin.collected = true;
            state.coins_collected += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopilot::Autopilot;
    use crate::sim::level::Level;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 0.016;

    fn fresh() -> SimulationState {
        SimulationState::new(&Level::standard())
    }

    fn place(state: &mut SimulationState, x: f32, y: f32, vel: Vec2, on_ground: bool) {
        state.actor.pos = Vec2::new(x, y);
        state.actor.vel = vel;
        state.actor.on_ground = on_ground;
    }

    /// Actor standing on the first ground run (top at y = 868)
    fn standing() -> SimulationState {
        let mut state = fresh();
        place(&mut state, 200.0, 868.0 - ACTOR_HEIGHT, Vec2::ZERO, true);
        state
    }

    #[test]
    fn test_rest_on_platform_is_stable() {
        let mut state = standing();
        let before = state.actor.pos;
        step(&mut state, DT, &mut InputSignal::default());
        assert!(state.actor.on_ground);
        assert_eq!(state.actor.vel.y, 0.0);
        assert_eq!(state.actor.pos, before);
        assert_eq!(state.status, Status::InProgress);
    }

    #[test]
    fn test_spring_launch() {
        let mut state = fresh();
        // Above the reference pad at (700, 852, 60, 16), falling
        place(&mut state, 716.0, 852.0 - ACTOR_HEIGHT - 5.0, Vec2::new(0.0, 600.0), false);
        step(&mut state, DT, &mut InputSignal::default());
        assert_eq!(state.actor.vel.y, -1150.0);
        assert!(!state.actor.on_ground);
        assert_eq!(state.actor.pos.y, 852.0 - ACTOR_HEIGHT - SPRING_OVERSHOOT);
    }

    #[test]
    fn test_spring_not_retriggered_next_step() {
        let mut state = fresh();
        place(&mut state, 716.0, 852.0 - ACTOR_HEIGHT - 5.0, Vec2::new(0.0, 600.0), false);
        step(&mut state, DT, &mut InputSignal::default());
        let launched_y = state.actor.pos.y;
        step(&mut state, DT, &mut InputSignal::default());
        assert!(state.actor.pos.y < launched_y);
        assert!(state.actor.vel.y < 0.0);
    }

    #[test]
    fn test_spring_column_coins_are_reachable() {
        let mut state = fresh();
        place(&mut state, 716.0, 852.0 - ACTOR_HEIGHT - 5.0, Vec2::new(0.0, 600.0), false);
        let mut input = InputSignal::default();
        for _ in 0..80 {
            step(&mut state, DT, &mut input);
        }
        assert!(state.coins[1].collected);
        assert!(state.coins[2].collected);
        assert_eq!(state.status, Status::InProgress);
    }

    #[test]
    fn test_timeout_loses_without_moving() {
        let mut state = fresh();
        state.time_remaining = 0.05;
        let before = state.actor.clone();
        let mut input = InputSignal::with_keys(false, true);
        step(&mut state, 0.1, &mut input);
        assert_eq!(state.time_remaining, 0.0);
        assert_eq!(state.status, Status::Lost);
        assert_eq!(state.actor, before);
    }

    #[test]
    fn test_exact_timeout_loses() {
        let mut state = fresh();
        state.time_remaining = 0.25;
        step(&mut state, 0.25, &mut InputSignal::default());
        assert_eq!(state.time_remaining, 0.0);
        assert_eq!(state.status, Status::Lost);
    }

    #[test]
    fn test_reaching_goal_wins() {
        let mut state = fresh();
        place(&mut state, 2330.0, 800.0, Vec2::ZERO, false);
        step(&mut state, DT, &mut InputSignal::default());
        assert_eq!(state.status, Status::Won);
    }

    #[test]
    fn test_falling_out_loses() {
        let mut state = fresh();
        // In the pit between the first ground run and the spring
        place(&mut state, 660.0, 895.0, Vec2::new(0.0, 1000.0), false);
        step(&mut state, DT, &mut InputSignal::default());
        assert_eq!(state.status, Status::Lost);
        assert!(state.actor.pos.y > state.world_height);
        assert!(state.actor.pos.y <= state.world_height + FALLOUT_MARGIN);
    }

    #[test]
    fn test_coin_pickup_counts_once() {
        let mut state = fresh();
        let coin = state.coins[0].pos;
        place(
            &mut state,
            coin.x - ACTOR_WIDTH / 2.0,
            coin.y - ACTOR_HEIGHT / 2.0,
            Vec2::ZERO,
            false,
        );
        step(&mut state, DT, &mut InputSignal::default());
        assert!(state.coins[0].collected);
        assert_eq!(state.coins_collected, 1);

        step(&mut state, DT, &mut InputSignal::default());
        assert_eq!(state.coins_collected, 1);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut state = standing();
        let mut input = InputSignal::default();
        input.key_down(crate::input::Action::Jump);
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.vel.y, JUMP_IMPULSE + GRAVITY * DT);
        assert!(state.actor.pos.y < 868.0 - ACTOR_HEIGHT);
        assert!(!state.actor.on_ground);
        assert!(!input.jump_edge);
    }

    #[test]
    fn test_jump_edge_consumed_in_air() {
        let mut state = fresh();
        place(&mut state, 200.0, 600.0, Vec2::ZERO, false);
        let mut input = InputSignal::default();
        input.key_down(crate::input::Action::Jump);
        step(&mut state, DT, &mut input);
        assert!(state.actor.vel.y > 0.0);
        assert!(!input.jump_edge);
    }

    #[test]
    fn test_held_jump_does_not_rejump() {
        let mut state = standing();
        let mut input = InputSignal::default();
        input.key_down(crate::input::Action::Jump);
        step(&mut state, DT, &mut input);
        // Let the actor land again while the key stays down
        for _ in 0..120 {
            step(&mut state, DT, &mut input);
        }
        assert!(state.actor.on_ground);
        assert!(input.jump_held);
        assert_eq!(state.actor.vel.y, 0.0);
    }

    #[test]
    fn test_facing() {
        let mut state = standing();
        let mut input = InputSignal::with_keys(true, false);
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.facing, Facing::Left);
        assert_eq!(state.actor.vel.x, -MOVE_SPEED);

        input.right = true;
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.facing, Facing::Left);
        assert_eq!(state.actor.vel.x, 0.0);

        input.left = false;
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.facing, Facing::Right);

        input.right = false;
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.facing, Facing::Right);
        assert_eq!(state.actor.vel.x, 0.0);
    }

    #[test]
    fn test_left_world_edge_clamp() {
        let mut state = standing();
        state.actor.pos.x = 1.0;
        let mut input = InputSignal::with_keys(true, false);
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.pos.x, 0.0);
    }

    #[test]
    fn test_wall_blocks_running() {
        let mut state = fresh();
        // Third ground run, just left of the wall at x = 1620
        place(&mut state, 1620.0 - ACTOR_WIDTH - 1.0, 868.0 - ACTOR_HEIGHT, Vec2::ZERO, true);
        let mut input = InputSignal::with_keys(false, true);
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.pos.x, 1620.0 - ACTOR_WIDTH);
        assert_eq!(state.actor.vel.x, 0.0);
        assert!(state.actor.on_ground);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut state = standing();
        let before = state.clone();
        let mut input = InputSignal::with_keys(false, true);
        step(&mut state, 0.0, &mut input);
        assert_eq!(state, before);
        assert!(state.actor.on_ground);
    }

    #[test]
    fn test_jump_after_zero_dt_step() {
        let mut state = standing();
        let mut input = InputSignal::default();
        input.key_down(crate::input::Action::Jump);
        // Repeated timestamp: the edge survives until a real step
        step(&mut state, 0.0, &mut input);
        assert!(input.jump_edge);
        step(&mut state, DT, &mut input);
        assert_eq!(state.actor.vel.y, JUMP_IMPULSE + GRAVITY * DT);
        assert!(!state.actor.on_ground);
    }

    #[test]
    fn test_terminal_step_is_noop() {
        let mut state = fresh();
        state.status = Status::Won;
        let before = state.clone();
        let mut input = InputSignal::with_keys(false, true);
        step(&mut state, DT, &mut input);
        assert_eq!(state, before);
    }

    #[test]
    fn test_determinism() {
        let mut a = fresh();
        let mut b = fresh();
        let mut pilot_a = Autopilot::new(42);
        let mut pilot_b = Autopilot::new(42);
        let mut input_a = InputSignal::default();
        let mut input_b = InputSignal::default();

        for _ in 0..600 {
            pilot_a.drive(&a, &mut input_a);
            pilot_b.drive(&b, &mut input_b);
            step(&mut a, DT, &mut input_a);
            step(&mut b, DT, &mut input_b);
        }

        assert_eq!(a, b);
    }

    fn arb_input() -> impl Strategy<Value = (bool, bool, bool, f32)> {
        (any::<bool>(), any::<bool>(), any::<bool>(), 0.0f32..MAX_FRAME_DELTA)
    }

    proptest! {
        #[test]
        fn prop_step_invariants(frames in prop::collection::vec(arb_input(), 1..400)) {
            let mut state = fresh();
            let mut input = InputSignal::default();

            for (left, right, jump, dt) in frames {
                input.left = left;
                input.right = right;
                if jump {
                    input.key_down(crate::input::Action::Jump);
                } else {
                    input.key_up(crate::input::Action::Jump);
                }

                let before = state.clone();
                step(&mut state, dt, &mut input);

                prop_assert!(!input.jump_edge || before.status.is_terminal() || dt <= 0.0);
                prop_assert!(state.time_remaining <= before.time_remaining);
                prop_assert!(state.time_remaining >= 0.0);
                prop_assert!(state.coins_collected >= before.coins_collected);
                prop_assert_eq!(
                    state.coins_collected as usize,
                    state.coins.iter().filter(|c| c.collected).count()
                );
                for (now, was) in state.coins.iter().zip(&before.coins) {
                    prop_assert!(now.collected || !was.collected);
                }
                if before.status.is_terminal() || dt <= 0.0 {
                    prop_assert_eq!(&state, &before);
                } else {
                    prop_assert!(state.actor.pos.x >= 0.0);
                    prop_assert!(state.actor.pos.x <= state.world_width - state.actor.size.x);
                    prop_assert!(state.actor.pos.is_finite());
                    prop_assert!(state.actor.vel.is_finite());
                }
            }
        }
    }
}
