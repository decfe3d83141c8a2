//! Camera follow
//!
//! Stateless: the viewport is recomputed from the actor every step.

use glam::Vec2;

use super::rect::clamp;
use super::state::SimulationState;

/// Center the viewport on the actor, clamped to the world.
pub fn follow(state: &mut SimulationState, viewport_width: f32, viewport_height: f32) {
    let center = state.actor.center();
    let max_x = (state.world_width - viewport_width).max(0.0);
    let max_y = (state.world_height - viewport_height).max(0.0);

    state.camera.pos = Vec2::new(
        clamp(center.x - viewport_width / 2.0, 0.0, max_x),
        clamp(center.y - viewport_height / 2.0, 0.0, max_y),
    );
}
