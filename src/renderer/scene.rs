//! Scene tessellation
//!
//! Turns a read-only view of the simulation into a screen-space triangle
//! list. Screen space is the viewport in world units, origin top-left.

use glam::Vec2;

use super::shapes;
use super::vertex::{Palette, Vertex};
use crate::sim::{Rect, SimulationState, SurfaceKind};

/// Segments per coin disc
const COIN_SEGMENTS: u32 = 16;
/// Eye size relative to the actor width
const EYE_SCALE: f32 = 0.2;

/// Build the frame's vertices. Drawing order: goal, surfaces, coins, actor.
pub fn build(state: &SimulationState, palette: &Palette) -> Vec<Vertex> {
    let offset = state.camera.pos;
    let mut vertices = Vec::with_capacity(6 * (state.surfaces.len() + 3));

    vertices.extend(shapes::rect(&state.goal, offset, palette.goal));

    for surface in &state.surfaces {
        let color = match surface.kind {
            SurfaceKind::Platform => palette.platform,
            SurfaceKind::Spring { .. } => palette.spring,
        };
        vertices.extend(shapes::rect(&surface.rect, offset, color));
    }

    for coin in state.coins.iter().filter(|c| !c.collected) {
        vertices.extend(shapes::circle(
            coin.pos - offset,
            coin.radius,
            palette.coin,
            COIN_SEGMENTS,
        ));
    }

    let actor = &state.actor;
    vertices.extend(shapes::rect(&actor.hitbox(), offset, palette.actor));

    // Eye on the facing side
    let eye = actor.size.x * EYE_SCALE;
    let eye_center = actor.center()
        + Vec2::new(actor.facing.sign() * actor.size.x / 4.0, -actor.size.y / 4.0);
    let eye_rect = Rect::new(eye_center.x - eye / 2.0, eye_center.y - eye / 2.0, eye, eye);
    vertices.extend(shapes::rect(&eye_rect, offset, palette.eye));

    vertices
}
