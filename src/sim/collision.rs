//! Axis-separated collision resolution against static surfaces
//!
//! The horizontal pass is fully resolved before the vertical probe is built,
//! so the actor can never slip diagonally through a corner. Within a pass
//! every surface is tested in level order against the already-corrected
//! probe; there is no nearest-hit selection.

use super::level::{Surface, SurfaceKind};
use super::rect::overlaps;
use super::state::Actor;
use crate::consts::{CEILING_BOUNCE_EPSILON, SPRING_OVERSHOOT};

/// Resolve horizontal movement to `next_x` at the actor's current height.
///
/// Returns the corrected x. Each hit pushes the actor to the near edge of
/// the surface and zeroes horizontal velocity.
pub fn resolve_horizontal(actor: &mut Actor, mut next_x: f32, surfaces: &[Surface]) -> f32 {
    let mut probe = actor.hitbox().at(next_x, actor.pos.y);

    for surface in surfaces {
        if !overlaps(&probe, &surface.rect) {
            continue;
        }
        if actor.vel.x > 0.0 {
            next_x = surface.rect.x - actor.size.x;
        } else if actor.vel.x < 0.0 {
            next_x = surface.rect.right();
        }
        actor.vel.x = 0.0;
        probe.x = next_x;
    }

    next_x
}

/// Resolve vertical movement to `next_y` at the corrected `x`.
///
/// Returns the corrected y. Landing on a platform grounds the actor; landing
/// on a spring launches it. Hitting a ceiling leaves a small downward
/// velocity so the actor doesn't stick.
pub fn resolve_vertical(actor: &mut Actor, x: f32, mut next_y: f32, surfaces: &[Surface]) -> f32 {
    let mut probe = actor.hitbox().at(x, next_y);

    for surface in surfaces {
        if !overlaps(&probe, &surface.rect) {
            continue;
        }
        if actor.vel.y > 0.0 {
            next_y = surface.rect.y - actor.size.y;
            match surface.kind {
                SurfaceKind::Spring { strength } => {
                    actor.vel.y = -strength;
                    actor.on_ground = false;
                    next_y -= SPRING_OVERSHOOT;
                }
                SurfaceKind::Platform => {
                    actor.vel.y = 0.0;
                    actor.on_ground = true;
                }
            }
        } else if actor.vel.y < 0.0 {
            next_y = surface.rect.bottom();
            actor.vel.y = CEILING_BOUNCE_EPSILON;
        }
        probe.y = next_y;
    }

    next_y
}
