//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Surfaces are resolved in level order
//! - No rendering or platform dependencies
//! - No logging per step

pub mod camera;
pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use camera::follow;
pub use collision::{resolve_horizontal, resolve_vertical};
pub use level::{COIN_RADIUS, CoinSpawn, Level, Surface, SurfaceKind};
pub use rect::{Rect, clamp, overlaps};
pub use state::{Actor, Camera, Coin, Facing, SimulationState, Status};
pub use tick::step;
