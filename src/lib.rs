//! Spring Runner - a timed coin-collecting platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, camera, game state)
//! - `input`: Abstract input signal and jump edge detection
//! - `driver`: Per-frame orchestration and HUD snapshot publication
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser animation-frame loop and clock

pub mod autopilot;
pub mod best_time;
pub mod driver;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use best_time::BestTime;
pub use driver::{FrameDriver, HudSnapshot};
pub use input::{Action, InputSignal};
pub use settings::{Settings, Toggle};

/// Game configuration constants
///
/// These define the level's difficulty and are fixed at compile time.
pub mod consts {
    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 2400.0;
    pub const WORLD_HEIGHT: f32 = 900.0;

    /// Default viewport (CSS pixels) used until the host reports a real size
    pub const VIEWPORT_WIDTH: f32 = 960.0;
    pub const VIEWPORT_HEIGHT: f32 = 540.0;

    /// Seconds available to reach the goal
    pub const TIME_BUDGET: f32 = 60.0;

    /// Horizontal speed while a direction is held (pixels/s)
    pub const MOVE_SPEED: f32 = 300.0;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -760.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Terminal downward velocity
    pub const MAX_FALL_SPEED: f32 = 1200.0;

    /// How far below the world the actor may be placed before the fall check
    pub const FALLOUT_MARGIN: f32 = 200.0;
    /// Velocity left after bonking a ceiling, so the actor doesn't stick to it
    pub const CEILING_BOUNCE_EPSILON: f32 = 1.0;
    /// Extra lift after a spring launch so the pad isn't re-triggered next step
    pub const SPRING_OVERSHOOT: f32 = 2.0;

    /// Actor hitbox
    pub const ACTOR_WIDTH: f32 = 28.0;
    pub const ACTOR_HEIGHT: f32 = 40.0;

    /// Largest step the frame driver will feed the simulation (seconds)
    pub const MAX_FRAME_DELTA: f32 = 1.0 / 30.0;
}
