//! Platform abstraction layer
//!
//! Browser glue for the frame loop. The simulation never touches this.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AnimationLoop;
