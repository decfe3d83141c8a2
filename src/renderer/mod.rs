//! WebGPU rendering module
//!
//! Reads the simulation, never writes it. `scene` builds a triangle list,
//! `pipeline` uploads and draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Palette, Vertex};
