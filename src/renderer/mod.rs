//! WebGPU rendering module
//!
//! Consumes read-only simulation snapshots; never writes back into the sim.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
