//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into flat-colored triangles in field
//! pixels, then drawn with a single pass-through pipeline.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::build_frame;
pub use pipeline::RenderState;
pub use vertex::Vertex;
