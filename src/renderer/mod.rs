//! WebGPU rendering module
//!
//! The simulation hands over a `GameState`; shapes turn it into colored
//! triangles and the pipeline draws them.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
