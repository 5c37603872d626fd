//! WebGPU rendering module
//!
//! The projector turns game state into a screen-space triangle list; the
//! pipeline uploads and draws it.

pub mod pipeline;
pub mod projector;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use projector::{Frame, project};
pub use vertex::Vertex;
