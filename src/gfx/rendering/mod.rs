//! GPU rendering: vertex format, shader, and the per-session renderer.

mod renderer;
mod vertex;

pub use renderer::Renderer;
pub use vertex::Vertex3D;
