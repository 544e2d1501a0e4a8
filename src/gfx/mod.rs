//! Graphics layer: camera, materials, geometry, and the wgpu renderer.

pub mod camera;
pub mod geometry;
pub mod material;
pub mod rendering;

pub use camera::ViewerCamera;
pub use geometry::GeometryData;
pub use material::Material;
pub use rendering::Renderer;
