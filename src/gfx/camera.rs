//! Fixed-vantage perspective camera.
//!
//! The viewer never moves the camera; interaction rotates the turntable
//! instead. Only the aspect ratio changes, tracking the host viewport.

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};

#[rustfmt::skip]
const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective camera at a fixed vantage point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl ViewerCamera {
    /// The front vantage every session uses: slightly above chest height,
    /// looking down at the figure's midline.
    pub fn front_vantage(aspect: f32) -> Self {
        Self {
            position: Point3::new(0.0, 1.3, 3.5),
            target: Point3::new(0.0, 0.3, 0.0),
            fovy: Deg(50.0),
            aspect,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Updates the aspect ratio from viewport pixel dimensions.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y());
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}
