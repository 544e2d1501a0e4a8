//! Scene lighting.
//!
//! One ambient term plus three directional lights (key, fill, back) so the
//! figure reads correctly at every turntable angle.

use cgmath::{InnerSpace, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
}

/// Directional light aimed at the origin from `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit direction from the origin toward the light.
    pub fn direction(&self) -> Vector3<f32> {
        self.position.normalize()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: [DirectionalLight; 3],
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight { intensity: 0.6 },
            directional: [
                // Key
                DirectionalLight {
                    position: Vector3::new(5.0, 10.0, 5.0),
                    intensity: 1.0,
                },
                // Fill
                DirectionalLight {
                    position: Vector3::new(-5.0, 5.0, -5.0),
                    intensity: 0.4,
                },
                // Back
                DirectionalLight {
                    position: Vector3::new(0.0, 5.0, -5.0),
                    intensity: 0.3,
                },
            ],
        }
    }
}
