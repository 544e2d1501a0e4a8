//! Surface material parameters.
//!
//! Materials are plain data here; the renderer owns their GPU residency.

/// PBR-style material parameters for one drawable part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// RGBA base color, linear 0..1.
    pub base_color: [f32; 4],
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic).
    pub metallic: f32,
    /// Surface roughness (0.0 = mirror, 1.0 = rough).
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

impl Material {
    pub fn new(base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
        }
    }

    /// Creates a material from a packed `0xRRGGBB` color.
    pub fn from_hex(hex: u32, metallic: f32, roughness: f32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self::new([r, g, b, 1.0], metallic, roughness)
    }

    /// Replaces the tint, keeping alpha and the shading parameters.
    pub fn neutralize(&mut self) {
        self.base_color[0] = 1.0;
        self.base_color[1] = 1.0;
        self.base_color[2] = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let m = Material::from_hex(0x2c5f8d, 0.0, 0.8);
        assert!((m.base_color[0] - 44.0 / 255.0).abs() < 1e-6);
        assert!((m.base_color[1] - 95.0 / 255.0).abs() < 1e-6);
        assert!((m.base_color[2] - 141.0 / 255.0).abs() < 1e-6);
        assert_eq!(m.base_color[3], 1.0);
    }

    #[test]
    fn neutralize_preserves_shading_parameters() {
        let mut m = Material::from_hex(0x8d2c5f, 0.3, 0.65);
        m.neutralize();
        assert_eq!(&m.base_color[..3], &[1.0, 1.0, 1.0]);
        assert!((m.metallic - 0.3).abs() < 1e-6);
        assert!((m.roughness - 0.65).abs() < 1e-6);
    }
}
