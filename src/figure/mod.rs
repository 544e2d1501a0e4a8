//! Figures: the characters that stand on the turntable.
//!
//! A figure is a subtree of the scene graph attached as a child of the
//! platform, so figure and platform rotate together. One figure comes from an
//! external GLB asset ([`asset`]), the other is assembled from primitives
//! ([`humanoid`]).

pub mod asset;
pub mod humanoid;
pub mod platform;

use crate::scene::Node;

/// Y coordinate of the platform's top face; every figure's lowest point
/// rests exactly here.
pub const PLATFORM_SURFACE_Y: f32 = -0.475;

/// Body proportions and clothing tint for the procedural figure.
///
/// The two variants share every part and offset; they differ only in four
/// torso widths and the clothing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyVariant {
    Male,
    Female,
}

impl BodyVariant {
    pub fn clothing_tint(self) -> u32 {
        match self {
            BodyVariant::Male => 0x2c5f8d,
            BodyVariant::Female => 0x8d2c5f,
        }
    }

    pub fn chest_width(self) -> f32 {
        match self {
            BodyVariant::Male => 0.22,
            BodyVariant::Female => 0.19,
        }
    }

    pub fn chest_depth(self) -> f32 {
        match self {
            BodyVariant::Male => 0.15,
            BodyVariant::Female => 0.14,
        }
    }

    pub fn abdomen_width(self) -> f32 {
        match self {
            BodyVariant::Male => 0.20,
            BodyVariant::Female => 0.17,
        }
    }

    pub fn hips_width(self) -> f32 {
        match self {
            BodyVariant::Male => 0.20,
            BodyVariant::Female => 0.22,
        }
    }
}

/// How a session obtains its figure.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureSource {
    /// Fetch and normalize an external GLB asset.
    ExternalAsset { uri: String },
    /// Build the procedural humanoid synchronously.
    Procedural(BodyVariant),
}

/// Translates the figure vertically so its lowest vertex rests on the
/// platform surface. Applied once, when the figure is attached.
pub fn rest_on_platform(figure: &mut Node) {
    if let Some(bounds) = figure.bounds() {
        figure.transform.position.y += PLATFORM_SURFACE_Y - bounds.min.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_puts_lowest_point_on_the_surface() {
        let mut figure = humanoid::build(BodyVariant::Female);
        rest_on_platform(&mut figure);
        let bounds = figure.bounds().unwrap();
        assert!((bounds.min.y - PLATFORM_SURFACE_Y).abs() < 1e-4);
    }

    #[test]
    fn resting_an_empty_group_is_a_no_op() {
        let mut empty = Node::group("empty");
        rest_on_platform(&mut empty);
        assert_eq!(empty.transform.position.y, 0.0);
    }
}
