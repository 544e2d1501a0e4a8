//! Procedural humanoid figure.
//!
//! Builds a fixed 21-part jointless figure from spheres, cylinders, and
//! boxes. Every offset is an absolute position along the vertical body axis;
//! paired limbs mirror each other across the x=0 plane. Construction is
//! fully deterministic: the same [`BodyVariant`] always yields the same
//! geometry and materials.

use cgmath::Vector3;

use super::BodyVariant;
use crate::gfx::geometry::{primitives, GeometryData};
use crate::gfx::material::Material;
use crate::scene::{Node, Part};

fn skin() -> Material {
    Material::new([1.0, 1.0, 1.0, 1.0], 0.1, 0.7)
}

fn clothing(variant: BodyVariant) -> Material {
    Material::from_hex(variant.clothing_tint(), 0.0, 0.8)
}

fn part_at(name: &str, geometry: GeometryData, material: Material, position: Vector3<f32>) -> Node {
    let mut node = Node::with_part(name, Part::new(geometry, material));
    node.transform.position = position;
    node
}

/// Adds a mirrored left/right pair. `offset.x` is the right-side offset; the
/// left side gets its negation, same geometry and material.
fn mirrored_pair(
    figure: &mut Node,
    name: &str,
    geometry: GeometryData,
    material: Material,
    offset: Vector3<f32>,
) {
    figure.children.push(part_at(
        &format!("left_{name}"),
        geometry.clone(),
        material,
        Vector3::new(-offset.x, offset.y, offset.z),
    ));
    figure.children.push(part_at(
        &format!("right_{name}"),
        geometry,
        material,
        offset,
    ));
}

/// Builds the 21-part figure for a body variant.
pub fn build(variant: BodyVariant) -> Node {
    let skin = skin();
    let clothing = clothing(variant);

    let mut figure = Node::group("humanoid");

    // Head is a sphere stretched into an ellipsoid.
    let mut head_geometry = primitives::sphere(0.13, 32, 32);
    head_geometry.scale(1.0, 1.15, 1.0);
    figure.children.push(part_at(
        "head",
        head_geometry,
        skin,
        Vector3::new(0.0, 1.68, 0.0),
    ));

    figure.children.push(part_at(
        "neck",
        primitives::cylinder(0.055, 0.065, 0.12, 16),
        skin,
        Vector3::new(0.0, 1.56, 0.0),
    ));

    figure.children.push(part_at(
        "chest",
        primitives::cuboid(variant.chest_width(), 0.35, variant.chest_depth()),
        clothing,
        Vector3::new(0.0, 1.3, 0.0),
    ));

    mirrored_pair(
        &mut figure,
        "shoulder",
        primitives::sphere(0.08, 16, 16),
        clothing,
        Vector3::new(0.18, 1.42, 0.0),
    );

    figure.children.push(part_at(
        "abdomen",
        primitives::cuboid(variant.abdomen_width(), 0.25, 0.13),
        clothing,
        Vector3::new(0.0, 1.0, 0.0),
    ));

    figure.children.push(part_at(
        "hips",
        primitives::cuboid(variant.hips_width(), 0.18, 0.14),
        clothing,
        Vector3::new(0.0, 0.78, 0.0),
    ));

    mirrored_pair(
        &mut figure,
        "upper_arm",
        primitives::cylinder(0.045, 0.04, 0.28, 16),
        skin,
        Vector3::new(0.24, 1.28, 0.0),
    );

    mirrored_pair(
        &mut figure,
        "elbow",
        primitives::sphere(0.042, 12, 12),
        skin,
        Vector3::new(0.24, 1.14, 0.0),
    );

    mirrored_pair(
        &mut figure,
        "forearm",
        primitives::cylinder(0.038, 0.035, 0.26, 16),
        skin,
        Vector3::new(0.24, 0.88, 0.0),
    );

    mirrored_pair(
        &mut figure,
        "hand",
        primitives::cuboid(0.06, 0.1, 0.04),
        skin,
        Vector3::new(0.24, 0.7, 0.0),
    );

    mirrored_pair(
        &mut figure,
        "thigh",
        primitives::cylinder(0.075, 0.065, 0.42, 16),
        clothing,
        Vector3::new(0.09, 0.48, 0.0),
    );

    mirrored_pair(
        &mut figure,
        "knee",
        primitives::sphere(0.055, 12, 12),
        skin,
        Vector3::new(0.09, 0.27, 0.0),
    );

    mirrored_pair(
        &mut figure,
        "shin",
        primitives::cylinder(0.055, 0.048, 0.4, 16),
        clothing,
        Vector3::new(0.09, 0.07, 0.0),
    );

    // Feet sit slightly forward of the leg axis.
    mirrored_pair(
        &mut figure,
        "foot",
        primitives::cuboid(0.08, 0.06, 0.18),
        skin,
        Vector3::new(0.09, -0.14, 0.04),
    );

    figure
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn both_variants_have_21_parts() {
        assert_eq!(build(BodyVariant::Male).part_count(), 21);
        assert_eq!(build(BodyVariant::Female).part_count(), 21);
    }

    #[test]
    fn mirrored_pairs_sum_to_zero_in_x() {
        for variant in [BodyVariant::Male, BodyVariant::Female] {
            let figure = build(variant);
            let mut pair_sums: HashMap<String, (f32, usize)> = HashMap::new();
            figure.visit(&mut |node| {
                if let Some(base) = node
                    .name
                    .strip_prefix("left_")
                    .or_else(|| node.name.strip_prefix("right_"))
                {
                    let entry = pair_sums.entry(base.to_string()).or_default();
                    entry.0 += node.transform.position.x;
                    entry.1 += 1;
                }
            });
            assert_eq!(pair_sums.len(), 8);
            for (name, (sum, count)) in pair_sums {
                assert_eq!(count, 2, "unpaired part {name}");
                assert!(sum.abs() < 1e-6, "pair {name} is not mirrored");
            }
        }
    }

    #[test]
    fn mirrored_pairs_share_geometry_and_material() {
        let figure = build(BodyVariant::Male);
        for base in ["shoulder", "upper_arm", "elbow", "forearm", "hand", "thigh", "knee", "shin", "foot"] {
            let find = |name: &str| {
                figure
                    .children
                    .iter()
                    .find(|n| n.name == name)
                    .unwrap_or_else(|| panic!("missing {name}"))
            };
            let left = find(&format!("left_{base}"));
            let right = find(&format!("right_{base}"));
            assert_eq!(left.parts, right.parts);
            assert_eq!(left.transform.position.y, right.transform.position.y);
            assert_eq!(left.transform.position.z, right.transform.position.z);
        }
    }

    #[test]
    fn construction_is_deterministic() {
        assert_eq!(build(BodyVariant::Female), build(BodyVariant::Female));
        assert_eq!(build(BodyVariant::Male), build(BodyVariant::Male));
    }

    #[test]
    fn variants_differ_only_in_widths_and_tint() {
        let male = build(BodyVariant::Male);
        let female = build(BodyVariant::Female);

        let names = |figure: &Node| -> Vec<String> {
            figure.children.iter().map(|n| n.name.clone()).collect()
        };
        assert_eq!(names(&male), names(&female));

        let chest = |figure: &Node| figure.children.iter().find(|n| n.name == "chest").unwrap().clone();
        assert_ne!(
            chest(&male).parts[0].material.base_color,
            chest(&female).parts[0].material.base_color
        );
        assert_ne!(chest(&male).parts[0].geometry, chest(&female).parts[0].geometry);

        // Skin parts are identical across variants.
        let head = |figure: &Node| figure.children.iter().find(|n| n.name == "head").unwrap().clone();
        assert_eq!(head(&male), head(&female));
    }

    #[test]
    fn wider_hips_on_the_female_variant() {
        assert!(BodyVariant::Female.hips_width() > BodyVariant::Male.hips_width());
        assert!(BodyVariant::Male.chest_width() > BodyVariant::Female.chest_width());
    }
}
