//! The turntable platform.
//!
//! A flat disk with 32 radial tick marks on the rim, rotated as a rigid
//! whole by the interaction controller. The active figure is attached as a
//! child of this node so both spin together.

use cgmath::Vector3;
use std::f32::consts::TAU;

use crate::gfx::geometry::primitives;
use crate::gfx::material::Material;
use crate::scene::{Node, Part};

pub const RADIUS: f32 = 0.5;
pub const THICKNESS: f32 = 0.05;
pub const TICK_COUNT: u32 = 32;

const TICK_HEIGHT: f32 = 0.05;
const TICK_SIDE: f32 = 0.001;

/// Builds the platform node. Deterministic, no parameters.
pub fn build() -> Node {
    let mut platform = Node::group("platform");

    let mut disk = Node::with_part(
        "disk",
        Part::new(
            primitives::cylinder(RADIUS, RADIUS, THICKNESS, 32),
            Material::from_hex(0xe0e0e0, 0.0, 0.9),
        ),
    );
    disk.transform.position.y = -0.5;
    platform.children.push(disk);

    let tick_material = Material::from_hex(0x333333, 0.0, 0.9);
    for i in 0..TICK_COUNT {
        let angle = i as f32 / TICK_COUNT as f32 * TAU;
        let mut tick = Node::with_part(
            &format!("tick_{i}"),
            Part::new(
                primitives::cuboid(TICK_SIDE, TICK_HEIGHT, TICK_SIDE),
                tick_material,
            ),
        );
        tick.transform.position =
            Vector3::new(angle.cos() * RADIUS, -0.5, angle.sin() * RADIUS);
        platform.children.push(tick);
    }

    platform
}
