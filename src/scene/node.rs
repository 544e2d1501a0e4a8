//! Scene graph nodes.
//!
//! The graph is a strict ownership tree: every [`Node`] owns its children and
//! its drawable [`Part`]s, and a part's world transform is the composition of
//! every ancestor's local transform. There is no parent pointer and no
//! sharing, which keeps mutation plain `&mut` access.

use cgmath::{Euler, Matrix4, Rad, Vector3, Vector4};

use crate::gfx::geometry::GeometryData;
use crate::gfx::material::Material;

/// Local position / rotation / scale of a node.
///
/// Rotation is Euler angles in radians. The viewer only ever drives `y`
/// (turntable yaw), but loaded assets carry arbitrary rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Local transform matrix, composed translation * rotation * scale.
    pub fn matrix(&self) -> Matrix4<f32> {
        let rotation = Matrix4::from(Euler::new(
            Rad(self.rotation.x),
            Rad(self.rotation.y),
            Rad(self.rotation.z),
        ));
        Matrix4::from_translation(self.position)
            * rotation
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// A drawable: one mesh with one material.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub geometry: GeometryData,
    pub material: Material,
}

impl Part {
    pub fn new(geometry: GeometryData, material: Material) -> Self {
        Self { geometry, material }
    }
}

/// An entry in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub parts: Vec<Part>,
    pub children: Vec<Node>,
    pub visible: bool,
}

impl Node {
    /// Creates an empty grouping node.
    pub fn group(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            parts: Vec::new(),
            children: Vec::new(),
            visible: true,
        }
    }

    /// Creates a node carrying a single drawable part.
    pub fn with_part(name: &str, part: Part) -> Self {
        let mut node = Self::group(name);
        node.parts.push(part);
        node
    }

    /// Total number of drawable parts in this subtree.
    pub fn part_count(&self) -> usize {
        self.parts.len() + self.children.iter().map(Node::part_count).sum::<usize>()
    }

    /// Visits every node in the subtree, depth first, self included.
    pub fn visit(&self, f: &mut impl FnMut(&Node)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Mutable variant of [`Node::visit`].
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Flattens the subtree into `(world transform, part)` draw entries.
    ///
    /// A node with `visible == false` drops its whole subtree. Traversal
    /// order is deterministic (parts before children, children in insertion
    /// order); the renderer relies on that when pairing draw entries with
    /// previously synced GPU buffers.
    pub fn collect_draws<'a>(
        &'a self,
        parent: Matrix4<f32>,
        out: &mut Vec<(Matrix4<f32>, &'a Part)>,
    ) {
        if !self.visible {
            return;
        }
        let world = parent * self.transform.matrix();
        for part in &self.parts {
            out.push((world, part));
        }
        for child in &self.children {
            child.collect_draws(world, out);
        }
    }

    /// World-space axis-aligned bounds of every vertex in the subtree, or
    /// `None` if the subtree holds no geometry.
    ///
    /// Hidden nodes are included: the asset normalizer must see the same
    /// extents whether or not an accessory was hidden first.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut bounds = None;
        self.accumulate_bounds(Matrix4::from_scale(1.0), &mut bounds);
        bounds
    }

    fn accumulate_bounds(&self, parent: Matrix4<f32>, bounds: &mut Option<Aabb>) {
        let world = parent * self.transform.matrix();
        for part in &self.parts {
            for p in &part.geometry.positions {
                let v = world * Vector4::new(p[0], p[1], p[2], 1.0);
                let point = Vector3::new(v.x, v.y, v.z);
                match bounds {
                    Some(b) => b.expand(point),
                    None => *bounds = Some(Aabb::at(point)),
                }
            }
        }
        for child in &self.children {
            child.accumulate_bounds(world, bounds);
        }
    }
}

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    fn at(point: Vector3<f32>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    fn expand(&mut self, point: Vector3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::primitives;
    use std::f32::consts::FRAC_PI_2;

    fn cube_node(name: &str) -> Node {
        Node::with_part(
            name,
            Part::new(primitives::cuboid(1.0, 1.0, 1.0), Material::default()),
        )
    }

    #[test]
    fn world_transform_composes_ancestors() {
        let mut child = cube_node("child");
        child.transform.position = Vector3::new(2.0, 0.0, 0.0);

        let mut parent = Node::group("parent");
        parent.transform.rotation.y = FRAC_PI_2;
        parent.children.push(child);

        let mut draws = Vec::new();
        parent.collect_draws(Matrix4::from_scale(1.0), &mut draws);
        assert_eq!(draws.len(), 1);

        // A +x offset under a 90 degree yaw lands on -z.
        let origin = draws[0].0 * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.x.abs() < 1e-5);
        assert!((origin.z + 2.0).abs() < 1e-5);
    }

    #[test]
    fn hidden_subtree_is_not_drawn_but_is_measured() {
        let mut root = Node::group("root");
        let mut hidden = cube_node("hidden");
        hidden.visible = false;
        hidden.transform.position.y = 10.0;
        root.children.push(hidden);
        root.children.push(cube_node("shown"));

        let mut draws = Vec::new();
        root.collect_draws(Matrix4::from_scale(1.0), &mut draws);
        assert_eq!(draws.len(), 1);

        let bounds = root.bounds().unwrap();
        assert!((bounds.max.y - 10.5).abs() < 1e-5);
    }

    #[test]
    fn bounds_track_node_scale() {
        let mut node = cube_node("box");
        node.transform.scale = Vector3::new(2.0, 3.0, 2.0);
        let bounds = node.bounds().unwrap();
        assert!((bounds.height() - 3.0).abs() < 1e-5);
        assert!((bounds.size().x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn empty_group_has_no_bounds() {
        assert!(Node::group("empty").bounds().is_none());
    }
}
