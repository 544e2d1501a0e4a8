//! Scene container: one node tree plus lights and a background color.

pub mod lighting;
pub mod node;

pub use lighting::LightRig;
pub use node::{Aabb, Node, Part, Transform};

/// Everything one session draws.
///
/// `revision` counts structural changes (figure attached, parts added or
/// removed). The renderer compares it against the revision it last uploaded
/// buffers for and re-syncs when they differ; transform-only changes such as
/// turntable rotation do not bump it.
pub struct Scene {
    pub root: Node,
    pub lights: LightRig,
    /// Linear RGB clear color.
    pub background: [f32; 3],
    revision: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: Node::group("scene"),
            lights: LightRig::default(),
            background: [1.0, 1.0, 1.0],
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks the scene structurally changed.
    pub fn mark_structure_changed(&mut self) {
        self.revision += 1;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
