//! External asset loading and normalization.
//!
//! Fetches a binary glTF character by URI, converts its node hierarchy into
//! the viewer's scene graph, and normalizes it to the viewer's conventions:
//! known accessory parts hidden, materials neutralized to a plain base tint,
//! and the whole figure scaled and translated so it stands 1.8 units tall
//! with its feet on the platform surface.
//!
//! Loading fails soft. [`spawn`] resolves to `None` on any fetch or parse
//! error; the failure is logged and the viewer keeps running with an empty
//! platform.

use cgmath::{Euler, Quaternion, Vector3};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use super::PLATFORM_SURFACE_Y;
use crate::error::AssetError;
use crate::gfx::geometry::GeometryData;
use crate::gfx::material::Material;
use crate::scene::{Node, Part};

/// Figures are scaled so their vertical extent equals this.
pub const TARGET_HEIGHT: f32 = 1.8;

/// Node names hidden after load. Accessories baked into the asset that the
/// viewer does not want to show.
const HIDDEN_PART_NAMES: &[&str] = &["Wolf3D_Glasses"];

/// Starts the load on a worker thread.
///
/// The receiver yields exactly one message: the prepared figure, or `None`
/// if anything failed. Dropping the receiver cancels delivery; a completion
/// arriving after the session disposed is simply never applied.
pub fn spawn(uri: String) -> Receiver<Option<Node>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = match load(&uri) {
            Ok(figure) => Some(figure),
            Err(err) => {
                log::warn!("asset load failed for {uri}: {err}");
                None
            }
        };
        // Send fails when the session was torn down first; nothing to do.
        let _ = tx.send(result);
    });
    rx
}

/// Fetches, parses, and normalizes the asset synchronously.
pub fn load(uri: &str) -> Result<Node, AssetError> {
    let bytes = fetch_bytes(uri)?;
    let mut figure = parse_glb(&bytes)?;
    hide_tagged_parts(&mut figure);
    neutralize_materials(&mut figure);
    normalize_placement(&mut figure)?;
    log::debug!(
        "asset {uri} ready: {} parts",
        figure.part_count()
    );
    Ok(figure)
}

/// Reads the raw asset bytes from an http(s) URL or a filesystem path.
fn fetch_bytes(uri: &str) -> Result<Vec<u8>, AssetError> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        let response = reqwest::blocking::get(uri)?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    } else {
        Ok(std::fs::read(uri)?)
    }
}

/// Converts a GLB payload into a scene-graph subtree.
fn parse_glb(bytes: &[u8]) -> Result<Node, AssetError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(AssetError::EmptyScene)?;

    let mut root = Node::group("asset");
    for node in scene.nodes() {
        root.children.push(convert_node(&node, &buffers));
    }

    if root.part_count() == 0 {
        return Err(AssetError::EmptyScene);
    }
    Ok(root)
}

fn convert_node(node: &gltf::Node, buffers: &[gltf::buffer::Data]) -> Node {
    let mut out = Node::group(node.name().unwrap_or("node"));

    let (translation, rotation, scale) = node.transform().decomposed();
    out.transform.position = Vector3::from(translation);
    out.transform.scale = Vector3::from(scale);
    // glTF rotations are xyzw quaternions.
    let quat = Quaternion::new(rotation[3], rotation[0], rotation[1], rotation[2]);
    let euler = Euler::from(quat);
    out.transform.rotation = Vector3::new(euler.x.0, euler.y.0, euler.z.0);

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if let Some(part) = convert_primitive(&primitive, buffers) {
                out.parts.push(part);
            }
        }
    }
    for child in node.children() {
        out.children.push(convert_node(&child, buffers));
    }
    out
}

fn convert_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
) -> Option<Part> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::debug!("skipping {:?} primitive", primitive.mode());
        return None;
    }

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    if !indices_are_triangles(&indices, positions.len()) {
        log::warn!("skipping primitive with malformed indices");
        return None;
    }
    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(normals) => normals.collect(),
        None => GeometryData::face_normals(&positions, &indices),
    };

    let pbr = primitive.material().pbr_metallic_roughness();
    let material = Material::new(
        pbr.base_color_factor(),
        pbr.metallic_factor(),
        pbr.roughness_factor(),
    );

    Some(Part::new(
        GeometryData {
            positions,
            normals,
            indices,
        },
        material,
    ))
}

/// True when `indices` describes a whole number of triangles that all fall
/// inside the vertex range.
fn indices_are_triangles(indices: &[u32], vertex_count: usize) -> bool {
    indices.len() % 3 == 0 && indices.iter().all(|&i| (i as usize) < vertex_count)
}

/// Hides any sub-part whose node name matches a known accessory tag.
pub(crate) fn hide_tagged_parts(figure: &mut Node) {
    figure.visit_mut(&mut |node| {
        if HIDDEN_PART_NAMES.contains(&node.name.as_str()) {
            node.visible = false;
        }
    });
}

/// Forces every surface to the neutral base tint, keeping each material's
/// roughness and metalness.
pub(crate) fn neutralize_materials(figure: &mut Node) {
    figure.visit_mut(&mut |node| {
        for part in &mut node.parts {
            part.material.neutralize();
        }
    });
}

/// Scales the figure to [`TARGET_HEIGHT`] and rests it on the platform.
///
/// Measured twice on purpose: scaling moves the bounds relative to the
/// figure's pivot, so the resting translation has to come from a second
/// measurement taken after the scale is applied.
pub(crate) fn normalize_placement(figure: &mut Node) -> Result<(), AssetError> {
    let bounds = figure.bounds().ok_or(AssetError::EmptyScene)?;
    let height = bounds.height();
    if height <= f32::EPSILON {
        return Err(AssetError::DegenerateBounds);
    }

    let factor = TARGET_HEIGHT / height;
    figure.transform.scale *= factor;

    let rescaled = figure.bounds().ok_or(AssetError::EmptyScene)?;
    figure.transform.position.y += PLATFORM_SURFACE_Y - rescaled.min.y;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::primitives;

    fn tall_figure(height: f32, pivot_offset: f32) -> Node {
        let mut root = Node::group("asset");
        let mut body = Node::with_part(
            "body",
            Part::new(
                primitives::cuboid(0.5, height, 0.5),
                Material::from_hex(0x2c5f8d, 0.2, 0.4),
            ),
        );
        body.transform.position.y = pivot_offset;
        root.children.push(body);
        root
    }

    #[test]
    fn normalization_hits_target_height_and_rest_offset() {
        for (height, pivot) in [(0.3, 0.0), (17.0, 4.2), (1.8, -3.0)] {
            let mut figure = tall_figure(height, pivot);
            normalize_placement(&mut figure).unwrap();
            let bounds = figure.bounds().unwrap();
            assert!((bounds.height() - TARGET_HEIGHT).abs() < 1e-3);
            assert!((bounds.min.y - PLATFORM_SURFACE_Y).abs() < 1e-3);
        }
    }

    #[test]
    fn normalization_is_stable_when_repeated() {
        let mut figure = tall_figure(42.0, 7.0);
        normalize_placement(&mut figure).unwrap();
        normalize_placement(&mut figure).unwrap();
        let bounds = figure.bounds().unwrap();
        assert!((bounds.height() - TARGET_HEIGHT).abs() < 1e-3);
        assert!((bounds.min.y - PLATFORM_SURFACE_Y).abs() < 1e-3);
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let mut empty = Node::group("asset");
        assert!(matches!(
            normalize_placement(&mut empty),
            Err(AssetError::EmptyScene)
        ));
    }

    #[test]
    fn tagged_accessories_are_hidden() {
        let mut figure = Node::group("asset");
        figure.children.push(Node::group("Wolf3D_Glasses"));
        figure.children.push(Node::group("Wolf3D_Body"));
        hide_tagged_parts(&mut figure);
        assert!(!figure.children[0].visible);
        assert!(figure.children[1].visible);
    }

    #[test]
    fn neutralized_materials_keep_shading_parameters() {
        let mut figure = tall_figure(2.0, 0.0);
        neutralize_materials(&mut figure);
        let part = &figure.children[0].parts[0];
        assert_eq!(&part.material.base_color[..3], &[1.0, 1.0, 1.0]);
        assert!((part.material.metallic - 0.2).abs() < 1e-6);
        assert!((part.material.roughness - 0.4).abs() < 1e-6);
    }

    #[test]
    fn malformed_index_lists_are_rejected() {
        // An index past the vertex range.
        assert!(!indices_are_triangles(&[0, 1, 2], 2));
        // A trailing partial triangle.
        assert!(!indices_are_triangles(&[0, 1, 2, 0, 2], 3));

        assert!(indices_are_triangles(&[0, 1, 2], 3));
        assert!(indices_are_triangles(&[], 0));
    }

    #[test]
    fn missing_file_resolves_to_none() {
        let rx = spawn("definitely/not/a/real/path.glb".to_string());
        let result = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("loader thread should answer");
        assert!(result.is_none());
    }
}
