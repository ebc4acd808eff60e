use cgmath::Vector3;
use log::{debug, info};
use std::path::Path;

use super::object::Transform;
use super::registry::ObjectRegistry;
use crate::error::SceneLoadError;
use crate::gfx::picking::AABB;

/// Load every named model of an OBJ file into `registry`.
///
/// Each model becomes one object. OBJ geometry is baked in world space, so
/// the object's pivot is placed at the centre of its bounds and the local
/// bounds are re-centred around it; scaling and rotating the object then
/// happens about its own centre. Returns the number of objects registered.
///
/// The registry is not frozen here; the caller freezes it once every asset
/// has been delivered.
pub fn load_obj_scene(
    path: impl AsRef<Path>,
    registry: &mut ObjectRegistry,
) -> Result<usize, SceneLoadError> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    if let Err(err) = materials {
        debug!("no MTL for {}: {}", path.display(), err);
    }

    let mut registered = 0;
    for (index, model) in models.iter().enumerate() {
        let name = if model.name.is_empty() {
            format!("object_{}", index)
        } else {
            model.name.clone()
        };

        let vertices: Vec<[f32; 3]> = model
            .mesh
            .positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        if vertices.is_empty() {
            debug!("skipping `{}`: no geometry", name);
            continue;
        }

        let (transform, local_bounds) = pivot_at_center(&vertices);
        registry.register(name, transform, local_bounds)?;
        registered += 1;
    }

    info!("loaded {} objects from {}", registered, path.display());
    Ok(registered)
}

/// Split world-space vertices into a pivot transform and centred local bounds.
pub fn pivot_at_center(vertices: &[[f32; 3]]) -> (Transform, AABB) {
    let world = AABB::from_vertices(vertices);
    let center = world.center();
    let half: Vector3<f32> = (world.max - world.min) * 0.5;
    (Transform::at(center), AABB::new(-half, half))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pivot_at_center() {
        let (transform, bounds) = pivot_at_center(&[[1.0, 2.0, 3.0], [3.0, 4.0, 7.0]]);
        assert_eq!(transform.position, Vector3::new(2.0, 3.0, 5.0));
        assert_eq!(bounds.min, Vector3::new(-1.0, -1.0, -2.0));
        assert_eq!(bounds.max, Vector3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_load_named_objects() {
        let obj = "o Cactus\n\
                   v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
                   o About_Button_Fourth_Raycaster_Hover_Pointer\n\
                   v 2 2 2\nv 3 2 2\nv 2 3 2\nf 4 5 6\n";
        let path = std::env::temp_dir().join(format!("diorama_loader_{}.obj", std::process::id()));
        std::fs::File::create(&path)
            .and_then(|mut file| file.write_all(obj.as_bytes()))
            .unwrap();

        let mut registry = ObjectRegistry::new();
        let count = load_obj_scene(&path, &mut registry).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(count, 2);
        assert!(registry.cactus().is_some());
        let button = registry
            .find("About_Button_Fourth_Raycaster_Hover_Pointer")
            .unwrap();
        assert_eq!(registry.raycastable(), &[button]);
    }
}
