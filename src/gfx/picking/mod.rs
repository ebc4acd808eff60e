//! # Object Picking System
//!
//! Pointer-driven ray casting against the room's raycastable objects.
//!
//! ## How it works
//!
//! 1. **Pointer to NDC**: Input handlers only store the pointer as normalized device coordinates
//! 2. **NDC to Ray**: Once per frame the NDC point is unprojected through the camera
//! 3. **Ray-Object Intersection**: The ray is tested against each object's world-space bounding box
//! 4. **Ordering**: Hits are returned nearest first
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::gfx::picking::PointerResolver;
//!
//! let mut resolver = PointerResolver::new();
//! resolver.set_pointer_from_client(640.0, 360.0, 1280.0, 720.0);
//! // once per frame:
//! // let hits = resolver.resolve_intersections(&pose, &projection, &registry, input_suppressed);
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::camera::{CameraPose, Projection};
use crate::gfx::scene::{ObjectId, ObjectRegistry};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Unit cube centred on the origin
    pub fn unit() -> Self {
        Self::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5))
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed_corners = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let transformed = matrix * homogeneous;
            transformed_corners.push([
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            ]);
        }

        Self::from_vertices(&transformed_corners)
    }
}

/// One ray hit, as returned by [`PointerResolver::resolve_intersections`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub object: ObjectId,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Pointer position in normalized device coordinates, `[-1, 1]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Map client pixel coordinates to NDC (Y points up).
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        Self {
            x: (client_x / width) * 2.0 - 1.0,
            y: -(client_y / height) * 2.0 + 1.0,
        }
    }
}

/// Unproject an NDC point into a world-space ray leaving the camera.
pub fn ndc_to_ray(ndc: PointerState, pose: &CameraPose, projection: &Projection) -> Ray {
    let view_proj_matrix = projection.matrix() * pose.view_matrix();
    let inv_view_proj = view_proj_matrix.invert().unwrap_or(Matrix4::from_scale(1.0));

    // Transform near and far points from NDC to world space
    let near_point = Vector4::new(ndc.x, ndc.y, -1.0, 1.0);
    let far_point = Vector4::new(ndc.x, ndc.y, 1.0, 1.0);

    let world_near = inv_view_proj * near_point;
    let world_far = inv_view_proj * far_point;

    let near_3d = world_near.truncate() / world_near.w;
    let far_3d = world_far.truncate() / world_far.w;

    Ray::new(pose.position, far_3d - near_3d)
}

/// Converts pointer input into per-frame ray hits.
///
/// Input events only write [`PointerState`]; the geometry work happens in
/// [`resolve_intersections`](Self::resolve_intersections), once per frame.
#[derive(Debug, Default)]
pub struct PointerResolver {
    pointer: PointerState,
    current: Vec<Intersection>,
}

impl PointerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pointer_from_client(
        &mut self,
        client_x: f32,
        client_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) {
        self.pointer =
            PointerState::from_client(client_x, client_y, viewport_width, viewport_height);
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Hits from the last resolved frame, nearest first.
    pub fn current(&self) -> &[Intersection] {
        &self.current
    }

    /// Forget the last frame's hits.
    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Cast a ray through the pointer and collect hits on raycastable objects.
    ///
    /// While `suppressed` (a modal is open) this returns an empty slice and
    /// leaves the stored hits untouched.
    pub fn resolve_intersections(
        &mut self,
        pose: &CameraPose,
        projection: &Projection,
        registry: &ObjectRegistry,
        suppressed: bool,
    ) -> &[Intersection] {
        if suppressed {
            return &[];
        }

        let ray = ndc_to_ray(self.pointer, pose, projection);
        self.current.clear();
        for &id in registry.raycastable() {
            let Some(object) = registry.get(id) else {
                continue;
            };
            if let Some(distance) = object.world_bounds().intersect_ray(&ray) {
                self.current.push(Intersection {
                    object: id,
                    distance,
                    point: ray.point_at(distance),
                });
            }
        }
        self.current
            .sort_by(|a, b| a.distance.total_cmp(&b.distance));
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Transform;

    fn looking_down_z() -> (CameraPose, Projection) {
        (
            CameraPose::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 0.0)),
            Projection::new(35.0, 1.0, 0.1, 200.0),
        )
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray).is_some());

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_client_to_ndc() {
        let center = PointerState::from_client(400.0, 300.0, 800.0, 600.0);
        assert_eq!(center, PointerState { x: 0.0, y: 0.0 });
        let top_left = PointerState::from_client(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, PointerState { x: -1.0, y: 1.0 });
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let (pose, projection) = looking_down_z();
        let ray = ndc_to_ray(PointerState::default(), &pose, &projection);
        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_hits_are_sorted_nearest_first() {
        let mut registry = ObjectRegistry::new();
        let far = registry
            .register("Far_Raycaster", Transform::at(Vector3::new(0.0, 0.0, -3.0)), AABB::unit())
            .unwrap();
        let near = registry
            .register("Near_Raycaster", Transform::at(Vector3::new(0.0, 0.0, 2.0)), AABB::unit())
            .unwrap();
        registry
            .register("Decor", Transform::at(Vector3::new(0.0, 0.0, 5.0)), AABB::unit())
            .unwrap();

        let (pose, projection) = looking_down_z();
        let mut resolver = PointerResolver::new();
        let hits = resolver.resolve_intersections(&pose, &projection, &registry, false);

        let order: Vec<_> = hits.iter().map(|hit| hit.object).collect();
        assert_eq!(order, vec![near, far]);
        assert!((hits[0].distance - 7.5).abs() < 1e-3);
    }

    #[test]
    fn test_suppressed_resolution_is_empty_and_keeps_state() {
        let mut registry = ObjectRegistry::new();
        registry
            .register("Box_Raycaster", Transform::default(), AABB::unit())
            .unwrap();
        let (pose, projection) = looking_down_z();
        let mut resolver = PointerResolver::new();
        resolver.resolve_intersections(&pose, &projection, &registry, false);
        assert_eq!(resolver.current().len(), 1);

        assert!(resolver
            .resolve_intersections(&pose, &projection, &registry, true)
            .is_empty());
        assert_eq!(resolver.current().len(), 1);
    }

    #[test]
    fn test_empty_registry_is_not_an_error() {
        let registry = ObjectRegistry::new();
        let (pose, projection) = looking_down_z();
        let mut resolver = PointerResolver::new();
        assert!(resolver
            .resolve_intersections(&pose, &projection, &registry, false)
            .is_empty());
    }
}
