use cgmath::{Matrix4, Rad, Vector3};

use super::capability::{Capabilities, CapabilityFlags};
use crate::gfx::picking::AABB;

/// Stable handle into the [`ObjectRegistry`](super::ObjectRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Position, Euler rotation (XYZ order, radians) and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn new(position: Vector3<f32>, rotation: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Identity transform placed at `position`.
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Build the model matrix: `T * Rx * Ry * Rz * S`.
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }

    pub fn is_finite(&self) -> bool {
        finite(self.position) && finite(self.rotation) && finite(self.scale)
    }
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

fn finite(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// An interactive object in the room.
///
/// `transform` is the live value the renderer draws and the engine animates.
/// The initial transform is captured once when the object is registered and
/// cannot be changed afterwards; hover, idle and reveal animations all use
/// it as their baseline.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    name: String,
    pub transform: Transform,
    initial: Transform,
    local_bounds: AABB,
    capabilities: Capabilities,
}

impl SceneObject {
    pub(crate) fn new(
        id: ObjectId,
        name: String,
        transform: Transform,
        local_bounds: AABB,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            id,
            name,
            transform,
            initial: transform,
            local_bounds,
            capabilities,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authored transform captured at registration.
    pub fn initial(&self) -> &Transform {
        &self.initial
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn has(&self, flag: CapabilityFlags) -> bool {
        self.capabilities.has(flag)
    }

    /// Object-space bounds used for picking.
    pub fn local_bounds(&self) -> &AABB {
        &self.local_bounds
    }

    /// Bounds in world space under the current transform.
    pub fn world_bounds(&self) -> AABB {
        self.local_bounds.transform(&self.transform.matrix())
    }
}
