use cgmath::{InnerSpace, Vector3};

use super::camera_utils::CameraPose;

/// Limits applied to the camera around its orbit target.
///
/// Angles follow the Y-up spherical convention: `polar` is measured from +Y,
/// `azimuth` around Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: Option<f32>,
    pub max_azimuth: Option<f32>,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_polar: 0.0,
            max_polar: std::f32::consts::PI,
            min_azimuth: None,
            max_azimuth: None,
        }
    }
}

/// Orbit controller state: the live camera pose plus its constraints.
///
/// `enabled` gates user input only. [`update`](Self::update) still clamps
/// while disabled so scripted transitions stay inside the bounds.
#[derive(Debug, Clone, Copy)]
pub struct OrbitControls {
    pub pose: CameraPose,
    pub bounds: OrbitBounds,
    pub enabled: bool,
}

impl OrbitControls {
    pub fn new(pose: CameraPose, bounds: OrbitBounds) -> Self {
        let mut controls = Self {
            pose,
            bounds,
            enabled: true,
        };
        controls.update();
        controls
    }

    pub fn distance(&self) -> f32 {
        (self.pose.position - self.pose.target).magnitude()
    }

    /// Rotate around the target. Ignored while disabled.
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        if !self.enabled {
            return;
        }
        let (radius, polar, azimuth) = self.spherical();
        self.set_spherical(radius, polar + delta_polar, azimuth + delta_azimuth);
    }

    /// Move towards (`delta < 0`) or away from the target. Ignored while disabled.
    pub fn zoom(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        let (radius, polar, azimuth) = self.spherical();
        let corrected_zoom = f32::log10(radius.max(1.0 + f32::EPSILON)) * delta;
        self.set_spherical(radius + corrected_zoom, polar, azimuth);
    }

    /// Re-apply the bounds to the current pose.
    ///
    /// Called after every scripted pose change so the controller never lags
    /// behind a transition.
    pub fn update(&mut self) {
        let (radius, polar, azimuth) = self.spherical();
        self.set_spherical(radius, polar, azimuth);
    }

    fn spherical(&self) -> (f32, f32, f32) {
        let offset = self.pose.position - self.pose.target;
        let radius = offset.magnitude();
        if radius <= f32::EPSILON {
            return (0.0, 0.0, 0.0);
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);
        (radius, polar, azimuth)
    }

    fn set_spherical(&mut self, radius: f32, polar: f32, azimuth: f32) {
        let mut azimuth = azimuth;
        if let Some(min_azimuth) = self.bounds.min_azimuth {
            azimuth = azimuth.max(min_azimuth);
        }
        if let Some(max_azimuth) = self.bounds.max_azimuth {
            azimuth = azimuth.min(max_azimuth);
        }
        let polar = polar
            .clamp(self.bounds.min_polar, self.bounds.max_polar)
            .clamp(f32::EPSILON, std::f32::consts::PI - f32::EPSILON);
        let radius = radius.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );

        self.pose.position =
            calculate_cartesian_eye_position(polar, azimuth, radius, self.pose.target);
    }
}

fn calculate_cartesian_eye_position(
    polar: f32,
    azimuth: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * polar.sin() * azimuth.sin(),
        distance * polar.cos(),
        distance * polar.sin() * azimuth.cos(),
    ) + target
}
