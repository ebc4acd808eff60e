//! Idle motion of the room's mechanical parts.
//!
//! Driven by absolute elapsed time every frame, straight from each object's
//! initial transform, so it never accumulates drift and needs no tweens.

use std::f32::consts::PI;

use crate::config::{IdleConfig, OscillationConfig};
use crate::gfx::scene::{AccessoryOscillator, CapabilityFlags, ObjectRegistry, SceneObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Softened sine: flattens the peaks of `amplitude * sin(t * speed)`.
pub fn oscillation(time: f32, amplitude: f32, speed: f32) -> f32 {
    let wave = (time * speed).sin();
    amplitude * wave * (1.0 - wave.abs() * 0.3)
}

/// Wing angle offset, always on one side of the rest pose.
pub fn wing_offset(time: f32, flap_angle: f32, flap_speed: f32) -> f32 {
    (flap_angle / 2.0) * (1.0 + (time * flap_speed).cos())
}

#[derive(Debug, Clone)]
pub struct IdleAnimator {
    config: IdleConfig,
}

impl IdleAnimator {
    pub fn new(config: IdleConfig) -> Self {
        Self { config }
    }

    /// Pose every idle-animated object for `time` seconds since start.
    pub fn apply(&self, registry: &mut ObjectRegistry, time: f32) {
        let config = &self.config;
        let bob = (time * config.flap_speed).sin() * config.bob_height;
        let wing = wing_offset(time, config.flap_angle, config.flap_speed);
        let spin = (time * config.fan_speed) % (2.0 * PI);

        for object in registry.iter_mut() {
            let initial = *object.initial();
            let caps = *object.capabilities();

            if caps.has(CapabilityFlags::CHAIR_TOP) {
                swing(object, Axis::Y, time, config.chair);
            }
            if caps.has(CapabilityFlags::ACCESSORY) {
                let oscillator = match caps.oscillator {
                    Some(AccessoryOscillator::Second) => config.accessory_second,
                    _ => config.accessory_first,
                };
                swing(object, Axis::X, time, oscillator);
            }
            if caps.has(CapabilityFlags::BIRD_WING_LEFT) {
                object.transform.rotation.x = initial.rotation.x - wing;
            }
            if caps.has(CapabilityFlags::BIRD_WING_RIGHT) {
                object.transform.rotation.x = initial.rotation.x + wing;
            }
            if caps.has(CapabilityFlags::BIRD_BODY) {
                object.transform.position.y = initial.position.y + bob;
            }
            if caps.has(CapabilityFlags::FAN_X) {
                object.transform.rotation.x = initial.rotation.x + spin;
            }
            if caps.has(CapabilityFlags::FAN_Y) {
                object.transform.rotation.y = initial.rotation.y + spin;
            }
        }
    }
}

fn swing(object: &mut SceneObject, axis: Axis, time: f32, oscillation_config: OscillationConfig) {
    let offset = oscillation(time, oscillation_config.amplitude, oscillation_config.speed);
    let initial = object.initial().rotation;
    match axis {
        Axis::X => object.transform.rotation.x = initial.x + offset,
        Axis::Y => object.transform.rotation.y = initial.y + offset,
    }
}
