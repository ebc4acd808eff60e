use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
};

use super::orbit_controls::OrbitControls;

/// Turns raw device motion into orbit rotation and zoom.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_mouse_pressed: false,
        }
    }

    /// Apply a device event to `controls`. Returns whether the pose may have changed.
    pub fn process_events(&mut self, event: &DeviceEvent, controls: &mut OrbitControls) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.apply_zoom(scroll_amount, controls)
            }
            DeviceEvent::MouseMotion { delta } => {
                if !self.is_mouse_pressed {
                    return false;
                }
                self.apply_drag(delta.0 as f32, delta.1 as f32, controls)
            }
            _ => false,
        }
    }

    /// Drag-rotate by a pixel delta.
    pub fn apply_drag(&self, dx: f32, dy: f32, controls: &mut OrbitControls) -> bool {
        if !controls.enabled {
            return false;
        }
        controls.rotate(-dx * self.rotate_speed, -dy * self.rotate_speed);
        true
    }

    /// Zoom by wheel amount.
    pub fn apply_zoom(&self, amount: f32, controls: &mut OrbitControls) -> bool {
        if !controls.enabled {
            return false;
        }
        controls.zoom(amount * self.zoom_speed);
        true
    }

    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed
    }
}
