pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_controls;
pub mod transition;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{convert_matrix4_to_array, CameraPose, CameraUniform, Projection};
pub use orbit_controls::{OrbitBounds, OrbitControls};
pub use transition::{CameraTransition, CameraTransitionSequencer};
