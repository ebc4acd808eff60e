//! # Graphics Module
//!
//! Scene-facing building blocks of the room: camera, picking and objects.
//! Rendering itself is left to the host; this module only owns the state a
//! renderer needs to read.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit controls, projection and scripted camera transitions
//! - **Picking** ([`picking`]) - Pointer to ray conversion and ray/bounds intersection
//! - **Scene Objects** ([`scene`]) - Object registry with name-derived capabilities
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::gfx::{camera::CameraPose, scene::ObjectRegistry};
//! use cgmath::Vector3;
//!
//! let registry = ObjectRegistry::new();
//! let pose = CameraPose::new(Vector3::new(21.5, 13.0, 25.5), Vector3::new(5.46, 7.7, 1.33));
//! ```

pub mod camera;
pub mod picking;
pub mod scene;

// Re-export commonly used types
pub use camera::{CameraPose, OrbitControls, Projection};
pub use picking::{Intersection, PointerResolver};
pub use scene::{ObjectRegistry, SceneObject};
