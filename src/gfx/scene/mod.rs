//! # Scene Objects
//!
//! The room's interactive objects and the registry that classifies them.
//!
//! ## Key Components
//!
//! - [`SceneObject`] - Named object with a live transform and its captured initial transform
//! - [`ObjectRegistry`] - Flat, load-time-populated collection partitioned by capability
//! - [`Capabilities`] - Bitmask plus texture-set/oscillator tags derived from the object name
//! - [`load_obj_scene`] - Populate a registry from a named-model OBJ file
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::gfx::scene::{load_obj_scene, ObjectRegistry};
//!
//! let mut registry = ObjectRegistry::new();
//! load_obj_scene("assets/room.obj", &mut registry).unwrap();
//! registry.freeze();
//! ```

pub mod capability;
pub mod loader;
pub mod object;
pub mod registry;

// Re-export main types
pub use capability::{
    classify, AccessoryOscillator, Capabilities, CapabilityFlags, SocialPlatform, TextureSet,
};
pub use loader::load_obj_scene;
pub use object::{ObjectId, SceneObject, Transform};
pub use registry::ObjectRegistry;
