//! # Error Types
//!
//! Errors surfaced by the registry, configuration, scene loading and the
//! per-frame engine steps. Frame-level errors are logged and swallowed by
//! [`RoomEngine`](crate::engine::RoomEngine); everything else fails fast.

use thiserror::Error;

use crate::gfx::scene::ObjectId;
use crate::gfx::scene::SocialPlatform;

/// Errors raised while populating the [`ObjectRegistry`](crate::gfx::scene::ObjectRegistry).
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    /// The same object name was registered twice.
    #[error("object `{0}` is already registered")]
    Duplicate(String),

    /// Registration attempted after the registry was frozen at load completion.
    #[error("registry is frozen, cannot register `{0}`")]
    Frozen(String),

    /// A hover-capable object has no usable animation baseline.
    #[error("hover object `{name}` has a non-finite {field} baseline")]
    InvalidBaseline { name: String, field: &'static str },
}

/// Errors raised while loading or validating a [`RoomConfig`](crate::config::RoomConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("social link for {platform:?} is malformed: `{url}`")]
    MalformedLink { platform: SocialPlatform, url: String },

    #[error("no social link configured for {0:?}")]
    MissingLink(SocialPlatform),

    #[error("invalid hex color `{0}`")]
    InvalidColor(String),

    #[error("duration `{field}` must be positive and finite")]
    InvalidDuration { field: &'static str },

    #[error("`{field}` must be positive and finite")]
    InvalidParameter { field: &'static str },

    #[error("bounds `{min_field}` ({min}) and `{max_field}` ({max}) are inverted or not finite")]
    InvalidBounds {
        min_field: &'static str,
        max_field: &'static str,
        min: f32,
        max: f32,
    },
}

/// Errors raised while turning an asset file into registry objects.
#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("failed to load OBJ scene: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors produced inside a single frame of interaction handling.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("object {0:?} is not in the registry")]
    UnknownObject(ObjectId),
}
