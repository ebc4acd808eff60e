// src/lib.rs
//! Diorama
//!
//! Interaction and animation choreography for an interactive 3D room:
//! pointer picking, hover feedback, click routing, scripted camera moves,
//! a day/night theme blend and a one-shot intro, all driven by a single
//! tween scheduler and rendered by whatever the host plugs in.

pub mod app;
pub mod audio;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod gfx;
pub mod idle;
pub mod interaction;
pub mod intro;
pub mod modal;
pub mod prelude;
pub mod theme;
pub mod tween;

// Re-export main types for convenience
pub use app::RoomApp;
pub use config::RoomConfig;
pub use engine::RoomEngine;

/// Creates a room application with the default configuration
pub fn default() -> anyhow::Result<RoomApp> {
    RoomApp::new(RoomConfig::default())
}
