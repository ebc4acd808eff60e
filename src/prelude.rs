//! # Diorama Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use diorama::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = diorama::default()?;
//!     app.load_obj("assets/room.obj")?;
//!     app.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::{FrameSink, LogCollaborator, RoomApp};
pub use crate::config::RoomConfig;
pub use crate::default;
pub use crate::engine::{FrameSnapshot, RoomEngine};

// Collaborator seams
pub use crate::effects::{
    AudioBackend, AudioClip, AudioCommand, CursorStyle, Effects, UiElement, UiRequest, UiSurface,
};

// Scene and interaction types
pub use crate::gfx::camera::CameraPose;
pub use crate::gfx::scene::{ObjectId, ObjectRegistry, Transform};
pub use crate::interaction::{Action, HoverState, PointerInput};
pub use crate::modal::Modal;
pub use crate::theme::Theme;

// Re-export common external dependencies
pub use cgmath::Vector3;
