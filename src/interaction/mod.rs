//! # Interaction
//!
//! Per-frame hover tracking, click/tap routing and raw input filtering.
//!
//! - [`hover`] - single-object hover state machine and cursor affordance
//! - [`dispatcher`] - maps an activation on the nearest hit to [`Action`]s
//! - [`input`] - touch/click de-duplication ahead of the dispatcher

pub mod dispatcher;
pub mod hover;
pub mod input;

pub use dispatcher::{Action, InteractionDispatcher};
pub use hover::{HoverState, HoverStateMachine, HoverTransition, SmokeEffect};
pub use input::{InputGate, InputOutcome, PointerInput};

pub use crate::gfx::scene::SocialPlatform;
