//! # Tween Scheduling
//!
//! Time-interpolated animation of numeric properties. Every running tween is
//! keyed by a [`TweenKey`] (target plus property group); starting a tween on a
//! key that is already animating supersedes the old one, whose completion cue
//! is dropped. This makes "last writer wins" explicit and auditable.
//!
//! The scheduler never writes into the scene itself. [`TweenScheduler::advance`]
//! returns the sampled values and the completion cues of the tick, and the
//! caller applies them. All samples of a tick are reported before any of its
//! completions, so a cue attached to one of several equal-length tweens fires
//! only after every one of them has reached its end value.

pub mod easing;
pub mod scheduler;

pub use easing::Easing;
pub use scheduler::{Sample, TickReport, TweenHandle, TweenScheduler};

use crate::effects::UiElement;
use crate::gfx::scene::{ObjectId, TextureSet};

/// The thing a tween writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Object(ObjectId),
    Camera,
    Material(TextureSet),
    Background,
    Smoke,
    Element(UiElement),
}

/// A group of channels on a target that is animated as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyGroup {
    Scale,
    Rotation,
    Position,
    OrbitTarget,
    MixRatio,
    Color,
    /// UI feedback: `x` = rotation in degrees, `y` = scale.
    Feedback,
    /// UI reveal progress in `x`, `0` = covering, `1` = gone.
    Reveal,
}

/// Identity of a running tween. At most one tween runs per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenKey {
    pub target: TweenTarget,
    pub property: PropertyGroup,
}

impl TweenKey {
    pub fn new(target: TweenTarget, property: PropertyGroup) -> Self {
        Self { target, property }
    }
}

/// Timing of a single tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    /// Seconds from start to end value, after `delay`.
    pub duration: f32,
    /// Seconds before the tween starts sampling.
    pub delay: f32,
    pub easing: Easing,
}

impl TweenSpec {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            delay: 0.0,
            easing,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}
