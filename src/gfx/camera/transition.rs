use log::debug;

use super::camera_utils::CameraPose;
use crate::tween::{
    Easing, PropertyGroup, TweenHandle, TweenKey, TweenScheduler, TweenSpec, TweenTarget,
};

pub const POSITION_KEY: TweenKey = TweenKey {
    target: TweenTarget::Camera,
    property: PropertyGroup::Position,
};

pub const TARGET_KEY: TweenKey = TweenKey {
    target: TweenTarget::Camera,
    property: PropertyGroup::OrbitTarget,
};

/// Handles of the two tweens that make up one camera transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraTransition {
    pub position: TweenHandle,
    pub target: TweenHandle,
}

/// Animates camera position and orbit target together.
///
/// Both halves share one duration and easing, so they stay in lockstep on
/// every tick. The completion cue rides on the orbit-target tween; because
/// the scheduler reports all samples of a tick before any completion, the
/// cue fires only once both halves have landed. Starting a transition
/// supersedes the one in flight, including its cue.
#[derive(Debug, Clone)]
pub struct CameraTransitionSequencer {
    initial: CameraPose,
    duration: f32,
    easing: Easing,
    in_flight: Option<CameraTransition>,
}

impl CameraTransitionSequencer {
    pub fn new(initial: CameraPose, duration: f32, easing: Easing) -> Self {
        Self {
            initial,
            duration,
            easing,
            in_flight: None,
        }
    }

    /// Pose snapshotted at startup, used by [`reset_to_initial`](Self::reset_to_initial).
    pub fn initial_pose(&self) -> CameraPose {
        self.initial
    }

    pub fn default_spec(&self) -> TweenSpec {
        TweenSpec::new(self.duration, self.easing)
    }

    /// Animate from `current` to `to`, then emit `on_complete`.
    pub fn transition_to<C>(
        &mut self,
        scheduler: &mut TweenScheduler<C>,
        current: &CameraPose,
        to: CameraPose,
        spec: TweenSpec,
        on_complete: Option<C>,
    ) -> CameraTransition {
        if self.is_transitioning(scheduler) {
            debug!("camera transition superseded");
        }
        let position = scheduler.start(POSITION_KEY, current.position, to.position, spec, None);
        let target = scheduler.start(TARGET_KEY, current.target, to.target, spec, on_complete);
        let transition = CameraTransition { position, target };
        self.in_flight = Some(transition);
        transition
    }

    /// Animate back to the startup pose with the default timing.
    pub fn reset_to_initial<C>(
        &mut self,
        scheduler: &mut TweenScheduler<C>,
        current: &CameraPose,
        on_complete: Option<C>,
    ) -> CameraTransition {
        let spec = self.default_spec();
        self.transition_to(scheduler, current, self.initial, spec, on_complete)
    }

    /// True while either half of the last transition is still running.
    pub fn is_transitioning<C>(&self, scheduler: &TweenScheduler<C>) -> bool {
        match self.in_flight {
            Some(transition) => {
                scheduler.handle_of(POSITION_KEY) == Some(transition.position)
                    || scheduler.handle_of(TARGET_KEY) == Some(transition.target)
            }
            None => false,
        }
    }

    pub fn in_flight(&self) -> Option<CameraTransition> {
        self.in_flight
    }
}
