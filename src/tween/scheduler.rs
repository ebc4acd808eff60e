use cgmath::Vector3;
use log::trace;

use super::{TweenKey, TweenSpec, TweenTarget};

/// Opaque identifier of one started tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

/// One interpolated value produced during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub key: TweenKey,
    pub value: Vector3<f32>,
}

/// Everything that happened during one [`TweenScheduler::advance`] call.
#[derive(Debug)]
pub struct TickReport<C> {
    /// Samples in tween start order.
    pub samples: Vec<Sample>,
    /// Cues of tweens that finished this tick, in start order.
    pub completed: Vec<C>,
}

impl<C> Default for TickReport<C> {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            completed: Vec::new(),
        }
    }
}

struct ActiveTween<C> {
    handle: TweenHandle,
    key: TweenKey,
    from: Vector3<f32>,
    to: Vector3<f32>,
    spec: TweenSpec,
    elapsed: f32,
    cue: Option<C>,
}

impl<C> ActiveTween<C> {
    fn value_at(&self, elapsed: f32) -> Vector3<f32> {
        let progress = if self.spec.duration <= 0.0 {
            1.0
        } else {
            (elapsed - self.spec.delay) / self.spec.duration
        };
        let eased = self.spec.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.spec.delay + self.spec.duration
    }
}

/// Handle-based tween registry, generic over the completion cue type `C`.
pub struct TweenScheduler<C> {
    next_handle: u64,
    active: Vec<ActiveTween<C>>,
}

impl<C> TweenScheduler<C> {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            active: Vec::new(),
        }
    }

    /// Start animating `key` from `from` to `to`.
    ///
    /// Any tween already running on `key` is cancelled first and its cue is
    /// discarded.
    pub fn start(
        &mut self,
        key: TweenKey,
        from: Vector3<f32>,
        to: Vector3<f32>,
        spec: TweenSpec,
        cue: Option<C>,
    ) -> TweenHandle {
        self.cancel(key);
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        trace!("tween {:?} started on {:?}", handle, key);
        self.active.push(ActiveTween {
            handle,
            key,
            from,
            to,
            spec,
            elapsed: 0.0,
            cue,
        });
        handle
    }

    /// Start a tween on a single scalar channel (stored in `x`).
    pub fn start_scalar(
        &mut self,
        key: TweenKey,
        from: f32,
        to: f32,
        spec: TweenSpec,
        cue: Option<C>,
    ) -> TweenHandle {
        self.start(
            key,
            Vector3::new(from, 0.0, 0.0),
            Vector3::new(to, 0.0, 0.0),
            spec,
            cue,
        )
    }

    /// Cancel the tween on `key`. Returns whether one was running.
    pub fn cancel(&mut self, key: TweenKey) -> bool {
        let before = self.active.len();
        self.active.retain(|tween| tween.key != key);
        before != self.active.len()
    }

    /// Cancel every tween writing to `target`. Returns how many were removed.
    pub fn cancel_target(&mut self, target: TweenTarget) -> usize {
        let before = self.active.len();
        self.active.retain(|tween| tween.key.target != target);
        before - self.active.len()
    }

    pub fn is_active(&self, key: TweenKey) -> bool {
        self.active.iter().any(|tween| tween.key == key)
    }

    /// Handle of the tween currently running on `key`.
    pub fn handle_of(&self, key: TweenKey) -> Option<TweenHandle> {
        self.active
            .iter()
            .find(|tween| tween.key == key)
            .map(|tween| tween.handle)
    }

    /// End value of the tween currently running on `key`.
    pub fn destination_of(&self, key: TweenKey) -> Option<Vector3<f32>> {
        self.active
            .iter()
            .find(|tween| tween.key == key)
            .map(|tween| tween.to)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance every tween by `dt` seconds.
    ///
    /// Tweens still inside their delay produce no sample. Finished tweens
    /// emit their exact end value, are removed, and report their cue.
    pub fn advance(&mut self, dt: f32) -> TickReport<C> {
        let mut report = TickReport::default();
        let mut index = 0;
        while index < self.active.len() {
            let tween = &mut self.active[index];
            tween.elapsed += dt.max(0.0);

            if tween.finished() {
                let tween = self.active.remove(index);
                report.samples.push(Sample {
                    key: tween.key,
                    value: tween.to,
                });
                if let Some(cue) = tween.cue {
                    report.completed.push(cue);
                }
                continue;
            }

            if tween.elapsed >= tween.spec.delay {
                report.samples.push(Sample {
                    key: tween.key,
                    value: tween.value_at(tween.elapsed),
                });
            }
            index += 1;
        }
        report
    }
}

impl<C> Default for TweenScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::{Easing, PropertyGroup};

    fn camera_key(property: PropertyGroup) -> TweenKey {
        TweenKey::new(TweenTarget::Camera, property)
    }

    #[test]
    fn test_tween_reaches_exact_end_value() {
        let mut scheduler: TweenScheduler<&str> = TweenScheduler::new();
        let key = camera_key(PropertyGroup::Position);
        scheduler.start(
            key,
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 3.0),
            TweenSpec::new(1.0, Easing::BackOut(2.0)),
            Some("done"),
        );

        let mid = scheduler.advance(0.5);
        assert_eq!(mid.samples.len(), 1);
        assert!(mid.completed.is_empty());

        let end = scheduler.advance(0.6);
        assert_eq!(end.samples[0].value, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(end.completed, vec!["done"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_new_tween_supersedes_old_and_drops_its_cue() {
        let mut scheduler: TweenScheduler<&str> = TweenScheduler::new();
        let key = camera_key(PropertyGroup::Position);
        let first = scheduler.start_scalar(key, 0.0, 1.0, TweenSpec::new(1.0, Easing::Linear), Some("first"));
        scheduler.advance(0.25);
        let second = scheduler.start_scalar(key, 0.25, 5.0, TweenSpec::new(1.0, Easing::Linear), Some("second"));

        assert_ne!(first, second);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.handle_of(key), Some(second));

        let report = scheduler.advance(2.0);
        assert_eq!(report.completed, vec!["second"]);
        assert_eq!(report.samples[0].value.x, 5.0);
    }

    #[test]
    fn test_delay_suppresses_samples() {
        let mut scheduler: TweenScheduler<()> = TweenScheduler::new();
        let key = camera_key(PropertyGroup::OrbitTarget);
        scheduler.start_scalar(key, 0.0, 1.0, TweenSpec::new(1.0, Easing::Linear).with_delay(0.5), None);

        assert!(scheduler.advance(0.4).samples.is_empty());
        let report = scheduler.advance(0.6);
        assert_eq!(report.samples.len(), 1);
        assert!((report.samples[0].value.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_samples_precede_completions_within_a_tick() {
        let mut scheduler: TweenScheduler<u8> = TweenScheduler::new();
        let spec = TweenSpec::new(1.0, Easing::Power2InOut);
        scheduler.start_scalar(camera_key(PropertyGroup::Position), 0.0, 1.0, spec, None);
        scheduler.start_scalar(camera_key(PropertyGroup::OrbitTarget), 0.0, 1.0, spec, Some(7));

        let report = scheduler.advance(1.0);
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.completed, vec![7]);
    }

    #[test]
    fn test_cancel_target_removes_every_property() {
        let mut scheduler: TweenScheduler<()> = TweenScheduler::new();
        let spec = TweenSpec::new(1.0, Easing::Linear);
        scheduler.start_scalar(camera_key(PropertyGroup::Position), 0.0, 1.0, spec, None);
        scheduler.start_scalar(camera_key(PropertyGroup::OrbitTarget), 0.0, 1.0, spec, None);
        scheduler.start_scalar(TweenKey::new(TweenTarget::Background, PropertyGroup::Color), 0.0, 1.0, spec, None);

        assert_eq!(scheduler.cancel_target(TweenTarget::Camera), 2);
        assert_eq!(scheduler.len(), 1);
        assert!(!scheduler.cancel(camera_key(PropertyGroup::Position)));
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut scheduler: TweenScheduler<&str> = TweenScheduler::new();
        scheduler.start_scalar(camera_key(PropertyGroup::Position), 3.0, 4.0, TweenSpec::new(0.0, Easing::Linear), Some("now"));
        let report = scheduler.advance(0.0);
        assert_eq!(report.samples[0].value.x, 4.0);
        assert_eq!(report.completed, vec!["now"]);
    }
}
