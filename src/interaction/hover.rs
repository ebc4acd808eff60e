use cgmath::{ElementWise, Vector3};
use log::debug;

use crate::config::HoverConfig;
use crate::effects::CursorStyle;
use crate::error::EngineError;
use crate::gfx::picking::Intersection;
use crate::gfx::scene::{CapabilityFlags, ObjectId, ObjectRegistry};
use crate::tween::{Easing, PropertyGroup, TweenKey, TweenScheduler, TweenSpec, TweenTarget};

pub const SMOKE_SCALE_KEY: TweenKey = TweenKey {
    target: TweenTarget::Smoke,
    property: PropertyGroup::Scale,
};

/// Particle plume above the coffee cup. Its scale follows coffee hover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeEffect {
    /// World position, set once the coffee object is known.
    pub anchor: Option<Vector3<f32>>,
    pub scale: Vector3<f32>,
}

impl Default for SmokeEffect {
    fn default() -> Self {
        Self {
            anchor: None,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(ObjectId),
}

impl HoverState {
    pub fn hovered(self) -> Option<ObjectId> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering(id) => Some(id),
        }
    }
}

/// What changed during one [`HoverStateMachine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverTransition {
    pub exited: Option<ObjectId>,
    pub entered: Option<ObjectId>,
}

impl HoverTransition {
    pub fn is_change(&self) -> bool {
        self.exited.is_some() || self.entered.is_some()
    }
}

/// Tracks the single hovered object and plays its enter/exit animations.
#[derive(Debug, Clone)]
pub struct HoverStateMachine {
    state: HoverState,
    config: HoverConfig,
}

impl HoverStateMachine {
    pub fn new(config: HoverConfig) -> Self {
        Self {
            state: HoverState::Idle,
            config,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Cursor for the current hit list: interactive when the nearest hit is
    /// pointer-capable, regardless of hover.
    pub fn cursor_for(intersections: &[Intersection], registry: &ObjectRegistry) -> CursorStyle {
        let pointer = intersections
            .first()
            .and_then(|hit| registry.get(hit.object))
            .is_some_and(|object| object.has(CapabilityFlags::POINTER));
        if pointer {
            CursorStyle::Interactive
        } else {
            CursorStyle::Default
        }
    }

    /// Advance the state machine with this frame's hits, nearest first.
    ///
    /// The previous object always exits before the new one enters.
    pub fn update<C>(
        &mut self,
        intersections: &[Intersection],
        registry: &ObjectRegistry,
        smoke: &SmokeEffect,
        scheduler: &mut TweenScheduler<C>,
    ) -> Result<HoverTransition, EngineError> {
        let top = intersections
            .first()
            .map(|hit| hit.object)
            .filter(|&id| {
                registry
                    .get(id)
                    .is_some_and(|object| object.has(CapabilityFlags::HOVER))
            });

        let current = self.state.hovered();
        if top == current {
            return Ok(HoverTransition::default());
        }

        let mut transition = HoverTransition::default();
        if let Some(previous) = current {
            self.state = HoverState::Idle;
            transition.exited = Some(previous);
            self.play_exit(previous, registry, smoke, scheduler)?;
        }
        if let Some(next) = top {
            self.play_enter(next, registry, smoke, scheduler)?;
            self.state = HoverState::Hovering(next);
            transition.entered = Some(next);
        }
        debug!("hover {:?} -> {:?}", current, top);
        Ok(transition)
    }

    /// Exit whatever is hovered, independent of the pointer. Used when a
    /// modal opens.
    pub fn force_exit<C>(
        &mut self,
        registry: &ObjectRegistry,
        smoke: &SmokeEffect,
        scheduler: &mut TweenScheduler<C>,
    ) -> Result<Option<ObjectId>, EngineError> {
        let Some(previous) = self.state.hovered() else {
            return Ok(None);
        };
        self.state = HoverState::Idle;
        self.play_exit(previous, registry, smoke, scheduler)?;
        Ok(Some(previous))
    }

    fn enter_spec(&self) -> TweenSpec {
        TweenSpec::new(self.config.enter_duration, Easing::BackOut(self.config.overshoot))
    }

    fn exit_spec(&self) -> TweenSpec {
        TweenSpec::new(self.config.exit_duration, Easing::BackOut(self.config.overshoot))
    }

    fn play_enter<C>(
        &self,
        id: ObjectId,
        registry: &ObjectRegistry,
        smoke: &SmokeEffect,
        scheduler: &mut TweenScheduler<C>,
    ) -> Result<(), EngineError> {
        let object = registry.get(id).ok_or(EngineError::UnknownObject(id))?;
        scheduler.cancel_target(TweenTarget::Object(id));
        let spec = self.enter_spec();
        let initial = object.initial();
        let live = &object.transform;

        if object.has(CapabilityFlags::COFFEE) {
            let to = Vector3::new(1.0, 1.0, 1.0) * self.config.smoke_scale;
            scheduler.start(SMOKE_SCALE_KEY, smoke.scale, to, spec, None);
        }

        let factor = if object.has(CapabilityFlags::FISH) {
            self.config.fish_scale_factor
        } else {
            self.config.scale_factor
        };
        scheduler.start(
            TweenKey::new(TweenTarget::Object(id), PropertyGroup::Scale),
            live.scale,
            initial.scale * factor,
            spec,
            None,
        );

        if object.has(CapabilityFlags::ABOUT_BUTTON) {
            let tilted = Vector3::new(
                initial.rotation.x - self.config.about_tilt,
                live.rotation.y,
                live.rotation.z,
            );
            scheduler.start(
                TweenKey::new(TweenTarget::Object(id), PropertyGroup::Rotation),
                live.rotation,
                tilted,
                spec,
                None,
            );
        }
        Ok(())
    }

    fn play_exit<C>(
        &self,
        id: ObjectId,
        registry: &ObjectRegistry,
        smoke: &SmokeEffect,
        scheduler: &mut TweenScheduler<C>,
    ) -> Result<(), EngineError> {
        let object = registry.get(id).ok_or(EngineError::UnknownObject(id))?;
        scheduler.cancel_target(TweenTarget::Object(id));
        let spec = self.exit_spec();
        let initial = object.initial();
        let live = &object.transform;

        if object.has(CapabilityFlags::COFFEE) {
            scheduler.start(SMOKE_SCALE_KEY, smoke.scale, Vector3::new(1.0, 1.0, 1.0), spec, None);
        }

        scheduler.start(
            TweenKey::new(TweenTarget::Object(id), PropertyGroup::Scale),
            live.scale,
            initial.scale,
            spec,
            None,
        );

        if object.has(CapabilityFlags::ROTATION_RESET) {
            let settled = Vector3::new(initial.rotation.x, live.rotation.y, live.rotation.z);
            scheduler.start(
                TweenKey::new(TweenTarget::Object(id), PropertyGroup::Rotation),
                live.rotation,
                settled,
                spec,
                None,
            );
        }

        if object.has(CapabilityFlags::NAME_LETTER) {
            let settled = live
                .position
                .mul_element_wise(Vector3::new(1.0, 0.0, 1.0))
                + Vector3::new(0.0, initial.position.y, 0.0);
            scheduler.start(
                TweenKey::new(TweenTarget::Object(id), PropertyGroup::Position),
                live.position,
                settled,
                spec,
                None,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::AABB;
    use crate::gfx::scene::Transform;
    use std::f32::consts::PI;

    fn hit(object: ObjectId, distance: f32) -> Intersection {
        Intersection {
            object,
            distance,
            point: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    fn settle(
        registry: &mut ObjectRegistry,
        smoke: &mut SmokeEffect,
        scheduler: &mut TweenScheduler<()>,
    ) {
        for sample in scheduler.advance(5.0).samples {
            match (sample.key.target, sample.key.property) {
                (TweenTarget::Object(id), PropertyGroup::Scale) => {
                    registry.get_mut(id).unwrap().transform.scale = sample.value
                }
                (TweenTarget::Object(id), PropertyGroup::Rotation) => {
                    registry.get_mut(id).unwrap().transform.rotation = sample.value
                }
                (TweenTarget::Smoke, PropertyGroup::Scale) => smoke.scale = sample.value,
                _ => {}
            }
        }
    }

    fn room() -> (ObjectRegistry, ObjectId, ObjectId, ObjectId) {
        let mut registry = ObjectRegistry::new();
        let about = registry
            .register(
                "About_Button_Fourth_Raycaster_Hover_Pointer",
                Transform::default(),
                AABB::unit(),
            )
            .unwrap();
        let fish = registry
            .register("Fish_Third_Raycaster_Hover", Transform::default(), AABB::unit())
            .unwrap();
        let coffee = registry
            .register("Coffee_Second_Raycaster_Hover", Transform::default(), AABB::unit())
            .unwrap();
        (registry, about, fish, coffee)
    }

    #[test]
    fn test_about_button_enter_scales_and_tilts() {
        let (mut registry, about, _, _) = room();
        let mut smoke = SmokeEffect::default();
        let mut scheduler = TweenScheduler::new();
        let mut hover = HoverStateMachine::new(HoverConfig::default());

        let transition = hover
            .update(&[hit(about, 3.0)], &registry, &smoke, &mut scheduler)
            .unwrap();
        assert_eq!(transition.entered, Some(about));
        settle(&mut registry, &mut smoke, &mut scheduler);

        let object = registry.get(about).unwrap();
        assert!((object.transform.scale.x - 1.4).abs() < 1e-6);
        assert!((object.transform.rotation.x + PI / 10.0).abs() < 1e-6);
        assert_eq!(object.initial().scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_switching_targets_exits_previous_first() {
        let (mut registry, about, fish, _) = room();
        let mut smoke = SmokeEffect::default();
        let mut scheduler = TweenScheduler::new();
        let mut hover = HoverStateMachine::new(HoverConfig::default());

        hover.update(&[hit(about, 1.0)], &registry, &smoke, &mut scheduler).unwrap();
        let transition = hover
            .update(&[hit(fish, 1.0), hit(about, 2.0)], &registry, &smoke, &mut scheduler)
            .unwrap();
        assert_eq!(transition.exited, Some(about));
        assert_eq!(transition.entered, Some(fish));
        assert_eq!(hover.state(), HoverState::Hovering(fish));

        settle(&mut registry, &mut smoke, &mut scheduler);
        assert_eq!(registry.get(about).unwrap().transform.scale.x, 1.0);
        assert!((registry.get(fish).unwrap().transform.scale.x - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_same_target_is_not_replayed() {
        let (registry, about, _, _) = room();
        let smoke = SmokeEffect::default();
        let mut scheduler: TweenScheduler<()> = TweenScheduler::new();
        let mut hover = HoverStateMachine::new(HoverConfig::default());

        hover.update(&[hit(about, 1.0)], &registry, &smoke, &mut scheduler).unwrap();
        let handle = scheduler.handle_of(TweenKey::new(TweenTarget::Object(about), PropertyGroup::Scale));
        let transition = hover.update(&[hit(about, 1.0)], &registry, &smoke, &mut scheduler).unwrap();
        assert!(!transition.is_change());
        assert_eq!(
            scheduler.handle_of(TweenKey::new(TweenTarget::Object(about), PropertyGroup::Scale)),
            handle
        );
    }

    #[test]
    fn test_coffee_drives_smoke() {
        let (mut registry, _, _, coffee) = room();
        let mut smoke = SmokeEffect::default();
        let mut scheduler = TweenScheduler::new();
        let mut hover = HoverStateMachine::new(HoverConfig::default());

        hover.update(&[hit(coffee, 1.0)], &registry, &smoke, &mut scheduler).unwrap();
        settle(&mut registry, &mut smoke, &mut scheduler);
        assert!((smoke.scale.x - 1.4).abs() < 1e-6);

        hover.update(&[], &registry, &smoke, &mut scheduler).unwrap();
        settle(&mut registry, &mut smoke, &mut scheduler);
        assert_eq!(smoke.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(hover.state(), HoverState::Idle);
    }

    #[test]
    fn test_force_exit_clears_state() {
        let (registry, about, _, _) = room();
        let smoke = SmokeEffect::default();
        let mut scheduler: TweenScheduler<()> = TweenScheduler::new();
        let mut hover = HoverStateMachine::new(HoverConfig::default());

        hover.update(&[hit(about, 1.0)], &registry, &smoke, &mut scheduler).unwrap();
        assert_eq!(hover.force_exit(&registry, &smoke, &mut scheduler), Ok(Some(about)));
        assert_eq!(hover.state(), HoverState::Idle);
        assert_eq!(hover.force_exit(&registry, &smoke, &mut scheduler), Ok(None));
    }

    #[test]
    fn test_cursor_follows_pointer_tag_only() {
        let (mut registry, about, fish, _) = room();
        assert_eq!(
            HoverStateMachine::cursor_for(&[hit(about, 1.0)], &registry),
            CursorStyle::Interactive
        );
        assert_eq!(
            HoverStateMachine::cursor_for(&[hit(fish, 1.0), hit(about, 2.0)], &registry),
            CursorStyle::Default
        );
        let wall = registry
            .register("Wall_Pointer_Raycaster", Transform::default(), AABB::unit())
            .unwrap();
        assert_eq!(
            HoverStateMachine::cursor_for(&[hit(wall, 1.0)], &registry),
            CursorStyle::Interactive
        );
        assert_eq!(HoverStateMachine::cursor_for(&[], &registry), CursorStyle::Default);
    }
}
