//! # Room Engine
//!
//! Ties the room together: object registry, pointer resolution, hover,
//! activation routing, camera transitions, theme, intro and idle motion,
//! all driven by one tween scheduler.
//!
//! The host feeds input through [`RoomEngine::pointer_input`],
//! [`RoomEngine::device_event`] and the UI control methods, calls
//! [`RoomEngine::frame`] once per rendered frame, and drains
//! [`RoomEngine::take_effects`] into its UI and audio collaborators.
//!
//! Input handlers only record state. Ray casting, hover evaluation and tween
//! sampling all happen inside [`frame`](RoomEngine::frame), which never
//! fails: per-step errors are logged and the frame carries on.

use cgmath::Vector3;
use log::{debug, info, trace, warn};
use winit::event::DeviceEvent;

use crate::audio::AudioController;
use crate::config::RoomConfig;
use crate::effects::{ButtonFeedback, CursorStyle, Effects, UiElement, UiRequest};
use crate::error::{ConfigError, EngineError};
use crate::gfx::camera::{
    convert_matrix4_to_array, CameraController, CameraPose, CameraTransitionSequencer,
    CameraUniform, OrbitControls, Projection,
};
use crate::gfx::picking::{Intersection, PointerResolver};
use crate::gfx::scene::{CapabilityFlags, ObjectId, ObjectRegistry, Transform};
use crate::idle::IdleAnimator;
use crate::interaction::{
    Action, HoverState, HoverStateMachine, InputGate, InteractionDispatcher, PointerInput,
    SmokeEffect,
};
use crate::intro::{IntroPhase, IntroSequencer};
use crate::modal::{Modal, ModalState};
use crate::theme::{Theme, ThemeCoordinator, ThemeUniform};
use crate::tween::{Easing, PropertyGroup, Sample, TweenScheduler, TweenTarget};

/// Continuations attached to tweens, run when the tween completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    ShowModal(Modal),
    HideModal(Modal),
    RevealFinished,
    /// Settle a pressed UI element back to rest.
    Release(UiElement),
}

/// The mutable interaction state threaded through every frame.
#[derive(Debug, Clone)]
pub struct InteractionState {
    pub modal: ModalState,
    pub hover: HoverStateMachine,
    pub cursor: CursorStyle,
    pub input: InputGate,
}

/// One object's model matrix for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDraw {
    pub object: ObjectId,
    pub model: [[f32; 4]; 4],
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub camera: CameraUniform,
    pub camera_pose: CameraPose,
    pub themes: [ThemeUniform; 4],
    pub background: [f32; 3],
    pub objects: Vec<ObjectDraw>,
    /// Smoke plume model matrix, once the coffee cup is known.
    pub smoke: Option<[[f32; 4]; 4]>,
    pub cursor: CursorStyle,
}

pub struct RoomEngine {
    config: RoomConfig,
    registry: ObjectRegistry,
    scheduler: TweenScheduler<Cue>,
    controls: OrbitControls,
    controller: CameraController,
    projection: Projection,
    camera: CameraTransitionSequencer,
    resolver: PointerResolver,
    dispatcher: InteractionDispatcher,
    state: InteractionState,
    theme: ThemeCoordinator,
    intro: IntroSequencer,
    idle: IdleAnimator,
    audio: AudioController,
    smoke: SmokeEffect,
    exit_feedback: ButtonFeedback,
    viewport: (f32, f32),
    effects: Effects,
}

impl RoomEngine {
    /// Build the engine for a viewport of `width` x `height` pixels.
    ///
    /// The viewport width picks the desktop or mobile starting pose, which is
    /// snapshotted as the initial pose. The loading cover starts open.
    pub fn new(
        config: RoomConfig,
        registry: ObjectRegistry,
        width: f32,
        height: f32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let camera_config = &config.camera;
        let device = camera_config.device(width);
        let mut controls =
            OrbitControls::new(device.pose.pose(), camera_config.orbit_bounds(device));
        let initial = controls.pose;
        let modal = ModalState::new();
        controls.enabled = !modal.input_suppressed();

        info!(
            "room engine created for {}x{} viewport, initial camera {:?}",
            width, height, initial
        );

        Ok(Self {
            registry,
            scheduler: TweenScheduler::new(),
            controls,
            controller: CameraController::new(camera_config.rotate_speed, camera_config.zoom_speed),
            projection: Projection::new(
                camera_config.fov_degrees,
                aspect(width, height),
                camera_config.near,
                camera_config.far,
            ),
            camera: CameraTransitionSequencer::new(
                initial,
                camera_config.transition_duration,
                Easing::Power2InOut,
            ),
            resolver: PointerResolver::new(),
            dispatcher: InteractionDispatcher::new(&config),
            state: InteractionState {
                modal,
                hover: HoverStateMachine::new(config.hover.clone()),
                cursor: CursorStyle::Default,
                input: InputGate::new(),
            },
            theme: ThemeCoordinator::new(&config.theme),
            intro: IntroSequencer::new(config.intro.clone()),
            idle: IdleAnimator::new(config.idle.clone()),
            audio: AudioController::new(config.audio.clone()),
            smoke: SmokeEffect::default(),
            exit_feedback: ButtonFeedback {
                rotation: 0.0,
                scale: 5.0,
                duration: 0.5,
                easing: Easing::BackOut(2.0),
            },
            viewport: (width, height),
            effects: Effects::default(),
            config,
        })
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Registry access for the asset loader, until [`assets_ready`](Self::assets_ready) freezes it.
    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.controls.pose
    }

    pub fn initial_pose(&self) -> CameraPose {
        self.camera.initial_pose()
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn is_camera_transitioning(&self) -> bool {
        self.camera.is_transitioning(&self.scheduler)
    }

    pub fn theme(&self) -> &ThemeCoordinator {
        &self.theme
    }

    pub fn modal(&self) -> Option<Modal> {
        self.state.modal.open_modal()
    }

    pub fn hover_state(&self) -> HoverState {
        self.state.hover.state()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.state.cursor
    }

    pub fn intro_phase(&self) -> IntroPhase {
        self.intro.phase()
    }

    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    pub fn smoke(&self) -> &SmokeEffect {
        &self.smoke
    }

    /// Hits from the last frame, nearest first.
    pub fn intersections(&self) -> &[Intersection] {
        self.resolver.current()
    }

    /// Drain everything queued for the UI and audio collaborators.
    pub fn take_effects(&mut self) -> Effects {
        self.effects.take()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.projection.resize(width, height);
    }

    /// Asset loading finished: freeze the registry, anchor the smoke above
    /// the coffee cup and open the enter gate.
    pub fn assets_ready(&mut self) {
        self.registry.freeze();
        if let Some(coffee) = self.registry.last_with(CapabilityFlags::COFFEE) {
            if let Some(object) = self.registry.get(coffee) {
                let lift = Vector3::new(0.0, self.config.idle.smoke_lift, 0.0);
                self.smoke.anchor = Some(object.initial().position + lift);
            }
        }
        self.intro.assets_ready(&mut self.effects);
    }

    /// Enter gesture on the loading cover.
    pub fn enter(&mut self) -> bool {
        let accepted = self
            .intro
            .enter(&mut self.scheduler, &mut self.effects, Cue::RevealFinished);
        if accepted {
            self.audio.start_music(&mut self.effects);
        }
        accepted
    }

    /// Record pointer input. Activation uses the hits of the last frame.
    pub fn pointer_input(&mut self, input: PointerInput) {
        let outcome = self
            .state
            .input
            .filter(input, self.state.modal.input_suppressed());
        if let Some((x, y)) = outcome.pointer {
            let (width, height) = self.viewport;
            self.resolver.set_pointer_from_client(x, y, width, height);
        }
        if outcome.activate {
            self.activate();
        }
    }

    /// Orbit drag and zoom. Ignored while a modal is open.
    pub fn device_event(&mut self, event: &DeviceEvent) -> bool {
        if self.state.modal.input_suppressed() {
            return false;
        }
        self.controller.process_events(event, &mut self.controls)
    }

    /// Click or tap on the scene.
    pub fn activate(&mut self) {
        let actions = self.dispatcher.activate(
            self.resolver.current(),
            &self.registry,
            &self.state.modal,
        );
        for action in actions {
            self.perform(action);
        }
    }

    fn perform(&mut self, action: Action) {
        debug!("performing {:?}", action);
        match action {
            Action::PlayClick => self.audio.click(&mut self.effects),
            Action::OpenLink(url) => self.effects.ui(UiRequest::OpenExternal(url)),
            Action::FocusThenOpenModal { focus, modal } => {
                let spec = self.camera.default_spec();
                self.camera.transition_to(
                    &mut self.scheduler,
                    &self.controls.pose,
                    focus,
                    spec,
                    Some(Cue::ShowModal(modal)),
                );
            }
            Action::OpenModal(modal) => self.open_modal(modal),
            Action::FocusCamera(focus) => {
                let spec = self.camera.default_spec();
                self.camera
                    .transition_to(&mut self.scheduler, &self.controls.pose, focus, spec, None);
            }
            Action::ResetCamera => {
                self.camera
                    .reset_to_initial(&mut self.scheduler, &self.controls.pose, None);
            }
        }
    }

    /// HUD "about" control: same route as the in-scene about button.
    pub fn open_about(&mut self) {
        if self.state.modal.is_open() {
            return;
        }
        let action = self.dispatcher.open_modal_action(Modal::About);
        self.perform(action);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(
            &mut self.scheduler,
            &mut self.effects,
            Cue::Release(UiElement::ThemeButton),
        )
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.audio.toggle_mute(
            &mut self.scheduler,
            &mut self.effects,
            Cue::Release(UiElement::MuteButton),
        )
    }

    /// Exit button inside a modal: the camera returns to its initial pose
    /// and the modal closes once it gets there.
    pub fn exit_modal(&mut self) {
        let Some(modal) = self.closable_modal() else {
            return;
        };
        self.audio.click(&mut self.effects);
        self.exit_feedback.press(
            &mut self.scheduler,
            UiElement::ExitButton,
            Cue::Release(UiElement::ExitButton),
        );
        self.camera.reset_to_initial(
            &mut self.scheduler,
            &self.controls.pose,
            Some(Cue::HideModal(modal)),
        );
    }

    /// Overlay click: close the open modal at once, camera untouched.
    pub fn dismiss_modal(&mut self) {
        if let Some(modal) = self.closable_modal() {
            self.hide_modal(modal);
        }
    }

    fn closable_modal(&self) -> Option<Modal> {
        self.state
            .modal
            .open_modal()
            .filter(|modal| *modal != Modal::LoadingCover)
    }

    fn open_modal(&mut self, modal: Modal) {
        if let Some(previous) = self.state.modal.open(modal).filter(|p| *p != modal) {
            self.effects.ui(UiRequest::HideModal(previous));
        }
        if let Err(err) =
            self.state
                .hover
                .force_exit(&self.registry, &self.smoke, &mut self.scheduler)
        {
            warn!("hover exit on modal open failed: {}", err);
        }
        self.set_cursor(CursorStyle::Default);
        self.resolver.clear();
        self.controls.enabled = false;
        self.effects.ui(UiRequest::ShowModal(modal));
        self.audio.fade_out(&mut self.effects);
    }

    fn hide_modal(&mut self, modal: Modal) {
        if !self.state.modal.close(modal) {
            return;
        }
        self.controls.enabled = true;
        self.effects.ui(UiRequest::HideModal(modal));
        self.audio.fade_in(&mut self.effects);
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        if self.state.cursor != cursor {
            self.state.cursor = cursor;
            self.effects.ui(UiRequest::SetCursor(cursor));
        }
    }

    /// Advance one rendered frame.
    ///
    /// `dt` is the time since the previous frame and `elapsed` the time since
    /// startup, both in seconds.
    pub fn frame(&mut self, dt: f32, elapsed: f32) -> FrameSnapshot {
        let report = self.scheduler.advance(dt);
        for sample in &report.samples {
            if let Err(err) = self.apply_sample(sample) {
                warn!("dropping tween sample: {}", err);
            }
        }
        self.controls.update();

        for cue in report.completed {
            if let Err(err) = self.complete(cue) {
                warn!("completion {:?} failed: {}", cue, err);
            }
        }

        self.idle.apply(&mut self.registry, elapsed);

        if let Err(err) = self.update_hover() {
            warn!("hover update failed: {}", err);
        }

        let snapshot = self.snapshot();
        trace!(
            "frame: camera {:?}, {} objects",
            snapshot.camera_pose,
            snapshot.objects.len()
        );
        snapshot
    }

    fn update_hover(&mut self) -> Result<(), EngineError> {
        let suppressed = self.state.modal.input_suppressed();
        let hits = self.resolver.resolve_intersections(
            &self.controls.pose,
            &self.projection,
            &self.registry,
            suppressed,
        );
        if suppressed {
            return Ok(());
        }
        let cursor = HoverStateMachine::cursor_for(hits, &self.registry);
        let result = self
            .state
            .hover
            .update(hits, &self.registry, &self.smoke, &mut self.scheduler);
        self.set_cursor(cursor);
        result.map(|_| ())
    }

    fn apply_sample(&mut self, sample: &Sample) -> Result<(), EngineError> {
        if self.theme.apply_sample(sample) {
            return Ok(());
        }
        let value = sample.value;
        match (sample.key.target, sample.key.property) {
            (TweenTarget::Object(id), property) => {
                let object = self
                    .registry
                    .get_mut(id)
                    .ok_or(EngineError::UnknownObject(id))?;
                match property {
                    PropertyGroup::Scale => object.transform.scale = value,
                    PropertyGroup::Rotation => object.transform.rotation = value,
                    PropertyGroup::Position => object.transform.position = value,
                    _ => {}
                }
            }
            (TweenTarget::Camera, PropertyGroup::Position) => self.controls.pose.position = value,
            (TweenTarget::Camera, PropertyGroup::OrbitTarget) => self.controls.pose.target = value,
            (TweenTarget::Smoke, PropertyGroup::Scale) => self.smoke.scale = value,
            (TweenTarget::Element(element), PropertyGroup::Feedback) => {
                self.effects.ui(UiRequest::ElementFeedback {
                    element,
                    rotation: value.x,
                    scale: value.y,
                })
            }
            (TweenTarget::Element(UiElement::LoadingCover), PropertyGroup::Reveal) => {
                self.effects.ui(UiRequest::CoverReveal { progress: value.x })
            }
            _ => {}
        }
        Ok(())
    }

    fn complete(&mut self, cue: Cue) -> Result<(), EngineError> {
        debug!("cue {:?}", cue);
        match cue {
            Cue::ShowModal(modal) => {
                if let Some(open) = self.state.modal.open_modal() {
                    debug!("{:?} already open, dropping deferred {:?}", open, modal);
                } else {
                    self.open_modal(modal);
                }
            }
            Cue::HideModal(modal) => self.hide_modal(modal),
            Cue::RevealFinished => {
                self.state.modal.close(Modal::LoadingCover);
                self.controls.enabled = true;
                self.intro.reveal_finished(
                    &mut self.registry,
                    &mut self.theme,
                    &mut self.scheduler,
                    &mut self.effects,
                )?;
            }
            Cue::Release(element) => {
                let feedback = match element {
                    UiElement::ThemeButton => self.theme.button_feedback(),
                    UiElement::MuteButton => self.audio.button_feedback(),
                    UiElement::ExitButton | UiElement::LoadingCover => self.exit_feedback,
                };
                feedback.release(&mut self.scheduler, element);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> FrameSnapshot {
        let background = self.theme.background();
        let smoke = self.smoke.anchor.map(|anchor| {
            let transform = Transform {
                scale: self.smoke.scale,
                ..Transform::at(anchor)
            };
            convert_matrix4_to_array(transform.matrix())
        });
        FrameSnapshot {
            camera: CameraUniform::from_pose(&self.controls.pose, &self.projection),
            camera_pose: self.controls.pose,
            themes: self.theme.uniforms(),
            background: [background.x, background.y, background.z],
            objects: self
                .registry
                .iter()
                .map(|object| ObjectDraw {
                    object: object.id(),
                    model: convert_matrix4_to_array(object.transform.matrix()),
                })
                .collect(),
            smoke,
            cursor: self.state.cursor,
        }
    }
}

fn aspect(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::AABB;
    use crate::tween::{TweenKey, TweenSpec};

    fn engine() -> RoomEngine {
        let mut registry = ObjectRegistry::new();
        registry
            .register(
                "Coffee_Second_Raycaster_Hover",
                Transform::at(Vector3::new(1.0, 2.0, 3.0)),
                AABB::unit(),
            )
            .unwrap();
        RoomEngine::new(RoomConfig::default(), registry, 1280.0, 720.0).unwrap()
    }

    #[test]
    fn test_desktop_and_mobile_initial_pose() {
        let desktop = engine();
        assert!((desktop.initial_pose().position.x - 21.5).abs() < 1e-3);

        let mobile =
            RoomEngine::new(RoomConfig::default(), ObjectRegistry::new(), 500.0, 900.0).unwrap();
        assert_eq!(mobile.controls().bounds.max_distance, Some(45.0));
        assert!((mobile.controls().distance() - 45.0).abs() < 1e-3);
        assert_eq!(mobile.initial_pose(), mobile.camera_pose());
    }

    #[test]
    fn test_smoke_anchors_above_coffee() {
        let mut engine = engine();
        engine.assets_ready();
        let anchor = engine.smoke().anchor.unwrap();
        assert!((anchor.y - 2.2).abs() < 1e-6);
        assert!(engine.registry().is_frozen());
        assert_eq!(engine.take_effects().ui, vec![UiRequest::EnterButtonReady]);
    }

    #[test]
    fn test_sample_for_unknown_object_does_not_stop_the_frame() {
        let mut engine = engine();
        let ghost = ObjectId(99);
        engine.scheduler.start_scalar(
            TweenKey::new(TweenTarget::Object(ghost), PropertyGroup::Scale),
            0.0,
            1.0,
            TweenSpec::new(0.1, Easing::Linear),
            Some(Cue::Release(UiElement::ThemeButton)),
        );

        engine.frame(0.2, 0.2);
        assert!(engine
            .scheduler
            .is_active(ButtonFeedback::key(UiElement::ThemeButton)));
    }

    #[test]
    fn test_loading_cover_blocks_scene_until_revealed() {
        let mut engine = engine();
        assert_eq!(engine.modal(), Some(Modal::LoadingCover));
        assert!(!engine.controls().enabled);

        engine.assets_ready();
        assert!(engine.enter());
        assert!(!engine.enter());
        for step in 0..30 {
            engine.frame(0.1, step as f32 * 0.1);
        }
        assert_eq!(engine.modal(), None);
        assert!(engine.controls().enabled);
        assert_eq!(engine.intro_phase(), IntroPhase::Done);
    }

    #[test]
    fn test_inverted_orbit_bounds_fail_construction() {
        let mut config = RoomConfig::default();
        config.camera.min_distance = 50.0;
        let result = RoomEngine::new(config, ObjectRegistry::new(), 1280.0, 720.0);
        assert!(matches!(result, Err(ConfigError::InvalidBounds { .. })));
    }
}
