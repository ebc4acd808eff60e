//! # Intro Sequence
//!
//! Plays once per session. Asset loading marks the enter control ready; the
//! first enter gesture after that slides the loading cover away, and only
//! when the cover is gone do the room's props pop in while the theme blends
//! from night to day.
//!
//! ```text
//! AwaitingAssets --assets_ready--> Ready --enter--> Revealing --reveal_finished--> Done
//! ```

use cgmath::Vector3;
use log::{debug, info};

use crate::config::IntroConfig;
use crate::effects::{Effects, UiElement, UiRequest};
use crate::error::EngineError;
use crate::gfx::scene::{ObjectId, ObjectRegistry};
use crate::theme::ThemeCoordinator;
use crate::tween::{Easing, PropertyGroup, TweenKey, TweenScheduler, TweenSpec, TweenTarget};

pub const COVER_REVEAL_KEY: TweenKey = TweenKey {
    target: TweenTarget::Element(UiElement::LoadingCover),
    property: PropertyGroup::Reveal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    AwaitingAssets,
    Ready,
    Revealing,
    Done,
}

/// One object's pop-in, in real seconds from the end of the cover reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStep {
    pub object: ObjectId,
    pub spec: TweenSpec,
}

#[derive(Debug, Clone)]
pub struct IntroSequencer {
    phase: IntroPhase,
    config: IntroConfig,
}

impl IntroSequencer {
    pub fn new(config: IntroConfig) -> Self {
        Self {
            phase: IntroPhase::AwaitingAssets,
            config,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Open the enter gate. Only the first call has an effect.
    pub fn assets_ready(&mut self, effects: &mut Effects) -> bool {
        if self.phase != IntroPhase::AwaitingAssets {
            return false;
        }
        info!("assets ready, waiting for enter");
        self.phase = IntroPhase::Ready;
        effects.ui(UiRequest::EnterButtonReady);
        true
    }

    /// Accept the enter gesture and start the cover reveal.
    ///
    /// Ignored before assets are ready and after the first accepted gesture.
    /// `reveal_cue` is reported when the cover has slid away.
    pub fn enter<C>(
        &mut self,
        scheduler: &mut TweenScheduler<C>,
        effects: &mut Effects,
        reveal_cue: C,
    ) -> bool {
        if self.phase != IntroPhase::Ready {
            debug!("enter gesture ignored in {:?}", self.phase);
            return false;
        }
        info!("intro started");
        self.phase = IntroPhase::Revealing;
        effects.ui(UiRequest::EnterButtonDisabled);

        let spec = TweenSpec::new(self.config.reveal_duration, Easing::Power2InOut)
            .with_delay(self.config.reveal_delay);
        scheduler.start_scalar(COVER_REVEAL_KEY, 0.0, 1.0, spec, Some(reveal_cue));
        true
    }

    /// Second half of the intro, run when the cover reveal completes.
    pub fn reveal_finished<C>(
        &mut self,
        registry: &mut ObjectRegistry,
        theme: &mut ThemeCoordinator,
        scheduler: &mut TweenScheduler<C>,
        effects: &mut Effects,
    ) -> Result<bool, EngineError> {
        if self.phase != IntroPhase::Revealing {
            return Ok(false);
        }
        self.phase = IntroPhase::Done;
        effects.ui(UiRequest::RemoveLoadingCover);

        let steps = self.reveal_steps(registry);
        info!("revealing {} objects", steps.len());
        for step in steps {
            let object = registry
                .get_mut(step.object)
                .ok_or(EngineError::UnknownObject(step.object))?;
            object.transform.scale = Vector3::new(0.0, 0.0, 0.0);
            scheduler.start(
                TweenKey::new(TweenTarget::Object(step.object), PropertyGroup::Scale),
                object.transform.scale,
                object.initial().scale,
                step.spec,
                None,
            );
        }

        let blend = TweenSpec::new(self.config.theme_duration, Easing::Power2InOut)
            .with_delay(self.config.theme_delay);
        theme.blend_to_day(scheduler, blend);
        Ok(true)
    }

    /// Pop-in schedule: the cactus, then books in reverse registration order
    /// overlapping each other, then eggs by number with growing gaps.
    ///
    /// Each group runs on its own timeline, so all three start together.
    /// Timeline seconds are divided by the time scale.
    pub fn reveal_steps(&self, registry: &ObjectRegistry) -> Vec<RevealStep> {
        let config = &self.config;
        let pop = Easing::BackOut(config.pop_overshoot);
        let egg = Easing::ElasticOut {
            amplitude: config.egg_amplitude,
            period: config.egg_period,
        };
        let step = |object, start: f32, easing| RevealStep {
            object,
            spec: TweenSpec::new(config.step_duration / config.time_scale, easing)
                .with_delay(start / config.time_scale),
        };

        let mut steps = Vec::new();
        if let Some(cactus) = registry.cactus() {
            steps.push(step(cactus, 0.0, pop));
        }

        let mut start = 0.0;
        for (index, book) in registry.books().into_iter().rev().enumerate() {
            if index > 0 {
                start += config.step_duration - config.book_overlap;
            }
            steps.push(step(book, start, pop));
        }

        let mut end = 0.0;
        for (rank, id) in registry.eggs_by_number().into_iter().enumerate() {
            let start = end + rank as f32 * config.egg_stagger;
            steps.push(step(id, start, egg));
            end = start + config.step_duration;
        }
        steps
    }
}
