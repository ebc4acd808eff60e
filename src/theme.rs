//! # Day/Night Theme
//!
//! Every themed material carries a day and a night texture and blends between
//! them with a mix ratio (`0` = day, `1` = night). The coordinator owns those
//! ratios and the scene background color, and drives both through the tween
//! scheduler so a renderer only has to read [`ThemeCoordinator::uniforms`].

use bytemuck::{Pod, Zeroable};
use cgmath::Vector3;
use log::info;

use crate::config::ThemeConfig;
use crate::effects::{AudioClip, AudioCommand, ButtonFeedback, Effects, ThemeIcon, UiElement, UiRequest};
use crate::gfx::scene::TextureSet;
use crate::tween::{
    Easing, PropertyGroup, Sample, TweenKey, TweenScheduler, TweenSpec, TweenTarget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    /// Mix ratio endpoint of this theme.
    pub fn blend_ratio(self) -> f32 {
        match self {
            Theme::Day => 0.0,
            Theme::Night => 1.0,
        }
    }

    pub fn icon(self) -> ThemeIcon {
        match self {
            Theme::Day => ThemeIcon::Sun,
            Theme::Night => ThemeIcon::Moon,
        }
    }
}

/// Per-material theme uniform, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ThemeUniform {
    pub mix_ratio: f32,
    pub texture_set: u32,
    pub _padding: [u32; 2],
}

pub const BACKGROUND_KEY: TweenKey = TweenKey {
    target: TweenTarget::Background,
    property: PropertyGroup::Color,
};

pub fn mix_ratio_key(set: TextureSet) -> TweenKey {
    TweenKey::new(TweenTarget::Material(set), PropertyGroup::MixRatio)
}

fn set_index(set: TextureSet) -> usize {
    set.shader_index() as usize - 1
}

#[derive(Debug, Clone)]
pub struct ThemeCoordinator {
    theme: Theme,
    mix_ratios: [f32; 4],
    background: Vector3<f32>,
    night_color: Vector3<f32>,
    day_color: Vector3<f32>,
    blend: TweenSpec,
    feedback: ButtonFeedback,
}

impl ThemeCoordinator {
    /// The room opens at night.
    pub fn new(config: &ThemeConfig) -> Self {
        let night_color = config.night_background.to_vec();
        Self {
            theme: Theme::Night,
            mix_ratios: [Theme::Night.blend_ratio(); 4],
            background: night_color,
            night_color,
            day_color: config.day_background.to_vec(),
            blend: TweenSpec::new(config.blend_duration, Easing::Power2InOut),
            feedback: ButtonFeedback {
                rotation: config.feedback_rotation,
                scale: config.feedback_scale,
                duration: config.feedback_duration,
                easing: Easing::BackOut(2.0),
            },
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_night(&self) -> bool {
        self.theme == Theme::Night
    }

    pub fn mix_ratio(&self, set: TextureSet) -> f32 {
        self.mix_ratios[set_index(set)]
    }

    pub fn background(&self) -> Vector3<f32> {
        self.background
    }

    pub fn color_for(&self, theme: Theme) -> Vector3<f32> {
        match theme {
            Theme::Day => self.day_color,
            Theme::Night => self.night_color,
        }
    }

    pub fn button_feedback(&self) -> ButtonFeedback {
        self.feedback
    }

    /// Flip between day and night.
    ///
    /// The background swaps at once. Every mix ratio is tweened from its
    /// current value toward the new endpoint, so a toggle in mid-blend turns
    /// around smoothly instead of jumping. `release_cue` is reported when the
    /// toggle button's press animation lands.
    pub fn toggle<C>(
        &mut self,
        scheduler: &mut TweenScheduler<C>,
        effects: &mut Effects,
        release_cue: C,
    ) -> Theme {
        self.theme = self.theme.toggled();
        info!("theme toggled to {:?}", self.theme);

        effects.ui(UiRequest::ThemeChanged(self.theme));
        effects.audio(AudioCommand::Play(AudioClip::Click));

        scheduler.cancel(BACKGROUND_KEY);
        self.background = self.color_for(self.theme);

        self.feedback
            .press(scheduler, UiElement::ThemeButton, release_cue);
        effects.ui(UiRequest::ShowThemeIcon(self.theme.icon()));

        self.blend_materials(scheduler, self.theme.blend_ratio(), self.blend);
        self.theme
    }

    /// Scripted night-to-day transition: materials and background both
    /// animate with `spec`.
    pub fn blend_to_day<C>(&mut self, scheduler: &mut TweenScheduler<C>, spec: TweenSpec) {
        info!("blending night to day");
        self.theme = Theme::Day;
        self.blend_materials(scheduler, Theme::Day.blend_ratio(), spec);
        scheduler.start(BACKGROUND_KEY, self.background, self.day_color, spec, None);
    }

    fn blend_materials<C>(&self, scheduler: &mut TweenScheduler<C>, to: f32, spec: TweenSpec) {
        for set in TextureSet::ALL {
            scheduler.start_scalar(mix_ratio_key(set), self.mix_ratio(set), to, spec, None);
        }
    }

    /// Apply a tween sample that belongs to the theme. Returns false for
    /// samples owned by someone else.
    pub fn apply_sample(&mut self, sample: &Sample) -> bool {
        match (sample.key.target, sample.key.property) {
            (TweenTarget::Material(set), PropertyGroup::MixRatio) => {
                self.mix_ratios[set_index(set)] = sample.value.x.clamp(0.0, 1.0);
                true
            }
            (TweenTarget::Background, PropertyGroup::Color) => {
                self.background = sample.value;
                true
            }
            _ => false,
        }
    }

    pub fn uniforms(&self) -> [ThemeUniform; 4] {
        TextureSet::ALL.map(|set| ThemeUniform {
            mix_ratio: self.mix_ratio(set),
            texture_set: set.shader_index(),
            _padding: [0; 2],
        })
    }
}
