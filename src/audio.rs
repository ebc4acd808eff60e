//! Background music and click sound state.

use log::info;

use crate::config::AudioConfig;
use crate::effects::{AudioClip, AudioCommand, ButtonFeedback, Effects, UiElement, UiRequest};
use crate::tween::{Easing, TweenScheduler};

#[derive(Debug, Clone)]
pub struct AudioController {
    config: AudioConfig,
    muted: bool,
    music_started: bool,
    music_faded: bool,
    feedback: ButtonFeedback,
}

impl AudioController {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            muted: false,
            music_started: false,
            music_faded: false,
            feedback: ButtonFeedback {
                rotation: -45.0,
                scale: 5.0,
                duration: 0.5,
                easing: Easing::BackOut(2.0),
            },
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_music_faded(&self) -> bool {
        self.music_faded
    }

    pub fn button_feedback(&self) -> ButtonFeedback {
        self.feedback
    }

    pub fn click(&self, effects: &mut Effects) {
        effects.audio(AudioCommand::Play(AudioClip::Click));
    }

    /// Start the looping background track. Later calls do nothing.
    pub fn start_music(&mut self, effects: &mut Effects) {
        if self.music_started {
            return;
        }
        self.music_started = true;
        let volume = if self.muted { 0.0 } else { self.config.music_volume };
        effects.audio(AudioCommand::SetVolume(AudioClip::Click, self.config.click_volume));
        effects.audio(AudioCommand::SetVolume(AudioClip::BackgroundMusic, volume));
        effects.audio(AudioCommand::Play(AudioClip::BackgroundMusic));
    }

    /// Flip mute. Silences music and clicks, swaps the icon and plays the
    /// mute button's press animation; `release_cue` settles it.
    pub fn toggle_mute<C>(
        &mut self,
        scheduler: &mut TweenScheduler<C>,
        effects: &mut Effects,
        release_cue: C,
    ) -> bool {
        self.muted = !self.muted;
        info!("audio {}", if self.muted { "muted" } else { "unmuted" });

        let volume = if self.muted {
            0.0
        } else if self.music_faded {
            self.config.faded_volume
        } else {
            self.config.music_volume
        };
        effects.audio(AudioCommand::SetVolume(AudioClip::BackgroundMusic, volume));
        effects.audio(AudioCommand::SetMuted(AudioClip::Click, self.muted));
        effects.ui(UiRequest::ShowMuteIcon { muted: self.muted });
        self.click(effects);

        self.feedback.press(scheduler, UiElement::MuteButton, release_cue);
        self.muted
    }

    /// Duck the music under a modal. Skipped while muted.
    pub fn fade_out(&mut self, effects: &mut Effects) {
        if !self.config.fade_music_in_modals || self.muted || self.music_faded {
            return;
        }
        self.music_faded = true;
        effects.audio(AudioCommand::Fade {
            clip: AudioClip::BackgroundMusic,
            from: self.config.music_volume,
            to: self.config.faded_volume,
            duration_ms: self.config.fade_ms,
        });
    }

    pub fn fade_in(&mut self, effects: &mut Effects) {
        if self.muted || !self.music_faded {
            return;
        }
        self.music_faded = false;
        effects.audio(AudioCommand::Fade {
            clip: AudioClip::BackgroundMusic,
            from: self.config.faded_volume,
            to: self.config.music_volume,
            duration_ms: self.config.fade_ms,
        });
    }
}
