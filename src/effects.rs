//! # Effects and Collaborators
//!
//! The engine never touches the DOM-like UI layer or the audio player
//! directly. It appends [`UiRequest`]s and [`AudioCommand`]s to an
//! [`Effects`] outbox, and the host drains the outbox into its
//! [`UiSurface`] and [`AudioBackend`] implementations after each call.

use cgmath::Vector3;

use crate::modal::Modal;
use crate::theme::Theme;
use crate::tween::{Easing, PropertyGroup, TweenHandle, TweenKey, TweenScheduler, TweenSpec, TweenTarget};

/// UI elements the engine animates (feedback bounces, cover reveal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiElement {
    LoadingCover,
    ThemeButton,
    MuteButton,
    ExitButton,
}

/// Pointer affordance over the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Interactive,
}

/// Sun or moon glyph on the theme toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

/// Requests for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiRequest {
    SetCursor(CursorStyle),
    ShowModal(Modal),
    HideModal(Modal),
    /// Open `url` in a new top-level context with no opener handle.
    OpenExternal(String),
    ShowThemeIcon(ThemeIcon),
    /// Body theme class / favicon set should follow the new theme.
    ThemeChanged(Theme),
    ShowMuteIcon { muted: bool },
    /// Element animation sample: `rotation` in degrees, `scale` factor.
    ElementFeedback { element: UiElement, rotation: f32, scale: f32 },
    /// Loading cover slide-out progress, `0..=1`.
    CoverReveal { progress: f32 },
    RemoveLoadingCover,
    EnterButtonReady,
    EnterButtonDisabled,
}

/// Audio clips the engine can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioClip {
    Click,
    BackgroundMusic,
}

/// Fire-and-forget audio player commands.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Play(AudioClip),
    SetMuted(AudioClip, bool),
    SetVolume(AudioClip, f32),
    Fade {
        clip: AudioClip,
        from: f32,
        to: f32,
        duration_ms: u32,
    },
}

/// Outbox of requests produced by one engine call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Effects {
    pub ui: Vec<UiRequest>,
    pub audio: Vec<AudioCommand>,
}

impl Effects {
    pub fn ui(&mut self, request: UiRequest) {
        self.ui.push(request);
    }

    pub fn audio(&mut self, command: AudioCommand) {
        self.audio.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.ui.is_empty() && self.audio.is_empty()
    }

    /// Take everything queued so far, leaving the outbox empty.
    pub fn take(&mut self) -> Effects {
        std::mem::take(self)
    }

    /// Hand queued requests to the collaborators, in order.
    pub fn dispatch(self, ui: &mut dyn UiSurface, audio: &mut dyn AudioBackend) {
        for request in &self.ui {
            ui.apply(request);
        }
        for command in &self.audio {
            audio.execute(command);
        }
    }
}

/// Rotate-and-scale press animation on a UI element.
///
/// [`press`](Self::press) drives the element out to `rotation`/`scale` and
/// reports `release_cue` when it lands; the owner answers the cue with
/// [`release`](Self::release), which settles the element back to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonFeedback {
    /// Degrees.
    pub rotation: f32,
    pub scale: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl ButtonFeedback {
    pub fn key(element: UiElement) -> TweenKey {
        TweenKey::new(TweenTarget::Element(element), PropertyGroup::Feedback)
    }

    pub fn press<C>(
        &self,
        scheduler: &mut TweenScheduler<C>,
        element: UiElement,
        release_cue: C,
    ) -> TweenHandle {
        scheduler.start(
            Self::key(element),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(self.rotation, self.scale, 0.0),
            TweenSpec::new(self.duration, self.easing),
            Some(release_cue),
        )
    }

    pub fn release<C>(&self, scheduler: &mut TweenScheduler<C>, element: UiElement) -> TweenHandle {
        scheduler.start(
            Self::key(element),
            Vector3::new(self.rotation, self.scale, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            TweenSpec::new(self.duration, self.easing),
            None,
        )
    }
}

/// Presentation layer: cursor, modals, overlays, icons, external links.
pub trait UiSurface {
    fn apply(&mut self, request: &UiRequest);
}

/// Audio player.
pub trait AudioBackend {
    fn execute(&mut self, command: &AudioCommand);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        ui: Vec<UiRequest>,
        audio: Vec<AudioCommand>,
    }

    impl UiSurface for Recorder {
        fn apply(&mut self, request: &UiRequest) {
            self.ui.push(request.clone());
        }
    }

    impl AudioBackend for Recorder {
        fn execute(&mut self, command: &AudioCommand) {
            self.audio.push(command.clone());
        }
    }

    #[test]
    fn test_dispatch_preserves_order_and_empties_outbox() {
        let mut effects = Effects::default();
        effects.ui(UiRequest::ShowModal(Modal::About));
        effects.audio(AudioCommand::Play(AudioClip::Click));
        effects.ui(UiRequest::SetCursor(CursorStyle::Default));

        let mut ui = Recorder::default();
        let mut audio = Recorder::default();
        effects.take().dispatch(&mut ui, &mut audio);

        assert!(effects.is_empty());
        assert_eq!(
            ui.ui,
            vec![
                UiRequest::ShowModal(Modal::About),
                UiRequest::SetCursor(CursorStyle::Default)
            ]
        );
        assert_eq!(audio.audio, vec![AudioCommand::Play(AudioClip::Click)]);
    }

    #[test]
    fn test_press_reports_release_cue_at_full_extent() {
        let feedback = ButtonFeedback {
            rotation: 45.0,
            scale: 5.0,
            duration: 0.5,
            easing: Easing::BackOut(2.0),
        };
        let mut scheduler = TweenScheduler::new();
        feedback.press(&mut scheduler, UiElement::ThemeButton, "release");

        let report = scheduler.advance(0.5);
        assert_eq!(report.samples[0].value, Vector3::new(45.0, 5.0, 0.0));
        assert_eq!(report.completed, vec!["release"]);

        feedback.release(&mut scheduler, UiElement::ThemeButton);
        let report = scheduler.advance(0.5);
        assert_eq!(report.samples[0].value, Vector3::new(0.0, 1.0, 0.0));
        assert!(report.completed.is_empty());
    }
}
