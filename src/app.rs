//! # Application Shell
//!
//! A winit window around [`RoomEngine`]. Window and touch input become
//! [`PointerInput`], raw device motion drives the orbit controls, and every
//! redraw runs one engine frame, hands the snapshot to a [`FrameSink`] and
//! drains the engine's effects into the UI and audio collaborators.
//!
//! Keyboard shortcuts stand in for the room's HTML controls:
//!
//! | Key         | Control              |
//! |-------------|----------------------|
//! | `Enter`     | enter button         |
//! | `T`         | theme toggle         |
//! | `M`         | mute toggle          |
//! | `A`         | HUD about button     |
//! | `Backspace` | modal exit button    |
//! | `Delete`    | overlay (dismiss)    |
//! | `Escape`    | quit                 |

use anyhow::Context;
use log::{error, info};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowAttributes, WindowId},
};

use crate::config::RoomConfig;
use crate::effects::{AudioBackend, AudioCommand, CursorStyle, UiRequest, UiSurface};
use crate::engine::{FrameSnapshot, RoomEngine};
use crate::gfx::scene::{load_obj_scene, ObjectRegistry};
use crate::interaction::PointerInput;

/// Receives one [`FrameSnapshot`] per redraw.
pub trait FrameSink {
    fn submit(&mut self, snapshot: &FrameSnapshot);
}

/// Collaborator that only logs. Used when the host supplies nothing better.
#[derive(Debug, Default)]
pub struct LogCollaborator;

impl UiSurface for LogCollaborator {
    fn apply(&mut self, request: &UiRequest) {
        match request {
            UiRequest::ElementFeedback { .. } | UiRequest::CoverReveal { .. } => {
                log::trace!("ui: {:?}", request)
            }
            _ => info!("ui: {:?}", request),
        }
    }
}

impl AudioBackend for LogCollaborator {
    fn execute(&mut self, command: &AudioCommand) {
        info!("audio: {:?}", command);
    }
}

impl FrameSink for LogCollaborator {
    fn submit(&mut self, snapshot: &FrameSnapshot) {
        log::trace!(
            "frame: background {:?}, {} objects",
            snapshot.background,
            snapshot.objects.len()
        );
    }
}

pub struct RoomApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    config: RoomConfig,
    registry: Option<ObjectRegistry>,
    engine: Option<RoomEngine>,
    ui: Box<dyn UiSurface>,
    audio: Box<dyn AudioBackend>,
    sink: Box<dyn FrameSink>,
    started: Instant,
    last_frame: Instant,
}

impl RoomApp {
    /// Create the application. The configuration is validated up front.
    pub fn new(config: RoomConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid room configuration")?;
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let now = Instant::now();

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                config,
                registry: Some(ObjectRegistry::new()),
                engine: None,
                ui: Box::new(LogCollaborator),
                audio: Box::new(LogCollaborator),
                sink: Box::new(LogCollaborator),
                started: now,
                last_frame: now,
            },
        })
    }

    /// Add every named model of an OBJ file to the room.
    pub fn load_obj(&mut self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let registry = self
            .app_state
            .registry
            .as_mut()
            .context("scene already handed to the engine")?;
        let count = load_obj_scene(path, registry)
            .with_context(|| format!("failed to load scene {}", path.display()))?;
        info!("loaded {} objects from {}", count, path.display());
        Ok(count)
    }

    pub fn set_ui(&mut self, ui: impl UiSurface + 'static) {
        self.app_state.ui = Box::new(ui);
    }

    pub fn set_audio(&mut self, audio: impl AudioBackend + 'static) {
        self.app_state.audio = Box::new(audio);
    }

    pub fn set_frame_sink(&mut self, sink: impl FrameSink + 'static) {
        self.app_state.sink = Box::new(sink);
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self.app_state)
            .context("event loop failed")
    }
}

impl AppState {
    fn flush_effects(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let effects = engine.take_effects();
        if let Some(window) = self.window.as_ref() {
            for request in &effects.ui {
                if let UiRequest::SetCursor(style) = request {
                    window.set_cursor(match style {
                        CursorStyle::Interactive => CursorIcon::Pointer,
                        CursorStyle::Default => CursorIcon::Default,
                    });
                }
            }
        }
        effects.dispatch(self.ui.as_mut(), self.audio.as_mut());
    }

    fn keyboard(&mut self, key_code: KeyCode, event_loop: &ActiveEventLoop) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match key_code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Enter => {
                engine.enter();
            }
            KeyCode::KeyT => {
                engine.toggle_theme();
            }
            KeyCode::KeyM => {
                engine.toggle_mute();
            }
            KeyCode::KeyA => engine.open_about(),
            KeyCode::Backspace => engine.exit_modal(),
            KeyCode::Delete => engine.dismiss_modal(),
            _ => {}
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("diorama")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };
        let PhysicalSize { width, height } = window.inner_size();
        self.window = Some(window);

        let registry = self.registry.take().unwrap_or_default();
        match RoomEngine::new(self.config.clone(), registry, width as f32, height as f32) {
            Ok(mut engine) => {
                engine.assets_ready();
                self.engine = Some(engine);
                self.flush_effects();
            }
            Err(err) => {
                error!("failed to start room engine: {}", err);
                event_loop.exit();
            }
        }
        self.started = Instant::now();
        self.last_frame = self.started;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.keyboard(key_code, event_loop),
            WindowEvent::CursorMoved { position, .. } => {
                engine.pointer_input(PointerInput::Moved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => engine.pointer_input(PointerInput::Click),
            WindowEvent::Touch(Touch {
                phase, location, ..
            }) => match phase {
                TouchPhase::Started => engine.pointer_input(PointerInput::TouchStart {
                    x: location.x as f32,
                    y: location.y as f32,
                }),
                TouchPhase::Ended => engine.pointer_input(PointerInput::TouchEnd),
                _ => {}
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                engine.resize(width as f32, height as f32);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame).as_secs_f32();
                let elapsed = now.duration_since(self.started).as_secs_f32();
                self.last_frame = now;

                let snapshot = engine.frame(dt, elapsed);
                self.sink.submit(&snapshot);
            }
            _ => (),
        }
        self.flush_effects();
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let Some(engine) = self.engine.as_mut() {
            engine.device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
