#![allow(dead_code)]

use cgmath::Vector3;
use diorama::config::RoomConfig;
use diorama::effects::Effects;
use diorama::engine::RoomEngine;
use diorama::gfx::picking::AABB;
use diorama::gfx::scene::{ObjectId, ObjectRegistry, Transform};

pub const WIDTH: f32 = 1280.0;
pub const HEIGHT: f32 = 720.0;
pub const FRAME: f32 = 1.0 / 60.0;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Orbit target of the default desktop pose.
pub fn room_center() -> Vector3<f32> {
    let [x, y, z] = RoomConfig::default().camera.desktop.pose.target;
    Vector3::new(x, y, z)
}

pub fn register_at(registry: &mut ObjectRegistry, name: &str, position: Vector3<f32>) -> ObjectId {
    registry
        .register(name, Transform::at(position), AABB::unit())
        .unwrap()
}

/// Step the engine for `seconds`, collecting every effect it produced.
pub struct Driver {
    pub engine: RoomEngine,
    pub elapsed: f32,
    pub effects: Effects,
}

impl Driver {
    pub fn new(registry: ObjectRegistry) -> Self {
        init_logging();
        let engine = RoomEngine::new(RoomConfig::default(), registry, WIDTH, HEIGHT).unwrap();
        Self {
            engine,
            elapsed: 0.0,
            effects: Effects::default(),
        }
    }

    /// Load, press enter and wait for the loading cover to go away.
    pub fn entered(registry: ObjectRegistry) -> Self {
        let mut driver = Self::new(registry);
        driver.engine.assets_ready();
        assert!(driver.engine.enter());
        driver.run(2.2);
        assert_eq!(driver.engine.modal(), None);
        driver
    }

    pub fn frame(&mut self) {
        self.elapsed += FRAME;
        self.engine.frame(FRAME, self.elapsed);
        self.collect();
    }

    pub fn run(&mut self, seconds: f32) {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            self.frame();
        }
    }

    pub fn collect(&mut self) {
        let effects = self.engine.take_effects();
        self.effects.ui.extend(effects.ui);
        self.effects.audio.extend(effects.audio);
    }

    /// Forget collected effects.
    pub fn clear(&mut self) {
        self.collect();
        self.effects = Effects::default();
    }

    pub fn point_at_center(&mut self) {
        self.engine.pointer_input(diorama::interaction::PointerInput::Moved {
            x: WIDTH / 2.0,
            y: HEIGHT / 2.0,
        });
    }
}

pub fn approx(a: Vector3<f32>, b: Vector3<f32>, eps: f32) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps && (a.z - b.z).abs() < eps
}
