//! Room viewer
//!
//! Loads an OBJ room whose model names carry the room's tags
//! (`About_Button_Fourth_Raycaster_Hover_Pointer`, `Egg_3_Fourth`, ...) and
//! drives the choreography engine with logging collaborators.
//!
//! ```text
//! RUST_LOG=info cargo run --example room_viewer -- assets/room.obj [room.json]
//! ```

use anyhow::Context;
use diorama::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scene = args.next().context("usage: room_viewer <room.obj> [config.json]")?;
    let config = match args.next() {
        Some(path) => RoomConfig::from_json_file(&path)
            .with_context(|| format!("failed to read config {path}"))?,
        None => RoomConfig::default(),
    };

    let mut app = RoomApp::new(config)?;
    app.load_obj(&scene)?;
    app.run()
}
