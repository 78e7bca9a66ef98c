//! Snapshot of everything the front end needs to paint one frame.

use crate::sprites::SpriteId;

use super::fighter::Mode;

/// Place `sprite` centred on (`x`, `y`) in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    pub x: f32,
    pub y: f32,
}

impl DrawCommand {
    pub fn new(sprite: SpriteId, (x, y): (f32, f32)) -> Self {
        Self { sprite, x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Level(u32),
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub player: String,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub mode: Mode,
    pub paused: bool,
}

/// Commands are in paint order: later entries cover earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
    /// How far the backdrop has scrolled down, in `[0, height)`.
    pub backdrop_offset: f32,
    pub banner: Option<Banner>,
    pub hud: Hud,
}
