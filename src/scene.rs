//! The core → renderer contract: one immutable snapshot per frame of
//! everything a renderer needs to paint. No game logic crosses this
//! boundary, which is what lets tests swap in a recording renderer.

use std::io;

use crate::geometry::Rect;
use crate::scoreboard::ScoreEntry;

/// What to draw at a sprite's rectangle. The renderer decides glyphs and
/// colors; the alien animation frame comes along because both frames share
/// a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Alien { frame: u8 },
    SpecialAlien,
    PlayerMissile,
    AlienMissile,
    BarricadePart { health: i32 },
}

#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

/// State-dependent text painted over the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    NewGame,
    LevelClear,
    Paused,
    GameOver,
}

/// Numbers for the status display.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    /// Survivors plus the special alien if present.
    pub aliens: usize,
    pub fps: f64,
    pub ups: f64,
}

/// One frame's draw list.
pub struct Scene {
    pub sprites: Vec<Sprite>,
    pub overlay: Overlay,
    pub hud: Hud,
    /// High-score rows, filled in only for the game-over screen.
    pub hiscores: Vec<ScoreEntry>,
    /// One-line notification, e.g. a failed score save.
    pub notice: Option<String>,
}

pub trait Renderer {
    /// Paint one frame. An error skips the frame; the caller logs it once
    /// and retries next frame.
    fn render(&mut self, scene: &Scene) -> io::Result<()>;
}
