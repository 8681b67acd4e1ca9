//! Rendering layer — all terminal I/O lives here.
//!
//! The renderer receives an immutable [`Scene`] per frame and translates it
//! into terminal commands. No game logic is performed; the logical 500x400
//! playfield is scaled into whatever cell grid the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::scene::{Overlay, Renderer, Scene, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Red;
const C_ALIEN: Color = Color::Green;
const C_SPECIAL: Color = Color::Magenta;
const C_PLAYER_MISSILE: Color = Color::Cyan;
const C_ALIEN_MISSILE: Color = Color::Yellow;
const C_BARRICADE: Color = Color::Blue;
const C_TEXT: Color = Color::Yellow;
const C_HUD: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_NOTICE: Color = Color::Red;

const GAME_TITLE: &str = "RAGE INVADERS";

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer for a terminal of `cols x rows` cells. Row 0 is the status
    /// display, the last row the notice line; the playfield gets the rest.
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        TerminalRenderer { out, cols, rows }
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    /// Map logical playfield coordinates to a terminal cell.
    fn cell(&self, x: i32, y: i32) -> (u16, u16) {
        let col = (x.max(0) as u32 * self.cols as u32 / PANEL_WIDTH as u32)
            .min(self.cols as u32 - 1) as u16;
        let row = (y.max(0) as u32 * self.field_rows() as u32 / PANEL_HEIGHT as u32)
            .min(self.field_rows() as u32 - 1) as u16;
        (col, 1 + row)
    }

    fn draw_hud(&mut self, scene: &Scene) -> std::io::Result<()> {
        let hud = &scene.hud;
        let line = format!(
            "Score: {:>6}   Level: {}   Lives: {}   Aliens: {:>2}   FPS: {:>6.2}   UPS: {:>6.2}",
            hud.score, hud.level, hud.lives, hud.aliens, hud.fps, hud.ups,
        );
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD))?;
        self.out.queue(Print(line))?;
        Ok(())
    }

    fn draw_sprites(&mut self, scene: &Scene) -> std::io::Result<()> {
        for sprite in &scene.sprites {
            let (text, color) = sprite_glyph(sprite.kind);
            let (col, row) = self.cell(sprite.rect.x, sprite.rect.y);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(color))?;
            self.out.queue(Print(text))?;
        }
        Ok(())
    }

    fn draw_centered(&mut self, row: u16, text: &str) -> std::io::Result<()> {
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_overlay(&mut self, scene: &Scene) -> std::io::Result<()> {
        let mid = self.rows / 2;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        match scene.overlay {
            Overlay::None => {}
            Overlay::Welcome => {
                self.draw_centered(mid.saturating_sub(1), GAME_TITLE)?;
                self.draw_centered(mid + 1, "Press SPACE to start a new game")?;
            }
            Overlay::NewGame => {
                self.draw_centered(mid.saturating_sub(1), "Are you ready!?")?;
                self.draw_centered(mid + 1, "Press SPACE to start")?;
            }
            Overlay::LevelClear => {
                self.draw_centered(mid.saturating_sub(1), "Level Clear!")?;
                self.draw_centered(mid + 1, "Press SPACE to continue")?;
            }
            Overlay::Paused => {
                let top = mid.saturating_sub(4);
                self.draw_centered(top, "PAUSED")?;
                self.out.queue(style::SetForegroundColor(C_HINT))?;
                let legend = [
                    "Controls",
                    "Move left: Left arrow",
                    "Move right: Right arrow",
                    "Space bar: Shoot",
                    "Resume game: P",
                ];
                for (i, line) in legend.iter().enumerate() {
                    self.draw_centered(top + 2 + i as u16, line)?;
                }
            }
            Overlay::GameOver => {
                self.draw_centered(mid.saturating_sub(1), "GAME OVER")?;
                self.draw_centered(mid + 1, "Press SPACE for new game")?;
                self.draw_hiscores(scene)?;
            }
        }
        Ok(())
    }

    fn draw_hiscores(&mut self, scene: &Scene) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(2, 2))?;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        self.out.queue(Print("Hiscores"))?;
        for rank in 1..=crate::scoreboard::MAX_ENTRIES {
            let row = 2 + rank as u16;
            self.out.queue(cursor::MoveTo(2, row))?;
            match scene.hiscores.get(rank - 1) {
                Some(entry) => {
                    self.out
                        .queue(Print(format!("{rank:02}: {:<7} {}", entry.name, entry.score)))?;
                }
                None => {
                    self.out.queue(Print(format!("{rank:02}:")))?;
                }
            }
        }
        Ok(())
    }

    fn draw_notice(&mut self, scene: &Scene) -> std::io::Result<()> {
        if let Some(notice) = &scene.notice {
            self.out
                .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
            self.out.queue(style::SetForegroundColor(C_NOTICE))?;
            self.out.queue(Print(notice))?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, scene: &Scene) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_hud(scene)?;
        self.draw_sprites(scene)?;
        self.draw_overlay(scene)?;
        self.draw_notice(scene)?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

fn sprite_glyph(kind: SpriteKind) -> (&'static str, Color) {
    match kind {
        SpriteKind::Player => ("/^\\", C_PLAYER),
        SpriteKind::Alien { frame: 0 } => ("/o\\", C_ALIEN),
        SpriteKind::Alien { .. } => ("\\o/", C_ALIEN),
        SpriteKind::SpecialAlien => ("<=o=>", C_SPECIAL),
        SpriteKind::PlayerMissile => ("|", C_PLAYER_MISSILE),
        SpriteKind::AlienMissile => ("!", C_ALIEN_MISSILE),
        SpriteKind::BarricadePart { health } => {
            let text = match health {
                4 => "██",
                3 => "▓▓",
                2 => "▒▒",
                _ => "░░",
            };
            (text, C_BARRICADE)
        }
    }
}
