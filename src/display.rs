//! Rendering layer: all terminal I/O lives here.
//!
//! World pixels map onto character cells at a fixed scale; each 32-pixel
//! tile becomes two columns by one row. No game logic is performed; this
//! module only translates frames into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use tuna_portal::assets::{self, AssetProvider, Sprite, Visual};
use tuna_portal::entities::GameState;
use tuna_portal::render::{Align, DrawCommand, Frame, Renderer, Space};

/// World pixels per terminal column.
pub const PX_PER_COL: f32 = 16.0;
/// World pixels per terminal row.
pub const PX_PER_ROW: f32 = 32.0;
/// Row 0 holds the HUD; the world starts below it.
const HUD_ROWS: u16 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::DarkBlue;
const C_TEXT: Color = Color::White;
const C_TEXT_FADED: Color = Color::DarkGrey;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;

/// Below this alpha, text is drawn dimmed.
const FADED_ALPHA: f32 = 0.4;

// ── Glyph atlas ───────────────────────────────────────────────────────────────

/// Character art for one visual: `rows[row][frame]`.
struct GlyphSheet {
    name: &'static str,
    color: Color,
    rows: Vec<Vec<&'static str>>,
}

/// Asset provider backed by built-in character art.
pub struct GlyphAtlas {
    sheets: Vec<GlyphSheet>,
}

impl GlyphAtlas {
    pub fn new() -> Self {
        let walk = |down, left, right, up| -> Vec<Vec<&'static str>> {
            vec![down, left, right, up]
        };
        let sheets = vec![
            GlyphSheet {
                name: assets::PLAYER,
                color: Color::White,
                rows: walk(
                    vec!["▼ ", " ▼"],
                    vec!["◀ ", "◁ "],
                    vec![" ▶", " ▷"],
                    vec!["▲ ", " ▲"],
                ),
            },
            GlyphSheet {
                name: assets::PLAYER_LANTERN,
                color: Color::Yellow,
                rows: walk(
                    vec!["▼*", "*▼"],
                    vec!["◀*", "◁*"],
                    vec!["*▶", "*▷"],
                    vec!["▲*", "*▲"],
                ),
            },
            GlyphSheet {
                name: assets::GOOD_ITEM,
                color: Color::Cyan,
                rows: vec![vec!["◆◆"]],
            },
            GlyphSheet {
                name: assets::HAZARD_ITEM,
                color: Color::Red,
                rows: vec![vec!["✖✖"]],
            },
            GlyphSheet {
                name: assets::PORTAL,
                color: Color::Magenta,
                rows: vec![vec!["◎◎"]],
            },
            GlyphSheet {
                name: assets::ENEMY,
                color: Color::Green,
                rows: vec![vec!["ж ", "Ж ", " ж", " Ж"]],
            },
            GlyphSheet {
                name: assets::HEART,
                color: Color::Magenta,
                rows: vec![vec!["♥♥"]],
            },
        ];
        GlyphAtlas { sheets }
    }

    fn glyph(&self, sprite: &Sprite, row: usize, frame: usize) -> Option<(&'static str, Color)> {
        let sheet = self.sheets.get(sprite.visual.0 as usize)?;
        let frames = sheet.rows.get(row).or_else(|| sheet.rows.first())?;
        let glyph = frames.get(frame % frames.len().max(1))?;
        Some((*glyph, sheet.color))
    }
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetProvider for GlyphAtlas {
    fn resolve(&self, name: &str) -> Option<Sprite> {
        let idx = self.sheets.iter().position(|s| s.name == name)?;
        let frames = self.sheets[idx].rows.iter().map(Vec::len).max().unwrap_or(0);
        Some(Sprite {
            visual: Visual(idx as u32),
            frames,
        })
    }
}

// ── Terminal renderer ─────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    atlas: GlyphAtlas,
    width: u16,
    height: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, atlas: GlyphAtlas, width: u16, height: u16) -> Self {
        TerminalRenderer {
            out,
            atlas,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// World pixels visible in the play area (everything but the HUD and
    /// hint rows).
    pub fn view_size(&self) -> (f32, f32) {
        let rows = self.height.saturating_sub(HUD_ROWS + 1);
        (self.width as f32 * PX_PER_COL, rows as f32 * PX_PER_ROW)
    }

    fn world_cell(&self, frame: &Frame, x: f32, y: f32) -> Option<(u16, u16)> {
        let (sx, sy) = frame.camera.to_screen(x, y);
        let col = (sx / PX_PER_COL).floor();
        let row = (sy / PX_PER_ROW).floor() + HUD_ROWS as f32;
        let last_row = self.height.saturating_sub(1) as f32;
        if col < 0.0 || col >= self.width as f32 || row < HUD_ROWS as f32 || row >= last_row {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn screen_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = (x / PX_PER_COL).max(0.0) as u16;
        let row = (y / PX_PER_ROW).max(0.0) as u16;
        (col.min(self.width.saturating_sub(1)), row.min(self.height.saturating_sub(1)))
    }

    /// Print at `(col, row)`, cut to the terminal's right edge.
    fn put(&mut self, col: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
        let room = self.width.saturating_sub(col) as usize;
        let clipped: String = text.chars().take(room).collect();
        if clipped.is_empty() {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn draw_wall(&mut self, frame: &Frame, x: f32, y: f32, w: f32, h: f32) -> std::io::Result<()> {
        let cols = (w / PX_PER_COL).round().max(1.0) as usize;
        let rows = (h / PX_PER_ROW).round().max(1.0) as usize;
        for r in 0..rows {
            if let Some((col, row)) = self.world_cell(frame, x, y + r as f32 * PX_PER_ROW) {
                self.put(col, row, &"█".repeat(cols), C_WALL)?;
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        frame: &Frame,
        text: &str,
        (x, y): (f32, f32),
        alpha: f32,
        space: Space,
        align: Align,
    ) -> std::io::Result<()> {
        let cell = match space {
            Space::World => self.world_cell(frame, x, y),
            Space::Screen => Some(self.screen_cell(x, y)),
        };
        let Some((mut col, row)) = cell else {
            return Ok(());
        };
        if align == Align::Center {
            col = col.saturating_sub(text.chars().count() as u16 / 2);
        }
        let color = match (frame.state, space, alpha < FADED_ALPHA) {
            (_, _, true) => C_TEXT_FADED,
            (GameState::GameOver, _, _) => C_GAME_OVER,
            (GameState::Playing, Space::Screen, _) => C_HUD,
            (GameState::Playing, Space::World, _) => C_TEXT,
        };
        self.put(col, row, text, color)
    }

    fn draw_controls_hint(&mut self, state: GameState) -> std::io::Result<()> {
        let hint = match state {
            GameState::Playing => "←↑↓→ / WASD : Move   Q : Quit",
            GameState::GameOver => "Walk to the ♥ to play again   Q : Quit",
        };
        self.put(1, self.height.saturating_sub(1), hint, C_HINT)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    /// Render one complete frame.
    fn present(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        for command in &frame.commands {
            match command {
                DrawCommand::Wall { rect } => {
                    self.draw_wall(frame, rect.x, rect.y, rect.w, rect.h)?;
                }
                DrawCommand::Sprite {
                    sprite,
                    row,
                    frame: index,
                    x,
                    y,
                } => {
                    let glyph = self.atlas.glyph(sprite, *row, *index);
                    let cell = self.world_cell(frame, *x, *y);
                    if let (Some((text, color)), Some((col, r))) = (glyph, cell) {
                        self.put(col, r, text, color)?;
                    }
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    alpha,
                    space,
                    align,
                } => {
                    self.draw_text(frame, text, (*x, *y), *alpha, *space, *align)?;
                }
            }
        }

        self.draw_controls_hint(frame.state)?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
