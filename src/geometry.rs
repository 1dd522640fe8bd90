//! Axis-aligned rectangles and the hitbox shapes derived from them.
//!
//! Every collision test in the game goes through [`intersects`].

use serde::Deserialize;

// ── Rectangle ─────────────────────────────────────────────────────────────────

/// A rectangle in world-space pixels. Width and height are always positive;
/// only the position changes after construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "rectangle must have positive size");
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Same shape, moved so its top-left corner sits at `(x, y)`.
    pub fn at(&self, x: f32, y: f32) -> Rect {
        Rect { x, y, ..*self }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Standard AABB overlap test. Rectangles that only share an edge do not
/// intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// True if `rect` overlaps at least one of `solids`.
pub fn hits_any(rect: &Rect, solids: &[Rect]) -> bool {
    solids.iter().any(|s| intersects(rect, s))
}

// ── Grid cells ────────────────────────────────────────────────────────────────

/// One map grid cell, addressed by column and row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: u32,
    pub row: u32,
}

impl Cell {
    pub fn new(col: u32, row: u32) -> Self {
        Cell { col, row }
    }

    /// Top-left corner of the cell in world pixels.
    pub fn origin(&self, tile_w: u32, tile_h: u32) -> (f32, f32) {
        ((self.col * tile_w) as f32, (self.row * tile_h) as f32)
    }

    pub fn rect(&self, tile_w: u32, tile_h: u32) -> Rect {
        let (x, y) = self.origin(tile_w, tile_h);
        Rect::new(x, y, tile_w as f32, tile_h as f32)
    }
}

// ── Hitbox geometry ───────────────────────────────────────────────────────────

/// How a collision box sits inside a sprite: centred on the sprite's bounds,
/// then nudged by a fixed offset. The numbers are art-alignment constants.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct BoxGeometry {
    pub sprite_w: f32,
    pub sprite_h: f32,
    pub box_w: f32,
    pub box_h: f32,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
}

impl BoxGeometry {
    pub const fn new(sprite_w: f32, sprite_h: f32, box_w: f32, box_h: f32) -> Self {
        BoxGeometry {
            sprite_w,
            sprite_h,
            box_w,
            box_h,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub const fn with_offset(self, offset_x: f32, offset_y: f32) -> Self {
        BoxGeometry {
            offset_x,
            offset_y,
            ..self
        }
    }

    /// Collision box for a sprite drawn at `(x, y)`.
    pub fn rect_at(&self, x: f32, y: f32) -> Rect {
        let off_x = (self.sprite_w - self.box_w) / 2.0 + self.offset_x;
        let off_y = (self.sprite_h - self.box_h) / 2.0 + self.offset_y;
        Rect::new(x + off_x, y + off_y, self.box_w, self.box_h)
    }
}
