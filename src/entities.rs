//! All game entity types. Plain data, with only the helpers needed to keep
//! their own invariants.

use crate::config::PlayerConfig;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Row of the walk-cycle sheet holding this direction's frames.
    pub fn sheet_row(self) -> usize {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerSkin {
    #[default]
    Normal,
    /// Worn in the game-over room.
    Lantern,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Draw-origin (top-left of the sprite) in world pixels.
    pub x: f32,
    pub y: f32,
    pub sprite_w: f32,
    pub sprite_h: f32,
    hitbox: Rect,
    hitbox_offset: (f32, f32),
    pub facing: Direction,
    /// Walk-cycle counter: grows while moving, resets when idle.
    pub frame: u32,
    pub skin: PlayerSkin,
}

impl Player {
    pub fn new(x: f32, y: f32, cfg: &PlayerConfig) -> Self {
        let hitbox_offset = (cfg.hitbox_offset_x, cfg.hitbox_offset_y);
        Player {
            x,
            y,
            sprite_w: cfg.sprite_w,
            sprite_h: cfg.sprite_h,
            hitbox: Rect::new(
                x + hitbox_offset.0,
                y + hitbox_offset.1,
                cfg.hitbox_w,
                cfg.hitbox_h,
            ),
            hitbox_offset,
            facing: Direction::Down,
            frame: 0,
            skin: PlayerSkin::Normal,
        }
    }

    pub fn lantern(x: f32, y: f32, cfg: &PlayerConfig) -> Self {
        Player {
            skin: PlayerSkin::Lantern,
            ..Player::new(x, y, cfg)
        }
    }

    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    pub fn hitbox_offset(&self) -> (f32, f32) {
        self.hitbox_offset
    }

    /// Hitbox the player would have with its draw-origin at `(x, y)`.
    pub fn hitbox_at(&self, x: f32, y: f32) -> Rect {
        self.hitbox
            .at(x + self.hitbox_offset.0, y + self.hitbox_offset.1)
    }

    /// Move the draw-origin; the hitbox is re-derived from it.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.hitbox
            .set_position(x + self.hitbox_offset.0, y + self.hitbox_offset.1);
    }
}

// ── Items, portal, enemies ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Closed tuna can: collect it.
    Good,
    /// Open tuna can: touching it ends the run.
    Hazard,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

/// Decorative creature: never moves, only animates.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub frame: u32,
}

/// Restart marker in the game-over room.
#[derive(Clone, Debug, PartialEq)]
pub struct Heart {
    pub x: f32,
    pub y: f32,
}

// ── Transient effects ─────────────────────────────────────────────────────────

/// A "+1" that floats upward and fades.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub life: u32,
    pub alpha: f32,
}

/// "A portal has appeared!" banner anchored at the last collected item.
#[derive(Clone, Debug, PartialEq)]
pub struct PortalPopup {
    pub x: f32,
    pub y: f32,
    pub timer: u32,
    pub alpha: f32,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Things that happened during one update, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Collected { x: f32, y: f32 },
    PortalSpawned { x: f32, y: f32 },
    /// The threshold was reached but no free cell was left.
    PortalSpawnSkipped,
    EnemySpawnSkipped { requested: usize, spawned: usize },
    HazardHit { x: f32, y: f32 },
    PortalEntered,
    LevelLoaded { level: u32 },
    Restarted,
}
