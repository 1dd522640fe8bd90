//! Tunable constants, with defaults matching the shipped game and optional
//! overrides from a TOML file.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::geometry::BoxGeometry;

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixels moved per frame on each held axis.
    pub speed: f32,
    pub sprite_w: f32,
    pub sprite_h: f32,
    pub hitbox_offset_x: f32,
    pub hitbox_offset_y: f32,
    pub hitbox_w: f32,
    pub hitbox_h: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            speed: 3.0,
            sprite_w: 32.0,
            sprite_h: 32.0,
            hitbox_offset_x: 8.0,
            hitbox_offset_y: 3.0,
            hitbox_w: 16.0,
            hitbox_h: 27.0,
        }
    }
}

// ── Collision boxes ───────────────────────────────────────────────────────────

/// Box geometry per collidable kind. Good items and hazards differ because
/// their sprite art has different visual bounds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HitboxConfig {
    pub good_item: BoxGeometry,
    pub hazard: BoxGeometry,
    pub portal: BoxGeometry,
    pub heart: BoxGeometry,
}

impl Default for HitboxConfig {
    fn default() -> Self {
        HitboxConfig {
            good_item: BoxGeometry::new(32.0, 32.0, 21.0, 19.0),
            hazard: BoxGeometry::new(32.0, 32.0, 23.0, 18.0).with_offset(-8.0, 8.0),
            portal: BoxGeometry::new(32.0, 32.0, 16.0, 16.0),
            heart: BoxGeometry::new(32.0, 32.0, 32.0, 32.0),
        }
    }
}

// ── Transient effects ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Where a "+1" appears, relative to the player's draw-origin.
    pub float_text_offset_x: f32,
    pub float_text_offset_y: f32,
    /// Frames a "+1" stays on screen.
    pub float_text_life: u32,
    pub float_text_rise: f32,
    pub float_text_fade: f32,
    pub portal_popup_frames: u32,
    pub portal_popup_fade_in: f32,
    pub portal_popup_rise: f32,
    /// Animation counter ticks per sprite frame.
    pub ticks_per_frame: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        EffectsConfig {
            float_text_offset_x: 8.0,
            float_text_offset_y: -10.0,
            float_text_life: 60,
            float_text_rise: 0.5,
            float_text_fade: 0.02,
            portal_popup_frames: 90,
            portal_popup_fade_in: 0.04,
            portal_popup_rise: 0.3,
            ticks_per_frame: 6,
        }
    }
}

// ── Game-over arena ───────────────────────────────────────────────────────────

/// The screen-space room shown after death. The heart sits centred
/// horizontally; the lantern player starts above it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameOverConfig {
    pub screen_w: f32,
    pub screen_h: f32,
    pub heart_y: f32,
    pub player_x: f32,
    pub player_y: f32,
}

impl Default for GameOverConfig {
    fn default() -> Self {
        GameOverConfig {
            screen_w: 800.0,
            screen_h: 800.0,
            heart_y: 600.0,
            player_x: 384.0,
            player_y: 440.0,
        }
    }
}

// ── Levels ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    #[serde(default)]
    pub good_items: usize,
    #[serde(default)]
    pub bad_items: usize,
    #[serde(default)]
    pub enemies: usize,
    /// Player draw-origin on entry. `None` means the map centre.
    #[serde(default)]
    pub spawn: Option<(f32, f32)>,
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Good items needed before the portal may appear.
    pub collection_threshold: u32,
    pub player: PlayerConfig,
    pub hitboxes: HitboxConfig,
    pub effects: EffectsConfig,
    pub game_over: GameOverConfig,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            collection_threshold: 9,
            player: PlayerConfig::default(),
            hitboxes: HitboxConfig::default(),
            effects: EffectsConfig::default(),
            game_over: GameOverConfig::default(),
            levels: vec![
                LevelConfig {
                    id: 1,
                    good_items: 15,
                    bad_items: 5,
                    enemies: 0,
                    spawn: None,
                },
                LevelConfig {
                    id: 2,
                    good_items: 0,
                    bad_items: 0,
                    enemies: 2,
                    spawn: Some((160.0, 280.0)),
                },
            ],
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn level(&self, id: u32) -> Result<&LevelConfig> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or(GameError::UnknownLevel(id))
    }

    pub fn validate(&self) -> Result<()> {
        if self.collection_threshold == 0 {
            return Err(invalid("collection_threshold must be at least 1"));
        }
        let p = &self.player;
        if p.speed <= 0.0 {
            return Err(invalid("player.speed must be positive"));
        }
        if p.sprite_w <= 0.0 || p.sprite_h <= 0.0 || p.hitbox_w <= 0.0 || p.hitbox_h <= 0.0 {
            return Err(invalid("player sprite and hitbox sizes must be positive"));
        }
        let boxes = [
            ("good_item", &self.hitboxes.good_item),
            ("hazard", &self.hitboxes.hazard),
            ("portal", &self.hitboxes.portal),
            ("heart", &self.hitboxes.heart),
        ];
        for (name, b) in boxes {
            if b.box_w <= 0.0 || b.box_h <= 0.0 || b.sprite_w <= 0.0 || b.sprite_h <= 0.0 {
                return Err(invalid(&format!("hitboxes.{name} sizes must be positive")));
            }
        }
        if self.effects.ticks_per_frame == 0 {
            return Err(invalid("effects.ticks_per_frame must be at least 1"));
        }
        if self.levels.is_empty() {
            return Err(invalid("at least one level is required"));
        }
        let mut seen = HashSet::new();
        for level in &self.levels {
            if !seen.insert(level.id) {
                return Err(invalid(&format!("level {} is defined twice", level.id)));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> GameError {
    GameError::InvalidConfig(msg.to_string())
}
