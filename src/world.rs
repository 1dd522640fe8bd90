//! One loaded level: static geometry plus everything placed on it.
//!
//! Free cells form a single pool. Items, hazards, enemies and the portal are
//! all drawn from it without replacement, so no cell is used twice in the
//! same load.

use rand::Rng;
use tracing::{info, warn};

use crate::entities::{Enemy, Item, ItemKind, Portal};
use crate::geometry::{Cell, Rect};
use crate::level::LevelMap;

/// Enemies are drawn inset from their cell's corner.
const ENEMY_INSET: f32 = 8.0;

/// Result of a portal placement attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PortalSpawn {
    Spawned { x: f32, y: f32 },
    /// Threshold not reached, or a portal already exists.
    NotEligible,
    /// Eligible, but the free-cell pool is empty. The level carries on
    /// without a portal.
    NoCandidates,
}

#[derive(Clone, Debug)]
pub struct World {
    pub level: u32,
    pub width: f32,
    pub height: f32,
    pub tile_w: u32,
    pub tile_h: u32,
    solids: Vec<Rect>,
    candidates: Vec<Cell>,
    pub items: Vec<Item>,
    pub hazards: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub portal: Option<Portal>,
    collected: u32,
    /// Where the most recent good item was picked up.
    pub last_collected: Option<(f32, f32)>,
}

impl World {
    pub fn from_map(map: LevelMap) -> Self {
        let candidates = map.spawn_candidates();
        World {
            level: map.level,
            width: map.pixel_width(),
            height: map.pixel_height(),
            tile_w: map.tile_w,
            tile_h: map.tile_h,
            solids: map.solids,
            candidates,
            items: Vec::new(),
            hazards: Vec::new(),
            enemies: Vec::new(),
            portal: None,
            collected: 0,
            last_collected: None,
        }
    }

    pub fn solids(&self) -> &[Rect] {
        &self.solids
    }

    /// Free cells not yet used by any spawn.
    pub fn candidates(&self) -> &[Cell] {
        &self.candidates
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Count one pickup, never past `threshold`. Returns false if the count
    /// was already full.
    pub fn record_collection(&mut self, threshold: u32) -> bool {
        if self.collected < threshold {
            self.collected += 1;
            true
        } else {
            false
        }
    }

    /// Drop every free cell overlapping `area`, e.g. the player's spawn.
    pub fn reserve_area(&mut self, area: &Rect) {
        let (tile_w, tile_h) = (self.tile_w, self.tile_h);
        self.candidates
            .retain(|cell| !cell.rect(tile_w, tile_h).intersects(area));
    }

    /// Pick a random free cell and remove it from the pool.
    pub fn take_candidate(&mut self, rng: &mut impl Rng) -> Option<Cell> {
        if self.candidates.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.candidates.len());
        Some(self.candidates.swap_remove(idx))
    }

    /// Like [`take_candidate`](Self::take_candidate), but only from cells
    /// clear of `area`. Cells under `area` stay in the pool.
    pub fn take_candidate_clear_of(&mut self, area: &Rect, rng: &mut impl Rng) -> Option<Cell> {
        let (tile_w, tile_h) = (self.tile_w, self.tile_h);
        let clear: Vec<usize> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.rect(tile_w, tile_h).intersects(area))
            .map(|(idx, _)| idx)
            .collect();
        if clear.is_empty() {
            return None;
        }
        let idx = clear[rng.gen_range(0..clear.len())];
        Some(self.candidates.swap_remove(idx))
    }

    fn origin(&self, cell: Cell) -> (f32, f32) {
        cell.origin(self.tile_w, self.tile_h)
    }

    // ── Spawning ──────────────────────────────────────────────────────────────

    /// Scatter good items and hazards over free cells, cell-aligned. Stops
    /// early if the pool runs dry. Returns how many of each were placed.
    pub fn spawn_items(&mut self, good: usize, bad: usize, rng: &mut impl Rng) -> (usize, usize) {
        let placed_good = self.spawn_kind(ItemKind::Good, good, rng);
        let placed_bad = self.spawn_kind(ItemKind::Hazard, bad, rng);
        if placed_good < good || placed_bad < bad {
            warn!(
                level = self.level,
                good, placed_good, bad, placed_bad,
                "ran out of free cells while placing items"
            );
        }
        (placed_good, placed_bad)
    }

    fn spawn_kind(&mut self, kind: ItemKind, count: usize, rng: &mut impl Rng) -> usize {
        let mut placed = 0;
        while placed < count {
            let Some(cell) = self.take_candidate(rng) else {
                break;
            };
            let (x, y) = self.origin(cell);
            let item = Item { x, y, kind };
            match kind {
                ItemKind::Good => self.items.push(item),
                ItemKind::Hazard => self.hazards.push(item),
            }
            placed += 1;
        }
        placed
    }

    /// Place the portal once the count has reached `threshold`, at most once
    /// per level. Cells overlapping `player` (its current hitbox) are
    /// skipped so the portal never opens underneath the player.
    pub fn spawn_portal_if_eligible(
        &mut self,
        threshold: u32,
        player: &Rect,
        rng: &mut impl Rng,
    ) -> PortalSpawn {
        if self.collected != threshold || self.portal.is_some() {
            return PortalSpawn::NotEligible;
        }
        let Some(cell) = self.take_candidate_clear_of(player, rng) else {
            warn!(level = self.level, "no free cell clear of the player for the portal");
            return PortalSpawn::NoCandidates;
        };
        let (x, y) = self.origin(cell);
        self.portal = Some(Portal { x, y, active: true });
        info!(level = self.level, x, y, "portal spawned");
        PortalSpawn::Spawned { x, y }
    }

    /// Place up to `count` static enemies. Returns how many were placed.
    pub fn spawn_enemies(&mut self, count: usize, rng: &mut impl Rng) -> usize {
        let mut placed = 0;
        while placed < count {
            let Some(cell) = self.take_candidate(rng) else {
                warn!(level = self.level, requested = count, placed, "no free cell left for enemies");
                break;
            };
            let (x, y) = self.origin(cell);
            self.enemies.push(Enemy {
                x: x + ENEMY_INSET,
                y: y + ENEMY_INSET,
                frame: 0,
            });
            placed += 1;
        }
        placed
    }

    /// Enemies stand still; they only step their animation.
    pub fn update_enemies(&mut self) {
        for enemy in &mut self.enemies {
            enemy.frame = enemy.frame.wrapping_add(1);
        }
    }
}
