//! The per-frame collision sweep between the player and the world.
//!
//! Order matters for frame-perfect cases and is fixed: good items, then the
//! portal spawn check, then hazards, then portal contact. A frame that both
//! collects the last item and touches a hazard still counts the item.

use rand::Rng;
use tracing::{debug, info};

use crate::config::HitboxConfig;
use crate::entities::{GameEvent, Heart, Item, ItemKind, Player, Portal};
use crate::geometry::Rect;
use crate::world::{PortalSpawn, World};

/// Anything with a collision box derived from where its sprite is drawn.
pub trait Collidable {
    fn hitbox(&self, boxes: &HitboxConfig) -> Rect;
}

impl Collidable for Item {
    fn hitbox(&self, boxes: &HitboxConfig) -> Rect {
        let geometry = match self.kind {
            ItemKind::Good => &boxes.good_item,
            ItemKind::Hazard => &boxes.hazard,
        };
        geometry.rect_at(self.x, self.y)
    }
}

impl Collidable for Portal {
    fn hitbox(&self, boxes: &HitboxConfig) -> Rect {
        boxes.portal.rect_at(self.x, self.y)
    }
}

impl Collidable for Heart {
    fn hitbox(&self, boxes: &HitboxConfig) -> Rect {
        boxes.heart.rect_at(self.x, self.y)
    }
}

pub fn touches(player: &Player, target: &impl Collidable, boxes: &HitboxConfig) -> bool {
    player.hitbox().intersects(&target.hitbox(boxes))
}

/// What one sweep found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Good items counted this frame.
    pub collected: u32,
    /// The count reached the threshold during this frame.
    pub threshold_reached: bool,
    pub hazard_hit: bool,
    /// The player stepped on the active portal; the caller should change level.
    pub portal_entered: bool,
    pub events: Vec<GameEvent>,
}

pub fn check_collisions(
    world: &mut World,
    player: &Player,
    boxes: &HitboxConfig,
    threshold: u32,
    rng: &mut impl Rng,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let before = world.collected();

    // ── 1. Good items ─────────────────────────────────────────────────────────
    let items = std::mem::take(&mut world.items);
    let mut remaining = Vec::with_capacity(items.len());
    for item in items {
        if !touches(player, &item, boxes) {
            remaining.push(item);
            continue;
        }
        // Touched items leave the board even once the count is full.
        if world.record_collection(threshold) {
            outcome.collected += 1;
            world.last_collected = Some((item.x, item.y));
            debug!(x = item.x, y = item.y, count = world.collected(), "item collected");
            outcome.events.push(GameEvent::Collected {
                x: item.x,
                y: item.y,
            });
        }
    }
    world.items = remaining;

    // ── 2. Portal eligibility ─────────────────────────────────────────────────
    if outcome.collected > 0 && before < threshold && world.collected() == threshold {
        outcome.threshold_reached = true;
        match world.spawn_portal_if_eligible(threshold, &player.hitbox(), rng) {
            PortalSpawn::Spawned { x, y } => {
                outcome.events.push(GameEvent::PortalSpawned { x, y });
            }
            PortalSpawn::NoCandidates => outcome.events.push(GameEvent::PortalSpawnSkipped),
            PortalSpawn::NotEligible => {}
        }
    }

    // ── 3. Hazards: first hit wins ────────────────────────────────────────────
    if let Some(hit) = world.hazards.iter().find(|h| touches(player, *h, boxes)) {
        let (x, y) = (hit.x, hit.y);
        world.hazards.clear();
        outcome.hazard_hit = true;
        outcome.events.push(GameEvent::HazardHit { x, y });
        info!(level = world.level, x, y, "hazard touched");
    }

    // ── 4. Portal contact (a dead player goes nowhere) ────────────────────────
    if outcome.hazard_hit {
        return outcome;
    }
    if let Some(portal) = world.portal.as_mut() {
        if portal.active && player.hitbox().intersects(&portal.hitbox(boxes)) {
            portal.active = false;
            outcome.portal_entered = true;
            outcome.events.push(GameEvent::PortalEntered);
            info!(level = world.level, "portal entered");
        }
    }

    outcome
}
