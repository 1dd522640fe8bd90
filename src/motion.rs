//! Player movement against static map geometry.
//!
//! Displacement is resolved one axis at a time: X first, then Y from the
//! already-resolved X. A diagonal push into a wall therefore keeps sliding
//! along the open axis instead of stopping dead.

use crate::entities::{Direction, Player};
use crate::geometry::{hits_any, Rect};
use crate::input::InputSource;

/// Movement requested for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intent {
    pub dx: f32,
    pub dy: f32,
    /// Facing implied by the held keys, or `None` when nothing is held.
    pub facing: Option<Direction>,
}

impl Intent {
    pub fn is_moving(&self) -> bool {
        self.facing.is_some()
    }
}

/// Keys are tested Left, Right, Up, Down. Displacements add up, so opposite
/// keys cancel, and the last held key in that order sets the facing:
/// Down beats Up beats Right beats Left.
pub fn read_intent(input: &impl InputSource, speed: f32) -> Intent {
    let mut intent = Intent::default();
    let order = [
        (Direction::Left, -speed, 0.0),
        (Direction::Right, speed, 0.0),
        (Direction::Up, 0.0, -speed),
        (Direction::Down, 0.0, speed),
    ];
    for (dir, dx, dy) in order {
        if input.is_held(dir) {
            intent.dx += dx;
            intent.dy += dy;
            intent.facing = Some(dir);
        }
    }
    intent
}

/// Apply `(dx, dy)` to the player's draw-origin without letting its hitbox
/// enter any of `solids`, then keep the sprite inside `bounds` (width,
/// height). Never fails: a fully blocked move leaves the position unchanged.
pub fn resolve_motion(player: &mut Player, dx: f32, dy: f32, solids: &[Rect], bounds: (f32, f32)) {
    let max_x = (bounds.0 - player.sprite_w).max(0.0);
    let max_y = (bounds.1 - player.sprite_h).max(0.0);

    let mut x = player.x;
    let mut y = player.y;

    // ── Horizontal ────────────────────────────────────────────────────────────
    if dx != 0.0 {
        let new_x = (x + dx).clamp(0.0, max_x);
        if !hits_any(&player.hitbox_at(new_x, y), solids) {
            x = new_x;
        }
    }

    // ── Vertical, from the resolved X ─────────────────────────────────────────
    if dy != 0.0 {
        let new_y = (y + dy).clamp(0.0, max_y);
        if !hits_any(&player.hitbox_at(x, new_y), solids) {
            y = new_y;
        }
    }

    player.set_position(x.clamp(0.0, max_x), y.clamp(0.0, max_y));
}

/// One frame of player control. Moving advances the walk cycle; standing
/// still resets it. Returns whether any direction was held.
pub fn update_player(
    player: &mut Player,
    input: &impl InputSource,
    speed: f32,
    solids: &[Rect],
    bounds: (f32, f32),
) -> bool {
    let intent = read_intent(input, speed);
    match intent.facing {
        Some(facing) => {
            player.facing = facing;
            resolve_motion(player, intent.dx, intent.dy, solids, bounds);
            player.frame = player.frame.wrapping_add(1);
            true
        }
        None => {
            player.frame = 0;
            false
        }
    }
}
