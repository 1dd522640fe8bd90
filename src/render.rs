//! Turns game state into an ordered list of draw commands.
//!
//! The core never touches pixels: a [`Renderer`] receives a [`Frame`] made
//! of positions, visual handles and strings, and decides how to show them.

use crate::assets::{AssetSet, Sprite};
use crate::entities::{GameState, Player, PlayerSkin};
use crate::game::Game;
use crate::geometry::Rect;
use crate::level::MapProvider;

pub const PORTAL_MESSAGE: &str = "A portal has appeared!";
pub const GAME_OVER_TITLE: &str = "GAME OVER";
pub const GAME_OVER_HINT: &str = "Touch the Heart to Restart";

/// Popup text sits this far above its anchor.
const POPUP_LIFT: f32 = 20.0;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Visible window of the world, in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Camera {
    /// Centre on `(cx, cy)`, then clamp so the view stays inside `bounds`.
    /// A view larger than the bounds pins to the top-left corner.
    pub fn follow(cx: f32, cy: f32, w: f32, h: f32, bounds: (f32, f32)) -> Self {
        let x = (cx - w / 2.0).min(bounds.0 - w).max(0.0);
        let y = (cy - h / 2.0).min(bounds.1 - h).max(0.0);
        Camera { x, y, w, h }
    }

    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }

    /// An empty view (zero width or height) sees nothing.
    pub fn sees(&self, rect: &Rect) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && rect.x < self.x + self.w
            && rect.right() > self.x
            && rect.y < self.y + self.h
            && rect.bottom() > self.y
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    /// Positioned in the world, moves with the camera.
    World,
    /// Positioned relative to the top-left of the view.
    Screen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// One impassable map cell.
    Wall { rect: Rect },
    Sprite {
        sprite: Sprite,
        row: usize,
        frame: usize,
        x: f32,
        y: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        alpha: f32,
        space: Space,
        align: Align,
    },
}

/// Everything needed to draw one frame, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub state: GameState,
    pub camera: Camera,
    pub commands: Vec<DrawCommand>,
}

pub trait Renderer {
    type Error;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Build the frame for the current state with a view of `view_w` × `view_h`
/// world pixels.
pub fn compose<M: MapProvider>(game: &Game<M>, assets: &AssetSet, view_w: f32, view_h: f32) -> Frame {
    match (game.state(), game.game_over_scene()) {
        (GameState::GameOver, Some(scene)) => {
            let go = &game.config().game_over;
            let camera = follow_player(&scene.player, view_w, view_h, (go.screen_w, go.screen_h));
            let ticks = game.config().effects.ticks_per_frame;
            let mut commands = vec![
                sprite(assets.heart, 0, 0, scene.heart.x, scene.heart.y),
                player_sprite(&scene.player, assets, ticks),
            ];
            commands.push(screen_text(GAME_OVER_TITLE, view_w / 2.0, view_h * 0.25, Align::Center));
            commands.push(screen_text(GAME_OVER_HINT, view_w / 2.0, view_h * 0.25 + 60.0, Align::Center));
            Frame {
                state: GameState::GameOver,
                camera,
                commands,
            }
        }
        _ => compose_playing(game, assets, view_w, view_h),
    }
}

fn compose_playing<M: MapProvider>(game: &Game<M>, assets: &AssetSet, view_w: f32, view_h: f32) -> Frame {
    let world = game.world();
    let player = game.player();
    let ticks = game.config().effects.ticks_per_frame;
    let camera = follow_player(player, view_w, view_h, world.bounds());

    let mut commands: Vec<DrawCommand> = world
        .solids()
        .iter()
        .filter(|r| camera.sees(r))
        .map(|&rect| DrawCommand::Wall { rect })
        .collect();

    for item in &world.items {
        commands.push(sprite(assets.good_item, 0, 0, item.x, item.y));
    }
    for hazard in &world.hazards {
        commands.push(sprite(assets.hazard_item, 0, 0, hazard.x, hazard.y));
    }
    if let Some(portal) = world.portal.as_ref().filter(|p| p.active) {
        commands.push(sprite(assets.portal, 0, 0, portal.x, portal.y));
    }
    for enemy in &world.enemies {
        let frame = assets.enemy.frame_for(enemy.frame, ticks);
        commands.push(sprite(assets.enemy, 0, frame, enemy.x, enemy.y));
    }
    commands.push(player_sprite(player, assets, ticks));

    for ft in game.float_texts() {
        commands.push(DrawCommand::Text {
            text: ft.text.clone(),
            x: ft.x,
            y: ft.y,
            alpha: ft.alpha,
            space: Space::World,
            align: Align::Left,
        });
    }
    if let Some(popup) = game.popup() {
        commands.push(DrawCommand::Text {
            text: PORTAL_MESSAGE.to_string(),
            x: popup.x,
            y: popup.y - POPUP_LIFT,
            alpha: popup.alpha,
            space: Space::World,
            align: Align::Left,
        });
    }

    let threshold = game.config().collection_threshold;
    let hud = format!("Fish: {} / {}", world.collected().min(threshold), threshold);
    commands.push(screen_text(&hud, 0.0, 0.0, Align::Left));

    Frame {
        state: GameState::Playing,
        camera,
        commands,
    }
}

fn follow_player(player: &Player, view_w: f32, view_h: f32, bounds: (f32, f32)) -> Camera {
    Camera::follow(
        player.x + player.sprite_w / 2.0,
        player.y + player.sprite_h / 2.0,
        view_w,
        view_h,
        bounds,
    )
}

fn sprite(sprite: Sprite, row: usize, frame: usize, x: f32, y: f32) -> DrawCommand {
    DrawCommand::Sprite {
        sprite,
        row,
        frame,
        x,
        y,
    }
}

fn player_sprite(player: &Player, assets: &AssetSet, ticks: u32) -> DrawCommand {
    let sheet = match player.skin {
        PlayerSkin::Normal => assets.player,
        PlayerSkin::Lantern => assets.player_lantern,
    };
    let frame = sheet.frame_for(player.frame, ticks);
    sprite(sheet, player.facing.sheet_row(), frame, player.x, player.y)
}

fn screen_text(text: &str, x: f32, y: f32, align: Align) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_string(),
        x,
        y,
        alpha: 1.0,
        space: Space::Screen,
        align,
    }
}
