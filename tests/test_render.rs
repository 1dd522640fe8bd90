use rand::rngs::StdRng;
use rand::SeedableRng;

use tuna_portal::assets::{self, AssetProvider, AssetSet, Sprite, Visual};
use tuna_portal::config::{GameConfig, LevelConfig};
use tuna_portal::entities::{GameState, Item, ItemKind};
use tuna_portal::game::Game;
use tuna_portal::geometry::Rect;
use tuna_portal::input::HeldDirections;
use tuna_portal::level::{LevelMap, StaticMaps};
use tuna_portal::render::*;
use tuna_portal::GameError;

const NAMES: [&str; 7] = [
    assets::PLAYER,
    assets::PLAYER_LANTERN,
    assets::GOOD_ITEM,
    assets::HAZARD_ITEM,
    assets::PORTAL,
    assets::ENEMY,
    assets::HEART,
];

/// Resolves every known name to its index, with four frames per row.
struct StubAssets {
    skip: Option<&'static str>,
}

impl AssetProvider for StubAssets {
    fn resolve(&self, name: &str) -> Option<Sprite> {
        if self.skip == Some(name) {
            return None;
        }
        let idx = NAMES.iter().position(|n| *n == name)?;
        Some(Sprite {
            visual: Visual(idx as u32),
            frames: 4,
        })
    }
}

fn asset_set() -> AssetSet {
    AssetSet::load(&StubAssets { skip: None }).expect("all assets resolve")
}

/// Walled 6x6 room; the player spawns in its open middle at (80, 80).
fn walled_game(rng: &mut StdRng) -> Game<StaticMaps> {
    let board = "######\n#....#\n#....#\n#....#\n#....#\n######";
    let map = LevelMap::from_ascii(1, board, 32, 32).expect("valid board");
    let config = GameConfig {
        levels: vec![LevelConfig {
            id: 1,
            good_items: 0,
            bad_items: 0,
            enemies: 0,
            spawn: None,
        }],
        ..GameConfig::default()
    };
    Game::new(config, StaticMaps::new(vec![map]), rng).expect("game builds")
}

fn texts(frame: &Frame) -> Vec<&str> {
    frame
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn sprites_of(frame: &Frame, sprite: Sprite) -> Vec<(f32, f32)> {
    frame
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Sprite { sprite: s, x, y, .. } if *s == sprite => Some((*x, *y)),
            _ => None,
        })
        .collect()
}

#[test]
fn missing_asset_is_fatal() {
    let err = AssetSet::load(&StubAssets { skip: Some(assets::HEART) }).unwrap_err();
    assert!(matches!(err, GameError::MissingAsset(ref name) if name == "heart"));
}

#[test]
fn animation_frame_steps_every_few_ticks() {
    let sprite = Sprite {
        visual: Visual(0),
        frames: 4,
    };
    assert_eq!(sprite.frame_for(0, 6), 0);
    assert_eq!(sprite.frame_for(5, 6), 0);
    assert_eq!(sprite.frame_for(6, 6), 1);
    assert_eq!(sprite.frame_for(23, 6), 3);
    assert_eq!(sprite.frame_for(24, 6), 0);
    assert_eq!(sprite.frame_for(3, 0), 3);
}

#[test]
fn camera_centres_and_clamps() {
    let bounds = (960.0, 640.0);
    let mid = Camera::follow(500.0, 500.0, 200.0, 100.0, bounds);
    assert_eq!((mid.x, mid.y), (400.0, 450.0));

    let corner = Camera::follow(10.0, 10.0, 200.0, 100.0, bounds);
    assert_eq!((corner.x, corner.y), (0.0, 0.0));

    let far = Camera::follow(950.0, 630.0, 200.0, 100.0, bounds);
    assert_eq!((far.x, far.y), (760.0, 540.0));

    let huge = Camera::follow(100.0, 100.0, 2000.0, 2000.0, bounds);
    assert_eq!((huge.x, huge.y), (0.0, 0.0));

    assert_eq!(mid.to_screen(410.0, 460.0), (10.0, 10.0));
    assert!(mid.sees(&Rect::new(390.0, 440.0, 32.0, 32.0)));
    assert!(!mid.sees(&Rect::new(0.0, 0.0, 32.0, 32.0)));
}

#[test]
fn playing_frame_draws_the_world_and_hud() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = walled_game(&mut rng);
    game.world_mut().items.push(Item { x: 32.0, y: 32.0, kind: ItemKind::Good });
    let assets = asset_set();

    let frame = compose(&game, &assets, 192.0, 192.0);
    assert_eq!(frame.state, GameState::Playing);
    assert_eq!((frame.camera.x, frame.camera.y), (0.0, 0.0));

    let walls = frame
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Wall { .. }))
        .count();
    assert_eq!(walls, 20);
    assert_eq!(sprites_of(&frame, assets.good_item), vec![(32.0, 32.0)]);
    assert_eq!(sprites_of(&frame, assets.player), vec![(80.0, 80.0)]);
    assert!(sprites_of(&frame, assets.portal).is_empty());
    assert_eq!(texts(&frame), vec!["Fish: 0 / 9"]);

    // The HUD comes last so it sits on top.
    assert!(matches!(
        frame.commands.last(),
        Some(DrawCommand::Text { space: Space::Screen, .. })
    ));
}

#[test]
fn player_sprite_row_follows_facing() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = walled_game(&mut rng);
    let assets = asset_set();
    let right = HeldDirections::of(&[tuna_portal::entities::Direction::Right]);
    game.update(&right, &mut rng).expect("update");

    let frame = compose(&game, &assets, 192.0, 192.0);
    let row = frame.commands.iter().find_map(|c| match c {
        DrawCommand::Sprite { sprite, row, .. } if *sprite == assets.player => Some(*row),
        _ => None,
    });
    assert_eq!(row, Some(2));
}

#[test]
fn game_over_frame_shows_the_heart_and_title() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = walled_game(&mut rng);
    let (x, y) = (game.player().x, game.player().y);
    game.world_mut().hazards.push(Item { x, y, kind: ItemKind::Hazard });
    game.update(&HeldDirections::none(), &mut rng).expect("update");
    let assets = asset_set();

    let frame = compose(&game, &assets, 800.0, 800.0);
    assert_eq!(frame.state, GameState::GameOver);
    assert_eq!(sprites_of(&frame, assets.heart), vec![(384.0, 600.0)]);
    assert_eq!(sprites_of(&frame, assets.player_lantern), vec![(384.0, 440.0)]);
    assert!(sprites_of(&frame, assets.player).is_empty());
    assert_eq!(texts(&frame), vec![GAME_OVER_TITLE, GAME_OVER_HINT]);
    assert!(!frame
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Wall { .. })));
}

#[test]
fn empty_view_draws_no_world() {
    let mut rng = StdRng::seed_from_u64(42);
    let game = walled_game(&mut rng);
    let assets = asset_set();

    for (w, h) in [(1280.0, 0.0), (0.0, 640.0), (0.0, 0.0)] {
        let frame = compose(&game, &assets, w, h);
        assert!(!frame
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Wall { .. })));
        assert_eq!(texts(&frame), vec!["Fish: 0 / 9"]);
    }
}

#[test]
fn zero_sized_camera_sees_nothing() {
    let camera = Camera::follow(100.0, 100.0, 0.0, 0.0, (960.0, 640.0));
    assert!(!camera.sees(&Rect::new(0.0, 0.0, 960.0, 640.0)));
}
