use tuna_portal::config::PlayerConfig;
use tuna_portal::entities::*;
use tuna_portal::geometry::Rect;
use tuna_portal::input::{HeldDirections, InputSource};

#[test]
fn defaults() {
    assert_eq!(Direction::default(), Direction::Down);
    assert_eq!(GameState::default(), GameState::Playing);
    assert_eq!(PlayerSkin::default(), PlayerSkin::Normal);
}

#[test]
fn sheet_rows_are_distinct() {
    let rows: Vec<usize> = Direction::ALL.iter().map(|d| d.sheet_row()).collect();
    assert_eq!(rows, vec![0, 1, 2, 3]);
}

#[test]
fn new_player_hitbox_follows_offset() {
    let p = Player::new(100.0, 50.0, &PlayerConfig::default());
    assert_eq!(p.hitbox(), Rect::new(108.0, 53.0, 16.0, 27.0));
    assert_eq!(p.hitbox_offset(), (8.0, 3.0));
    assert_eq!(p.facing, Direction::Down);
    assert_eq!(p.frame, 0);
}

#[test]
fn set_position_rederives_hitbox() {
    let mut p = Player::new(0.0, 0.0, &PlayerConfig::default());
    p.set_position(33.0, 44.0);
    assert_eq!((p.x, p.y), (33.0, 44.0));
    assert_eq!(p.hitbox(), Rect::new(41.0, 47.0, 16.0, 27.0));
    // Probing a position must not move the player
    assert_eq!(p.hitbox_at(0.0, 0.0), Rect::new(8.0, 3.0, 16.0, 27.0));
    assert_eq!(p.hitbox().x, 41.0);
}

#[test]
fn lantern_player_differs_only_in_skin() {
    let cfg = PlayerConfig::default();
    let normal = Player::new(10.0, 10.0, &cfg);
    let lantern = Player::lantern(10.0, 10.0, &cfg);
    assert_eq!(lantern.skin, PlayerSkin::Lantern);
    assert_eq!(lantern.hitbox(), normal.hitbox());
}

#[test]
fn held_directions_report_what_was_set() {
    let held = HeldDirections::of(&[Direction::Up, Direction::Left]);
    assert!(held.is_held(Direction::Up));
    assert!(held.is_held(Direction::Left));
    assert!(!held.is_held(Direction::Down));
    assert!(!held.is_held(Direction::Right));
    assert_eq!(HeldDirections::none(), HeldDirections::default());
}
