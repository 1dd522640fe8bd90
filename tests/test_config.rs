use std::path::PathBuf;

use tuna_portal::config::*;
use tuna_portal::GameError;

#[test]
fn defaults_match_the_shipped_game() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.collection_threshold, 9);
    assert_eq!(cfg.player.speed, 3.0);
    assert_eq!(cfg.effects.float_text_life, 60);
    assert_eq!(
        (cfg.effects.float_text_offset_x, cfg.effects.float_text_offset_y),
        (8.0, -10.0)
    );
    assert_eq!(cfg.effects.portal_popup_frames, 90);
    assert_eq!(cfg.levels.len(), 2);

    let one = cfg.level(1).expect("level 1");
    assert_eq!((one.good_items, one.bad_items, one.enemies), (15, 5, 0));
    assert_eq!(one.spawn, None);
    let two = cfg.level(2).expect("level 2");
    assert_eq!((two.good_items, two.bad_items, two.enemies), (0, 0, 2));
    assert_eq!(two.spawn, Some((160.0, 280.0)));
    assert!(cfg.validate().is_ok());
}

#[test]
fn empty_document_is_the_default() {
    let cfg = GameConfig::from_toml_str("").expect("parses");
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = GameConfig::from_toml_str(
        r#"
collection_threshold = 5

[player]
speed = 4.5

[hitboxes.portal]
sprite_w = 32.0
sprite_h = 32.0
box_w = 20.0
box_h = 20.0
"#,
    )
    .expect("parses");
    assert_eq!(cfg.collection_threshold, 5);
    assert_eq!(cfg.player.speed, 4.5);
    assert_eq!(cfg.player.hitbox_w, 16.0);
    assert_eq!((cfg.hitboxes.portal.box_w, cfg.hitboxes.portal.box_h), (20.0, 20.0));
    assert_eq!(cfg.hitboxes.portal.offset_x, 0.0);
    assert_eq!(cfg.hitboxes.hazard, HitboxConfig::default().hazard);
    assert_eq!(cfg.levels, GameConfig::default().levels);
}

#[test]
fn levels_table_replaces_the_defaults() {
    let cfg = GameConfig::from_toml_str(
        r#"
[[levels]]
id = 1
good_items = 3

[[levels]]
id = 2
enemies = 1
spawn = [10.0, 20.0]
"#,
    )
    .expect("parses");
    assert_eq!(cfg.levels.len(), 2);
    let one = cfg.level(1).expect("level 1");
    assert_eq!((one.good_items, one.bad_items, one.enemies, one.spawn), (3, 0, 0, None));
    let two = cfg.level(2).expect("level 2");
    assert_eq!(two.enemies, 1);
    assert_eq!(two.spawn, Some((10.0, 20.0)));
}

#[test]
fn zero_threshold_is_invalid() {
    let err = GameConfig::from_toml_str("collection_threshold = 0").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)), "{err}");
}

#[test]
fn duplicate_level_ids_are_invalid() {
    let err = GameConfig::from_toml_str("[[levels]]\nid = 1\n\n[[levels]]\nid = 1\n").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)), "{err}");
}

#[test]
fn non_positive_sizes_are_invalid() {
    let mut cfg = GameConfig::default();
    cfg.player.speed = 0.0;
    assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));

    let mut cfg = GameConfig::default();
    cfg.hitboxes.heart.box_w = -1.0;
    assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));

    let mut cfg = GameConfig::default();
    cfg.levels.clear();
    assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("collection_threshold = \"nine\"").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)), "{err}");
}

#[test]
fn unknown_level_lookup() {
    let cfg = GameConfig::default();
    assert!(matches!(cfg.level(7), Err(GameError::UnknownLevel(7))));
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tuna_portal_{}_{name}", std::process::id()))
}

#[test]
fn load_reads_a_file() {
    let path = temp_path("load.toml");
    std::fs::write(&path, "collection_threshold = 3\n").expect("write temp config");
    let cfg = GameConfig::load(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(cfg.expect("loads").collection_threshold, 3);
}

#[test]
fn load_missing_file_is_io() {
    let err = GameConfig::load(&temp_path("does_not_exist.toml")).unwrap_err();
    assert!(matches!(err, GameError::Io(_)), "{err}");
}
