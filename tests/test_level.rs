use tuna_portal::geometry::{Cell, Rect};
use tuna_portal::level::*;
use tuna_portal::GameError;

#[test]
fn ascii_board_dimensions_and_solids() {
    let m = LevelMap::from_ascii(1, "#..\n.#.\n", 32, 32).expect("valid board");
    assert_eq!((m.cols, m.rows), (3, 2));
    assert_eq!((m.pixel_width(), m.pixel_height()), (96.0, 64.0));
    assert_eq!(
        m.solids,
        vec![Rect::new(0.0, 0.0, 32.0, 32.0), Rect::new(32.0, 32.0, 32.0, 32.0)]
    );
}

#[test]
fn blank_lines_are_ignored() {
    let m = LevelMap::from_ascii(1, "\n..\n\n..\n\n", 16, 16).expect("valid board");
    assert_eq!((m.cols, m.rows), (2, 2));
}

#[test]
fn ragged_board_is_rejected() {
    let err = LevelMap::from_ascii(4, "...\n..\n", 32, 32).unwrap_err();
    assert!(matches!(err, GameError::MapParse { level: 4, .. }), "{err}");
}

#[test]
fn unknown_glyph_is_rejected() {
    let err = LevelMap::from_ascii(1, "..x\n...\n", 32, 32).unwrap_err();
    assert!(matches!(err, GameError::MapParse { level: 1, .. }));
}

#[test]
fn empty_board_is_rejected() {
    assert!(LevelMap::from_ascii(1, "\n\n", 32, 32).is_err());
}

#[test]
fn spawn_candidates_are_the_open_cells() {
    let m = LevelMap::from_ascii(1, "#.\n.#\n", 32, 32).expect("valid board");
    assert_eq!(m.spawn_candidates(), vec![Cell::new(1, 0), Cell::new(0, 1)]);
}

#[test]
fn spawn_candidates_count_matches_board() {
    let m = BuiltinMaps.load(1).expect("level 1");
    let total = (m.cols * m.rows) as usize;
    assert_eq!(m.spawn_candidates().len(), total - m.solids.len());
}

#[test]
fn builtin_levels_load() {
    let one = BuiltinMaps.load(1).expect("level 1");
    assert_eq!((one.cols, one.rows), (30, 20));
    assert_eq!((one.tile_w, one.tile_h), (TILE_SIZE, TILE_SIZE));
    assert_eq!(one.level, 1);

    let two = BuiltinMaps.load(2).expect("level 2");
    assert_eq!((two.cols, two.rows), (25, 15));
    assert_eq!(two.level, 2);
}

#[test]
fn builtin_unknown_level_is_fatal() {
    assert!(matches!(BuiltinMaps.load(3), Err(GameError::UnknownLevel(3))));
    assert!(matches!(BuiltinMaps.load(0), Err(GameError::UnknownLevel(0))));
}

#[test]
fn static_maps_lookup() {
    let m = LevelMap::from_ascii(7, "..\n..\n", 32, 32).expect("valid board");
    let maps = StaticMaps::new(vec![m.clone()]);
    assert_eq!(maps.load(7).expect("level 7"), m);
    assert!(matches!(maps.load(1), Err(GameError::UnknownLevel(1))));
}
