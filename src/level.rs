//! Map provider: turns a level id into solid geometry and grid dimensions.
//!
//! Built-in levels are ASCII boards (`#` solid, `.` open) compiled
//! into the binary.

use tracing::info;

use crate::error::{GameError, Result};
use crate::geometry::{hits_any, Cell, Rect};

pub const TILE_SIZE: u32 = 32;

const FLOOR1: &str = include_str!("../assets/maps/floor1.txt");
const FLOOR2: &str = include_str!("../assets/maps/floor2.txt");

/// Static geometry for one level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelMap {
    pub level: u32,
    pub cols: u32,
    pub rows: u32,
    pub tile_w: u32,
    pub tile_h: u32,
    /// One rectangle per impassable cell.
    pub solids: Vec<Rect>,
}

impl LevelMap {
    pub fn from_ascii(level: u32, board: &str, tile_w: u32, tile_h: u32) -> Result<Self> {
        let parse_err = |reason: String| GameError::MapParse { level, reason };

        let lines: Vec<&str> = board
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(parse_err("board is empty".to_string()));
        }

        let cols = lines[0].chars().count();
        let mut solids = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(parse_err(format!(
                    "row {row} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => solids.push(Cell::new(col as u32, row as u32).rect(tile_w, tile_h)),
                    '.' => {}
                    other => {
                        return Err(parse_err(format!(
                            "unexpected '{other}' at row {row}, column {col}"
                        )))
                    }
                }
            }
        }

        Ok(LevelMap {
            level,
            cols: cols as u32,
            rows: lines.len() as u32,
            tile_w,
            tile_h,
            solids,
        })
    }

    pub fn pixel_width(&self) -> f32 {
        (self.cols * self.tile_w) as f32
    }

    pub fn pixel_height(&self) -> f32 {
        (self.rows * self.tile_h) as f32
    }

    /// Every cell whose rectangle overlaps no solid, in row-major order.
    /// Tests each cell against each solid; maps are small enough for that.
    pub fn spawn_candidates(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(col, row);
                if !hits_any(&cell.rect(self.tile_w, self.tile_h), &self.solids) {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}

pub trait MapProvider {
    /// Geometry for `level`. Unknown ids are a configuration error.
    fn load(&self, level: u32) -> Result<LevelMap>;
}

/// The two boards that ship with the game.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinMaps;

impl MapProvider for BuiltinMaps {
    fn load(&self, level: u32) -> Result<LevelMap> {
        let board = match level {
            1 => FLOOR1,
            2 => FLOOR2,
            other => return Err(GameError::UnknownLevel(other)),
        };
        let map = LevelMap::from_ascii(level, board, TILE_SIZE, TILE_SIZE)?;
        info!(
            level,
            cols = map.cols,
            rows = map.rows,
            solids = map.solids.len(),
            "map loaded"
        );
        Ok(map)
    }
}

/// Boards supplied at runtime, keyed by level id.
#[derive(Clone, Debug, Default)]
pub struct StaticMaps {
    maps: Vec<LevelMap>,
}

impl StaticMaps {
    pub fn new(maps: Vec<LevelMap>) -> Self {
        StaticMaps { maps }
    }
}

impl MapProvider for StaticMaps {
    fn load(&self, level: u32) -> Result<LevelMap> {
        self.maps
            .iter()
            .find(|m| m.level == level)
            .cloned()
            .ok_or(GameError::UnknownLevel(level))
    }
}
