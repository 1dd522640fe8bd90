//! Asset provider: logical names resolved to opaque visual handles.
//!
//! The asset set is fixed, so everything is resolved once at startup and a
//! missing name is fatal.

use crate::error::{GameError, Result};

/// Opaque handle understood only by the renderer that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Visual(pub u32);

/// A resolved visual plus the shape of its animation sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub visual: Visual,
    /// Frames per row; at least 1.
    pub frames: usize,
}

impl Sprite {
    /// Frame to show for an animation counter: advances every
    /// `ticks_per_frame` ticks and wraps around the row.
    pub fn frame_for(&self, counter: u32, ticks_per_frame: u32) -> usize {
        (counter / ticks_per_frame.max(1)) as usize % self.frames.max(1)
    }
}

pub trait AssetProvider {
    fn resolve(&self, name: &str) -> Option<Sprite>;
}

pub const PLAYER: &str = "player";
pub const PLAYER_LANTERN: &str = "player_lantern";
pub const GOOD_ITEM: &str = "tuna_closed";
pub const HAZARD_ITEM: &str = "tuna_open";
pub const PORTAL: &str = "portal";
pub const ENEMY: &str = "enemies";
pub const HEART: &str = "heart";

/// Every visual the game draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetSet {
    pub player: Sprite,
    pub player_lantern: Sprite,
    pub good_item: Sprite,
    pub hazard_item: Sprite,
    pub portal: Sprite,
    pub enemy: Sprite,
    pub heart: Sprite,
}

impl AssetSet {
    pub fn load(provider: &impl AssetProvider) -> Result<Self> {
        let get = |name: &str| {
            provider
                .resolve(name)
                .ok_or_else(|| GameError::MissingAsset(name.to_string()))
        };
        Ok(AssetSet {
            player: get(PLAYER)?,
            player_lantern: get(PLAYER_LANTERN)?,
            good_item: get(GOOD_ITEM)?,
            hazard_item: get(HAZARD_ITEM)?,
            portal: get(PORTAL)?,
            enemy: get(ENEMY)?,
            heart: get(HEART)?,
        })
    }
}
