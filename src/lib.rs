//! Gameplay core for a top-down tile game: walk the map, collect nine tuna
//! cans while avoiding the open ones, step through the portal, and touch the
//! heart to start over after a game over.
//!
//! Rendering, input and assets are reached only through the traits in
//! [`render`], [`input`], [`assets`] and [`level`].

pub mod assets;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod level;
pub mod motion;
pub mod render;
pub mod world;

pub use error::{GameError, Result};
