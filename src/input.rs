//! Abstract directional input. The core never sees physical keys.

use crate::entities::Direction;

pub trait InputSource {
    fn is_held(&self, dir: Direction) -> bool;
}

/// A fixed snapshot of held directions, handy for tests and replays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(dirs: &[Direction]) -> Self {
        dirs.iter().fold(Self::default(), |held, &d| held.with(d))
    }

    pub fn with(mut self, dir: Direction) -> Self {
        match dir {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
        self
    }
}

impl InputSource for HeldDirections {
    fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}
