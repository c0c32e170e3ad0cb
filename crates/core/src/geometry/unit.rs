//! Basic coordinate types shared by both grid geometries. See the parent
//! module documentation for how the two geometries lay tiles out.

use derive_more::{Add, AddAssign, Display, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A signed tile coordinate. Unlike [MapPos], this can point anywhere,
/// including off the edge of a map, so it's what we use for intermediate math
/// while stepping around. Once a position has been validated against a
/// [MapSize], it can be converted into a [MapPos].
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Neg,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Is this tile in an odd column? Column parity decides which of the two
    /// mirrored neighbor layouts applies in hexagonal geometry.
    pub const fn is_odd_column(self) -> bool {
        self.x & 1 != 0
    }

    /// Component-wise `to - self`, widened to i64 so that any two positions
    /// can be compared without overflow
    pub fn delta(self, to: Self) -> (i64, i64) {
        (
            i64::from(to.x) - i64::from(self.x),
            i64::from(to.y) - i64::from(self.y),
        )
    }
}

impl From<MapPos> for TilePos {
    fn from(pos: MapPos) -> Self {
        Self::new(pos.x.into(), pos.y.into())
    }
}

/// A tile coordinate that is guaranteed to be on a map (or at least, it was
/// on the map it came from). This is the handle that the rest of the engine
/// passes around.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct MapPos {
    pub x: u16,
    pub y: u16,
}

impl MapPos {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// See [TilePos::is_odd_column]
    pub const fn is_odd_column(self) -> bool {
        self.x & 1 != 0
    }
}

/// The extent of a map, in tiles. Valid positions are
/// `[0, width) × [0, height)`.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}x{}", width, height)]
pub struct MapSize {
    pub width: u16,
    pub height: u16,
}

impl MapSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_valid_pos(self, pos: TilePos) -> bool {
        pos.x >= 0
            && pos.x < i32::from(self.width)
            && pos.y >= 0
            && pos.y < i32::from(self.height)
    }

    /// Convert a raw position into a map position, if it falls on this map
    pub fn to_map_pos(self, pos: TilePos) -> Option<MapPos> {
        if self.is_valid_pos(pos) {
            // Both components fit in u16 because they're below width/height
            Some(MapPos::new(
                u16::try_from(pos.x).ok()?,
                u16::try_from(pos.y).ok()?,
            ))
        } else {
            None
        }
    }
}

/// A position or displacement in pixel space, i.e. where things get drawn
/// rather than which tile they're on.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Neg,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})px", x, y)]
pub struct PixelOffset {
    pub x: i32,
    pub y: i32,
}

impl PixelOffset {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
