//! This module holds the tile grid geometries and everything they have in
//! common.
//!
//! ## Geometries
//!
//! A map is a rectangle of tiles addressed by `(x, y)`, but there are two
//! different ways to lay those tiles out:
//!
//! ### Hexagonal
//!
//! Tiles are hexagons arranged in columns, where every other column is
//! staggered by half a tile. That means the neighbors of a tile depend on
//! whether it sits in an even or odd column, which is why so much of
//! [HexGeometry] branches on column parity. There are 6 directions:
//!
//! ```text
//! even column x         odd column x
//! 0: (x-1, y)           0: (x-1, y-1)
//! 1: (x-1, y+1)         1: (x-1, y)
//! 2: (x,   y+1)         2: (x,   y+1)
//! 3: (x+1, y+1)         3: (x+1, y)
//! 4: (x+1, y)           4: (x+1, y-1)
//! 5: (x,   y-1)         5: (x,   y-1)
//! ```
//!
//! ### Square
//!
//! Tiles are squares, drawn isometrically (rotated 45° and squashed). There
//! are 8 directions and no parity rules at all, see [SquareGeometry].
//!
//! ## Picking a Geometry
//!
//! A game uses exactly one geometry for all of its maps, so the choice is
//! made at build time: [MapGeometry] is [HexGeometry] by default, or
//! [SquareGeometry] with the `square` feature enabled. Everything that does
//! geometry math is generic over [GridGeometry] though, so both are always
//! available when you need to pick explicitly.
//!
//! In both geometries, direction `0` is the reference direction and direction
//! `DIR_COUNT / 2` is its reverse.

pub mod angle;
mod hex;
pub mod ring;
mod square;
pub mod unit;

pub use self::{hex::HexGeometry, square::SquareGeometry};

use crate::{
    config::GeometrySettings,
    geometry::{
        angle::normalize_bearing,
        ring::RingOffsets,
        unit::{MapPos, MapSize, PixelOffset, TilePos},
    },
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use strum::{Display, EnumIter, EnumString};

/// The geometry used for maps, selected at build time via the `square`
/// feature.
#[cfg(not(feature = "square"))]
pub type MapGeometry = HexGeometry;
/// The geometry used for maps, selected at build time via the `square`
/// feature.
#[cfg(feature = "square")]
pub type MapGeometry = SquareGeometry;

/// Number of directions in the map geometry
pub const MAP_DIR_COUNT: u8 = MapGeometry::DIR_COUNT;

/// A runtime tag for the two geometries. Handy when something needs to talk
/// about a geometry (logging, CLI args) rather than do math with it.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeometryMode {
    Hex,
    Square,
}

impl GeometryMode {
    pub fn dir_count(self) -> u8 {
        match self {
            Self::Hex => HexGeometry::DIR_COUNT,
            Self::Square => SquareGeometry::DIR_COUNT,
        }
    }
}

/// A tile grid geometry. Implementors are zero-sized markers; every operation
/// is an associated function, so code that is generic over the geometry gets
/// monomorphized and never branches on it at runtime.
///
/// Required functions are the ones where the two geometries genuinely
/// differ. Everything else is built on top of those.
pub trait GridGeometry: Copy + Debug + Default + Send + Sync + 'static {
    /// Tag for this geometry
    const MODE: GeometryMode;
    /// Number of directions a tile can step in. Direction indexes are always
    /// in `[0, DIR_COUNT)`.
    const DIR_COUNT: u8;
    /// Direction used to step out to the next ring when spiraling outward
    const SPIRAL_START_DIR: u8;
    /// How many directions a spiral turns at each corner. This is also the
    /// number of steps per ring radius along each side of a ring.
    const SPIRAL_TURN: u8;

    /// Move a position one step in a direction, with no bounds checking.
    ///
    /// ## Panics
    /// Panics if `dir` isn't a valid direction for this geometry. Directions
    /// only ever come from inside the engine, so that's a bug.
    fn move_unchecked(pos: &mut TilePos, dir: u8);

    /// Number of steps it takes to walk from one tile to another. This is
    /// path distance along the grid, not euclidean distance.
    fn distance(from: TilePos, to: TilePos) -> u32;

    /// Get the direction from one tile to a nearby tile, based purely on
    /// which way each axis changes. Intended for adjacent tiles. If the
    /// relationship doesn't match any direction (e.g. the tiles are the
    /// same), this returns `0`.
    fn near_dir(from: TilePos, to: TilePos) -> u8;

    /// The continuous bearing from one tile to another, in degrees. Always in
    /// `[0, 360]`. This is the raw value that [Self::far_dir] buckets.
    fn bearing(from: TilePos, to: TilePos) -> f32;

    /// Map a bearing from [Self::bearing] to the direction whose sector
    /// contains it
    fn bearing_to_dir(bearing: f32) -> u8;

    /// Get the representative angle of a direction, in degrees
    fn dir_to_angle(dir: u8) -> i32;

    /// Get the direction whose sector contains an angle. Any integer angle
    /// is accepted, it gets normalized first.
    fn angle_to_dir(angle: i32) -> u8;

    /// Pixel position of a tile, relative to tile `(0, 0)`
    fn hex_pos(pos: TilePos, settings: &GeometrySettings) -> PixelOffset;

    /// Inverse of [Self::hex_pos]. Find the tile that contains a pixel
    /// position, along with the remaining offset from that tile's position.
    fn hex_pos_coord(
        pixel: PixelOffset,
        settings: &GeometrySettings,
    ) -> (TilePos, PixelOffset);

    /// Pixel displacement between two tiles
    fn hex_interval(
        from: TilePos,
        to: TilePos,
        settings: &GeometrySettings,
    ) -> PixelOffset;

    /// Every tile in the screen-aligned rectangle spanned by two tiles, as
    /// drawn with `settings`. Tiles off the map are left out. The rectangle
    /// is walked row by row, so the output is in row order rather than
    /// sorted. Hex geometry returns nothing when both tiles sit on the same
    /// screen row.
    fn axial_hexes(
        from: MapPos,
        to: MapPos,
        size: MapSize,
        settings: &GeometrySettings,
    ) -> Vec<MapPos>;

    /// Build the ring offset table for this geometry. This is somewhat
    /// expensive, use [GeometryEngine](crate::GeometryEngine) to get a cached
    /// copy.
    fn build_ring_offsets() -> RingOffsets;

    fn is_valid_dir(dir: u8) -> bool {
        dir < Self::DIR_COUNT
    }

    /// Move a map position one step in a direction. If the new position is
    /// on the map, `pos` is updated and this returns `true`. Otherwise, `pos`
    /// is left alone and this returns `false`.
    fn move_by_dir(pos: &mut MapPos, dir: u8, size: MapSize) -> bool {
        let mut raw_pos = TilePos::from(*pos);
        Self::move_unchecked(&mut raw_pos, dir);
        match size.to_map_pos(raw_pos) {
            Some(new_pos) => {
                *pos = new_pos;
                true
            }
            None => false,
        }
    }

    /// Get the tile one step away in a direction
    fn neighbor(pos: TilePos, dir: u8) -> TilePos {
        let mut neighbor = pos;
        Self::move_unchecked(&mut neighbor, dir);
        neighbor
    }

    /// Iterate over every adjacent tile, in direction order. The iterator
    /// always yields exactly `DIR_COUNT` positions.
    fn neighbors(pos: TilePos) -> impl Iterator<Item = TilePos> {
        (0..Self::DIR_COUNT).map(move |dir| Self::neighbor(pos, dir))
    }

    /// Are the two tiles within `dist` steps of each other?
    fn check_dist(from: MapPos, to: MapPos, dist: u32) -> bool {
        Self::distance(from.into(), to.into()) <= dist
    }

    /// Get the opposite direction
    fn reverse_dir(dir: u8) -> u8 {
        (dir + Self::DIR_COUNT / 2) % Self::DIR_COUNT
    }

    /// Get the direction sector that a far away tile falls in
    fn far_dir(from: TilePos, to: TilePos) -> u8 {
        Self::bearing_to_dir(Self::bearing(from, to))
    }

    /// Same as [Self::far_dir], but rotate the bearing by `offset` degrees
    /// (any value, positive or negative) before bucketing
    fn far_dir_with_offset(from: TilePos, to: TilePos, offset: f32) -> u8 {
        Self::bearing_to_dir(normalize_bearing(
            Self::bearing(from, to) + offset,
        ))
    }

    /// The facing angle from one tile to another, in `[0, 360)`. This is the
    /// un-bucketed [Self::bearing], reflected into the facing convention
    /// (`60 - bearing`). In hex geometry it agrees with [Self::dir_to_angle]
    /// for adjacent tiles; square geometry uses the same reflection, so its
    /// angles are offset from the direction sectors.
    fn dir_angle(from: TilePos, to: TilePos) -> f32 {
        normalize_bearing(60.0 - Self::bearing(from, to))
    }

    /// Number of tiles within `radius` steps of a tile, including the tile
    /// itself
    fn hexes_in_radius(radius: u32) -> u32 {
        1 + u32::from(Self::DIR_COUNT) * (radius * (radius + 1) / 2)
    }

    /// Walk outward from a tile in a spiral, to the `index`-th surrounding
    /// tile. Index 0 is the tile itself, `1..hexes_in_radius(1)` is the first
    /// ring, and so on. No bounds checking.
    fn move_around_away_unchecked(pos: &mut TilePos, index: u32) {
        if index == 0 {
            return;
        }

        Self::move_unchecked(pos, Self::SPIRAL_START_DIR);

        let turn = u32::from(Self::SPIRAL_TURN);
        let mut dir = 2;
        let mut round = 1;
        let mut round_count = Self::hexes_in_radius(1) - 1;
        for i in 1..index {
            Self::move_unchecked(pos, dir);

            // Finished a ring, step out to the next one
            if i >= round_count {
                round += 1;
                round_count = Self::hexes_in_radius(round) - 1;
                Self::move_unchecked(pos, Self::SPIRAL_START_DIR);
            }

            if i % (round * turn) == 0 {
                dir = (dir + Self::SPIRAL_TURN) % Self::DIR_COUNT;
            }
        }
    }

    /// Bounds-checked version of [Self::move_around_away_unchecked]. Same
    /// contract as [Self::move_by_dir]: `pos` is only updated on success.
    fn move_around_away(pos: &mut MapPos, index: u32, size: MapSize) -> bool {
        let mut raw_pos = TilePos::from(*pos);
        Self::move_around_away_unchecked(&mut raw_pos, index);
        match size.to_map_pos(raw_pos) {
            Some(new_pos) => {
                *pos = new_pos;
                true
            }
            None => false,
        }
    }
}

/// Bail out on a direction index that doesn't exist for a geometry
#[cold]
#[track_caller]
fn invalid_dir<G: GridGeometry>(dir: u8) -> ! {
    panic!(
        "invalid direction {} for {} geometry, expected [0, {})",
        dir,
        G::MODE,
        G::DIR_COUNT
    )
}
