//! Tilegrid is the tile geometry core for 2D maps built from hexagonal or
//! square (isometric) tiles. It answers the questions every map needs
//! answered: how far apart are two tiles, which way is one from the other,
//! what's next to this tile, which tiles are within N steps of it, and where
//! does a tile land in pixel space.
//!
//! ```
//! use tilegrid::{
//!     GeometryEngine, GeometrySettings, GridGeometry, HexGeometry, MapPos,
//!     MapSize, TilePos,
//! };
//!
//! let origin = TilePos::new(4, 4);
//! let target = TilePos::new(7, 2);
//! println!("{} steps", HexGeometry::distance(origin, target));
//!
//! // Anything that needs the ring tables or pixel settings goes through an
//! // engine
//! let engine =
//!     GeometryEngine::<HexGeometry>::new(GeometrySettings::default()).unwrap();
//! let around: Vec<MapPos> = engine
//!     .tiles_around(MapPos::new(4, 4), 2, MapSize::new(100, 100))
//!     .collect();
//! assert_eq!(around.len(), 18);
//! ```
//!
//! See [GridGeometry] for the geometry-specific math and [GeometryEngine] for
//! the stateful lookups.

mod config;
mod engine;
mod geometry;
mod lines;
mod util;

pub use crate::{
    config::GeometrySettings,
    engine::GeometryEngine,
    geometry::{
        angle::{
            dir_angle_diff, dir_angle_diff_sided, normalize_angle,
            normalize_bearing,
        },
        ring::{ring_table_len, OffsetTable, RingOffsets, MAX_RING_RADIUS},
        unit::{MapPos, MapSize, PixelOffset, TilePos},
        GeometryMode, GridGeometry, HexGeometry, MapGeometry, SquareGeometry,
        MAP_DIR_COUNT,
    },
    lines::{
        collect_block_lines, for_each_block_lines, MapPosIndexSet,
        MAX_BLOCK_LINE_STEPS,
    },
};
