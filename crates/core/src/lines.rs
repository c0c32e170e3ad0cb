//! Block lines describe the footprint of a multi-tile object as a compact
//! path: a sequence of `(direction, steps)` byte pairs, walked from the
//! object's origin tile. Every tile the path lands on is covered.

use crate::geometry::{
    unit::{MapPos, MapSize},
    GridGeometry,
};
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use log::trace;

/// Maximum number of steps a single block line pair can take
pub const MAX_BLOCK_LINE_STEPS: u8 = 9;

/// An insertion-ordered set of map positions
pub type MapPosIndexSet = IndexSet<MapPos, FnvBuildHasher>;

/// Walk a block line path from `origin`, calling `callback` for every tile
/// the path lands on. The same tile can be visited more than once.
///
/// Pairs with an invalid direction, zero steps, or more than
/// [MAX_BLOCK_LINE_STEPS] steps are skipped, and the walk carries on from
/// wherever the last valid pair left off. A step that would leave the map is
/// dropped without moving, so the path effectively slides along the edge. A
/// trailing unpaired byte is ignored.
///
/// Returns the number of skipped pairs, which is always zero for well-formed
/// input.
pub fn for_each_block_lines<G: GridGeometry>(
    lines: &[u8],
    origin: MapPos,
    size: MapSize,
    mut callback: impl FnMut(MapPos),
) -> usize {
    let mut pos = origin;
    let mut skipped = 0;

    for (i, pair) in lines.chunks_exact(2).enumerate() {
        let (dir, steps) = (pair[0], pair[1]);
        if !G::is_valid_dir(dir) || steps == 0 || steps > MAX_BLOCK_LINE_STEPS
        {
            trace!(
                "Skipping malformed block line #{} (dir {}, {} steps) from {}",
                i,
                dir,
                steps,
                origin
            );
            skipped += 1;
            continue;
        }

        for _ in 0..steps {
            if G::move_by_dir(&mut pos, dir, size) {
                callback(pos);
            }
        }
    }

    skipped
}

/// Collect every tile covered by a block line path, in the order they're
/// first reached. Malformed pairs are skipped the same way as
/// [for_each_block_lines].
pub fn collect_block_lines<G: GridGeometry>(
    lines: &[u8],
    origin: MapPos,
    size: MapSize,
) -> MapPosIndexSet {
    let mut tiles = MapPosIndexSet::default();
    for_each_block_lines::<G>(lines, origin, size, |pos| {
        tiles.insert(pos);
    });
    tiles
}
