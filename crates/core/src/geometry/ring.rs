//! Precomputed ring offset tables. These let callers walk every tile around
//! an origin in order of increasing distance, using nothing but additions.

use std::ops::Range;

/// The largest ring radius that offset tables are built for. Must be even,
/// the table size formula relies on it.
pub const MAX_RING_RADIUS: usize = 50;

/// Number of entries in rings `1..=radius` for a geometry with `dir_count`
/// directions. Each ring `r` holds `dir_count * r` tiles.
pub const fn ring_table_len(radius: usize, dir_count: usize) -> usize {
    (radius * radius / 2 + radius / 2) * dir_count
}

/// One set of parallel tile offset arrays. Entry `i` is the offset
/// `(sx[i], sy[i])` from the origin to the `i`-th tile of the spiral.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetTable {
    pub sx: Vec<i16>,
    pub sy: Vec<i16>,
}

impl OffsetTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sx: Vec::with_capacity(capacity),
            sy: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, x: i32, y: i32) {
        // Offsets are bounded by MAX_RING_RADIUS so they always fit
        self.sx.push(x as i16);
        self.sy.push(y as i16);
    }

    pub fn len(&self) -> usize {
        self.sx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sx.is_empty()
    }

    /// Iterate over `(x, y)` offset pairs
    pub fn iter(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.sx.iter().copied().zip(self.sy.iter().copied())
    }
}

/// The full ring table for a geometry. Hexagonal geometry needs a second
/// table because tiles in odd columns have different neighbor offsets than
/// tiles in even columns. Square geometry has no such split, so it only
/// fills in the even table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingOffsets {
    dir_count: usize,
    even: OffsetTable,
    odd: Option<OffsetTable>,
}

impl RingOffsets {
    pub(crate) fn new(
        dir_count: usize,
        even: OffsetTable,
        odd: Option<OffsetTable>,
    ) -> Self {
        let expected = ring_table_len(MAX_RING_RADIUS, dir_count);
        debug_assert_eq!(even.len(), expected, "bad even ring table size");
        debug_assert!(
            odd.as_ref().map_or(true, |odd| odd.len() == expected),
            "bad odd ring table size"
        );
        Self {
            dir_count,
            even,
            odd,
        }
    }

    /// Get the table to use for an origin tile, based on its column parity
    pub fn table(&self, odd_column: bool) -> &OffsetTable {
        match (odd_column, &self.odd) {
            (true, Some(odd)) => odd,
            _ => &self.even,
        }
    }

    /// Total number of entries in each table
    pub fn len(&self) -> usize {
        self.even.len()
    }

    pub fn is_empty(&self) -> bool {
        self.even.is_empty()
    }

    /// The index range of the tiles in ring `radius` (1-indexed). Ring 0 is
    /// the origin itself, which isn't in the table, so its range is empty.
    pub fn ring_range(&self, radius: usize) -> Range<usize> {
        let radius = radius.min(MAX_RING_RADIUS);
        if radius == 0 {
            return 0..0;
        }
        let start = self.dir_count * (radius - 1) * radius / 2;
        start..start + self.dir_count * radius
    }

    /// The index range covering every ring from 1 up to `radius`
    pub fn radius_range(&self, radius: usize) -> Range<usize> {
        0..self.ring_range(radius).end
    }
}
