use crate::{
    config::GeometrySettings,
    geometry::{
        angle::normalize_angle,
        invalid_dir,
        ring::{ring_table_len, OffsetTable, RingOffsets, MAX_RING_RADIUS},
        unit::{MapPos, MapSize, PixelOffset, TilePos},
        GeometryMode, GridGeometry,
    },
};

/// Square geometry: 8 directions on a plain grid, rendered isometrically.
/// Unlike [HexGeometry](crate::HexGeometry), nothing here depends on column
/// parity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SquareGeometry;

impl SquareGeometry {
    /// Unit step for each direction, indexed by direction
    const STEPS: [(i32, i32); 8] = [
        (-1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
    ];
}

impl GridGeometry for SquareGeometry {
    const MODE: GeometryMode = GeometryMode::Square;
    const DIR_COUNT: u8 = 8;
    const SPIRAL_START_DIR: u8 = 7;
    const SPIRAL_TURN: u8 = 2;

    fn move_unchecked(pos: &mut TilePos, dir: u8) {
        match Self::STEPS.get(usize::from(dir)) {
            Some(&(dx, dy)) => {
                pos.x += dx;
                pos.y += dy;
            }
            None => invalid_dir::<Self>(dir),
        }
    }

    fn distance(from: TilePos, to: TilePos) -> u32 {
        let (dx, dy) = from.delta(to);
        u32::try_from(dx.abs().max(dy.abs())).unwrap_or(u32::MAX)
    }

    fn near_dir(from: TilePos, to: TilePos) -> u8 {
        let TilePos { x: x1, y: y1 } = from;
        let TilePos { x: x2, y: y2 } = to;

        if x1 > x2 && y1 == y2 {
            0
        } else if x1 > x2 && y1 < y2 {
            1
        } else if x1 == x2 && y1 < y2 {
            2
        } else if x1 < x2 && y1 < y2 {
            3
        } else if x1 < x2 && y1 == y2 {
            4
        } else if x1 < x2 && y1 > y2 {
            5
        } else if x1 == x2 && y1 > y2 {
            6
        } else if x1 > x2 && y1 > y2 {
            7
        } else {
            0
        }
    }

    fn bearing(from: TilePos, to: TilePos) -> f32 {
        let (dx, dy) = from.delta(to);
        180.0 + (dx as f32).atan2(dy as f32).to_degrees()
    }

    fn bearing_to_dir(bearing: f32) -> u8 {
        if bearing >= 22.5 && bearing < 67.5 {
            7
        } else if bearing >= 67.5 && bearing < 112.5 {
            0
        } else if bearing >= 112.5 && bearing < 157.5 {
            1
        } else if bearing >= 157.5 && bearing < 202.5 {
            2
        } else if bearing >= 202.5 && bearing < 247.5 {
            3
        } else if bearing >= 247.5 && bearing < 292.5 {
            4
        } else if bearing >= 292.5 && bearing < 337.5 {
            5
        } else {
            6
        }
    }

    fn dir_to_angle(dir: u8) -> i32 {
        i32::from(dir) * 45 + 45
    }

    fn angle_to_dir(angle: i32) -> u8 {
        // Shift by half a sector so each direction's angle sits mid-bucket
        (normalize_angle(angle - 45 / 2) / 45) as u8
    }

    fn hex_pos(pos: TilePos, settings: &GeometrySettings) -> PixelOffset {
        let w = settings.map_hex_width;
        let h = settings.map_hex_line_height;
        PixelOffset::new((pos.y - pos.x) * w / 2, (pos.y + pos.x) * h)
    }

    fn hex_pos_coord(
        pixel: PixelOffset,
        settings: &GeometrySettings,
    ) -> (TilePos, PixelOffset) {
        let half_w = settings.map_hex_width / 2;
        let h = settings.map_hex_line_height;

        let ty = pixel.y / h;
        let tx = pixel.x / half_w;
        let pos = TilePos::new((ty - tx) / 2, (ty + tx) / 2);

        (pos, pixel - Self::hex_pos(pos, settings))
    }

    fn hex_interval(
        from: TilePos,
        to: TilePos,
        settings: &GeometrySettings,
    ) -> PixelOffset {
        let w = settings.map_hex_width;
        let h = settings.map_hex_line_height;
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        PixelOffset::new((dy - dx) * w / 2, (dy + dx) * h)
    }

    fn axial_hexes(
        from: MapPos,
        to: MapPos,
        size: MapSize,
        settings: &GeometrySettings,
    ) -> Vec<MapPos> {
        let half_w = settings.map_hex_width / 2;
        let h = settings.map_hex_line_height;
        let offset = Self::hex_interval(from.into(), to.into(), settings);
        let rw = if offset.x == 0 { 1 } else { offset.x };
        let rh = if offset.y == 0 { 1 } else { offset.y };

        // Rectangle size in tiles, rounded up and padded by one tile when
        // the span covers at least a full tile
        let tiles_wide = (rw / half_w).abs()
            + i32::from(rw % half_w != 0)
            + i32::from(rw.abs() >= half_w);
        let tiles_high = (rh / h).abs()
            + i32::from(rh % h != 0)
            + i32::from(rh.abs() >= h);

        let mut row_start = TilePos::from(from);
        let mut hexes = Vec::new();
        for row in 0..tiles_high {
            let mut pos = row_start;
            let odd_row = row % 2 != 0;

            // Alternate between the two axes to move one screen row down
            // (or up)
            match (rh > 0, rw > 0, odd_row) {
                (true, true, true) | (true, false, false) => row_start.x += 1,
                (true, true, false) | (true, false, true) => row_start.y += 1,
                (false, true, true) | (false, false, false) => {
                    row_start.y -= 1
                }
                (false, true, false) | (false, false, true) => {
                    row_start.x -= 1
                }
            }

            for _ in (i32::from(odd_row)..tiles_wide).step_by(2) {
                if let Some(map_pos) = size.to_map_pos(pos) {
                    hexes.push(map_pos);
                }
                if rw > 0 {
                    pos.x -= 1;
                    pos.y += 1;
                } else {
                    pos.x += 1;
                    pos.y -= 1;
                }
            }
        }
        hexes
    }

    fn build_ring_offsets() -> RingOffsets {
        let len = ring_table_len(MAX_RING_RADIUS, Self::DIR_COUNT.into());
        let mut table = OffsetTable::with_capacity(len);

        // Each ring starts on its left edge and walks around clockwise. The
        // left edge gets split in two so the ring ends where it started.
        let mut pos = TilePos::ORIGIN;
        for ring in 1..=MAX_RING_RADIUS {
            Self::move_unchecked(&mut pos, 0);

            let segments = [
                (2, ring),
                (4, ring * 2),
                (6, ring * 2),
                (0, ring * 2),
                (2, ring),
            ];
            for (dir, steps) in segments {
                for _ in 0..steps {
                    table.push(pos.x, pos.y);
                    Self::move_unchecked(&mut pos, dir);
                }
            }
        }

        RingOffsets::new(Self::DIR_COUNT.into(), table, None)
    }
}
