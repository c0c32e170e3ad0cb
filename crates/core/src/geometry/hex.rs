use crate::{
    config::GeometrySettings,
    geometry::{
        angle::{normalize_angle, SQRT3, SQRT3_X2},
        invalid_dir,
        ring::{ring_table_len, OffsetTable, RingOffsets, MAX_RING_RADIUS},
        unit::{MapPos, MapSize, PixelOffset, TilePos},
        GeometryMode, GridGeometry,
    },
};

/// Hexagonal geometry: 6 directions, with every odd column shifted half a
/// tile. See the module-level docs for the neighbor layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HexGeometry;

impl GridGeometry for HexGeometry {
    const MODE: GeometryMode = GeometryMode::Hex;
    const DIR_COUNT: u8 = 6;
    const SPIRAL_START_DIR: u8 = 0;
    const SPIRAL_TURN: u8 = 1;

    fn move_unchecked(pos: &mut TilePos, dir: u8) {
        // Note the parity checks happen on the NEW x
        match dir {
            0 => {
                pos.x -= 1;
                if !pos.is_odd_column() {
                    pos.y -= 1;
                }
            }
            1 => {
                pos.x -= 1;
                if pos.is_odd_column() {
                    pos.y += 1;
                }
            }
            2 => pos.y += 1,
            3 => {
                pos.x += 1;
                if pos.is_odd_column() {
                    pos.y += 1;
                }
            }
            4 => {
                pos.x += 1;
                if !pos.is_odd_column() {
                    pos.y -= 1;
                }
            }
            5 => pos.y -= 1,
            _ => invalid_dir::<Self>(dir),
        }
    }

    fn distance(from: TilePos, to: TilePos) -> u32 {
        let (dx, dy) = from.delta(to);
        let dx = dx.abs();
        // Columns are staggered, so how much vertical distance we get "for
        // free" while moving horizontally depends on which way we're going
        // and which column we start in. Rounding differs between the halves.
        let rx = if !from.is_odd_column() {
            if dy <= 0 {
                -dy - dx / 2
            } else {
                dy - (dx + 1) / 2
            }
        } else if dy >= 0 {
            dy - dx / 2
        } else {
            -dy - (dx + 1) / 2
        };
        u32::try_from(dx + rx.max(0)).unwrap_or(u32::MAX)
    }

    fn near_dir(from: TilePos, to: TilePos) -> u8 {
        let TilePos { x: x1, y: y1 } = from;
        let TilePos { x: x2, y: y2 } = to;

        if from.is_odd_column() {
            if x1 > x2 && y1 > y2 {
                0
            } else if x1 > x2 && y1 == y2 {
                1
            } else if x1 == x2 && y1 < y2 {
                2
            } else if x1 < x2 && y1 == y2 {
                3
            } else if x1 < x2 && y1 > y2 {
                4
            } else if x1 == x2 && y1 > y2 {
                5
            } else {
                0
            }
        } else if x1 > x2 && y1 == y2 {
            0
        } else if x1 > x2 && y1 < y2 {
            1
        } else if x1 == x2 && y1 < y2 {
            2
        } else if x1 < x2 && y1 < y2 {
            3
        } else if x1 < x2 && y1 == y2 {
            4
        } else if x1 == x2 && y1 > y2 {
            5
        } else {
            0
        }
    }

    fn bearing(from: TilePos, to: TilePos) -> f32 {
        // Project both tiles onto a plane where neighbors are equidistant
        let (dx, dy) = from.delta(to);
        let nx = 3.0 * dx as f32;
        let parity_shift =
            to.is_odd_column() as i32 - from.is_odd_column() as i32;
        let ny = dy as f32 * SQRT3_X2 - parity_shift as f32 * SQRT3;
        180.0 + ny.atan2(nx).to_degrees()
    }

    fn bearing_to_dir(bearing: f32) -> u8 {
        if bearing >= 60.0 && bearing < 120.0 {
            5
        } else if bearing >= 120.0 && bearing < 180.0 {
            4
        } else if bearing >= 180.0 && bearing < 240.0 {
            3
        } else if bearing >= 240.0 && bearing < 300.0 {
            2
        } else if bearing >= 300.0 {
            1
        } else {
            0
        }
    }

    fn dir_to_angle(dir: u8) -> i32 {
        i32::from(dir) * 60 + 30
    }

    fn angle_to_dir(angle: i32) -> u8 {
        (normalize_angle(angle) / 60) as u8
    }

    fn hex_pos(pos: TilePos, settings: &GeometrySettings) -> PixelOffset {
        let w = settings.map_hex_width;
        let h = settings.map_hex_line_height;
        // Every two columns shift the row baseline by half a tile
        let hx = pos.x.div_euclid(2);
        PixelOffset::new(
            pos.y * (w / 2) - pos.x * w + (w / 2) * hx,
            pos.y * h + h * hx,
        )
    }

    fn hex_pos_coord(
        pixel: PixelOffset,
        settings: &GeometrySettings,
    ) -> (TilePos, PixelOffset) {
        let w = settings.map_hex_width;
        let half_w = w / 2;
        let h = settings.map_hex_line_height;

        let ty = pixel.y / h;
        let num = ty * half_w - pixel.x;
        // Ceiling division, since num and w can have different signs
        let rx = -(-num).div_euclid(w);
        let ry = ty - rx.div_euclid(2);
        let pos = TilePos::new(rx, ry);

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

        // Half-tile stagger correction, rounded away from the starting
        // column's side
        let stagger = if from.is_odd_column() && dx > 0 {
            dx + 1
        } else if !from.is_odd_column() && dx < 0 {
            dx - 1
        } else {
            dx
        };
        let stagger = stagger / 2;

        PixelOffset::new(
            dy * (w / 2) - dx * w + (w / 2) * stagger,
            dy * h + h * stagger,
        )
    }

    fn axial_hexes(
        from: MapPos,
        to: MapPos,
        size: MapSize,
        settings: &GeometrySettings,
    ) -> Vec<MapPos> {
        let offset = Self::hex_interval(from.into(), to.into(), settings);
        let dx = -offset.x / settings.map_hex_width;
        let dy = offset.y / settings.map_hex_line_height;
        let (fx, fy) = (i32::from(from.x), i32::from(from.y));
        let from_odd = i32::from(from.is_odd_column());

        let mut hexes = Vec::new();
        for j in 1..=dy.abs() {
            // Start of each row, stepping diagonally away from the origin
            let (mut hx, mut hy) = if dy >= 0 {
                let hx = fx + j / 2 + j % 2;
                (hx, fy + (j - (hx - fx - from_odd) / 2))
            } else {
                let hx = fx - j / 2 - j % 2;
                (hx, fy - (j - (fx - hx - (1 - from_odd)) / 2))
            };

            for _ in 0..=dx.abs() {
                if let Some(pos) = size.to_map_pos(TilePos::new(hx, hy)) {
                    hexes.push(pos);
                }
                if dx >= 0 {
                    if hx % 2 != 0 {
                        hy -= 1;
                    }
                    hx += 1;
                } else {
                    hx -= 1;
                    if hx % 2 != 0 {
                        hy += 1;
                    }
                }
            }
        }
        hexes
    }

    fn build_ring_offsets() -> RingOffsets {
        let len = ring_table_len(MAX_RING_RADIUS, Self::DIR_COUNT.into());
        let mut even = OffsetTable::with_capacity(len);
        let mut odd = OffsetTable::with_capacity(len);

        // Walk two spirals at once, one around an even column and one around
        // an odd column. The odd one starts at x=1 so it has to be shifted
        // back when recorded.
        let mut even_pos = TilePos::ORIGIN;
        let mut odd_pos = TilePos::new(1, 0);
        for ring in 0..MAX_RING_RADIUS {
            Self::move_unchecked(&mut even_pos, 0);
            Self::move_unchecked(&mut odd_pos, 0);

            for side in 0..Self::DIR_COUNT {
                let dir = (side + 2) % Self::DIR_COUNT;
                for _ in 0..=ring {
                    even.push(even_pos.x, even_pos.y);
                    odd.push(odd_pos.x - 1, odd_pos.y);
                    Self::move_unchecked(&mut even_pos, dir);
                    Self::move_unchecked(&mut odd_pos, dir);
                }
            }
        }

        RingOffsets::new(Self::DIR_COUNT.into(), even, Some(odd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn settings() -> GeometrySettings {
        GeometrySettings {
            map_hex_width: 32,
            map_hex_line_height: 12,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_unchecked() {
        let mut pos = TilePos::ORIGIN;
        HexGeometry::move_unchecked(&mut pos, 0);
        assert_eq!(pos, TilePos::new(-1, 0));
        HexGeometry::move_unchecked(&mut pos, 3);
        assert_eq!(pos, TilePos::ORIGIN);

        let mut pos = TilePos::new(1, 0);
        HexGeometry::move_unchecked(&mut pos, 0);
        assert_eq!(pos, TilePos::new(0, -1));
        HexGeometry::move_unchecked(&mut pos, 4);
        assert_eq!(pos, TilePos::new(1, -1));
        HexGeometry::move_unchecked(&mut pos, 2);
        assert_eq!(pos, TilePos::new(1, 0));
    }

    #[test]
    fn test_distance() {
        let origin = TilePos::ORIGIN;
        assert_eq!(HexGeometry::distance(origin, origin), 0);
        assert_eq!(HexGeometry::distance(origin, TilePos::new(1, 1)), 1);
        assert_eq!(HexGeometry::distance(origin, TilePos::new(1, -1)), 2);
        assert_eq!(HexGeometry::distance(origin, TilePos::new(0, 3)), 3);
        assert_eq!(HexGeometry::distance(origin, TilePos::new(4, 0)), 4);
        assert_eq!(HexGeometry::distance(origin, TilePos::new(4, 2)), 4);
        assert_eq!(HexGeometry::distance(origin, TilePos::new(4, 5)), 7);
        assert_eq!(
            HexGeometry::distance(TilePos::new(3, 3), TilePos::new(4, 2)),
            1
        );
    }

    #[test]
    fn test_distance_extremes() {
        let left = TilePos::new(i32::MIN, 0);
        let right = TilePos::new(i32::MAX, 0);
        assert_eq!(HexGeometry::distance(left, right), u32::MAX);
        assert_eq!(HexGeometry::distance(right, left), u32::MAX);
        // Too far to represent, so it saturates
        assert_eq!(
            HexGeometry::distance(
                TilePos::new(0, i32::MIN),
                TilePos::new(i32::MAX, i32::MAX)
            ),
            u32::MAX
        );
    }

    #[test]
    fn test_near_dir_fallback() {
        let pos = TilePos::new(4, 4);
        assert_eq!(HexGeometry::near_dir(pos, pos), 0);
        // Odd columns have no direction where both x and y increase
        let (from, to) = (TilePos::new(5, 4), TilePos::new(6, 5));
        assert_eq!(HexGeometry::near_dir(from, to), 0);
    }

    #[test]
    fn test_far_dir() {
        let origin = TilePos::new(10, 10);
        assert_eq!(HexGeometry::far_dir(origin, TilePos::new(10, 20)), 2);
        assert_eq!(HexGeometry::far_dir(origin, TilePos::new(10, 0)), 5);
        assert_eq!(HexGeometry::far_dir(origin, TilePos::new(20, 15)), 3);
        assert_eq!(HexGeometry::far_dir(origin, TilePos::new(0, 5)), 0);
    }

    #[test]
    fn test_far_dir_with_offset() {
        let from = TilePos::new(1, 0);
        let to = TilePos::new(1, 1);
        assert_approx_eq!(HexGeometry::bearing(from, to), 270.0, 1e-3);
        assert_eq!(HexGeometry::far_dir_with_offset(from, to, 0.0), 2);
        assert_eq!(HexGeometry::far_dir_with_offset(from, to, 60.0), 1);
        assert_eq!(HexGeometry::far_dir_with_offset(from, to, -300.0), 1);
        assert_eq!(HexGeometry::far_dir_with_offset(from, to, 420.0), 1);
        assert_eq!(HexGeometry::far_dir_with_offset(from, to, -120.0), 4);
    }

    #[test]
    fn test_dir_angle() {
        let from = TilePos::new(1, 0);
        assert_approx_eq!(
            HexGeometry::dir_angle(from, TilePos::new(0, -1)),
            30.0,
            1e-3
        );
        assert_approx_eq!(
            HexGeometry::dir_angle(from, TilePos::new(1, 1)),
            150.0,
            1e-3
        );
        assert_approx_eq!(
            HexGeometry::dir_angle(from, TilePos::new(1, -1)),
            330.0,
            1e-3
        );
    }

    #[test]
    fn test_dir_angle_conversion() {
        assert_eq!(HexGeometry::dir_to_angle(0), 30);
        assert_eq!(HexGeometry::dir_to_angle(5), 330);
        assert_eq!(HexGeometry::angle_to_dir(30), 0);
        assert_eq!(HexGeometry::angle_to_dir(59), 0);
        assert_eq!(HexGeometry::angle_to_dir(60), 1);
        assert_eq!(HexGeometry::angle_to_dir(-30), 5);
        assert_eq!(HexGeometry::angle_to_dir(390), 0);
    }

    #[test]
    fn test_hex_pos() {
        let settings = settings();
        assert_eq!(
            HexGeometry::hex_pos(TilePos::ORIGIN, &settings),
            PixelOffset::ZERO
        );
        assert_eq!(
            HexGeometry::hex_pos(TilePos::new(0, 1), &settings),
            PixelOffset::new(16, 12)
        );
        assert_eq!(
            HexGeometry::hex_pos(TilePos::new(1, 0), &settings),
            PixelOffset::new(-32, 0)
        );
        assert_eq!(
            HexGeometry::hex_pos(TilePos::new(2, 0), &settings),
            PixelOffset::new(-48, 12)
        );
        assert_eq!(
            HexGeometry::hex_pos(TilePos::new(-1, 0), &settings),
            PixelOffset::new(16, -12)
        );
    }

    #[test]
    fn test_hex_pos_coord() {
        let settings = settings();
        for x in -8..8 {
            for y in -8..8 {
                let pos = TilePos::new(x, y);
                let pixel = HexGeometry::hex_pos(pos, &settings);
                assert_eq!(
                    HexGeometry::hex_pos_coord(pixel, &settings),
                    (pos, PixelOffset::ZERO)
                );
            }
        }

        let (pos, offset) =
            HexGeometry::hex_pos_coord(PixelOffset::new(-40, 5), &settings);
        assert_eq!(pos, TilePos::new(2, -1));
        assert_eq!(offset, PixelOffset::new(24, 5));
    }

    #[test]
    fn test_hex_interval() {
        let settings = settings();
        assert_eq!(
            HexGeometry::hex_interval(
                TilePos::new(4, 4),
                TilePos::new(4, 5),
                &settings
            ),
            PixelOffset::new(16, 12)
        );
        assert_eq!(
            HexGeometry::hex_interval(
                TilePos::new(4, 4),
                TilePos::new(5, 4),
                &settings
            ),
            PixelOffset::new(-32, 0)
        );
        assert_eq!(
            HexGeometry::hex_interval(
                TilePos::new(5, 4),
                TilePos::new(6, 4),
                &settings
            ),
            PixelOffset::new(-16, 12)
        );

        // Interval always agrees with the difference in absolute positions
        for (fx, fy, tx, ty) in
            [(0, 0, 3, 7), (1, 2, -5, 4), (-3, -3, 2, -9), (7, 1, 6, 0)]
        {
            let from = TilePos::new(fx, fy);
            let to = TilePos::new(tx, ty);
            assert_eq!(
                HexGeometry::hex_interval(from, to, &settings),
                HexGeometry::hex_pos(to, &settings)
                    - HexGeometry::hex_pos(from, &settings)
            );
        }
    }

    #[test]
    fn test_ring_offsets() {
        let offsets = HexGeometry::build_ring_offsets();
        assert_eq!(offsets.len(), 7650);

        let even = offsets.table(false);
        assert_eq!(even.sx[..6], [-1, -1, 0, 1, 1, 0]);
        assert_eq!(even.sy[..6], [0, 1, 1, 1, 0, -1]);
        let odd = offsets.table(true);
        assert_eq!(odd.sx[..6], [-1, -1, 0, 1, 1, 0]);
        assert_eq!(odd.sy[..6], [-1, 0, 1, 0, -1, -1]);

        for (origin, table) in
            [(TilePos::ORIGIN, even), (TilePos::new(1, 0), odd)]
        {
            for radius in 1..=MAX_RING_RADIUS {
                let range = offsets.ring_range(radius);
                assert_eq!(range.len(), 6 * radius);
                for i in range {
                    let pos = origin
                        + TilePos::new(table.sx[i].into(), table.sy[i].into());
                    assert_eq!(
                        HexGeometry::distance(origin, pos) as usize,
                        radius,
                        "ring offset {} from {} is {}",
                        i,
                        origin,
                        pos
                    );
                }
            }
        }
    }

    #[test]
    fn test_spiral_matches_ring_offsets() {
        let offsets = HexGeometry::build_ring_offsets();
        for origin in [TilePos::new(10, 10), TilePos::new(11, 10)] {
            let table = offsets.table(origin.is_odd_column());
            for index in 1..HexGeometry::hexes_in_radius(6) {
                let i = (index - 1) as usize;
                let mut pos = origin;
                HexGeometry::move_around_away_unchecked(&mut pos, index);
                assert_eq!(
                    pos,
                    origin
                        + TilePos::new(table.sx[i].into(), table.sy[i].into())
                );
            }
        }
    }
}
