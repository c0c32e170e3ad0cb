use crate::{
    config::GeometrySettings,
    geometry::{
        angle::normalize_bearing,
        ring::{RingOffsets, MAX_RING_RADIUS},
        unit::{MapPos, MapSize, PixelOffset, TilePos},
        GridGeometry, MapGeometry,
    },
    timed,
};
use anyhow::Context;
use log::debug;
use std::{cell::OnceCell, marker::PhantomData};
use validator::Validate;

/// The stateful half of the geometry system. Owns the pixel settings and a
/// lazily built ring offset table. The table is built on first use and then
/// shared by every lookup on this engine.
///
/// The engine is not `Sync`: the lazy table has no locking, so share an
/// engine between threads only by giving each thread its own.
#[derive(Clone, Debug)]
pub struct GeometryEngine<G: GridGeometry = MapGeometry> {
    settings: GeometrySettings,
    ring_offsets: OnceCell<RingOffsets>,
    geometry: PhantomData<G>,
}

impl<G: GridGeometry> GeometryEngine<G> {
    /// Create a new engine. Returns an error if the settings are invalid.
    /// The ring table is not built here, see [Self::ring_offsets].
    pub fn new(settings: GeometrySettings) -> anyhow::Result<Self> {
        debug!(
            "Creating {} geometry engine with settings {:?}",
            G::MODE,
            settings
        );
        settings.validate().context("invalid geometry settings")?;
        Ok(Self {
            settings,
            ring_offsets: OnceCell::new(),
            geometry: PhantomData,
        })
    }

    pub fn settings(&self) -> &GeometrySettings {
        &self.settings
    }

    /// Replace the pixel settings. If the new settings are invalid, this
    /// returns an error and the current settings are kept. Ring offsets
    /// don't depend on settings, so the table survives.
    pub fn set_settings(
        &mut self,
        settings: GeometrySettings,
    ) -> anyhow::Result<()> {
        settings.validate().context("invalid geometry settings")?;
        debug!("Updating geometry settings to {:?}", settings);
        self.settings = settings;
        Ok(())
    }

    /// Get the ring offset table, building it if this is the first access
    pub fn ring_offsets(&self) -> &RingOffsets {
        self.ring_offsets.get_or_init(|| {
            timed!("Ring offset table construction", G::build_ring_offsets())
        })
    }

    /// Get the `(sx, sy)` offset arrays to use for tiles around `origin`.
    /// Entry `i` of both arrays together make up one offset.
    pub fn hex_offsets(&self, origin: MapPos) -> (&[i16], &[i16]) {
        let table = self.ring_offsets().table(origin.is_odd_column());
        (&table.sx, &table.sy)
    }

    /// Iterate over every tile within `radius` steps of `origin` (excluding
    /// the origin itself), nearest ring first. Tiles that fall off the map
    /// are skipped. The radius is capped at [MAX_RING_RADIUS].
    pub fn tiles_around(
        &self,
        origin: MapPos,
        radius: usize,
        size: MapSize,
    ) -> impl Iterator<Item = MapPos> + '_ {
        let radius = radius.min(MAX_RING_RADIUS);
        let range = self.ring_offsets().radius_range(radius);
        let (sx, sy) = self.hex_offsets(origin);
        let origin = TilePos::from(origin);
        sx[range.clone()]
            .iter()
            .zip(&sy[range])
            .filter_map(move |(&dx, &dy)| {
                size.to_map_pos(origin + TilePos::new(dx.into(), dy.into()))
            })
    }

    /// Pixel displacement between two tiles, using this engine's settings
    pub fn hex_interval(&self, from: TilePos, to: TilePos) -> PixelOffset {
        G::hex_interval(from, to, &self.settings)
    }

    /// Pixel position of a tile relative to tile `(0, 0)`
    pub fn hex_pos(&self, pos: TilePos) -> PixelOffset {
        G::hex_pos(pos, &self.settings)
    }

    /// Find the tile under a pixel, plus the offset within that tile
    pub fn hex_pos_coord(&self, pixel: PixelOffset) -> (TilePos, PixelOffset) {
        G::hex_pos_coord(pixel, &self.settings)
    }

    /// Every on-map tile in the screen rectangle spanned by two tiles. See
    /// [GridGeometry::axial_hexes].
    pub fn axial_hexes(
        &self,
        from: MapPos,
        to: MapPos,
        size: MapSize,
    ) -> Vec<MapPos> {
        G::axial_hexes(from, to, size, &self.settings)
    }

    /// Screen-axis coordinate of a tile: its pixel position measured in
    /// half-tile columns and rows. Neighboring tiles differ by small whole
    /// steps on both axes, which makes this handy for screen-space sorting.
    pub fn hex_axial_coord(&self, pos: TilePos) -> TilePos {
        let half_w = self.settings.map_hex_width / 2;
        let h = self.settings.map_hex_line_height;
        let pixel = self.hex_pos(pos);
        debug_assert!(
            pixel.x % half_w == 0 && pixel.y % h == 0,
            "tile {} at {} is off the half-tile grid",
            pos,
            pixel
        );
        TilePos::new(pixel.x / half_w, pixel.y / h)
    }

    /// Vertical projection factor for the camera tilt. Screen-space vertical
    /// distances get multiplied by this to recover ground distances.
    pub fn y_proj(&self) -> f32 {
        1.0 / self.settings.map_camera_angle.to_radians().sin()
    }

    /// The on-screen facing angle of a line between two pixel positions,
    /// corrected for camera tilt. `0` points up, angles increase clockwise.
    /// Output is in `[0, 360)`.
    pub fn line_dir_angle(&self, from: PixelOffset, to: PixelOffset) -> f32 {
        let dx = (to.x - from.x) as f32;
        let dy = (to.y - from.y) as f32 * self.y_proj();
        normalize_bearing(90.0 + dy.atan2(dx).to_degrees())
    }
}
