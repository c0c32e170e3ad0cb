use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use serde_json::{json, Value};
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use tilegrid::{
    collect_block_lines, timed, GeometryEngine, GeometryMode,
    GeometrySettings, GridGeometry, HexGeometry, MapGeometry, MapPos, MapSize,
    PixelOffset, SquareGeometry, TilePos,
};

/// CLI for running tile geometry queries against hexagonal or square maps.
#[derive(Debug, StructOpt)]
#[structopt(name = "tilegrid")]
struct Opt {
    /// The tile geometry to use: hex or square. Defaults to the geometry
    /// this binary was built for
    #[structopt(short, long)]
    mode: Option<GeometryMode>,

    /// Path to a config file that defines pixel geometry settings. Supported
    /// formats: JSON, TOML. Any omitted settings use their defaults
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Map width, in tiles. Used by commands that stay on the map
    #[structopt(long, default_value = "100")]
    width: u16,

    /// Map height, in tiles. Used by commands that stay on the map
    #[structopt(long, default_value = "100")]
    height: u16,

    /// The format to print results in. Supported formats: text, json
    #[structopt(short = "f", long, default_value = "text")]
    format: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Get the number of steps between two tiles
    Dist { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// Get the direction and facing angle from one tile to another
    Dir { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// Walk from a tile in a sequence of directions, staying on the map.
    /// Steps that would leave the map are dropped
    Step { x: u16, y: u16, dirs: Vec<u8> },

    /// List every tile within some number of steps of a tile, nearest first
    Ring { x: u16, y: u16, radius: usize },

    /// List the tiles covered by a block line path, given as alternating
    /// direction and step count values
    Lines { x: u16, y: u16, lines: Vec<u8> },

    /// List the tiles in the screen rectangle spanned by two tiles
    Area { x1: u16, y1: u16, x2: u16, y2: u16 },

    /// Get the pixel displacement between two tiles
    Interval { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// Find the tile under a pixel position
    Pick { px: i32, py: i32 },
}

/// Different ways to print command results.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    /// One `key: value` line per result field
    Text,
    /// Pretty-printed JSON object
    Json,
}

fn load_config(config_path: &Path) -> anyhow::Result<GeometrySettings> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

fn tile(x: i32, y: i32) -> TilePos {
    TilePos::new(x, y)
}

/// Run a single command under a specific geometry. Results come back as a
/// JSON object so every command can share the same output handling.
fn run_command<G: GridGeometry>(
    command: &Command,
    settings: GeometrySettings,
    size: MapSize,
) -> anyhow::Result<Value> {
    let engine = GeometryEngine::<G>::new(settings)?;
    let check_on_map = |x: u16, y: u16| -> anyhow::Result<MapPos> {
        let pos = MapPos::new(x, y);
        if !size.is_valid_pos(pos.into()) {
            bail!("tile {} is outside the {} map", pos, size);
        }
        Ok(pos)
    };

    let value = match *command {
        Command::Dist { x1, y1, x2, y2 } => {
            json!({ "distance": G::distance(tile(x1, y1), tile(x2, y2)) })
        }
        Command::Dir { x1, y1, x2, y2 } => {
            let (from, to) = (tile(x1, y1), tile(x2, y2));
            json!({
                "near_dir": G::near_dir(from, to),
                "far_dir": G::far_dir(from, to),
                "dir_angle": G::dir_angle(from, to),
            })
        }
        Command::Step { x, y, ref dirs } => {
            let mut pos = check_on_map(x, y)?;
            let mut dropped = 0;
            for &dir in dirs {
                if !G::is_valid_dir(dir) {
                    bail!(
                        "invalid direction {}, {} geometry has {} directions",
                        dir,
                        G::MODE,
                        G::DIR_COUNT
                    );
                }
                if !G::move_by_dir(&mut pos, dir, size) {
                    dropped += 1;
                }
            }
            json!({ "pos": pos, "dropped_steps": dropped })
        }
        Command::Ring { x, y, radius } => {
            let origin = check_on_map(x, y)?;
            let tiles: Vec<MapPos> =
                engine.tiles_around(origin, radius, size).collect();
            json!({ "count": tiles.len(), "tiles": tiles })
        }
        Command::Lines { x, y, ref lines } => {
            let origin = check_on_map(x, y)?;
            let tiles: Vec<MapPos> =
                collect_block_lines::<G>(lines, origin, size)
                    .into_iter()
                    .collect();
            json!({ "count": tiles.len(), "tiles": tiles })
        }
        Command::Area { x1, y1, x2, y2 } => {
            let from = check_on_map(x1, y1)?;
            let to = check_on_map(x2, y2)?;
            let tiles = engine.axial_hexes(from, to, size);
            json!({ "count": tiles.len(), "tiles": tiles })
        }
        Command::Interval { x1, y1, x2, y2 } => {
            let interval = engine.hex_interval(tile(x1, y1), tile(x2, y2));
            json!({ "interval": interval })
        }
        Command::Pick { px, py } => {
            let (pos, offset) = engine.hex_pos_coord(PixelOffset::new(px, py));
            json!({
                "tile": pos,
                "offset": offset,
                "axial": engine.hex_axial_coord(pos),
            })
        }
    };
    Ok(value)
}

fn print_output(value: &Value, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Text => {
            let fields = value
                .as_object()
                .ok_or_else(|| anyhow!("expected an object, got {}", value))?;
            for (key, field) in fields {
                println!("{}: {}", key, field);
            }
        }
    }
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let settings = match &opt.config {
        Some(config_path) => {
            let settings = load_config(config_path)?;
            info!("Loaded settings from {:?}", config_path);
            settings
        }
        None => GeometrySettings::default(),
    };
    let size = MapSize::new(opt.width, opt.height);
    let mode = opt.mode.unwrap_or(MapGeometry::MODE);

    let value = timed!(format!("{} query", mode), log::Level::Info, {
        match mode {
            GeometryMode::Hex => {
                run_command::<HexGeometry>(&opt.command, settings, size)
            }
            GeometryMode::Square => {
                run_command::<SquareGeometry>(&opt.command, settings, size)
            }
        }
    })?;
    print_output(&value, opt.format)
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
