use std::path::Path;
use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use clap::Subcommand;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use voxel_search::algorithms::coords::CoordsSearch;
use voxel_search::context::Context;
use voxel_search::coords::Coords;
use voxel_search::finders::interior::Interior;
use voxel_search::finders::path_area::PathArea;
use voxel_search::node::VoxelNode;
use voxel_search::result::SearchStatus;
use voxel_search::settings::Settings;
use voxel_search::terrain::Cuboid;
use voxel_search::terrain::examiner::TerrainExaminer;
use voxel_search::terrain::grid::VoxelGrid;
use voxel_search::terrain::grid::VoxelScene;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = voxel_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Search radius around the start, in blocks
    #[arg(long, env = "VOXEL_SEARCH_RANGE", default_value_t = 64u32)]
    pub range: u32,
    /// Expansions allowed per search, 0 to disable the cap
    #[arg(long, env = "VOXEL_SEARCH_MAX_ITERATIONS", default_value_t = 10_000usize)]
    pub max_iterations: usize,
    /// How far down a step may fall
    #[arg(long, env = "VOXEL_SEARCH_MAX_DROP_HEIGHT", default_value_t = 3u32)]
    pub max_drop_height: u32,
    /// Coordinates name the surface block under the agent instead of its feet
    #[arg(long)]
    pub surface: bool,

    /// A level or filter directives, like `info` or `voxel_search::finders=debug`
    #[arg(long, env = "VOXEL_SEARCH_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Finds a path between the start and goal of a scene
    Path {
        /// A text scene, or a grayscale heightmap
        scene: PathBuf,
        #[arg(long)]
        start: Option<Coords>,
        #[arg(long)]
        goal: Option<Coords>,
        /// Examine every block of every column
        #[arg(long)]
        naive: bool,
        /// Print the memory used by the search
        #[arg(long)]
        stats: bool,
    },
    /// Lists the locations reachable from the start of a scene
    Area {
        scene: PathBuf,
        #[arg(long)]
        start: Option<Coords>,
    },
    /// Measures the air enclosed around a seed, inside the scene bounds
    Interior {
        scene: PathBuf,
        #[arg(long)]
        seed: Option<Coords>,
    },
}

/// Routes `log` records from the library through a `tracing` subscriber.
fn init_logging(directives: &str) -> std::io::Result<()> {
    let filter = EnvFilter::try_new(directives)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(std::io::Error::other)
}

fn load(p: &Path) -> std::io::Result<VoxelScene> {
    let is_image = p
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_image {
        let grid = VoxelGrid::try_from(p).map_err(std::io::Error::other)?;
        return Ok(VoxelScene {
            grid,
            start: None,
            goal: None,
        });
    }
    let s = std::fs::read_to_string(p)?;
    VoxelScene::try_from(s.as_str()).map_err(std::io::Error::other)
}

fn required(what: &str, c: Option<Coords>, p: &Path) -> std::io::Result<Coords> {
    c.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("No {what} in {}, pass one with --{what}", p.display()),
        )
    })
}

fn main() -> std::io::Result<()> {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();

    let args = Args::parse();
    args.color.write_global();
    init_logging(&args.log_level)?;

    let settings = Settings::new(
        args.range,
        args.max_iterations,
        args.max_drop_height,
        args.surface,
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    match args.command {
        Command::Path {
            scene: p,
            start,
            goal,
            naive,
            stats,
        } => {
            let scene = load(&p)?;
            let start = required("start", start.or(scene.start), &p)?;
            let goal = required("goal", goal.or(scene.goal), &p)?;
            let examiner = TerrainExaminer::for_settings(&scene.grid, &settings);
            let algorithm = if naive {
                CoordsSearch::without_column_pruning()
            } else {
                CoordsSearch::new()
            };

            let mut context = Context::new(
                algorithm,
                VoxelNode(start),
                VoxelNode(goal),
                &settings,
                &examiner,
            );
            let result = context.run();
            match result.status {
                SearchStatus::Resolved => println!("{}", result.green()),
                _ => println!("{}", result.red()),
            }
            println!(
                "{} iterations, {} nodes opened",
                result.iterations.yellow(),
                result.opened.yellow()
            );
            if stats {
                context.container().write_memory_stats(std::io::stdout())?;
            }
        }
        Command::Area { scene: p, start } => {
            let scene = load(&p)?;
            let start = required("start", start.or(scene.start), &p)?;
            let area = PathArea::find(&scene.grid, start, &settings);
            println!(
                "{} locations reachable from {}, {} rejected",
                area.len().green(),
                start,
                area.unreachable().len().red()
            );
            for at in area.sorted_reachable() {
                println!("  - {at}");
            }
        }
        Command::Interior { scene: p, seed } => {
            let scene = load(&p)?;
            let seed = required("seed", seed.or(scene.start), &p)?;
            let max = scene.grid.max();
            let bounds = Cuboid::new(scene.grid.min(), max.offset(-1, -1, -1));
            let interior = Interior::find(&scene.grid, &bounds, seed);
            println!(
                "{} blocks of air around {seed} inside {bounds}",
                interior.volume().green()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels_parse_as_filters() {
        assert!(EnvFilter::try_new("warn").is_ok());
        assert!(EnvFilter::try_new("info,voxel_search::finders=trace").is_ok());
        let err = init_logging("voxel_search=loudest").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
