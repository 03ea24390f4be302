use anyhow::Result;
use clap::Parser;
use ngol_lib::core::{init_logging, BufferMode, Simulation, SimulationConfig, ThresholdPreset};
use ngol_lib::render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless NGOL runner", long_about = None)]
struct Args {
    /// Config file path (TOML). Defaults apply when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Number of generations to run
    #[arg(short, long, default_value_t = 100)]
    steps: u64,

    /// RNG seed, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Threshold preset, overrides the config (e.g. game_of_life, stable_land)
    #[arg(short, long)]
    preset: Option<ThresholdPreset>,

    /// Grid width, overrides the config
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, overrides the config
    #[arg(long)]
    height: Option<usize>,

    /// Keep the previous generation for custom rules (three buffers)
    #[arg(long)]
    lookback: bool,

    /// Print the final grid as ASCII, at most this many columns wide
    #[arg(long)]
    print: Option<usize>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(preset) = args.preset {
        config.thresholds.preset = Some(preset);
    }
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(height) = args.height {
        config.grid.height = height;
    }
    if args.lookback {
        config.grid.buffering = BufferMode::Lookback;
    }

    let mut sim = Simulation::from_config(&config)?;
    sim.randomize(config.init.red, config.init.green, config.init.blue);

    let initial = sim.stats();
    tracing::info!(live_cells = initial.live_cells, "Seeded grid");

    sim.step_n(args.steps)?;

    let stats = sim.stats();
    println!(
        "generation {}: {}/{} live cells, mean rgb ({:.4}, {:.4}, {:.4}), elapsed {:?}",
        sim.generation(),
        stats.live_cells,
        stats.total_cells,
        stats.mean.r,
        stats.mean.g,
        stats.mean.b,
        sim.metrics().elapsed()
    );
    println!("digest {}", sim.current_grid().digest());

    if let Some(cols) = args.print {
        print!("{}", render::ascii(sim.current_grid(), cols));
    }
    Ok(())
}
