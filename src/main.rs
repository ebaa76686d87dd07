/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::info;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

/* Custom libraries */
use config::RenderMode;
use simulation::{FrameScheduler, Simulation};

/* Modules */
mod config;
mod elevator;
mod error;
mod render;
mod shared;
mod simulation;

/// Animates a bank of elevators travelling between randomly chosen floors.
/// Press enter to pause or resume.
#[derive(Parser, Debug)]
#[clap(name = "elevator-bank", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Stop after this many simulated ticks
    #[clap(short, long)]
    ticks: Option<u64>,

    /// Seed for the random source
    #[clap(long)]
    seed: Option<u64>,

    /// Renderer to use: text, json or none
    #[clap(short, long)]
    render: Option<RenderMode>,

    /// Start with the simulation paused
    #[clap(long)]
    paused: bool,
}

impl Args {
    fn apply(&self, config: &mut config::Config) {
        if let Some(ticks) = self.ticks {
            config.scheduler.max_ticks = Some(ticks);
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(mode) = self.render {
            config.render.mode = mode;
        }
        if self.paused {
            config.scheduler.start_paused = true;
        }
    }
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = unwrap_or_exit!(config::load_config(&args.config));
    args.apply(&mut config);
    info!(
        "Loaded configuration from {}: {} elevators, {} floors",
        args.config.display(),
        config.elevators.len(),
        config.simulation.n_floors
    );

    // Initialize channels
    let (pause_tx, pause_rx) = cbc::unbounded::<()>();
    let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the pause input
    let _pause_input = unwrap_or_exit!(simulation::scheduler::spawn_pause_input(
        BufReader::new(std::io::stdin()),
        pause_tx
    ));

    // Run the simulation on this thread until the tick limit is reached
    let simulation = Simulation::from_config(&config, Instant::now());
    if simulation.is_paused() {
        info!("Starting paused, press enter to resume");
    }
    let renderer = render::build_renderer(&config);
    let scheduler = FrameScheduler::new(
        &config.scheduler,
        &config.render,
        simulation,
        renderer,
        pause_rx,
        terminate_rx,
    );

    let simulation = unwrap_or_exit!(scheduler.run());
    info!("Finished with {} elevators", simulation.elevators().len());
}
