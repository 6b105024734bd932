mod autopilot;
mod config;
mod session;

use std::path::PathBuf;

use clap::Parser;
use snake_duel_engine::config::Validate;
use snake_duel_engine::{Difficulty, SimulationEngine, log, logger};

use config::{DEFAULT_CONFIG_FILE_NAME, get_config_manager};
use session::run_session;

#[derive(Parser)]
#[command(name = "snake_duel", about = "Headless player-vs-AI snake duel")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    difficulty: Option<u8>,

    #[arg(long)]
    max_ticks: Option<u64>,

    /// Run ticks back to back instead of at game speed.
    #[arg(long)]
    fast: bool,

    /// Write the effective config to --config and exit.
    #[arg(long)]
    write_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Duel".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;

    if let Some(seed) = args.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(level) = args.difficulty {
        config.engine.difficulty = Difficulty::new(level)?;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = max_ticks;
    }
    if args.fast {
        config.realtime = false;
    }
    config.validate()?;

    if args.write_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", args.config.display());
        return Ok(());
    }

    let engine = SimulationEngine::new(config.engine.clone())?;
    let pilot_seed = config.engine.seed.map_or(0, |seed| seed.wrapping_add(1));

    let final_state = run_session(engine, &config, pilot_seed).await;
    println!("{}", serde_yaml_ng::to_string(&final_state)?);

    Ok(())
}
