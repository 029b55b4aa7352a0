mod commands;
mod config;
mod console;
mod population;

use std::io::BufRead;
use std::path::Path;

use config::ConsoleConfig;
use console::Console;
use mc_rs_selector::EntitySource;
use population::Population;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "console.toml".to_string());
    let config = match ConsoleConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("MC-RS selector console v{}", env!("CARGO_PKG_VERSION"));

    let population_path = Path::new(&config_path)
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&config.console.population);
    let population = match Population::load(&population_path, config.world.spawn_position()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", population_path.display());
            std::process::exit(1);
        }
    };
    let executor = config.console.executor.as_deref().and_then(|name| {
        let found = population.find_by_name(name);
        if found.is_none() {
            warn!("Executor {name} not found, selectors will run without one");
        }
        found
    });

    let rng = match config.console.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut console = Console::new(population, executor, rng, config.console.output);
    info!(
        "Loaded {} players ({} online) and {} objectives from {}",
        console.population().players().len(),
        console.population().entities().len(),
        console.population().objective_count(),
        population_path.display()
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("Failed to read stdin: {e}");
                break;
            }
        };
        let Some(result) = console.run_line(&line) else {
            continue;
        };
        for message in &result.messages {
            if result.success {
                println!("{message}");
            } else {
                eprintln!("{message}");
            }
        }
        if result.should_stop {
            break;
        }
    }
    info!("Console closed");
}
