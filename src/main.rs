mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use rep_sentinel::replay::FrameReader;
use rep_sentinel::{Config, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_default().context("failed to load default config")?,
    };

    match cli.command {
        Commands::Replay { input, only } => run_replay(&config, input.as_deref(), &only),
        Commands::Movements => {
            run_movements(&config);
            Ok(())
        }
        Commands::Init { path, force } => run_init(path, force),
    }
}

fn open_input(input: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match input {
        None => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) if path == Path::new("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

fn run_replay(config: &Config, input: Option<&Path>, only: &[String]) -> Result<()> {
    let mut session = Session::new(config)?;

    if !only.is_empty() {
        if let Some(name) = only.iter().find(|name| config.movement(name).is_none()) {
            anyhow::bail!("unknown movement '{}'", name);
        }
        for movement in &config.movements {
            session.set_tracking(&movement.name, only.contains(&movement.name))?;
        }
    }

    for frame in FrameReader::new(open_input(input)?) {
        let landmarks = frame?;
        for event in session.process_frame(&landmarks) {
            info!(movement = %event.movement, count = event.count, frame = event.frame, "rep");
        }

        for counter in session.counters().iter().filter(|c| c.config().debug && c.tracking_enabled()) {
            let angles: Vec<String> = counter
                .readouts()
                .map(|r| match r.degrees {
                    Some(deg) => format!("{}:{:.0}", r.vertex, deg),
                    None => format!("{}:-", r.vertex),
                })
                .collect();
            debug!(movement = counter.name(), frame = session.frames_processed(), angles = %angles.join(" "));
        }
    }

    println!("frames: {}", session.frames_processed());
    for counter in session.counters().iter().filter(|c| c.tracking_enabled()) {
        println!("{}: {}", counter.name(), counter.count());
    }
    Ok(())
}

fn run_movements(config: &Config) {
    for movement in &config.movements {
        let state = if movement.enabled { "enabled" } else { "disabled" };
        println!(
            "{} ({}, {} angles, {} positions, visibility {:?})",
            movement.name,
            state,
            movement.angles.len(),
            movement.positions.len(),
            movement.visibility
        );
    }
}

fn run_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(Config::default_path);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default().save(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}
