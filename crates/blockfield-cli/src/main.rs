//! Headless driver for a blockfield scene.
//!
//! Builds a scene from a JSON config (or the defaults), plays an input
//! script against it, and prints a JSON report. Logs go to stderr and follow
//! `RUST_LOG`; `RUST_LOG=blockfield_core=debug` shows every resolved contact.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blockfield_core::simulation::{RunSummary, SceneSnapshot};
use blockfield_core::{
    Boxed, InputSource, InputState, ResolverStrategy, SceneConfig, ScriptedInput, Simulation,
    YProbe,
};
use clap::{Parser, ValueEnum};
use glam::Vec3;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a blockfield collision scene headlessly")]
struct Args {
    /// Scene config (JSON). Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the obstacle placement seed
    #[arg(long)]
    seed: Option<u64>,
    /// Override the number of obstacles
    #[arg(long)]
    obstacles: Option<usize>,
    /// Override the resolver implementation
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,
    /// Probe -Y by walking toward +Y, as legacy scenes did
    #[arg(long)]
    mirrored_y: bool,
    /// Input script, e.g. "forward*40, forward+left*20, none*5"
    #[arg(long)]
    script: Option<String>,
    /// Ticks to run. Defaults to the script length, or 100 holding forward.
    #[arg(long)]
    ticks: Option<u64>,
    /// Include the final scene snapshot in the report
    #[arg(long)]
    snapshot: bool,
    /// Print the effective config and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    Probe,
    Analytic,
}

impl From<Strategy> for ResolverStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Probe => Self::Probe,
            Strategy::Analytic => Self::Analytic,
        }
    }
}

#[derive(Serialize)]
struct Report {
    resolver: &'static str,
    summary: RunSummary,
    final_position: Vec3,
    overlapping: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<SceneSnapshot>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut sim = Simulation::new(&config).context("invalid scene config")?;

    let (ticks, mut input): (u64, Box<dyn InputSource>) = match &args.script {
        Some(text) => {
            let script: ScriptedInput = text
                .parse()
                .with_context(|| format!("parse input script {text:?}"))?;
            (args.ticks.unwrap_or_else(|| script.len()), Box::new(script))
        }
        None => (args.ticks.unwrap_or(100), Box::new(InputState::FORWARD)),
    };

    info!(ticks, resolver = sim.resolver().name(), "running scene");
    let summary = sim
        .run(ticks, input.as_mut())
        .with_context(|| format!("tick {} failed", sim.tick_count()))?;

    let overlapping = sim.registry().overlapping_ids(&sim.entity().bounds()).len();
    if overlapping > 0 {
        warn!(overlapping, "entity ends the run overlapping obstacles");
    }

    let report = Report {
        resolver: sim.resolver().name(),
        summary,
        final_position: sim.entity_position(),
        overlapping,
        snapshot: args.snapshot.then(|| sim.snapshot()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => SceneConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(count) = args.obstacles {
        config.obstacle_count = count;
    }
    if let Some(strategy) = args.strategy {
        config.resolver.strategy = strategy.into();
    }
    if args.mirrored_y {
        config.resolver.y_probe = YProbe::Mirrored;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "blockfield",
            "--seed",
            "3",
            "--strategy",
            "analytic",
            "--mirrored-y",
            "--script",
            "forward*2",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.resolver.strategy, ResolverStrategy::Analytic);
        assert_eq!(config.resolver.y_probe, YProbe::Mirrored);
        assert_eq!(args.script.as_deref(), Some("forward*2"));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = Args::try_parse_from(["blockfield", "--config", "/nonexistent/scene.json"])
            .unwrap();
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }
}
