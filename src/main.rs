//! warsim - resolve turns of a persistent siege simulation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::RngCore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warsim::flush::SimulationState;
use warsim::sim::{SimConfig, TracingSink, run_with, validate};
use warsim::{report, scenario};

/// Turn-based siege simulation
#[derive(Parser, Debug)]
#[command(name = "warsim", version, about = "Resolve turns of a persistent siege simulation")]
struct Args {
    /// Directory holding state.json and the per-step world snapshots
    #[arg(short, long, default_value = "state", global = true)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed a new simulation with the Siege of Thrane scenario
    Init {
        /// Simulation name, used to name world snapshot files
        #[arg(long, default_value = "Siege of Thrane")]
        name: String,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Run one or more turns and commit each as a new step
    Turn {
        /// Number of turns to run
        #[arg(short, long, default_value_t = 1)]
        turns: u32,

        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Stop early once a turn passes with no activity
        #[arg(long)]
        until_quiet: bool,

        /// Send an army somewhere before the first turn, as ARMY=DESTINATION
        #[arg(long = "order", value_parser = parse_order)]
        orders: Vec<(String, String)>,
    },

    /// Print settlements and armies per actor for the current step
    Status,
}

fn parse_order(s: &str) -> Result<(String, String), String> {
    let (army, destination) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ARMY=DESTINATION, got {s:?}"))?;
    let (army, destination) = (army.trim(), destination.trim());
    if army.is_empty() || destination.is_empty() {
        return Err(format!("expected ARMY=DESTINATION, got {s:?}"));
    }
    Ok((army.to_string(), destination.to_string()))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warsim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Init { name, force } => init(&args.state_dir, &name, force),
        Command::Turn {
            turns,
            seed,
            until_quiet,
            orders,
        } => turn(&args.state_dir, turns, seed, until_quiet, &orders),
        Command::Status => status(&args.state_dir),
    }
}

fn init(state_dir: &Path, name: &str, force: bool) -> Result<()> {
    let state_path = SimulationState::state_path(state_dir);
    if state_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            state_path.display()
        );
    }

    let world = scenario::siege_of_thrane();
    let state = SimulationState::new(name);
    state
        .save_current(state_dir, &world)
        .with_context(|| format!("failed to write state to {}", state_dir.display()))?;

    tracing::info!(
        name,
        settlements = world.settlements.len(),
        armies = world.armies.len(),
        "seeded new simulation"
    );
    Ok(())
}

fn turn(
    state_dir: &Path,
    turns: u32,
    seed: Option<u64>,
    until_quiet: bool,
    orders: &[(String, String)],
) -> Result<()> {
    let mut state = SimulationState::load(state_dir).with_context(|| {
        format!(
            "no simulation in {} (run `warsim init` first)",
            state_dir.display()
        )
    })?;
    let world_path = state.world_path(state_dir, state.step);
    let mut world = state
        .load_world(state_dir)
        .with_context(|| format!("failed to load world {}", world_path.display()))?;
    tracing::info!(path = %world_path.display(), step = state.step, "loaded world");

    validate(&world)?;

    for (army_name, destination) in orders {
        if !world.settlements.contains_key(destination) {
            bail!("no settlement named {destination}");
        }
        let Some(army) = world.armies.get_mut(army_name) else {
            bail!("no army named {army_name}");
        };
        if army.destroyed {
            bail!("army {army_name} has been destroyed");
        }
        tracing::info!(army = %army_name, %destination, "order issued");
        army.destination = destination.clone();
    }

    let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
    tracing::info!(seed, "rolling dice");
    let config = SimConfig::new(seed, turns)
        .stop_when_quiet(until_quiet)
        .flush_to(state_dir);

    // A failed turn leaves the last committed step untouched.
    let summary = run_with(&mut world, &config, &mut TracingSink, |world, outcome, events| {
        state.commit(state_dir, world)?;
        tracing::info!(
            turn_id = outcome.turn_id,
            step = state.step,
            events = events.len(),
            active = outcome.active(),
            "turn committed"
        );
        Ok(())
    })
    .with_context(|| format!("turn failed after step {}", state.step))?;

    tracing::info!(
        turns = summary.turns_run,
        last_turn = summary.last_turn,
        quiet = summary.quiescent,
        "run finished"
    );
    Ok(())
}

/// Print the per-actor world report for the current step.
fn status(state_dir: &Path) -> Result<()> {
    let state = SimulationState::load(state_dir).with_context(|| {
        format!(
            "no simulation in {} (run `warsim init` first)",
            state_dir.display()
        )
    })?;
    let world = state
        .load_world(state_dir)
        .with_context(|| format!("failed to load step {}", state.step))?;
    print!("{}", report::world_report(&world));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_order_splits_on_equals() {
        assert_eq!(
            parse_order("First Cog = Olath").unwrap(),
            ("First Cog".to_string(), "Olath".to_string())
        );
    }

    #[test]
    fn parse_order_rejects_missing_parts() {
        assert!(parse_order("First Cog").is_err());
        assert!(parse_order("=Olath").is_err());
        assert!(parse_order("First Cog=").is_err());
    }

    #[test]
    fn cli_parses_repeated_orders() {
        let args = Args::parse_from([
            "warsim",
            "turn",
            "--order",
            "First Cog=Olath",
            "--order",
            "The Hammer=Flamekeep",
            "--seed",
            "3",
        ]);
        let Command::Turn { orders, seed, .. } = args.command else {
            panic!("expected turn command");
        };
        assert_eq!(orders.len(), 2);
        assert_eq!(seed, Some(3));
    }

    #[test]
    fn cli_parses_status_with_state_dir() {
        let args = Args::parse_from(["warsim", "status", "--state-dir", "/tmp/siege"]);
        assert!(matches!(args.command, Command::Status));
        assert_eq!(args.state_dir, PathBuf::from("/tmp/siege"));
    }
}
