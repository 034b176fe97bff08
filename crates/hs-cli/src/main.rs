//! Headless driver for the Homestead farm simulation.

mod commands;
mod generator;
mod input;
mod render;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::input::ScriptedInput;

#[derive(Parser)]
#[command(
    name = "homestead",
    about = "Homestead: a tick-based farm world simulation",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a meadow and run the simulation headlessly
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,

        /// RNG seed for map generation and spread decisions
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Simulated seconds per tick
        #[arg(long, default_value = "1.0")]
        dt: f64,

        /// Map width in tiles
        #[arg(long, default_value = "24")]
        width: usize,

        /// Map height in tiles
        #[arg(long, default_value = "12")]
        height: usize,

        /// Scripted input as TICK:ACTION (e.g. 3:interact, 5:plant=potato_planted)
        #[arg(short, long = "input", value_parser = input::parse_input)]
        inputs: Vec<ScriptedInput>,

        /// Print the final map as ASCII
        #[arg(short, long)]
        map: bool,

        /// Print a machine-readable JSON summary instead of tables
        #[arg(long)]
        json: bool,

        /// Show the outcome log and debug-level tracing
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the standard tile transition table
    Rules,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            ticks,
            seed,
            dt,
            width,
            height,
            inputs,
            map,
            json,
            verbose,
        } => {
            init_tracing(verbose);
            commands::simulate::run(&commands::simulate::SimulateArgs {
                ticks,
                seed,
                dt,
                width,
                height,
                inputs,
                map,
                json,
                verbose,
            })
        }
        Commands::Rules => {
            init_tracing(false);
            commands::rules::run()
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
