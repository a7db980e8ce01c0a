// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Column Parity Mixer CLI
//!
//! Loads a mixer description and reports its algebraic properties.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use column_parity_mixer::utils::{format_vector, print_matrix};
use column_parity_mixer::{load_config, load_state, Cpm, MixerConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cpm")]
#[command(version, about = "Analyse column parity mixers over GF(2)", long_about = None)]
struct Cli {
    /// Mixer description (YAML)
    #[arg(short, long, global = true, default_value = "mixer.yaml")]
    config: PathBuf,

    /// Override order.max_iterations from the config
    #[arg(long, global = true)]
    max_iterations: Option<u64>,

    /// Use the baby-step/giant-step order search
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    squaring: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summary: shape, invertibility, involution, order
    Info,
    /// Mix a state and show parity, effect and affected columns
    Apply {
        /// State matrix (YAML list of rows)
        #[arg(long)]
        state: PathBuf,
    },
    /// Print the folding matrix of the inverse mixer
    Inverse,
    /// Print the order under composition
    Order,
    /// Print the folding matrix of the k-th power
    Power { k: u64 },
    /// Print the folding matrix of this mixer followed by another
    Compose {
        /// Second mixer description
        #[arg(long)]
        other: PathBuf,
    },
}

impl Cli {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn load(&self) -> Result<MixerConfig> {
        let mut config = load_config(&self.config)
            .with_context(|| format!("Could not load mixer from {}", self.config.display()))?;
        if let Some(max) = self.max_iterations {
            config.order.max_iterations = max;
        }
        if self.squaring {
            config.order.use_squaring = true;
        }
        config.order.validate()?;
        Ok(config)
    }
}

fn setup_tracing(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("column_parity_mixer={level},cpm={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.log_level());

    let config = cli.load()?;
    let theta = config.mixer()?;
    info!("Loaded {} from {}", theta, cli.config.display());

    match &cli.command {
        Commands::Info => info_command(&theta, &config)?,
        Commands::Apply { state } => {
            let state = load_state(state)?;
            print_matrix("State A", &state);
            println!("Column parity: {}", format_vector(&theta.parity(&state)?));
            println!("Effect: {}", format_vector(&theta.effect(&state)?));
            println!("Affected columns: {:?}", theta.affected_columns(&state)?);
            println!("Unaffected columns: {:?}", theta.unaffected_columns(&state)?);
            print_matrix("Mixed state", &theta.apply(&state)?);
        }
        Commands::Inverse => {
            let inverse = theta.inverse()?;
            print_matrix("Inverse folding matrix", inverse.parity_folding_matrix());
        }
        Commands::Order => println!("{}", theta.order_with(&config.order)?),
        Commands::Power { k } => {
            let power = theta.power(*k)?;
            print_matrix(&format!("Folding matrix of theta^{k}"), power.parity_folding_matrix());
        }
        Commands::Compose { other } => {
            let gamma = load_config(other)
                .with_context(|| format!("Could not load mixer from {}", other.display()))?
                .mixer()?;
            let composed = theta.compose(&gamma)?;
            print_matrix("Composed folding matrix", composed.parity_folding_matrix());
        }
    }

    Ok(())
}

fn info_command(theta: &Cpm, config: &MixerConfig) -> Result<()> {
    println!("{}", theta);
    print_matrix("Parity folding matrix Z", theta.parity_folding_matrix());
    print_matrix("Associated matrix Z + I", &theta.associated_matrix());

    let invertible = theta.is_invertible()?;
    println!("Invertible: {}", invertible);
    println!("Involution: {}", theta.is_involution()?);
    if invertible {
        println!("Order: {}", theta.order_with(&config.order)?);
    } else {
        println!("Order: none (not invertible)");
    }
    Ok(())
}
