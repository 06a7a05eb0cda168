// Apiary Gen - Dataset generator CLI
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Apiary Gen
//!
//! Regenerates the beehive readings and topology files.
//!
//! ## Usage
//!
//! ```bash
//! # 30 days ending now, files in the current directory
//! apiary-gen
//!
//! # Reproducible run with a CSV copy
//! apiary-gen --seed 42 --end 2024-07-01T00:00:00 --csv beehive_data.csv
//! ```

use apiary::{generate_dataset, write_outputs, GeneratorConfig, OutputPaths, Topology};
use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

/// Apiary dataset generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory for the output files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Readings file name
    #[arg(long, default_value = apiary::output::READINGS_FILE)]
    readings_file: String,

    /// Topology file name
    #[arg(long, default_value = apiary::output::TOPOLOGY_FILE)]
    topology_file: String,

    /// Also export readings as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Window length in days
    #[arg(short, long, default_value = "30")]
    days: u32,

    /// Fixed window end (YYYY-MM-DDTHH:MM:SS), defaults to now
    #[arg(long, value_parser = parse_end)]
    end: Option<NaiveDateTime>,

    /// Random seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new().with_days(self.days);
        if let Some(end) = self.end {
            config = config.with_end(end);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            readings: self.output_dir.join(&self.readings_file),
            topology: self.output_dir.join(&self.topology_file),
            csv: self.csv.clone(),
        }
    }
}

fn parse_end(s: &str) -> Result<NaiveDateTime, String> {
    s.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("invalid datetime '{}': {}", s, e))
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: &Args) -> apiary::Result<()> {
    let topology = Topology::fleet();
    topology.validate()?;

    let config = args.generator_config();
    info!("Generating beehive data ({} days)", config.days);
    let dataset = generate_dataset(&config, &topology)?;

    for hive in dataset.summary() {
        debug!(
            hive_id = %hive.hive_id,
            total_kg = hive.total_production,
            mean_temperature = hive.mean_temperature,
            mean_activity = hive.mean_activity,
            "Hive summary"
        );
    }

    let paths = args.output_paths();
    write_outputs(&dataset, &topology, &paths)?;

    println!(
        "Generated {} data points for {} hives",
        dataset.len(),
        topology.len()
    );
    println!("Data saved to '{}'", paths.readings.display());
    println!("Configuration saved to '{}'", paths.topology.display());
    if let Some(csv) = &paths.csv {
        println!("CSV saved to '{}'", csv.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    info!("Apiary Gen v{}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
