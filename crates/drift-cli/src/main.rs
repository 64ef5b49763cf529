//! # Drift simulation runner
//!
//! Run a preset or a JSON-configured drift scenario and export the results.
//!
//! ## Usage
//!
//! ```bash
//! # Ten electrons drifting from just below the argon chamber's cathode
//! cargo run --bin drift-cli -- run --preset argon_cathode_drift
//!
//! # 150 xenon tracks over 4 workers, histogram written as CSV
//! cargo run --bin drift-cli -- run --preset xenon_track_drift --threads 4 \
//!     --histogram-csv xenon_speed.csv
//!
//! # Start a custom configuration from a preset
//! cargo run --bin drift-cli -- config --preset silicon_strip_signal > strip.json
//! cargo run --bin drift-cli -- run --config strip.json --physics silicon_strip_signal
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drift::physics::scenario_collaborators;
use drift::report::{
    self, write_histogram_csv, write_output_json, write_samples_csv, write_signal_csv,
    write_to_file,
};
use drift::{run_parallel, DriftError, EventLoop, RunConfig, RunOutput, Scenario};

#[derive(Parser, Debug)]
#[command(name = "drift-cli")]
#[command(about = "Monte Carlo drift of charge carriers: speed histograms and induced signals")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulation and report the results
    Run {
        /// JSON run configuration
        #[arg(long, short = 'c', conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Preset scenario (see `drift-cli presets`)
        #[arg(long, short = 'p')]
        preset: Option<String>,

        /// Detector model used to transport carriers; defaults to the preset's
        #[arg(long)]
        physics: Option<String>,

        /// Override the number of events
        #[arg(long, short = 'n')]
        events: Option<usize>,

        /// Fix the random seed
        #[arg(long, short = 's')]
        seed: Option<u64>,

        /// Split events over this many workers
        #[arg(long, short = 't')]
        threads: Option<usize>,

        /// Keep and export every recorded speed
        #[arg(long)]
        samples_csv: Option<PathBuf>,

        #[arg(long)]
        histogram_csv: Option<PathBuf>,

        #[arg(long)]
        signal_csv: Option<PathBuf>,

        /// Full run output as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print a preset's configuration as JSON
    Config {
        #[arg(long, short = 'p')]
        preset: String,
    },
    /// List the preset scenarios
    Presets,
}

fn scenario(name: &str) -> Result<Scenario, String> {
    Scenario::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Scenario::ALL.iter().map(|s| s.name()).collect();
        format!("unknown preset '{}', expected one of: {}", name, known.join(", "))
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Command::Run {
            config,
            preset,
            physics,
            events,
            seed,
            threads,
            samples_csv,
            histogram_csv,
            signal_csv,
            json,
        } => {
            let preset = preset.as_deref().map(scenario).transpose()?;
            let physics = match physics.as_deref() {
                Some(name) => scenario(name)?,
                None => preset.unwrap_or(Scenario::ArgonCathodeDrift),
            };

            let mut run_config = match (&config, preset) {
                (Some(path), _) => RunConfig::from_json_file(path)?,
                (None, Some(preset)) => preset.config(),
                (None, None) => return Err("either --config or --preset is required".into()),
            };
            if let Some(n) = events {
                run_config.n_events = n;
            }
            if let Some(seed) = seed {
                run_config.seed = Some(seed);
            }
            if let Some(threads) = threads {
                run_config.threads = Some(threads);
            }
            if samples_csv.is_some() {
                run_config.keep_samples = true;
            }

            log::info!("Transporting with the {} detector model", physics.name());
            let output = simulate(run_config, physics)?;

            println!("{}", report::summary(&output));

            if let Some(path) = histogram_csv {
                write_to_file(path, |w| write_histogram_csv(&output, w))?;
            }
            if let Some(path) = signal_csv {
                write_to_file(path, |w| write_signal_csv(&output, w))?;
            }
            if let Some(path) = samples_csv {
                write_to_file(path, |w| write_samples_csv(&output, w))?;
            }
            if let Some(path) = json {
                write_to_file(path, |w| write_output_json(&output, w))?;
            }
        }
        Command::Config { preset } => {
            println!("{}", scenario(&preset)?.config().to_json_string()?);
        }
        Command::Presets => {
            for s in Scenario::ALL {
                let config = s.config();
                println!("{:<24} {} events, {:?}", s.name(), config.n_events, config.mode);
            }
        }
    }

    Ok(())
}

/// Sequential unless a worker count was requested.
fn simulate(config: RunConfig, physics: Scenario) -> Result<RunOutput, DriftError> {
    if config.threads.is_some() {
        return Ok(run_parallel(config, |worker, seed| {
            scenario_collaborators(physics, seed, worker)
        })?);
    }

    let mut run = EventLoop::new(config)?;
    let (mut transport, mut tracks) = scenario_collaborators(physics, run.seed(), 0);
    run.run(&mut transport, &mut tracks);
    Ok(run.finish())
}
