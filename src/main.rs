use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meeting_rota::display::{print_duty_counts, print_rota, write_schedule_json, write_schedule_to_file};
use meeting_rota::{generate, RotaConfig};

#[derive(Parser)]
#[command(name = "meeting-rota")]
#[command(about = "Build a fair rota for sound, mics, platform and attendant duties")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long, short, env = "ROTA_CONFIG")]
    config: Option<PathBuf>,

    /// First day to schedule from (in the configured date format)
    #[arg(long)]
    start: Option<String>,

    /// Day to schedule up to (in the configured date format)
    #[arg(long)]
    end: Option<String>,

    /// Roles CSV: one row per category followed by names
    #[arg(long)]
    roles: Option<PathBuf>,

    /// Meeting parts CSV: one row per date label followed by names
    #[arg(long)]
    parts: Option<PathBuf>,

    /// CSV with a `name` column listing who served at the last meeting
    #[arg(long)]
    last_meeting: Option<PathBuf>,

    /// Where to write the schedule CSV
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also write the schedule as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Random seed for a reproducible rota
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Skip printing the rota to the terminal
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<RotaConfig> {
        let mut config = match &self.config {
            Some(path) => RotaConfig::from_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => RotaConfig::default(),
        };

        if let Some(start) = self.start {
            config.start_date = start;
        }
        if let Some(end) = self.end {
            config.end_date = end;
        }
        if let Some(roles) = self.roles {
            config.roles_file = roles;
        }
        if let Some(parts) = self.parts {
            config.parts_file = parts;
        }
        if let Some(last_meeting) = self.last_meeting {
            config.last_meeting_file = last_meeting;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.json.is_some() {
            config.json_output = self.json;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let quiet = cli.quiet;
    let config = cli.into_config()?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    info!(start = %config.start_date, end = %config.end_date, "Building rota");
    let schedule = generate(&config, &mut rng).map_err(|err| {
        let message = if err.is_config_error() {
            "Invalid rota configuration"
        } else {
            "Failed to build rota"
        };
        anyhow::Error::new(err).context(message)
    })?;

    if !quiet {
        print_rota(&schedule);
        print_duty_counts(&schedule);
    }

    write_schedule_to_file(&schedule, &config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    info!(path = %config.output.display(), meetings = schedule.len(), "Schedule written");

    if let Some(json) = &config.json_output {
        write_schedule_json(&schedule, json).with_context(|| format!("Failed to write {}", json.display()))?;
        info!(path = %json.display(), "JSON schedule written");
    }

    Ok(())
}
