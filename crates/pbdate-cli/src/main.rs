mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pbdate",
    version,
    about = "Extract radionuclide activities from gamma reports and date sediment cores with excess Pb-210"
)]
struct Cli {
    /// JSON config overriding dating constants and report layout
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract Pb-210/Bi-214/Pb-214 activities from a directory of PDF reports
    Extract {
        /// Directory containing the PDF reports
        input_dir: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the measurements to a CSV file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Coerce isotope columns to numbers, blanking unparseable cells
        #[arg(long)]
        coerce_numeric: bool,
    },
    /// Join sample weights with measurements and compute the dated core profile
    Profile {
        /// Sample weights table (CSV or XLSX)
        #[arg(short, long, value_name = "FILE")]
        weights: PathBuf,

        /// Measurements CSV produced by `extract`
        #[arg(short, long, value_name = "FILE")]
        measurements: PathBuf,

        /// Output CSV path
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,

        /// Year the core was collected
        #[arg(short = 'y', long)]
        core_year: i32,
    },
    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_dir,
            output,
            out,
            coerce_numeric,
        } => commands::extract::run(input_dir, cli.config, &output, out, coerce_numeric),
        Commands::Profile {
            weights,
            measurements,
            out,
            core_year,
        } => commands::profile::run(weights, measurements, out, core_year, cli.config),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(cli.config),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
