//! Frontier CLI binary.
//!
//! Command-line interface for the Monte Carlo opportunity-set simulator.

use clap::{Parser, Subcommand};
use frontier::{DistributionParameters, SimulationConfig, runner};
use frontier_data::{
    LabeledParameters, estimate_parameters, load_parameters, load_returns, simple_returns,
    write_parameters,
};
use frontier_output::{ExportFormat, Exporter, generate_summary};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::array;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frontier")]
#[command(about = "Monte Carlo risk/return opportunity-set simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the opportunity set and export the dataset
    Simulate {
        /// Mean-return CSV (omit to use the built-in reference scenario)
        #[arg(long, requires = "volatility", requires = "correlation")]
        means: Option<PathBuf>,

        /// Annualized-volatility CSV
        #[arg(long, requires = "means")]
        volatility: Option<PathBuf>,

        /// Correlation-matrix CSV
        #[arg(long, requires = "means")]
        correlation: Option<PathBuf>,

        /// Number of return draws in the shared sample
        #[arg(long, default_value = "700")]
        sample_size: usize,

        /// Number of portfolios generated per regime
        #[arg(long, default_value = "700")]
        portfolios: usize,

        /// Seed for the return sampler
        #[arg(long, default_value = "1111")]
        sample_seed: u64,

        /// Seed for the shorts-allowed weight stream
        #[arg(long, default_value = "9999")]
        shorts_seed: u64,

        /// Seed for the long-only weight stream
        #[arg(long, default_value = "9999")]
        long_only_seed: u64,

        /// Output file for the dataset
        #[arg(long, default_value = "opportunity_set.csv")]
        output: PathBuf,

        /// Output format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// Estimate distribution parameters from a return or price history
    Estimate {
        /// Wide CSV of periodic observations (header = asset labels)
        history: PathBuf,

        /// Treat the history as prices and difference it into returns first
        #[arg(long)]
        prices: bool,

        /// Directory receiving the three parameter files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            means,
            volatility,
            correlation,
            sample_size,
            portfolios,
            sample_seed,
            shorts_seed,
            long_only_seed,
            output,
            format,
        } => {
            let labeled = match (means, volatility, correlation) {
                (Some(m), Some(v), Some(c)) => load_parameters(&m, &v, &c)?,
                _ => reference_scenario()?,
            };

            let config = SimulationConfig {
                sample_size,
                weight_count: portfolios,
                sample_seed,
                shorts_seed,
                long_only_seed,
            };
            let format = parse_format(&format)?;

            simulate(&labeled, &config, &output, format)
        }
        Commands::Estimate {
            history,
            prices,
            out_dir,
        } => estimate(&history, prices, &out_dir),
    }
}

fn simulate(
    labeled: &LabeledParameters,
    config: &SimulationConfig,
    output: &Path,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Assets: {}", labeled.labels.join(", "));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!(
        "simulating {} portfolios per regime against {} return draws",
        config.weight_count, config.sample_size
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let dataset = runner::run(&labeled.parameters, config)?;
    spinner.finish_and_clear();

    dataset.export_to_file(output, format)?;
    println!("Wrote {} rows to {}", dataset.len(), output.display());

    for summary in generate_summary(&dataset) {
        println!("\n{}", summary);
    }
    Ok(())
}

fn estimate(
    history: &Path,
    prices: bool,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (labels, observations) = load_returns(history)?;
    let returns = if prices {
        simple_returns(&observations)?
    } else {
        observations
    };

    let labeled = estimate_parameters(&returns, labels)?;

    let mean_path = out_dir.join("mean_returns.csv");
    let volatility_path = out_dir.join("volatility.csv");
    let correlation_path = out_dir.join("correlation_matrix.csv");
    write_parameters(&labeled, &mean_path, &volatility_path, &correlation_path)?;

    println!(
        "Estimated parameters for {} assets from {} return rows",
        labeled.labels.len(),
        returns.nrows()
    );
    for (i, label) in labeled.labels.iter().enumerate() {
        println!(
            "  {}: mean {:.4}, volatility {:.4}",
            label,
            labeled.parameters.means()[i],
            labeled.parameters.std_devs()[i]
        );
    }
    println!(
        "Wrote {}, {}, {}",
        mean_path.display(),
        volatility_path.display(),
        correlation_path.display()
    );
    Ok(())
}

/// Built-in four-asset reference scenario.
///
/// Large-cap tech labels with annualized parameters; the correlation
/// matrix is a representative positive-correlation structure for the
/// group. Real scenarios are expected to come from the CSV loaders.
fn reference_scenario() -> Result<LabeledParameters, frontier::ParameterError> {
    let labels = ["GOOG", "META", "MSFT", "AAPL"]
        .map(String::from)
        .to_vec();
    let parameters = DistributionParameters::new(
        array![0.02, 0.07, 0.15, 0.20],
        array![0.05, 0.12, 0.17, 0.25],
        array![
            [1.00, 0.62, 0.58, 0.47],
            [0.62, 1.00, 0.54, 0.46],
            [0.58, 0.54, 1.00, 0.52],
            [0.47, 0.46, 0.52, 1.00],
        ],
    )?;
    Ok(LabeledParameters { labels, parameters })
}

fn parse_format(format: &str) -> Result<ExportFormat, String> {
    match format {
        "csv" => Ok(ExportFormat::Csv),
        "json" => Ok(ExportFormat::Json),
        "pretty-json" => Ok(ExportFormat::PrettyJson),
        other => Err(format!(
            "unknown format {other:?}; expected csv, json or pretty-json"
        )),
    }
}
