//! confound CLI

use anyhow::Result;
use cf_inference::{AdjustmentSet, SimulationConfig};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod report;

#[derive(Parser)]
#[command(name = "confound")]
#[command(about = "confound - confounding, mediation and omitted-variable bias by simulation")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the structural model and fit the three regressions
    Run {
        /// JSON config file (n_rows, seed, coefficients). Flags override it.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of rows to simulate
        #[arg(long, allow_negative_numbers = true)]
        rows: Option<i64>,

        /// RNG seed (non-negative integer)
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Population coefficients implied by the structural model (no sampling)
    Truth {
        /// JSON config file; only `coefficients` is used.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Pretty JSON report
    Json,
    /// Plain-text coefficient tables
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { config, rows, seed, format, output } => {
            cmd_run(config.as_ref(), rows, seed.as_deref(), format, output.as_ref())
        }
        Commands::Truth { config, output } => cmd_truth(config.as_ref(), output.as_ref()),
        Commands::Version => {
            println!("confound {}", cf_core::VERSION);
            Ok(())
        }
    }
}

fn load_config(
    path: Option<&PathBuf>,
    rows: Option<i64>,
    seed: Option<&str>,
) -> Result<SimulationConfig> {
    let mut cfg = match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            SimulationConfig::from_path(p)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(n) = rows {
        cfg = cfg.with_rows(n)?;
    }
    if let Some(s) = seed {
        cfg = cfg.with_seed(cf_inference::parse_seed(s)?);
    }
    Ok(cfg)
}

fn cmd_run(
    config: Option<&PathBuf>,
    rows: Option<i64>,
    seed: Option<&str>,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    let cfg = load_config(config, rows, seed)?;
    let result = cf_inference::run_experiment(&cfg)?;
    tracing::info!(
        total_effect = result.total_treatment_effect,
        models = result.models.len(),
        "experiment complete"
    );

    match format {
        OutputFormat::Json => write_json(output, serde_json::to_value(&result)?),
        OutputFormat::Table => write_text(output, &report::render_tables(&result)),
    }
}

fn cmd_truth(config: Option<&PathBuf>, output: Option<&PathBuf>) -> Result<()> {
    let cfg = load_config(config, None, None)?;
    let c = &cfg.coefficients;

    let mut models = Vec::with_capacity(AdjustmentSet::ALL.len());
    for set in AdjustmentSet::ALL {
        let mut names = vec!["intercept".to_string()];
        names.extend(set.predictors().iter().map(|v| v.name().to_string()));
        models.push(serde_json::json!({
            "adjustment": set,
            "formula": set.formula(),
            "names": names,
            "population": c.implied_fit(set.predictors())?,
        }));
    }

    let output_json = serde_json::json!({
        "coefficients": c,
        "total_treatment_effect": c.total_treatment_effect(),
        "models": models,
    });

    write_json(output, output_json)
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    write_text(output, &serde_json::to_string_pretty(&value)?)
}

fn write_text(output: Option<&PathBuf>, text: &str) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, text)?;
        tracing::info!(path = %path.display(), "wrote output");
    } else {
        println!("{text}");
    }
    Ok(())
}
