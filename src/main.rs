//! Ruin Estimator - Entry Point
//!
//! Wiring sequence:
//! 1. Parse CLI arguments
//! 2. Load config.toml (or built-in defaults when absent)
//! 3. Init tracing on stderr (pretty or JSON)
//! 4. Build the estimator with the configured root solver
//! 5. Run `single` or `table` and print the rendered report to stdout

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ruin_estimator::adapters::render::{renderer_for, OutputFormat};
use ruin_estimator::config::loader::{load_config_or_default, ConfigSource};
use ruin_estimator::config::{AppConfig, AppSection, LogFormat, SolverMethod};
use ruin_estimator::domain::RuinEstimator;
use ruin_estimator::ports::render::ReportRenderer;
use ruin_estimator::usecases::{build_table, CellErrorPolicy, SingleQuery};

#[derive(Parser, Debug)]
#[command(name = "ruin-estimator", version)]
#[command(about = "Estimate the probability of ruin for a fixed-fraction trading strategy")]
struct Args {
  #[command(subcommand)]
  command: Option<Commands>,

  /// Path to the TOML configuration file
  #[arg(short, long, global = true, env = "RUIN_CONFIG", default_value = "config.toml")]
  config: PathBuf,

  /// Output format (overrides config)
  #[arg(short, long, global = true, value_enum)]
  format: Option<OutputFormat>,

  /// Root solver (overrides config)
  #[arg(long, global = true, value_enum)]
  solver: Option<SolverMethod>,

  /// Disable ANSI colours in text output
  #[arg(long, global = true)]
  no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Estimate one parameter tuple (default)
  Single {
    /// Win probability in [0, 1]
    #[arg(long)]
    win_rate: Option<f64>,

    /// Payoff of a win relative to a loss
    #[arg(long)]
    risk_reward: Option<f64>,

    /// Fraction of capital risked per trade in [0, 1]
    #[arg(long)]
    risk_rate: Option<f64>,

    /// Starting capital
    #[arg(long)]
    funds: Option<f64>,

    /// Capital level that counts as ruin
    #[arg(long)]
    ruin_line: Option<f64>,
  },

  /// Print the win-rate x risk/reward ruin table
  Table {
    /// Keep going when a cell fails and mark it instead of aborting
    #[arg(long)]
    sentinel: bool,
  },
}

fn main() -> Result<()> {
  let args = Args::parse();

  let (mut config, source) =
    load_config_or_default(&args.config).context("Failed to load configuration")?;
  if let Some(method) = args.solver {
    config.solver.method = method;
  }

  init_tracing(&config.app);

  info!(
    name = %config.app.name,
    version = env!("CARGO_PKG_VERSION"),
    solver = ?config.solver.method,
    "Starting ruin estimator"
  );
  if source == ConfigSource::Defaults {
    warn!(path = %args.config.display(), "Config file not found, using built-in defaults");
  }

  let estimator = RuinEstimator::new(config.solver.to_solver());
  let format = args.format.unwrap_or(config.output.format);
  let color = config.output.color && !args.no_color && std::io::stdout().is_terminal();
  let renderer = renderer_for(format, color);

  let rendered = match args.command.unwrap_or(Commands::Single {
    win_rate: None,
    risk_reward: None,
    risk_rate: None,
    funds: None,
    ruin_line: None,
  }) {
    Commands::Single {
      win_rate,
      risk_reward,
      risk_rate,
      funds,
      ruin_line,
    } => {
      let mut params = config.strategy.to_parameters();
      params.win_probability = win_rate.unwrap_or(params.win_probability);
      params.risk_reward = risk_reward.unwrap_or(params.risk_reward);
      params.risk_rate = risk_rate.unwrap_or(params.risk_rate);
      params.funds = funds.unwrap_or(params.funds);
      params.ruin_line = ruin_line.unwrap_or(params.ruin_line);

      let report = SingleQuery::new(estimator).run(params);
      renderer.render_single(&report)?
    }
    Commands::Table { sentinel } => run_table(&config, &estimator, sentinel, &*renderer)?,
  };

  print!("{rendered}");
  if format == OutputFormat::Json {
    println!();
  }
  Ok(())
}

fn run_table(
  config: &AppConfig,
  estimator: &RuinEstimator,
  sentinel: bool,
  renderer: &dyn ReportRenderer,
) -> Result<String> {
  let mut spec = config.table.to_spec();
  if sentinel {
    spec.on_error = CellErrorPolicy::Sentinel;
  }
  let table = build_table(estimator, &spec).context("Failed to build ruin table")?;
  renderer.render_table(&table)
}

/// Structured logging on stderr so stdout carries only the report.
fn init_tracing(app: &AppSection) {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app.log_level));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr);

  match app.log_format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}
