use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indc_config::{builtin_indicator_names, load_config, load_indicator, IndcConfig};
use indc_indicators::Indicator;
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::prices;

#[derive(Parser)]
#[command(author, version, about = "Decimal technical indicators")]
pub struct Cli {
    /// Settings file holding `[indicators.<alias>]` descriptors
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset (overrides the settings file)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the registered indicator names
    List,
    /// Check an indicator configuration without price data
    Validate(IndicatorArgs),
    /// Print how many trailing prices an indicator needs
    Count(IndicatorArgs),
    /// Calculate an indicator over a price history
    Calc(CalcArgs),
}

#[derive(Args)]
struct IndicatorArgs {
    /// Inline JSON descriptor, e.g. '{"name":"sma","length":20}'
    #[arg(long, conflicts_with = "name", required_unless_present = "name")]
    indicator: Option<String>,
    /// Alias of a descriptor in the settings file
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct CalcArgs {
    #[command(flatten)]
    target: IndicatorArgs,
    /// Comma separated prices, oldest first
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        conflicts_with = "input",
        required_unless_present = "input"
    )]
    prices: Vec<Decimal>,
    /// CSV file with a header row
    #[arg(long)]
    input: Option<PathBuf>,
    /// CSV column holding the prices
    #[arg(long, default_value = "close")]
    column: String,
    /// Round the result to this many decimal places
    #[arg(long)]
    precision: Option<u32>,
}

/// Parses arguments, loads settings, installs logging and runs the command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_config(cli.config.as_deref()).context("failed to load settings")?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.logging.level.clone());
    init_tracing(&level)?;
    execute(cli.command, &settings, &mut io::stdout().lock())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level `{level}`"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn execute(command: Command, settings: &IndcConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List => {
            for name in builtin_indicator_names() {
                writeln!(out, "{name}")?;
            }
        }
        Command::Validate(args) => {
            let indicator = resolve(&args, settings)?;
            indicator.validate()?;
            info!(?indicator, "configuration is valid");
            writeln!(out, "ok")?;
        }
        Command::Count(args) => {
            let indicator = resolve(&args, settings)?;
            indicator.validate()?;
            writeln!(out, "{}", indicator.count())?;
        }
        Command::Calc(args) => {
            let indicator = resolve(&args.target, settings)?;
            let prices = match &args.input {
                Some(path) => prices::read_column(path, &args.column)?,
                None => args.prices.clone(),
            };
            debug!(samples = prices.len(), required = indicator.count(), "calculating");
            let mut value = indicator.calc(&prices)?;
            if let Some(precision) = args.precision {
                value = value.round_dp(precision);
            }
            writeln!(out, "{}", value.normalize())?;
        }
    }
    Ok(())
}

fn resolve(args: &IndicatorArgs, settings: &IndcConfig) -> Result<Box<dyn Indicator>> {
    match (&args.indicator, &args.name) {
        (Some(raw), _) => {
            let descriptor: serde_json::Value =
                serde_json::from_str(raw).context("indicator descriptor is not valid JSON")?;
            Ok(load_indicator(&descriptor)?)
        }
        (None, Some(alias)) => Ok(settings.indicator(alias)?),
        (None, None) => bail!("either --indicator or --name is required"),
    }
}
