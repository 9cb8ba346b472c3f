//! Command line entry point for elo-ladder
//!
//! Replays a ladder file of match results and prints the final standings.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use elo_ladder::config::{validate_config, AppConfig, RatingOverrides};
use elo_ladder::{Ladder, PlayerStanding, Registry};
use std::path::PathBuf;
use tracing::{error, info};

/// Elo Ladder - replay match results and print Elo standings
#[derive(Parser)]
#[command(
    name = "elo-ladder",
    version,
    about = "Replay a ladder of match results and print Elo standings",
    long_about = "Elo Ladder reads a TOML ladder file listing players and the matches they \
                 played, applies the Elo rating rule to every result in order, and prints \
                 the final standings with win/loss/draw counts and optional rank tiers."
)]
struct Args {
    /// Ladder file to replay
    #[arg(value_name = "LADDER", help = "Path to the ladder file (TOML format)")]
    ladder: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Base rating override
    #[arg(long, value_name = "ELO", help = "Override the rating given to new players")]
    base_elo: Option<i64>,

    /// K-factor override
    #[arg(long, value_name = "K", help = "Override the K-factor")]
    k_factor: Option<f64>,

    /// Enable rank tiers
    #[arg(long, help = "Enable rank tiers in the standings")]
    rankings: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Dry run mode (validate config and ladder, then exit)
    #[arg(long, help = "Validate configuration and ladder without printing standings")]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration: defaults, then file, then environment
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    config.apply_env()?;

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    validate_config(&config)?;
    Ok(config)
}

/// Build the rating parameters for this run, then replay the ladder
fn run(args: &Args, config: &AppConfig) -> Result<Option<Registry>> {
    let ladder = Ladder::from_file(&args.ladder)?;

    let flags = RatingOverrides {
        base_elo: args.base_elo,
        k_factor: args.k_factor,
        rankings: args.rankings.then_some(true),
    };
    let rating = flags.apply_to(&ladder.effective_config(&config.rating));
    rating.validate()?;

    info!(
        "Rating parameters: base {}, K-factor {}, rankings {}",
        rating.base_elo,
        rating.k_factor,
        if rating.rankings { "on" } else { "off" }
    );

    let registry = ladder.replay(rating)?;

    if args.dry_run {
        info!("Dry run complete - ladder is valid");
        return Ok(None);
    }

    Ok(Some(registry))
}

fn render_table(standings: &[PlayerStanding], rankings: bool) -> String {
    let name_width = standings
        .iter()
        .map(|standing| standing.name.len())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut out = format!(
        "{:>3}  {:<name_width$}  {:>6}  {:>4}  {:>4}  {:>4}",
        "#", "Player", "Elo", "W", "L", "D"
    );
    if rankings {
        out.push_str("  Rank");
    }
    out.push('\n');

    for (position, standing) in standings.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>6}  {:>4}  {:>4}  {:>4}",
            position + 1,
            standing.name,
            standing.elo,
            standing.wins,
            standing.losses,
            standing.draws
        ));
        if let Some(rank) = standing.rank {
            out.push_str(&format!("  {}", rank));
        }
        out.push('\n');
    }

    out
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(&config.service.log_level)?;

    info!("Starting {} v{}", config.service.name, elo_ladder::VERSION);

    let registry = match run(&args, &config) {
        Ok(Some(registry)) => registry,
        Ok(None) => return Ok(()),
        Err(e) => {
            error!("Ladder replay failed: {:#}", e);
            return Err(e);
        }
    };

    let standings = registry.get_overall_list();
    match args.format {
        OutputFormat::Table => print!("{}", render_table(&standings, registry.rankings_enabled())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&standings)?),
    }

    Ok(())
}
