use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use puckrank::config::AppConfig;
use puckrank::error::{RankError, Result};
use puckrank::pipeline::{GameStatCache, RankingCompiler, WeightTable};
use puckrank::provider::{FixtureProvider, StatsProvider};
use puckrank::report;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "puckrank", about = "NHL power rankings from rolling box-score windows")]
struct Cli {
    /// Configuration directory
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full ranking from a snapshot directory
    Rank {
        /// Snapshot directory (standings.json, schedule_<TEAM>.json,
        /// boxscore_<GAMEID>.json)
        #[arg(long, env = "PUCKRANK_SNAPSHOT")]
        snapshot: PathBuf,
        /// Write the ranking rows as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
        /// Override the configured window size
        #[arg(long)]
        window: Option<usize>,
    },
    /// Show the parsed standings snapshot
    Standings {
        #[arg(long, env = "PUCKRANK_SNAPSHOT")]
        snapshot: PathBuf,
    },
    /// Print the active scoring weight table
    Weights,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir)?;
    init_logging(&config.logging.level);
    if let Err(errors) = config.validate() {
        for e in &errors {
            warn!("config: {e}");
        }
        return Err(RankError::Validation(format!(
            "invalid configuration ({} problems)",
            errors.len()
        )));
    }

    match cli.command {
        Commands::Rank {
            snapshot,
            output,
            window,
        } => run_rank(&config, snapshot, output, window).await,
        Commands::Standings { snapshot } => run_standings(snapshot).await,
        Commands::Weights => {
            print_weights(&config.weight_table());
            Ok(())
        }
    }
}

async fn run_rank(
    config: &AppConfig,
    snapshot: PathBuf,
    output: Option<PathBuf>,
    window: Option<usize>,
) -> Result<()> {
    let mut compiler_config = config.compiler_config();
    if let Some(window_size) = window {
        compiler_config.window_size = window_size.max(1);
    }
    let window_size = compiler_config.window_size;
    info!(
        snapshot = %snapshot.display(),
        window = window_size,
        workers = compiler_config.workers,
        "starting ranking run"
    );

    let provider = Arc::new(FixtureProvider::new(snapshot));
    let cache = Arc::new(GameStatCache::new());
    let compiler = RankingCompiler::new(provider, cache, compiler_config);
    let rows = compiler.compile(&config.roster).await?;

    println!("{}", report::render_table(&rows));
    if let Some(path) = output {
        report::write_json(&rows, window_size, &path)?;
    }
    Ok(())
}

async fn run_standings(snapshot: PathBuf) -> Result<()> {
    let provider = FixtureProvider::new(snapshot);
    let standings = provider.standings().await?;
    println!("{}", report::render_standings(&standings));
    Ok(())
}

fn print_weights(weights: &WeightTable) {
    println!("recent_record           {:.2}", weights.recent_record);
    println!("strength_of_schedule    {:.2}", weights.strength_of_schedule);
    println!("goal_scoring_dominance  {:.2}", weights.goal_scoring_dominance);
    println!("expected_goals          {:.2}", weights.expected_goals);
    println!("possession              {:.2}", weights.possession);
    println!("pdo_luck                {:.2}", weights.pdo_luck);
    println!("shot_quality            {:.2}", weights.shot_quality);
    println!("season_points_pct       {:.2}", weights.season_points_pct);
    println!("goal_differential       {:.2}", weights.goal_differential);
    println!("special_teams           {:.2}", weights.special_teams);
    println!("win_quality             {:.2}", weights.win_quality);
    println!("winning_streak          {:.2}", weights.winning_streak);
    println!("clutch_performance      {:.2}", weights.clutch_performance);
    println!("recent_form             {:.2}", weights.recent_form);
    println!("sum                     {:.3}", weights.sum());
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},puckrank=debug")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
