use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elo_ladder::api::state::{AppState, DynStore};
use elo_ladder::config::AppConfig;
use elo_ladder::ladder::{
    format_change, rankings, recent_matches, series_for, LadderError, RatingStore,
};
use elo_ladder::storage::{FileStore, MemoryStore, StorageConfig};

#[derive(Parser)]
#[command(name = "elo-ladder")]
#[command(about = "Local Elo rating ladder for tracking match results")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Keep the ladder in memory only
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List player names
    Players,

    /// Add a player at the initial rating
    AddPlayer {
        /// Player name
        name: String,
    },

    /// Record the result of a match
    Record {
        #[arg(long)]
        player1: String,

        #[arg(long)]
        player2: String,

        /// Must be one of the two players
        #[arg(long)]
        winner: String,
    },

    /// Show the leaderboard
    Rankings,

    /// Show recent matches, most recent first
    Matches {
        /// Number of matches to show (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print rating history series as JSON
    History {
        /// Only this player's series
        #[arg(long)]
        player: Option<String>,
    },

    /// Delete every player and match and restore the default players
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

fn open_store(data_dir: &Path, ephemeral: bool) -> RatingStore<DynStore> {
    let backend: DynStore = if ephemeral {
        tracing::info!("Using in-memory storage");
        Box::new(MemoryStore::new())
    } else {
        let storage = StorageConfig::new(data_dir.to_path_buf());
        tracing::info!("Using storage at {:?}", storage.kv_dir());
        Box::new(FileStore::from_config(&storage))
    };
    RatingStore::open(backend)
}

/// Exit status for rejected input, as opposed to runtime failures.
const EXIT_INVALID_INPUT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<LadderError>() {
                Some(err) if err.is_validation() => ExitCode::from(EXIT_INVALID_INPUT),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::debug!("Starting elo-ladder v{}", env!("CARGO_PKG_VERSION"));

    let mut store = open_store(&config.data_dir, cli.ephemeral);

    match cli.command {
        Commands::Players => {
            for name in store.player_names() {
                println!("{}", name);
            }
        }
        Commands::AddPlayer { name } => {
            let player = store.add_player(&name)?;
            println!("Added {} ({})", player.name, player.rating);
        }
        Commands::Record {
            player1,
            player2,
            winner,
        } => {
            let record = store
                .recorder()
                .record_match(&player1, &player2, &winner)?;
            println!("\n=== Match {} ===", store.matches().len());
            println!(
                "{:<20} {:>5} ({})",
                record.player1,
                store.player(&record.player1)?.rating,
                format_change(record.p1_rating_change)
            );
            println!(
                "{:<20} {:>5} ({})",
                record.player2,
                store.player(&record.player2)?.rating,
                format_change(record.p2_rating_change)
            );
            println!("Winner: {}", record.winner);
        }
        Commands::Rankings => {
            println!(
                "{:>4}  {:<20} {:>6} {:>5} {:>6}",
                "Rank", "Player", "Rating", "Wins", "Losses"
            );
            for row in rankings(store.players()) {
                println!(
                    "{:>4}  {:<20} {:>6} {:>5} {:>6}",
                    row.rank, row.name, row.rating, row.wins, row.losses
                );
            }
        }
        Commands::Matches { limit } => {
            let limit = limit.unwrap_or(config.ladder.recent_match_limit);
            let recent = recent_matches(store.matches(), limit);
            if recent.is_empty() {
                println!("No matches recorded");
            }
            for m in recent {
                println!(
                    "#{:<4} {} ({}) vs {} ({}), winner {}",
                    m.number,
                    m.record.player1,
                    format_change(m.record.p1_rating_change),
                    m.record.player2,
                    format_change(m.record.p2_rating_change),
                    m.record.winner
                );
            }
        }
        Commands::History { player } => {
            let series = series_for(store.players());
            let json = match player {
                Some(name) => {
                    let points = series
                        .get(&name)
                        .with_context(|| format!("Player not found: {}", name))?;
                    serde_json::to_string_pretty(points)?
                }
                None => serde_json::to_string_pretty(&series)?,
            };
            println!("{}", json);
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("Reset deletes all players and matches; pass --yes to confirm");
            }
            store.reset()?;
            println!("Ladder reset to default players");
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(
                store,
                config.ladder.recent_match_limit,
                config.server.cors_origin.clone(),
            );
            let app = elo_ladder::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
