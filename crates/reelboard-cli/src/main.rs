//! Reelboard CLI - live movie ratings board over a shared CSV log

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "reelboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the movie catalog file
    #[arg(long, default_value = "./data/movies.csv")]
    catalog: PathBuf,

    /// Path to the append-only ratings log
    #[arg(long, default_value = "./data/ratings.csv")]
    ratings: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the aggregation loop and render the board on a fixed refresh
    Watch {
        /// Genre to filter the genre leaderboard on (defaults to the first
        /// distinct genre in the catalog)
        #[arg(short, long)]
        genre: Option<String>,

        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 5)]
        refresh: u64,
    },

    /// Emit synthetic ratings at a fixed interval
    Simulate {
        /// Seconds between emitted ratings
        #[arg(short, long, default_value_t = 2)]
        interval: u64,

        /// Fixed RNG seed for a reproducible stream
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Submit a new movie with per-genre ratings
    Submit {
        /// Movie title
        #[arg(short, long)]
        title: String,

        /// Per-genre rating as GENRE=VALUE, repeatable
        /// (e.g. --rating Comedy=7.5 --rating Drama=6.0)
        #[arg(short, long = "rating", value_name = "GENRE=VALUE")]
        ratings: Vec<String>,
    },

    /// Print catalog and log counts
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Execute command
    match cli.command {
        Commands::Watch { genre, refresh } => {
            commands::watch::execute(cli.catalog, cli.ratings, genre, refresh).await?;
        }
        Commands::Simulate { interval, seed } => {
            commands::simulate::execute(cli.ratings, interval, seed).await?;
        }
        Commands::Submit { title, ratings } => {
            commands::submit::execute(cli.catalog, cli.ratings, title, ratings)?;
        }
        Commands::Status => {
            commands::status::execute(cli.catalog, cli.ratings)?;
        }
    }

    Ok(())
}
