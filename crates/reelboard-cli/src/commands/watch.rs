//! Watch command implementation - the live board

use anyhow::{Context, Result};
use reelboard_core::config::EngineConfig;
use reelboard_core::types::Snapshot;
use reelboard_engine::Aggregator;
use reelboard_store::Catalog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub async fn execute(
    catalog_path: PathBuf,
    ratings_path: PathBuf,
    genre: Option<String>,
    refresh: u64,
) -> Result<()> {
    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let catalog = Arc::new(catalog);

    let selected_genre = match genre {
        Some(genre) => genre,
        None => catalog
            .distinct_genres()
            .into_iter()
            .next()
            .context("Catalog has no genres; pass --genre explicitly")?,
    };

    let config = EngineConfig::new()
        .with_ratings_path(ratings_path)
        .with_refresh_secs(refresh);
    let aggregator = Arc::new(Aggregator::new(catalog, config, selected_genre.clone()));

    // Aggregation runs on its own loop; this task just renders on the same
    // cadence until Ctrl+C.
    let worker = aggregator.clone();
    let handle = tokio::spawn(async move { worker.run_continuous().await });

    println!("Watching ratings (genre: {selected_genre}, refresh: {refresh}s). Ctrl+C to stop.");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                aggregator.shutdown();
                break;
            }
            _ = tokio::time::sleep(Duration::from_secs(refresh)) => {
                render(&aggregator.latest(), &selected_genre);
            }
        }
    }

    handle.await?.context("aggregator loop failed")?;
    Ok(())
}

fn render(snapshot: &Snapshot, selected_genre: &str) {
    println!("\n{}", "=".repeat(60));
    match snapshot {
        Snapshot::NoData => {
            println!("Waiting for ratings... submit some or start the simulator.");
        }
        Snapshot::Ready {
            top_overall,
            top_genre,
            genre_counts,
        } => {
            println!("Top 5 Rated Movies (Overall)");
            render_board(top_overall);

            println!("\nTop 5 in '{}'", selected_genre);
            match top_genre {
                Some(board) => render_board(board),
                None => println!("  Not enough ratings in this genre yet."),
            }

            println!("\nGenre Popularity");
            for (genre, count) in genre_counts {
                println!("  {:<30} {}", genre, count);
            }

            if let Some(top) = snapshot.top_overall_highlight() {
                println!(
                    "\nTop Rated Movie Overall: {} with average rating {:.2}",
                    top.title, top.mean_rating
                );
            }
        }
    }
}

fn render_board(board: &[reelboard_core::types::RankedTitle]) {
    if board.is_empty() {
        println!("  (no rated movies)");
    }
    for (i, ranked) in board.iter().enumerate() {
        println!(
            "  {}. {:<30} {:.2} ({} ratings)",
            i + 1,
            ranked.title,
            ranked.mean_rating,
            ranked.rating_count
        );
    }
}
