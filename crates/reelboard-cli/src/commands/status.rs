//! Status command implementation

use anyhow::{Context, Result};
use reelboard_store::{Catalog, RatingsLog};
use std::path::PathBuf;

pub fn execute(catalog_path: PathBuf, ratings_path: PathBuf) -> Result<()> {
    tracing::info!("Checking board status: {}", catalog_path.display());

    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let ratings = RatingsLog::new(&ratings_path)
        .read_all()
        .context("Failed to read ratings log")?;

    println!("\nReelboard Status");
    println!("{}", "=".repeat(60));
    println!("Catalog: {}", catalog_path.display());
    println!("  Movies: {}", catalog.len());
    println!("  Next movie id: {}", catalog.next_movie_id());
    println!("\nRatings log: {}", ratings_path.display());
    println!("  Records: {}", ratings.len());

    println!("\nDistinct genres:");
    for genre in catalog.distinct_genres() {
        println!("  {}", genre);
    }

    Ok(())
}
