//! Submit command implementation

use anyhow::{bail, Context, Result};
use reelboard_core::clock::SystemClock;
use reelboard_engine::SubmissionHandler;
use reelboard_store::{Catalog, RatingsLog};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

pub fn execute(
    catalog_path: PathBuf,
    ratings_path: PathBuf,
    title: String,
    ratings: Vec<String>,
) -> Result<()> {
    let per_genre = parse_ratings(&ratings)?;

    let mut catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let mut handler = SubmissionHandler::new(RatingsLog::new(ratings_path), Arc::new(SystemClock));

    let receipt = handler.submit(&mut catalog, &title, &per_genre)?;
    println!(
        "'{}' added as a {} movie with rating {} (movie_id {})",
        receipt.title, receipt.top_genre, receipt.top_rating, receipt.movie_id
    );
    Ok(())
}

/// Parse repeated `GENRE=VALUE` arguments into the per-genre rating map
fn parse_ratings(args: &[String]) -> Result<HashMap<String, f64>> {
    if args.is_empty() {
        bail!("pass at least one --rating GENRE=VALUE");
    }

    let mut per_genre = HashMap::new();
    for arg in args {
        let (genre, value) = arg
            .split_once('=')
            .with_context(|| format!("expected GENRE=VALUE, got {:?}", arg))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("bad rating value in {:?}", arg))?;
        if per_genre.insert(genre.trim().to_string(), value).is_some() {
            bail!("genre {:?} given more than once", genre.trim());
        }
    }
    Ok(per_genre)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_genre_value_pairs() {
        let parsed = parse_ratings(&["Comedy=7.5".into(), "Drama = 6".into()]).unwrap();
        assert_eq!(parsed.get("Comedy"), Some(&7.5));
        assert_eq!(parsed.get("Drama"), Some(&6.0));
    }

    #[test]
    fn rejects_malformed_and_duplicate_pairs() {
        assert!(parse_ratings(&[]).is_err());
        assert!(parse_ratings(&["Comedy".into()]).is_err());
        assert!(parse_ratings(&["Comedy=x".into()]).is_err());
        assert!(parse_ratings(&["Comedy=5".into(), "Comedy=6".into()]).is_err());
    }
}
