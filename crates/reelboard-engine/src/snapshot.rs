//! Pure aggregation of ratings against the catalog.
//!
//! `compute_snapshot` is a function of its inputs only: no file IO, no
//! hidden counters, safe to call once per refresh cycle.

use reelboard_core::types::{CatalogEntry, RankedTitle, RatingRecord, Snapshot, TOP_N};
use reelboard_store::Catalog;
use std::collections::{BTreeMap, HashMap};

/// Compute one refresh cycle's aggregate from the full ratings log.
///
/// Ratings whose `movie_id` has no catalog entry are silently dropped.
/// An empty ratings slice yields [`Snapshot::NoData`].
///
/// The genre leaderboard filters on a case-insensitive substring match
/// against each entry's compound genre string, so `selected_genre = "horror"`
/// matches an entry tagged `"Horror|Drama"`. An empty filtered set yields
/// `top_genre: None`, the "not enough ratings" signal.
pub fn compute_snapshot(
    ratings: &[RatingRecord],
    catalog: &Catalog,
    selected_genre: &str,
) -> Snapshot {
    if ratings.is_empty() {
        return Snapshot::NoData;
    }

    let joined: Vec<(&CatalogEntry, f64)> = ratings
        .iter()
        .filter_map(|r| catalog.get(r.movie_id).map(|entry| (entry, r.rating)))
        .collect();

    let top_overall = rank_titles(joined.iter().copied());

    let genre_rows: Vec<(&CatalogEntry, f64)> = joined
        .iter()
        .copied()
        .filter(|(entry, _)| entry.matches_genre(selected_genre))
        .collect();
    let top_genre = if genre_rows.is_empty() {
        None
    } else {
        Some(rank_titles(genre_rows.into_iter()))
    };

    let mut genre_counts: BTreeMap<String, u64> = BTreeMap::new();
    for (entry, _) in &joined {
        *genre_counts.entry(entry.genre.clone()).or_default() += 1;
    }

    Snapshot::Ready {
        top_overall,
        top_genre,
        genre_counts,
    }
}

/// Group rows by title, average, sort by mean descending, keep [`TOP_N`].
///
/// Equal means order ascending by title so the ranking is deterministic.
fn rank_titles<'a>(rows: impl Iterator<Item = (&'a CatalogEntry, f64)>) -> Vec<RankedTitle> {
    let mut sums: HashMap<&str, (f64, u64)> = HashMap::new();
    for (entry, rating) in rows {
        let slot = sums.entry(entry.title.as_str()).or_insert((0.0, 0));
        slot.0 += rating;
        slot.1 += 1;
    }

    let mut ranked: Vec<RankedTitle> = sums
        .into_iter()
        .map(|(title, (sum, count))| RankedTitle {
            title: title.to_string(),
            mean_rating: sum / count as f64,
            rating_count: count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.mean_rating
            .total_cmp(&a.mean_rating)
            .then_with(|| a.title.cmp(&b.title))
    });
    ranked.truncate(TOP_N);
    ranked
}
