//! User submission handling.
//!
//! A submission carries a title plus one slider value per fixed genre label.
//! Sliders left at the floor (1.0) mean "not rated"; at least one genre must
//! be rated above the floor for the submission to be accepted.
//!
//! Write ordering: rating rows go to the log first (one atomic batch sharing
//! a single timestamp), the catalog row last. If the catalog append fails
//! mid-submission the stray rating rows never join to anything and stay
//! invisible to the engine, instead of an orphan catalog entry appearing in
//! the genre list with no ratings behind it.

use crate::error::{EngineError, Result};
use reelboard_core::clock::Clock;
use reelboard_core::types::{
    CatalogEntry, MovieId, RatingRecord, FLOOR_RATING, GENRE_LABELS, MAX_RATING,
};
use reelboard_store::{Catalog, RatingsLog};
use std::collections::HashMap;
use std::sync::Arc;

/// Display payload returned to the user on success
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub movie_id: MovieId,
    pub title: String,

    /// The rated genre with the highest rating
    pub top_genre: String,
    pub top_rating: f64,
}

/// Validates and persists new-movie submissions.
///
/// Holds `&mut self` across id assignment and the appends, so a single
/// process serializes submissions. The read-then-append against the shared
/// files is still unsynchronized across processes; that matches the
/// single-submitter deployment this targets.
pub struct SubmissionHandler {
    ratings: RatingsLog,
    clock: Arc<dyn Clock>,
}

impl SubmissionHandler {
    pub fn new(ratings: RatingsLog, clock: Arc<dyn Clock>) -> Self {
        Self { ratings, clock }
    }

    /// Submit a new movie with per-genre ratings.
    ///
    /// Rejections (empty title, unknown label, out-of-range value, nothing
    /// rated above the floor) happen before any file is touched.
    pub fn submit(
        &mut self,
        catalog: &mut Catalog,
        title: &str,
        per_genre_ratings: &HashMap<String, f64>,
    ) -> Result<SubmissionReceipt> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EngineError::InvalidSubmission(
                "title must not be empty".into(),
            ));
        }

        for (label, &value) in per_genre_ratings {
            if !GENRE_LABELS.contains(&label.as_str()) {
                return Err(EngineError::InvalidSubmission(format!(
                    "unknown genre label {:?}",
                    label
                )));
            }
            if !value.is_finite() || !(FLOOR_RATING..=MAX_RATING).contains(&value) {
                return Err(EngineError::InvalidSubmission(format!(
                    "rating for {} must be between {} and {}",
                    label, FLOOR_RATING, MAX_RATING
                )));
            }
        }

        // Fixed slider order, which also settles top-genre ties
        let rated_genres: Vec<(&str, f64)> = GENRE_LABELS
            .iter()
            .filter_map(|&label| {
                per_genre_ratings
                    .get(label)
                    .copied()
                    .filter(|&v| v > FLOOR_RATING)
                    .map(|v| (label, v))
            })
            .collect();

        if rated_genres.is_empty() {
            return Err(EngineError::InvalidSubmission(
                "rate at least one genre above 1.0".into(),
            ));
        }

        // First strictly-greater wins, so ties resolve to the earlier label
        let (top_genre, top_rating) = rated_genres
            .iter()
            .copied()
            .fold(rated_genres[0], |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            });

        let movie_id = catalog.next_movie_id();
        let timestamp = self.clock.now_unix();

        let records: Vec<RatingRecord> = rated_genres
            .iter()
            .map(|&(_, rating)| RatingRecord {
                movie_id,
                rating,
                timestamp,
            })
            .collect();
        self.ratings.append(&records)?;

        let genre_string: String = rated_genres
            .iter()
            .map(|&(label, _)| label)
            .collect::<Vec<_>>()
            .join("|");
        let entry = CatalogEntry {
            movie_id,
            title: title.to_string(),
            genre: genre_string,
        };
        if let Err(e) = catalog.append(entry) {
            tracing::warn!(
                movie_id,
                rating_rows = records.len(),
                "catalog append failed after rating rows were written: {}",
                e
            );
            return Err(EngineError::PartialWrite(e));
        }

        tracing::info!(movie_id, title, top_genre, top_rating, "movie submitted");

        Ok(SubmissionReceipt {
            movie_id,
            title: title.to_string(),
            top_genre: top_genre.to_string(),
            top_rating,
        })
    }
}
