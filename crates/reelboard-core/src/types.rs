use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Movie identifier - unique within the catalog, assigned sequentially
pub type MovieId = u64;

/// The six genre labels offered on the submission form, in slider order.
///
/// This order is also the tie-break order when two genres share a rating.
pub const GENRE_LABELS: [&str; 6] = [
    "Romance", "Comedy", "Drama", "Horror", "Thriller", "Mystery",
];

/// Default slider value; a rating at the floor means "not rated"
pub const FLOOR_RATING: f64 = 1.0;

/// Upper bound of the rating scale
pub const MAX_RATING: f64 = 10.0;

/// Number of titles kept on each leaderboard
pub const TOP_N: usize = 5;

/// One row of the movie catalog
///
/// Immutable once written: entries are only ever created (pre-loaded at
/// startup or appended by a submission), never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub movie_id: MovieId,

    /// Display title, trimmed of surrounding whitespace on load
    pub title: String,

    /// `|`-delimited set of genre labels, e.g. `"Horror|Drama"`
    pub genre: String,
}

impl CatalogEntry {
    /// Whether this entry's compound genre string contains `genre` as a
    /// case-insensitive substring.
    pub fn matches_genre(&self, genre: &str) -> bool {
        self.genre.to_lowercase().contains(&genre.to_lowercase())
    }
}

/// One row of the append-only ratings log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub movie_id: MovieId,

    /// Score in `[1.0, 10.0]`
    pub rating: f64,

    /// Unix seconds at submission time
    pub timestamp: i64,
}

/// One leaderboard entry: a title and the mean of its ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTitle {
    pub title: String,
    pub mean_rating: f64,
    pub rating_count: u64,
}

/// The aggregate result of one refresh cycle.
///
/// Recomputed from the full ratings log every cycle; no incremental state is
/// carried between snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Snapshot {
    /// The ratings log was empty or missing
    NoData,

    Ready {
        /// Highest-mean titles across all genres, descending, at most [`TOP_N`]
        top_overall: Vec<RankedTitle>,

        /// Same leaderboard filtered to the selected genre.
        /// `None` signals "not enough ratings in this genre yet".
        top_genre: Option<Vec<RankedTitle>>,

        /// Occurrences of each verbatim compound genre string across all
        /// joined ratings. Compound strings are not split into labels.
        genre_counts: BTreeMap<String, u64>,
    },
}

impl Snapshot {
    /// The single top-rated title overall, if any ratings exist
    pub fn top_overall_highlight(&self) -> Option<&RankedTitle> {
        match self {
            Snapshot::NoData => None,
            Snapshot::Ready { top_overall, .. } => top_overall.first(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Snapshot::NoData)
    }
}
