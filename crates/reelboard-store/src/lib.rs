//! File-backed storage for the ratings board
//!
//! Two collaborating stores share a directory of plain CSV files:
//! - [`Catalog`]: the movie table, loaded once at startup and appended to by
//!   submissions. `movie_id,title,genre` rows with a header on the initial
//!   file.
//! - [`RatingsLog`]: the append-only ratings log, written by the producer and
//!   the submission handler and re-read in full by the aggregation engine on
//!   every cycle. `movie_id,rating,timestamp` rows, no header.
//!
//! Appends are made with a single write on a file opened in append mode, so
//! one logical record (or batch) never interleaves with another process's
//! append.

mod catalog;
mod ratings;

pub use catalog::{Catalog, CATALOG_HEADER};
pub use ratings::RatingsLog;
