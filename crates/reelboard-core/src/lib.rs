//! Reelboard core: shared types for the live movie-ratings board
//!
//! This crate defines the data model shared by the storage and engine crates:
//! - Catalog entries and rating records (the two CSV row shapes)
//! - Aggregate snapshots produced once per refresh cycle
//! - Error and config types
//! - A `Clock` trait so timestamp capture is injectable in tests

pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use config::{EngineConfig, ProducerConfig};
pub use error::{CoreError, Result};
pub use types::{
    CatalogEntry, MovieId, RankedTitle, RatingRecord, Snapshot, FLOOR_RATING, GENRE_LABELS,
    MAX_RATING, TOP_N,
};
