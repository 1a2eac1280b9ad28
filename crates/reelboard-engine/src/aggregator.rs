//! Polling aggregation loop.
//!
//! The aggregator re-reads the full ratings log on a fixed interval, joins it
//! against the catalog, and publishes the resulting snapshot. It carries no
//! incremental state between cycles: every snapshot is computed from the
//! complete log as it exists at that instant.

use crate::error::Result;
use crate::snapshot::compute_snapshot;
use parking_lot::RwLock;
use reelboard_core::config::EngineConfig;
use reelboard_core::types::Snapshot;
use reelboard_store::{Catalog, RatingsLog};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Aggregator: consumes the ratings log and publishes the latest snapshot
pub struct Aggregator {
    ratings: RatingsLog,
    catalog: Arc<Catalog>,
    config: EngineConfig,
    /// Explicit selected-genre state, set by the presentation layer.
    /// Kept on the aggregator rather than as ambient global state.
    selected_genre: RwLock<String>,
    latest: RwLock<Snapshot>,
    shutdown: Arc<AtomicBool>,
}

impl Aggregator {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig, selected_genre: impl Into<String>) -> Self {
        let ratings = RatingsLog::new(config.ratings_path.clone());
        Self {
            ratings,
            catalog,
            config,
            selected_genre: RwLock::new(selected_genre.into()),
            latest: RwLock::new(Snapshot::NoData),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Change the genre the next cycle filters on
    pub fn set_selected_genre(&self, genre: impl Into<String>) {
        *self.selected_genre.write() = genre.into();
    }

    pub fn selected_genre(&self) -> String {
        self.selected_genre.read().clone()
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Snapshot {
        self.latest.read().clone()
    }

    /// Run one aggregation cycle: full log scan, join, publish.
    pub fn run_once(&self) -> Result<AggregatorStats> {
        let start = Instant::now();

        let ratings = self.ratings.read_all()?;
        let ratings_read = ratings.len();
        let ratings_joined = ratings
            .iter()
            .filter(|r| self.catalog.get(r.movie_id).is_some())
            .count();

        let genre = self.selected_genre();
        let snapshot = compute_snapshot(&ratings, &self.catalog, &genre);
        *self.latest.write() = snapshot;

        Ok(AggregatorStats {
            ratings_read,
            ratings_joined,
            duration: start.elapsed(),
        })
    }

    /// Run the aggregation loop until shutdown is signaled.
    ///
    /// Sleeps for the configured refresh interval between cycles. A failed
    /// cycle is logged and retried after the same interval; the loop itself
    /// never gives up.
    pub async fn run_continuous(&self) -> Result<()> {
        tracing::info!(
            path = %self.ratings.path().display(),
            refresh_secs = self.config.refresh_secs,
            "aggregator starting"
        );

        while !self.shutdown.load(Ordering::SeqCst) {
            match self.run_once() {
                Ok(stats) => {
                    tracing::debug!(
                        ratings_read = stats.ratings_read,
                        ratings_joined = stats.ratings_joined,
                        duration = ?stats.duration,
                        "aggregation cycle complete"
                    );
                }
                Err(e) => {
                    tracing::error!("aggregation cycle failed: {}", e);
                }
            }
            tokio::time::sleep(self.config.refresh_interval()).await;
        }

        tracing::info!("aggregator stopped");
        Ok(())
    }

    /// Signal graceful shutdown
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

/// Stats for one aggregation cycle
#[derive(Debug, Clone)]
pub struct AggregatorStats {
    /// Records read from the log this cycle
    pub ratings_read: usize,

    /// Records that joined to a catalog entry
    pub ratings_joined: usize,

    pub duration: Duration,
}
