//! Synthetic rating producer.
//!
//! Emits one random rating at a fixed interval to simulate live traffic.
//! Shares nothing with the aggregator or the submission handler beyond the
//! append-only log file.

use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reelboard_core::clock::Clock;
use reelboard_core::config::ProducerConfig;
use reelboard_core::types::RatingRecord;
use reelboard_store::RatingsLog;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct RatingProducer {
    log: RatingsLog,
    config: ProducerConfig,
    rng: StdRng,
    clock: Arc<dyn Clock>,
    shutdown: Arc<AtomicBool>,
}

impl RatingProducer {
    /// A configured seed makes the emitted stream deterministic; otherwise
    /// the RNG seeds from the OS.
    pub fn new(config: ProducerConfig, clock: Arc<dyn Clock>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            log: RatingsLog::new(config.ratings_path.clone()),
            config,
            rng,
            clock,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Append one synthetic rating and return it.
    ///
    /// Movie id is uniform over the configured range; the rating is uniform
    /// over `[rating_min, rating_max]` rounded to one decimal.
    pub fn emit_once(&mut self) -> Result<RatingRecord> {
        let movie_id = self
            .rng
            .gen_range(self.config.movie_id_min..=self.config.movie_id_max);
        let raw: f64 = self
            .rng
            .gen_range(self.config.rating_min..=self.config.rating_max);
        let rating = (raw * 10.0).round() / 10.0;

        let record = RatingRecord {
            movie_id,
            rating,
            timestamp: self.clock.now_unix(),
        };
        self.log.append(std::slice::from_ref(&record))?;

        tracing::info!(movie_id, rating, "rated movie");
        Ok(record)
    }

    /// Emit ratings on the configured interval until shutdown is signaled.
    pub async fn run_continuous(&mut self) -> Result<()> {
        tracing::info!(
            path = %self.log.path().display(),
            emit_secs = self.config.emit_secs,
            "producer starting"
        );

        while !self.shutdown.load(Ordering::SeqCst) {
            if let Err(e) = self.emit_once() {
                tracing::error!("failed to emit rating: {}", e);
            }
            tokio::time::sleep(self.config.emit_interval()).await;
        }

        tracing::info!("producer stopped");
        Ok(())
    }

    /// Handle for signaling shutdown from another task
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelboard_core::clock::Clock;
    use tempfile::TempDir;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_unix(&self) -> i64 {
            self.0
        }
    }

    fn setup(seed: u64) -> (RatingProducer, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = ProducerConfig::new()
            .with_ratings_path(dir.path().join("ratings.csv"))
            .with_seed(seed);
        let producer = RatingProducer::new(config, Arc::new(FixedClock(1_700_000_000)));
        (producer, dir)
    }

    #[test]
    fn emitted_ratings_stay_in_bounds() {
        let (mut producer, _dir) = setup(7);
        for _ in 0..200 {
            let record = producer.emit_once().unwrap();
            assert!((1..=999).contains(&record.movie_id));
            assert!((3.0..=10.0).contains(&record.rating));
            // One-decimal rounding
            assert_eq!((record.rating * 10.0).round() / 10.0, record.rating);
            assert_eq!(record.timestamp, 1_700_000_000);
        }
    }

    #[test]
    fn seeded_producers_emit_identical_streams() {
        let (mut a, _dir_a) = setup(42);
        let (mut b, _dir_b) = setup(42);
        for _ in 0..20 {
            assert_eq!(a.emit_once().unwrap(), b.emit_once().unwrap());
        }
    }

    #[test]
    fn emitted_records_read_back_from_the_log() {
        let (mut producer, dir) = setup(1);
        let first = producer.emit_once().unwrap();
        let second = producer.emit_once().unwrap();

        let log = RatingsLog::new(dir.path().join("ratings.csv"));
        assert_eq!(log.read_all().unwrap(), vec![first, second]);
    }
}
