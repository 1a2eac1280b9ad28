//! Simulate command implementation - synthetic rating producer

use anyhow::{Context, Result};
use reelboard_core::clock::SystemClock;
use reelboard_core::config::ProducerConfig;
use reelboard_engine::RatingProducer;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub async fn execute(ratings_path: PathBuf, interval: u64, seed: Option<u64>) -> Result<()> {
    let mut config = ProducerConfig::new()
        .with_ratings_path(ratings_path)
        .with_emit_secs(interval);
    config.seed = seed;

    let mut producer = RatingProducer::new(config, Arc::new(SystemClock));
    let shutdown = producer.shutdown_handle();

    println!("Simulating live movie ratings every {interval}s. Ctrl+C to stop.");
    let handle = tokio::spawn(async move { producer.run_continuous().await });

    tokio::signal::ctrl_c().await?;
    shutdown.store(true, Ordering::SeqCst);
    handle.await?.context("producer loop failed")?;
    Ok(())
}
