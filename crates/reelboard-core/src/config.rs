use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the aggregation loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the append-only ratings log
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Delay between aggregation cycles (seconds)
    /// Default: 5
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("./data/ratings.csv")
}

fn default_refresh_secs() -> u64 {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ratings_path: default_ratings_path(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ratings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ratings_path = path.into();
        self
    }

    pub fn with_refresh_secs(mut self, secs: u64) -> Self {
        self.refresh_secs = secs;
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

/// Configuration for the synthetic rating producer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Path to the append-only ratings log
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Delay between emitted ratings (seconds)
    /// Default: 2
    #[serde(default = "default_emit_secs")]
    pub emit_secs: u64,

    /// Inclusive bounds for random movie ids
    /// Default: 1..=999
    #[serde(default = "default_movie_id_min")]
    pub movie_id_min: u64,
    #[serde(default = "default_movie_id_max")]
    pub movie_id_max: u64,

    /// Inclusive bounds for random ratings
    /// Default: [3.0, 10.0]
    #[serde(default = "default_rating_min")]
    pub rating_min: f64,
    #[serde(default = "default_rating_max")]
    pub rating_max: f64,

    /// Fixed RNG seed; `None` seeds from the OS
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_emit_secs() -> u64 {
    2
}

fn default_movie_id_min() -> u64 {
    1
}

fn default_movie_id_max() -> u64 {
    999
}

fn default_rating_min() -> f64 {
    3.0
}

fn default_rating_max() -> f64 {
    10.0
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            ratings_path: default_ratings_path(),
            emit_secs: default_emit_secs(),
            movie_id_min: default_movie_id_min(),
            movie_id_max: default_movie_id_max(),
            rating_min: default_rating_min(),
            rating_max: default_rating_max(),
            seed: None,
        }
    }
}

impl ProducerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ratings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ratings_path = path.into();
        self
    }

    pub fn with_emit_secs(mut self, secs: u64) -> Self {
        self.emit_secs = secs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn emit_interval(&self) -> Duration {
        Duration::from_secs(self.emit_secs)
    }
}
