//! Reelboard engine: the components with real logic
//!
//! - [`snapshot::compute_snapshot`]: pure aggregation of the ratings log
//!   against the catalog, producing one [`Snapshot`] per refresh cycle
//! - [`Aggregator`]: cancellable polling loop that re-reads the full log on a
//!   fixed interval and publishes the latest snapshot
//! - [`SubmissionHandler`]: validates a user submission and appends the
//!   rating rows and catalog row
//! - [`RatingProducer`]: emits synthetic ratings to simulate live traffic
//!
//! [`Snapshot`]: reelboard_core::Snapshot

pub mod aggregator;
pub mod error;
pub mod producer;
pub mod snapshot;
pub mod submit;

pub use aggregator::{Aggregator, AggregatorStats};
pub use error::{EngineError, Result};
pub use producer::RatingProducer;
pub use snapshot::compute_snapshot;
pub use submit::{SubmissionHandler, SubmissionReceipt};
