//! Core library for duplex: typed, compile-checked queries over pluggable
//! stores, composed into a repository that mirrors writes across a primary
//! and a secondary store and falls back to the secondary on read failure.

pub mod logging;
pub mod model;
pub mod op;
pub mod query;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::Record;
pub use op::AsyncOp;
pub use query::{
    equal, greater_or_equal, greater_than, less_or_equal, less_than, BoundQuery, Comparison,
    Direction, FieldRef, Operator, Predicate, Query, SortCriterion, SortSpec,
};
pub use repo::MirroredRepository;
pub use store::{MemoryStore, Store, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
