//! Structural comparison and drift detection for PostgreSQL schemas.
//!
//! pgdrift snapshots the objects in two schemas (tables, callables,
//! sequences, views, indexes), diffs them with per-kind equality rules
//! that ignore cosmetic attributes, and records each run so later runs
//! can be checked for drift.

#[cfg(feature = "cli")]
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod logging;
pub mod schema;

pub use compare::{
    ComparisonEngine, ComparisonFilter, ComparisonResult, ComparisonTarget, ComparatorRegistry,
    StructuralComparator,
};
pub use config::{ComparisonProfile, PgDriftConfig};
pub use error::{PgDriftError, Result};
pub use history::{ComparisonHistory, HistoryStore};
pub use schema::{ObjectIdentity, SchemaObject, SchemaObjectKind};
