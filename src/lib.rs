//! Curated UAV component reference catalog.
//!
//! The crate wraps versioned JSON snapshots of component specifications
//! (batteries, motors, ESCs, propellers, wind-tunnel coefficient tables,
//! airfoils) behind typed, read-only accessors. A snapshot is loaded once,
//! validated against the shape contract under `schema/`, and then queried
//! with local synchronous lookups; records are curated out of band and never
//! written back. On top of the accessor sit the ESC matching helpers, the
//! three-tier propeller performance lookup, and the airfoil estimate table
//! used to cross-check committed polars.

use std::path::PathBuf;

pub mod airfoil;
pub mod catalog;
pub mod error;
pub mod performance;
pub mod selection;
pub mod validation;

mod schema;

pub use catalog::{
    AirfoilRecord, BatteryRecord, CatalogRepository, CatalogStatistics, Category,
    CategoryStatistics, ComponentCatalog, ComponentIndex, ComponentRef, Confidence, EscRecord,
    MotorRecord, NumericSummary, PropellerAeroRecord, PropellerRecord, Section, SnapshotKey,
    SnapshotMetadata, load_catalog_from_path,
};
pub use error::{LoadError, NotFoundError};

/// Path of the latest validated snapshot shipped with the crate.
///
/// Convenience for tools and tests; library callers normally pass their own
/// snapshot path to `ComponentIndex::load`.
pub fn bundled_snapshot_path() -> PathBuf {
    bundled_data_dir().join("UAV_Database_v1.1.0_validated.json")
}

/// Directory holding every bundled snapshot version.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
