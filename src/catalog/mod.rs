//! Component catalog wiring.
//!
//! This module wraps the versioned JSON snapshots under `data/` so callers
//! can load a validated, read-only view and query it with typed accessors.
//! Use `ComponentIndex` for a single snapshot and `CatalogRepository` when
//! several versions are loaded side by side.

pub mod identity;
pub mod index;
pub mod model;
pub mod ordered;
pub mod repository;
pub mod statistics;

pub use identity::{Category, Confidence, SnapshotKey};
pub use index::ComponentIndex;
pub use model::{
    AirfoilRecord, BatteryRecord, ComponentCatalog, ComponentRef, EscRecord, MotorRecord,
    PropellerAeroRecord, PropellerRecord, SnapshotMetadata, CELL_VOLTAGE_V,
    load_catalog_from_path,
};
pub use ordered::Section;
pub use repository::CatalogRepository;
pub use statistics::{CatalogStatistics, CategoryStatistics, NumericSummary};
