//! Loaded, validated view of one catalog snapshot.
//!
//! `ComponentIndex::load` is the supported way to open a snapshot: it checks
//! the top-level shape against the embedded schema, enforces the catalog
//! invariants (unique names per category, non-negative magnitudes), and then
//! holds the typed document immutably for the accessor's lifetime. All
//! queries are local, synchronous reads; independent indexes over the same
//! file need no coordination.

use crate::catalog::identity::{Category, SnapshotKey};
use crate::catalog::model::{
    AirfoilRecord, BatteryRecord, ComponentCatalog, ComponentRef, EscRecord, MotorRecord,
    PropellerAeroRecord, PropellerRecord,
};
use crate::catalog::statistics::{self, CatalogStatistics};
use crate::error::{LoadError, NotFoundError};
use crate::schema;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Attributes that record physical magnitudes and therefore must not be
/// negative. Signed quantities (pitching moments, polynomial coefficients)
/// are deliberately absent.
const NON_NEGATIVE_ATTRS: &[&str] = &[
    "CAPACITY",
    "VOLTAGE",
    "WEIGHT",
    "weight",
    "CONT_DISCHARGE_RATE",
    "COST",
    "KV",
    "MAX_CURRENT",
    "MAX_POWER",
    "Min_Cells",
    "Max_Cells",
    "CELLS_MIN",
    "CELLS_MAX",
    "CONT_CURRENT",
    "PEAK_CURRENT",
    "VOLTAGE_MIN",
    "VOLTAGE_MAX",
    "EFFICIENCY",
    "BEC_VOLTAGE",
    "BEC_CURRENT",
    "RESISTANCE",
    "DIAMETER",
    "diameter",
    "PITCH",
    "pitch",
    "Thrust",
    "d_mm",
    "p_mm",
    "REYNOLDS_VALIDATED",
];

#[derive(Clone, Debug)]
/// One snapshot, fully loaded and validated.
pub struct ComponentIndex {
    path: PathBuf,
    key: SnapshotKey,
    catalog: ComponentCatalog,
}

impl ComponentIndex {
    /// Load and validate a snapshot from disk.
    ///
    /// The load either fully succeeds or fully fails; there is no partial or
    /// streaming mode. Shape violations are reported together rather than
    /// one at a time.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let data = fs::read_to_string(path).map_err(|source| LoadError::io(path, source))?;
        let raw: Value =
            serde_json::from_str(&data).map_err(|source| LoadError::parse(path, source))?;

        if let Err(details) = schema::validate_document(&raw) {
            return Err(LoadError::shape(path, details.join("\n")));
        }
        validate_magnitudes(path, &raw)?;

        // Re-parse the text rather than the Value: the typed pass preserves
        // section order and rejects duplicate names, which a Value cannot see.
        let catalog: ComponentCatalog =
            serde_json::from_str(&data).map_err(|source| LoadError::parse(path, source))?;

        let key = snapshot_key(path, &catalog);
        Ok(Self {
            path: path.to_path_buf(),
            key,
            catalog,
        })
    }

    /// The snapshot key this index was loaded from.
    pub fn key(&self) -> &SnapshotKey {
        &self.key
    }

    /// Path the snapshot was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Access the underlying typed document (metadata, replacements, etc.).
    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// Component names in one category, in source-document order.
    ///
    /// A category absent from the snapshot is empty, not an error.
    pub fn list(&self, category: Category) -> Vec<&str> {
        match category {
            Category::Battery => self.catalog.batteries.names().collect(),
            Category::Motor => self.catalog.motors.names().collect(),
            Category::Esc => self.catalog.escs.names().collect(),
            Category::Propeller => self.catalog.propellers.names().collect(),
            Category::PropellerAero => self.catalog.propeller_aero.names().collect(),
            Category::Airfoil => self.catalog.airfoils.names().collect(),
        }
    }

    /// Resolve one component record by category and name.
    pub fn get(&self, category: Category, name: &str) -> Result<ComponentRef<'_>, NotFoundError> {
        let missing = || NotFoundError::new(category, name);
        match category {
            Category::Battery => self
                .catalog
                .batteries
                .get(name)
                .map(ComponentRef::Battery)
                .ok_or_else(missing),
            Category::Motor => self
                .catalog
                .motors
                .get(name)
                .map(ComponentRef::Motor)
                .ok_or_else(missing),
            Category::Esc => self
                .catalog
                .escs
                .get(name)
                .map(ComponentRef::Esc)
                .ok_or_else(missing),
            Category::Propeller => self
                .catalog
                .propellers
                .get(name)
                .map(ComponentRef::Propeller)
                .ok_or_else(missing),
            Category::PropellerAero => self
                .catalog
                .propeller_aero
                .get(name)
                .map(ComponentRef::PropellerAero)
                .ok_or_else(missing),
            Category::Airfoil => self
                .catalog
                .airfoils
                .get(name)
                .map(ComponentRef::Airfoil)
                .ok_or_else(missing),
        }
    }

    /// Number of records in one category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Battery => self.catalog.batteries.len(),
            Category::Motor => self.catalog.motors.len(),
            Category::Esc => self.catalog.escs.len(),
            Category::Propeller => self.catalog.propellers.len(),
            Category::PropellerAero => self.catalog.propeller_aero.len(),
            Category::Airfoil => self.catalog.airfoils.len(),
        }
    }

    pub fn battery(&self, name: &str) -> Result<&BatteryRecord, NotFoundError> {
        self.catalog
            .batteries
            .get(name)
            .ok_or_else(|| NotFoundError::new(Category::Battery, name))
    }

    pub fn motor(&self, name: &str) -> Result<&MotorRecord, NotFoundError> {
        self.catalog
            .motors
            .get(name)
            .ok_or_else(|| NotFoundError::new(Category::Motor, name))
    }

    pub fn esc(&self, name: &str) -> Result<&EscRecord, NotFoundError> {
        self.catalog
            .escs
            .get(name)
            .ok_or_else(|| NotFoundError::new(Category::Esc, name))
    }

    pub fn propeller(&self, name: &str) -> Result<&PropellerRecord, NotFoundError> {
        self.catalog
            .propellers
            .get(name)
            .ok_or_else(|| NotFoundError::new(Category::Propeller, name))
    }

    pub fn propeller_aero(&self, name: &str) -> Result<&PropellerAeroRecord, NotFoundError> {
        self.catalog
            .propeller_aero
            .get(name)
            .ok_or_else(|| NotFoundError::new(Category::PropellerAero, name))
    }

    pub fn airfoil(&self, name: &str) -> Result<&AirfoilRecord, NotFoundError> {
        self.catalog
            .airfoils
            .get(name)
            .ok_or_else(|| NotFoundError::new(Category::Airfoil, name))
    }

    /// Per-category counts and numeric summaries, computed on demand from the
    /// in-memory catalog. Pure read; no caching.
    pub fn statistics(&self) -> CatalogStatistics {
        statistics::compute(&self.catalog)
    }
}

fn snapshot_key(path: &Path, catalog: &ComponentCatalog) -> SnapshotKey {
    if let Some(metadata) = &catalog.metadata {
        return SnapshotKey(metadata.version.clone());
    }
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("unversioned");
    SnapshotKey(stem.to_string())
}

/// Enforce the non-negative-magnitude invariant on the raw document.
///
/// Runs against the raw `Value` so violations carry the source attribute
/// name, and so an out-of-range integer surfaces as an invariant error
/// instead of a typed-parse failure.
fn validate_magnitudes(path: &Path, raw: &Value) -> Result<(), LoadError> {
    let Some(document) = raw.as_object() else {
        return Ok(());
    };
    for (section_name, section) in document {
        let Some(category) = Category::from_str(section_name) else {
            continue;
        };
        let Some(records) = section.as_object() else {
            continue;
        };
        for (name, record) in records {
            if name.trim().is_empty() {
                return Err(LoadError::invalid(
                    path,
                    format!("{category} contains a component with an empty name"),
                ));
            }
            let Some(attrs) = record.as_object() else {
                continue;
            };
            for (attr, value) in attrs {
                if !NON_NEGATIVE_ATTRS.contains(&attr.as_str()) {
                    continue;
                }
                if let Some(number) = value.as_f64() {
                    if number < 0.0 {
                        return Err(LoadError::invalid(
                            path,
                            format!("{category} '{name}': {attr} must be non-negative, got {number}"),
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}
