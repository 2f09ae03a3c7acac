//! Deserializable representation of a catalog snapshot file.
//!
//! The types mirror the snapshot convention documented in
//! `docs/data_provenance.md`: a top-level object keyed by category, each
//! category an object keyed by component name, each record an object of
//! scalar attributes. Attributes that a snapshot may omit are `Option` and
//! stay `None` after load; documented fallbacks live in derived accessors so
//! `get` stays field-for-field faithful to the file.

use crate::catalog::identity::{Category, Confidence};
use crate::catalog::ordered::Section;
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Nominal LiPo cell voltage used for cell-count and voltage fallbacks.
pub const CELL_VOLTAGE_V: f64 = 3.7;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
/// Full catalog snapshot as stored on disk.
///
/// Every category is optional so partial snapshots still load; absent
/// categories behave as empty. `_metadata` and `model_replacements` are the
/// two non-category keys validated snapshots carry.
pub struct ComponentCatalog {
    #[serde(rename = "Battery", default, skip_serializing_if = "Section::is_empty")]
    pub batteries: Section<BatteryRecord>,
    #[serde(rename = "Motor", default, skip_serializing_if = "Section::is_empty")]
    pub motors: Section<MotorRecord>,
    #[serde(rename = "ESC", default, skip_serializing_if = "Section::is_empty")]
    pub escs: Section<EscRecord>,
    #[serde(rename = "Propeller", default, skip_serializing_if = "Section::is_empty")]
    pub propellers: Section<PropellerRecord>,
    #[serde(
        rename = "PropellerAero",
        default,
        skip_serializing_if = "Section::is_empty"
    )]
    pub propeller_aero: Section<PropellerAeroRecord>,
    #[serde(
        rename = "Airfoil",
        alias = "Wing",
        default,
        skip_serializing_if = "Section::is_empty"
    )]
    pub airfoils: Section<AirfoilRecord>,
    #[serde(rename = "_metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub model_replacements: BTreeMap<String, String>,
}

impl ComponentCatalog {
    /// Total number of records across every category.
    pub fn total_components(&self) -> usize {
        self.batteries.len()
            + self.motors.len()
            + self.escs.len()
            + self.propellers.len()
            + self.propeller_aero.len()
            + self.airfoils.len()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// Provenance block written by the validation pass that produces a new
/// snapshot. Pre-validation snapshots have none.
pub struct SnapshotMetadata {
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub validation_date: Option<String>,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub sources: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// LiPo/Li-ion pack record. Capacity in mAh, voltage in V, weight in grams,
/// continuous discharge rate in C, cost in USD.
pub struct BatteryRecord {
    #[serde(rename = "CAPACITY", default, skip_serializing_if = "Option::is_none")]
    pub capacity_mah: Option<f64>,
    #[serde(rename = "VOLTAGE", default, skip_serializing_if = "Option::is_none")]
    pub voltage_v: Option<f64>,
    #[serde(rename = "WEIGHT", default, skip_serializing_if = "Option::is_none")]
    pub weight_g: Option<f64>,
    #[serde(
        rename = "CONT_DISCHARGE_RATE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub c_rate: Option<f64>,
    #[serde(rename = "COST", default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
}

impl BatteryRecord {
    /// Nominal series cell count derived from pack voltage.
    ///
    /// Rounded rather than truncated: 11.1 / 3.7 lands just under 3.0 in
    /// floating point.
    pub fn cells(&self) -> Option<u32> {
        self.voltage_v.map(|v| (v / CELL_VOLTAGE_V).round() as u32)
    }

    /// Stored energy in Wh.
    pub fn energy_wh(&self) -> Option<f64> {
        match (self.capacity_mah, self.voltage_v) {
            (Some(capacity), Some(voltage)) => Some(capacity / 1000.0 * voltage),
            _ => None,
        }
    }

    /// Continuous discharge power in W. A pack without a C rating is treated
    /// as 1C, matching the curation convention.
    pub fn cont_power_w(&self) -> Option<f64> {
        self.energy_wh()
            .map(|energy| energy * self.c_rate.unwrap_or(1.0))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// Brushless motor record. KV in rpm/V, currents in A, power in W, weight in
/// grams, cost in USD.
pub struct MotorRecord {
    #[serde(rename = "KV", default, skip_serializing_if = "Option::is_none")]
    pub kv: Option<f64>,
    #[serde(rename = "MAX_CURRENT", default, skip_serializing_if = "Option::is_none")]
    pub max_current_a: Option<f64>,
    #[serde(rename = "MAX_POWER", default, skip_serializing_if = "Option::is_none")]
    pub max_power_w: Option<f64>,
    #[serde(rename = "WEIGHT", default, skip_serializing_if = "Option::is_none")]
    pub weight_g: Option<f64>,
    #[serde(rename = "Min_Cells", default, skip_serializing_if = "Option::is_none")]
    pub min_cells: Option<u32>,
    #[serde(rename = "Max_Cells", default, skip_serializing_if = "Option::is_none")]
    pub max_cells: Option<u32>,
    #[serde(rename = "COST", default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(rename = "VERIFIED", default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl MotorRecord {
    /// Whether the record was cross-checked against a manufacturer source.
    /// Informational only; never used to filter results.
    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// Electronic speed controller record, including the extended parameters the
/// v2/v3 ESC databases contribute (BEC ratings, internal resistance, size
/// class). Currents in A, voltages in V, weight in grams, resistance in mΩ.
pub struct EscRecord {
    #[serde(rename = "CONT_CURRENT", default, skip_serializing_if = "Option::is_none")]
    pub cont_current_a: Option<f64>,
    #[serde(rename = "PEAK_CURRENT", default, skip_serializing_if = "Option::is_none")]
    pub peak_current_a: Option<f64>,
    #[serde(rename = "VOLTAGE_MIN", default, skip_serializing_if = "Option::is_none")]
    pub voltage_min_v: Option<f64>,
    #[serde(rename = "VOLTAGE_MAX", default, skip_serializing_if = "Option::is_none")]
    pub voltage_max_v: Option<f64>,
    #[serde(
        rename = "Min_Cells",
        alias = "CELLS_MIN",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_cells: Option<u32>,
    #[serde(
        rename = "Max_Cells",
        alias = "CELLS_MAX",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_cells: Option<u32>,
    #[serde(rename = "WEIGHT", default, skip_serializing_if = "Option::is_none")]
    pub weight_g: Option<f64>,
    #[serde(rename = "EFFICIENCY", default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(rename = "COST", default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(rename = "BEC_VOLTAGE", default, skip_serializing_if = "Option::is_none")]
    pub bec_voltage_v: Option<f64>,
    #[serde(rename = "BEC_CURRENT", default, skip_serializing_if = "Option::is_none")]
    pub bec_current_a: Option<f64>,
    #[serde(rename = "RESISTANCE", default, skip_serializing_if = "Option::is_none")]
    pub resistance_mohm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_class: Option<String>,
    #[serde(rename = "VERIFIED", default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(rename = "SOURCE", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EscRecord {
    /// Continuous current, falling back to peak / 1.2 when only the peak
    /// rating was published.
    pub fn cont_current(&self) -> Option<f64> {
        self.cont_current_a
            .or_else(|| self.peak_current_a.map(|peak| peak / 1.2))
    }

    /// Peak current, falling back to continuous × 1.2.
    pub fn peak_current(&self) -> Option<f64> {
        self.peak_current_a
            .or_else(|| self.cont_current_a.map(|cont| cont * 1.2))
    }

    /// Minimum input voltage, derived from the cell range when the datasheet
    /// only states cell counts.
    pub fn voltage_min(&self) -> Option<f64> {
        self.voltage_min_v
            .or_else(|| self.min_cells.map(|cells| f64::from(cells) * CELL_VOLTAGE_V))
    }

    /// Maximum input voltage, derived like `voltage_min`.
    pub fn voltage_max(&self) -> Option<f64> {
        self.voltage_max_v
            .or_else(|| self.max_cells.map(|cells| f64::from(cells) * CELL_VOLTAGE_V))
    }

    /// Minimum compatible cell count. Explicit voltage bounds win over the
    /// stated cell range, matching the curation convention.
    pub fn cells_min(&self) -> Option<u32> {
        match self.voltage_min_v {
            Some(v) => Some((v / CELL_VOLTAGE_V).round() as u32),
            None => self.min_cells,
        }
    }

    /// Maximum compatible cell count, derived like `cells_min`.
    pub fn cells_max(&self) -> Option<u32> {
        match self.voltage_max_v {
            Some(v) => Some((v / CELL_VOLTAGE_V).round() as u32),
            None => self.max_cells,
        }
    }

    /// Whether the controller integrates a battery eliminator circuit.
    pub fn has_bec(&self) -> bool {
        self.bec_voltage_v.unwrap_or(0.0) > 0.0
    }

    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// Propeller record. Diameter and pitch in mm, weight in grams, static
/// thrust in N, cost in USD. Early snapshots used lowercase attribute names;
/// the aliases keep those loadable.
pub struct PropellerRecord {
    #[serde(
        rename = "DIAMETER",
        alias = "diameter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub diameter_mm: Option<f64>,
    #[serde(
        rename = "PITCH",
        alias = "pitch",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pitch_mm: Option<f64>,
    #[serde(
        rename = "WEIGHT",
        alias = "weight",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_g: Option<f64>,
    #[serde(rename = "Thrust", default, skip_serializing_if = "Option::is_none")]
    pub thrust_n: Option<f64>,
    #[serde(rename = "COST", default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
}

impl PropellerRecord {
    /// Pitch-to-diameter ratio, the similarity key used by the performance
    /// lookup.
    pub fn pd_ratio(&self) -> Option<f64> {
        match (self.pitch_mm, self.diameter_mm) {
            (Some(pitch), Some(diameter)) if diameter > 0.0 => Some(pitch / diameter),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// Wind-tunnel-derived CT/CP polynomial for one propeller geometry.
///
/// Records are keyed `"<d_mm>x<p_mm>"`. Coefficients are polynomials in the
/// advance ratio J, highest degree first, fit over `j_range`; the r²
/// attributes record the fit quality reported by the curation run.
pub struct PropellerAeroRecord {
    pub d_mm: f64,
    pub p_mm: f64,
    #[serde(default)]
    pub ct_coeffs: Vec<f64>,
    #[serde(default)]
    pub cp_coeffs: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub j_range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ct_r2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp_r2: Option<f64>,
}

impl PropellerAeroRecord {
    /// Advance-ratio range the fit is valid over.
    pub fn j_range(&self) -> [f64; 2] {
        self.j_range.unwrap_or([0.1, 0.8])
    }

    pub fn pd_ratio(&self) -> f64 {
        if self.d_mm > 0.0 {
            self.p_mm / self.d_mm
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// Airfoil polar record. `CL_max`, `CD_0`, induced-drag factor `k` and the
/// pitching moment come from literature or solver runs transcribed during
/// curation; the validated snapshots annotate each record with its method and
/// confidence.
pub struct AirfoilRecord {
    #[serde(
        rename = "CL_max",
        alias = "CL_MAX",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cl_max: Option<f64>,
    #[serde(rename = "CD_0", default, skip_serializing_if = "Option::is_none")]
    pub cd_0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<f64>,
    #[serde(
        rename = "CM",
        alias = "CM_0",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cm: Option<f64>,
    #[serde(rename = "ALPHA_STALL", default, skip_serializing_if = "Option::is_none")]
    pub alpha_stall_deg: Option<f64>,
    #[serde(rename = "CONFIDENCE", default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(rename = "METHOD", default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(
        rename = "REYNOLDS_VALIDATED",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reynolds_validated: Option<f64>,
    #[serde(
        rename = "SOURCE_VALIDATED",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_validated: Option<String>,
}

/// Borrowed view of one component record, tagged by category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComponentRef<'a> {
    Battery(&'a BatteryRecord),
    Motor(&'a MotorRecord),
    Esc(&'a EscRecord),
    Propeller(&'a PropellerRecord),
    PropellerAero(&'a PropellerAeroRecord),
    Airfoil(&'a AirfoilRecord),
}

impl ComponentRef<'_> {
    pub fn category(&self) -> Category {
        match self {
            ComponentRef::Battery(_) => Category::Battery,
            ComponentRef::Motor(_) => Category::Motor,
            ComponentRef::Esc(_) => Category::Esc,
            ComponentRef::Propeller(_) => Category::Propeller,
            ComponentRef::PropellerAero(_) => Category::PropellerAero,
            ComponentRef::Airfoil(_) => Category::Airfoil,
        }
    }
}

/// Read and parse a snapshot from disk without shape or invariant validation.
///
/// `ComponentIndex::load` is the validated entry point; this helper exists
/// for tooling that wants the raw typed document.
pub fn load_catalog_from_path(path: &Path) -> Result<ComponentCatalog, LoadError> {
    let data = fs::read_to_string(path).map_err(|source| LoadError::io(path, source))?;
    serde_json::from_str(&data).map_err(|source| LoadError::parse(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn battery_derived_quantities() {
        let record: BatteryRecord = serde_json::from_value(json!({
            "CAPACITY": 16000.0,
            "VOLTAGE": 22.2,
            "WEIGHT": 1950.0,
            "CONT_DISCHARGE_RATE": 15.0,
            "COST": 189.0
        }))
        .unwrap();
        assert_eq!(record.cells(), Some(6));

        let three_s: BatteryRecord =
            serde_json::from_value(json!({"VOLTAGE": 11.1})).unwrap();
        assert_eq!(three_s.cells(), Some(3));
        let energy = record.energy_wh().unwrap();
        assert!((energy - 355.2).abs() < 1e-9);
        let power = record.cont_power_w().unwrap();
        assert!((power - 5328.0).abs() < 1e-9);
    }

    #[test]
    fn battery_partial_record_stays_partial() {
        let record: BatteryRecord =
            serde_json::from_value(json!({"CAPACITY": 5000.0, "VOLTAGE": 14.8})).unwrap();
        assert_eq!(record.weight_g, None);
        assert_eq!(record.cost_usd, None);
        // 1C fallback applies only inside the derived accessor.
        assert!(record.c_rate.is_none());
        assert!(record.cont_power_w().is_some());
    }

    #[test]
    fn esc_fallbacks_mirror_curation_convention() {
        let peak_only: EscRecord =
            serde_json::from_value(json!({"PEAK_CURRENT": 60.0})).unwrap();
        assert!((peak_only.cont_current().unwrap() - 50.0).abs() < 1e-9);

        let cells_only: EscRecord =
            serde_json::from_value(json!({"Min_Cells": 3, "Max_Cells": 6})).unwrap();
        assert!((cells_only.voltage_min().unwrap() - 11.1).abs() < 1e-9);
        assert!((cells_only.voltage_max().unwrap() - 22.2).abs() < 1e-9);
        assert_eq!(cells_only.cells_min(), Some(3));

        let voltage_wins: EscRecord = serde_json::from_value(json!({
            "VOLTAGE_MIN": 14.8,
            "Min_Cells": 3
        }))
        .unwrap();
        assert_eq!(voltage_wins.cells_min(), Some(4));
    }

    #[test]
    fn esc_accepts_v2_cell_aliases() {
        let record: EscRecord =
            serde_json::from_value(json!({"CELLS_MIN": 2, "CELLS_MAX": 8})).unwrap();
        assert_eq!(record.min_cells, Some(2));
        assert_eq!(record.max_cells, Some(8));
    }

    #[test]
    fn propeller_accepts_lowercase_aliases() {
        let record: PropellerRecord =
            serde_json::from_value(json!({"diameter": 330.0, "pitch": 254.0})).unwrap();
        assert_eq!(record.diameter_mm, Some(330.0));
        let ratio = record.pd_ratio().unwrap();
        assert!((ratio - 254.0 / 330.0).abs() < 1e-12);
    }

    #[test]
    fn airfoil_accepts_both_spelling_conventions() {
        let record: AirfoilRecord = serde_json::from_value(json!({
            "CL_MAX": 1.30,
            "CD_0": 0.0055,
            "CM_0": 0.0,
            "ALPHA_STALL": 15.0,
            "CONFIDENCE": "high"
        }))
        .unwrap();
        assert_eq!(record.cl_max, Some(1.30));
        assert_eq!(record.cm, Some(0.0));
        assert_eq!(record.confidence, Some(Confidence::High));
    }

    #[test]
    fn catalog_rejects_unknown_top_level_keys() {
        let result: Result<ComponentCatalog, _> =
            serde_json::from_value(json!({"Payloads": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn catalog_accepts_metadata_and_replacements() {
        let catalog: ComponentCatalog = serde_json::from_value(json!({
            "Battery": {"A": {"CAPACITY": 5000.0}},
            "_metadata": {
                "version": "v1.1.0",
                "validation_date": "2026-02-24",
                "changes": ["ESC: Added VERIFIED field"]
            },
            "model_replacements": {"T_Motor_AT2312": "T_Motor_AT2317"}
        }))
        .unwrap();
        let metadata = catalog.metadata.as_ref().unwrap();
        assert_eq!(metadata.version, "v1.1.0");
        assert_eq!(catalog.model_replacements.len(), 1);
        assert_eq!(catalog.total_components(), 1);
    }

    #[test]
    fn record_serialization_omits_absent_fields() {
        let record: BatteryRecord =
            serde_json::from_value(json!({"CAPACITY": 5000.0, "VOLTAGE": 14.8})).unwrap();
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json!({"CAPACITY": 5000.0, "VOLTAGE": 14.8}));
    }
}
