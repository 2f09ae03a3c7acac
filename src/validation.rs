//! Cross-checks between catalog records and reference sources.
//!
//! Used by guard-rail tests and the stats helper to ensure committed records
//! stay in agreement with the literature table and with their own stated
//! ranges. Checks return a list of findings rather than short-circuiting so
//! callers can surface every problem in a snapshot at once. Findings are
//! informational; nothing here filters records.

use crate::airfoil::{self, EstimateMethod};
use crate::catalog::ComponentCatalog;

/// Relative tolerance for literature comparisons.
pub const LITERATURE_TOLERANCE: f64 = 0.05;

/// Compare committed airfoil polars against the literature table.
///
/// Only airfoils with a literature entry are checked; solver-derived records
/// have no independent reference here.
pub fn check_airfoils_against_literature(
    catalog: &ComponentCatalog,
    tolerance: f64,
) -> Vec<String> {
    let mut findings = Vec::new();
    for (name, record) in catalog.airfoils.iter() {
        let Some(reference) = airfoil::literature_polar(name) else {
            continue;
        };
        debug_assert_eq!(reference.method, EstimateMethod::Literature);

        if let Some(cl_max) = record.cl_max {
            if relative_error(cl_max, reference.cl_max) > tolerance {
                findings.push(format!(
                    "Airfoil '{name}': CL_max {cl_max} disagrees with literature {}",
                    reference.cl_max
                ));
            }
        }
        if let Some(cd_0) = record.cd_0 {
            if relative_error(cd_0, reference.cd_0) > tolerance {
                findings.push(format!(
                    "Airfoil '{name}': CD_0 {cd_0} disagrees with literature {}",
                    reference.cd_0
                ));
            }
        }
    }
    findings
}

/// Check that stated cell ranges are coherent across motors and ESCs, and
/// that ESC voltage windows are ordered.
pub fn check_cell_ranges(catalog: &ComponentCatalog) -> Vec<String> {
    let mut findings = Vec::new();

    for (name, motor) in catalog.motors.iter() {
        if let (Some(min), Some(max)) = (motor.min_cells, motor.max_cells) {
            if min > max {
                findings.push(format!(
                    "Motor '{name}': cell range {min}S-{max}S is inverted"
                ));
            }
        }
    }

    for (name, esc) in catalog.escs.iter() {
        if let (Some(min), Some(max)) = (esc.min_cells, esc.max_cells) {
            if min > max {
                findings.push(format!("ESC '{name}': cell range {min}S-{max}S is inverted"));
            }
        }
        if let (Some(vmin), Some(vmax)) = (esc.voltage_min_v, esc.voltage_max_v) {
            if vmin > vmax {
                findings.push(format!(
                    "ESC '{name}': voltage window {vmin}V-{vmax}V is inverted"
                ));
            }
        }
    }

    findings
}

fn relative_error(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        value.abs()
    } else {
        (value - reference).abs() / reference.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literature_check_flags_divergent_polars() {
        let catalog: ComponentCatalog = serde_json::from_value(json!({
            "Airfoil": {
                "NACA_0012": {"CL_max": 1.30, "CD_0": 0.0055},
                "NACA_4412": {"CL_max": 2.40, "CD_0": 0.0062},
                "Custom_Section": {"CL_max": 9.0}
            }
        }))
        .unwrap();

        let findings = check_airfoils_against_literature(&catalog, LITERATURE_TOLERANCE);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("NACA_4412"));
        assert!(findings[0].contains("CL_max"));
    }

    #[test]
    fn cell_range_check_flags_inversions() {
        let catalog: ComponentCatalog = serde_json::from_value(json!({
            "Motor": {
                "Good": {"Min_Cells": 3, "Max_Cells": 6},
                "Bad": {"Min_Cells": 8, "Max_Cells": 4}
            },
            "ESC": {
                "Window": {"VOLTAGE_MIN": 25.2, "VOLTAGE_MAX": 11.1}
            }
        }))
        .unwrap();

        let findings = check_cell_ranges(&catalog);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().any(|f| f.contains("Motor 'Bad'")));
        assert!(findings.iter().any(|f| f.contains("ESC 'Window'")));
    }

    #[test]
    fn clean_catalog_has_no_findings() {
        let catalog: ComponentCatalog = serde_json::from_value(json!({
            "Airfoil": {"Clark_Y": {"CL_max": 1.45, "CD_0": 0.0065}},
            "ESC": {"OK": {"Min_Cells": 3, "Max_Cells": 6}}
        }))
        .unwrap();
        assert!(check_airfoils_against_literature(&catalog, LITERATURE_TOLERANCE).is_empty());
        assert!(check_cell_ranges(&catalog).is_empty());
    }
}
